use super::fields::FieldError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// `OPTIONS` lists the stored labels in display order for select inputs.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const OPTIONS: &'static [&'static str] = &[$($s),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = FieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(FieldError::new(
                        stringify!($name),
                        format!("'{s}' is not a valid option"),
                    )),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "Male",
    Female => "Female",
    Other => "Other",
});

str_enum!(MaritalStatus {
    Single => "Single",
    Married => "Married",
    Divorced => "Divorced",
    Widowed => "Widowed",
    Other => "Other",
});

str_enum!(BillingType {
    Cash => "Cash",
    Insurance => "Insurance",
    ThirdParty => "Third-party / Corporate",
});

str_enum!(ClaimType {
    Cashless => "Cashless",
    Reimbursement => "Reimbursement",
});

str_enum!(Qualification {
    Mbbs => "MBBS",
    Md => "MD",
    Ms => "MS",
    Dnb => "DNB",
    Bds => "BDS",
    Other => "Other",
});

str_enum!(DoctorType {
    Visiting => "Visiting",
    FullTime => "Full-time",
    Consultant => "Consultant",
    Surgeon => "Surgeon",
    DutyDoctor => "Duty Doctor",
});

str_enum!(Department {
    GeneralMedicine => "General Medicine",
    Surgery => "Surgery",
    Orthopedics => "Orthopedics",
    Neurology => "Neurology",
    Pediatrics => "Pediatrics",
    Cardiology => "Cardiology",
    Gynecology => "Gynecology",
    Dermatology => "Dermatology",
    Ent => "ENT",
    Ophthalmology => "Ophthalmology",
    Other => "Other",
});

str_enum!(DoctorStatus {
    Active => "Active",
    Inactive => "Inactive",
});

str_enum!(RoundFrequency {
    OnceDaily => "Once Daily",
    TwiceDaily => "Twice Daily",
    AsRequired => "As Required",
});

str_enum!(PaymentMode {
    Cash => "Cash",
    BankTransfer => "Bank Transfer",
    Upi => "UPI",
});

str_enum!(DoctorRole {
    Doctor => "Doctor",
});

str_enum!(AccessLevel {
    OpdOnly => "OPD-only",
    IpdOnly => "IPD-only",
    Full => "Full access",
});
