//! Registration form layout: tabs, their fields and how each is checked.
//!
//! The catalog is the single list of what a browser may submit for an
//! entity. It drives rendering, mandatory-field checks and the mapping
//! from a bad field back to the tab it sits on.

use crate::models::enums::{
    AccessLevel, BillingType, ClaimType, Department, DoctorRole, DoctorStatus, DoctorType, Gender,
    MaritalStatus, PaymentMode, Qualification, RoundFrequency,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Select(&'static [&'static str]),
    Date,
    /// A date that may not lie in the future.
    BirthDate,
    /// Whole number, zero or more.
    Number,
    Tel,
    Email,
    Checkbox,
    Password,
    /// `HH:MM-HH:MM`
    TimeRange,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug)]
pub struct Tab {
    pub key: &'static str,
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug)]
pub struct FormCatalog {
    pub entity: &'static str,
    pub tabs: &'static [Tab],
}

impl FormCatalog {
    pub fn fields(&self) -> impl Iterator<Item = (&'static Tab, &'static FieldSpec)> + '_ {
        self.tabs
            .iter()
            .flat_map(|tab| tab.fields.iter().map(move |field| (tab, field)))
    }

    pub fn lookup(&self, name: &str) -> Option<(&'static Tab, &'static FieldSpec)> {
        self.fields().find(|(_, field)| field.name == name)
    }
}

const fn opt(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: false,
    }
}

const fn req(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: true,
    }
}

use FieldKind::*;

pub static PATIENT_FORM: FormCatalog = FormCatalog {
    entity: "Patient",
    tabs: &[
        Tab {
            key: "personal",
            label: "1. Personal Information",
            fields: &[
                req("full_name", "Full Name", Text),
                req("gender", "Gender", Select(Gender::OPTIONS)),
                opt("dob", "Date of Birth", BirthDate),
                opt("age", "Age (filled from Date of Birth)", Number),
                opt("blood_group", "Blood Group", Text),
                opt("marital_status", "Marital Status", Select(MaritalStatus::OPTIONS)),
                opt("photo_url", "Photo URL", Text),
            ],
        },
        Tab {
            key: "contact",
            label: "2. Contact Details",
            fields: &[
                req("mobile_primary", "Mobile Number (Primary)", Tel),
                opt("mobile_alternate", "Alternate Number", Tel),
                opt("email", "Email", Email),
                opt("address_permanent", "Permanent Address", TextArea),
                opt("address_local", "Local Address", TextArea),
            ],
        },
        Tab {
            key: "identification",
            label: "3. Identification Details",
            fields: &[
                opt("aadhar_number", "Aadhar Number", Text),
                opt("pan_number", "PAN", Text),
                opt("govt_id_upload", "Government ID Upload (URL / reference)", Text),
            ],
        },
        Tab {
            key: "emergency",
            label: "4. Emergency Contacts",
            fields: &[
                opt("emergency_name_1", "Contact 1: Name", Text),
                opt("emergency_relationship_1", "Contact 1: Relationship", Text),
                opt("emergency_mobile_1", "Contact 1: Mobile Number", Tel),
                opt("emergency_address_1", "Contact 1: Address", TextArea),
                opt("emergency_name_2", "Contact 2: Name", Text),
                opt("emergency_relationship_2", "Contact 2: Relationship", Text),
                opt("emergency_mobile_2", "Contact 2: Mobile Number", Tel),
                opt("emergency_address_2", "Contact 2: Address", TextArea),
            ],
        },
        Tab {
            key: "treatment",
            label: "5. Treatment",
            fields: &[
                opt("diagnosis", "Diagnosis", TextArea),
                opt("treatment_for", "Treatment For", TextArea),
                opt("procedures_planned", "Procedures Planned", TextArea),
                opt("tests_recommended", "Tests Recommended", TextArea),
            ],
        },
        Tab {
            key: "medical",
            label: "6. Medical Background",
            fields: &[
                opt("allergies", "Allergies", TextArea),
                opt("existing_conditions", "Existing Conditions", TextArea),
                opt("past_surgeries", "Past Surgeries / Hospitalizations", TextArea),
                opt("current_medication", "Current Medication", TextArea),
                opt("family_history", "Family Medical History", TextArea),
                opt("habits", "Smoking/Alcohol Habits", TextArea),
            ],
        },
        Tab {
            key: "insurance",
            label: "7. Insurance / Billing Info",
            fields: &[
                req("billing_type", "Billing Type", Select(BillingType::OPTIONS)),
                opt("insurance_provider", "Insurance Provider", Text),
                opt("policy_number", "Policy Number", Text),
                opt("tpa_details", "TPA Details", TextArea),
                opt("claim_type", "Claim Type", Select(ClaimType::OPTIONS)),
            ],
        },
        Tab {
            key: "consent",
            label: "8. Consent & Legal",
            fields: &[
                opt("treatment_consent", "Treatment Consent", Checkbox),
                opt("surgery_consent", "Surgery Consent", Checkbox),
                opt("privacy_consent", "Privacy / PDPA consent", Checkbox),
                opt("guardian_details", "Guardian/Parent Details (for minors)", TextArea),
            ],
        },
    ],
};

pub static DOCTOR_FORM: FormCatalog = FormCatalog {
    entity: "Doctor",
    tabs: &[
        Tab {
            key: "personal",
            label: "1. Personal Details",
            fields: &[
                req("full_name", "Full Name", Text),
                req("gender", "Gender", Select(Gender::OPTIONS)),
                opt("dob", "Date of Birth", BirthDate),
                opt("age", "Age (filled from Date of Birth)", Number),
                req("contact_primary", "Contact Number (Primary)", Tel),
                opt("contact_alternate", "Alternate Number", Tel),
                opt("email", "Email", Email),
                opt("address", "Address", TextArea),
                opt("photo_url", "Photo URL", Text),
            ],
        },
        Tab {
            key: "professional",
            label: "2. Professional / Qualification Details",
            fields: &[
                req("qualification", "Qualification", Select(Qualification::OPTIONS)),
                req("specialization", "Specialization", Text),
                opt("sub_specialization", "Sub-specialization", Text),
                req("registration_number", "Registration Number (Medical Council)", Text),
                opt("experience_years", "Experience (Years)", Number),
                opt("fellowships", "Fellowships / Additional Certifications", TextArea),
            ],
        },
        Tab {
            key: "employment",
            label: "3. Employment / Hospital Details",
            fields: &[
                req("doctor_type", "Doctor Type", Select(DoctorType::OPTIONS)),
                req("department", "Department", Select(Department::OPTIONS)),
                opt("joining_date", "Joining Date", Date),
                req("status", "Status", Select(DoctorStatus::OPTIONS)),
            ],
        },
        Tab {
            key: "consultation",
            label: "4. Consultation & Service Details",
            fields: &[
                opt("opd_fee_initial", "OPD Consultation Fee (Initial)", Number),
                opt("opd_fee_followup", "Follow-up Fee", Number),
                opt("opd_max_patients", "Max Patients per day", Number),
                opt("ipd_visit_charge", "IPD Visit Charge", Number),
                opt("icu_visit_charge", "ICU Visit Charge", Number),
                opt("round_frequency", "Round Visit Frequency", Select(RoundFrequency::OPTIONS)),
                opt("surgery_fee", "Surgery Fee", Number),
                opt("ot_eligibility", "OT Eligibility", Checkbox),
                opt("surgery_types", "Surgery Types Handled", TextArea),
            ],
        },
        Tab {
            key: "availability",
            label: "5. Availability / Scheduling",
            fields: &[
                opt("schedule_mon", "Monday (HH:MM-HH:MM)", TimeRange),
                opt("schedule_tue", "Tuesday (HH:MM-HH:MM)", TimeRange),
                opt("schedule_wed", "Wednesday (HH:MM-HH:MM)", TimeRange),
                opt("schedule_thu", "Thursday (HH:MM-HH:MM)", TimeRange),
                opt("schedule_fri", "Friday (HH:MM-HH:MM)", TimeRange),
                opt("schedule_sat", "Saturday (HH:MM-HH:MM)", TimeRange),
                opt("schedule_sun", "Sunday (HH:MM-HH:MM)", TimeRange),
                opt("locations", "Locations (multiple branches)", TextArea),
                opt("emergency_oncall", "Emergency On-Call Availability", Checkbox),
                opt("leaves_offdays", "Leaves / Off days", TextArea),
            ],
        },
        Tab {
            key: "banking",
            label: "6. Banking & Payroll",
            fields: &[
                opt("bank_account", "Bank Account Number", Text),
                opt("ifsc_code", "IFSC Code", Text),
                opt("pan_number", "PAN Number", Text),
                opt("upi_id", "UPI ID", Text),
                opt("payment_mode", "Payment Mode", Select(PaymentMode::OPTIONS)),
            ],
        },
        Tab {
            key: "login",
            label: "7. Login / Access",
            fields: &[
                opt("username", "Username", Text),
                opt("password", "Password (leave blank to keep)", Password),
                opt("role", "Role", Select(DoctorRole::OPTIONS)),
                opt("access_level", "Access Level", Select(AccessLevel::OPTIONS)),
            ],
        },
    ],
};
