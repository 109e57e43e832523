use chrono::NaiveDate;

use super::enums::{
    AccessLevel, Department, DoctorRole, DoctorStatus, DoctorType, Gender, PaymentMode,
    Qualification, RoundFrequency,
};
use super::fields::{FieldError, FieldMap, DATE_FORMAT};
use super::schedule::WeeklySchedule;

/// Prefix of the doctor identifier, e.g. `D0001`.
pub const DOCTOR_ID_PREFIX: &str = "D";

/// Column order of the doctors sheet.
pub const DOCTOR_COLUMNS: &[&str] = &[
    "ID",
    // personal
    "full_name",
    "gender",
    "dob",
    "age",
    "contact_primary",
    "contact_alternate",
    "email",
    "address",
    "photo_url",
    // professional
    "qualification",
    "specialization",
    "sub_specialization",
    "registration_number",
    "experience_years",
    "fellowships",
    // employment
    "doctor_type",
    "department",
    "joining_date",
    "status",
    // consultation
    "opd_fee_initial",
    "opd_fee_followup",
    "opd_max_patients",
    "ipd_visit_charge",
    "icu_visit_charge",
    "round_frequency",
    "surgery_fee",
    "ot_eligibility",
    "surgery_types",
    // availability
    "schedule_mon",
    "schedule_tue",
    "schedule_wed",
    "schedule_thu",
    "schedule_fri",
    "schedule_sat",
    "schedule_sun",
    "locations",
    "emergency_oncall",
    "leaves_offdays",
    // banking
    "bank_account",
    "ifsc_code",
    "pan_number",
    "upi_id",
    "payment_mode",
    // login
    "username",
    "password_hash",
    "role",
    "access_level",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    pub id: String,
    pub personal: DoctorPersonal,
    pub professional: Professional,
    pub employment: Employment,
    pub consultation: Consultation,
    pub availability: Availability,
    pub banking: Banking,
    pub login: LoginAccess,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorPersonal {
    pub full_name: String,
    pub gender: Gender,
    pub dob: Option<NaiveDate>,
    pub age: Option<u32>,
    pub contact_primary: String,
    pub contact_alternate: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Professional {
    pub qualification: Qualification,
    pub specialization: String,
    pub sub_specialization: Option<String>,
    /// Medical council registration; unique across the doctors sheet.
    pub registration_number: String,
    pub experience_years: Option<u32>,
    pub fellowships: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employment {
    pub doctor_type: DoctorType,
    pub department: Department,
    pub joining_date: Option<NaiveDate>,
    pub status: DoctorStatus,
}

/// Fees are whole currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consultation {
    pub opd_fee_initial: Option<u32>,
    pub opd_fee_followup: Option<u32>,
    pub opd_max_patients: Option<u32>,
    pub ipd_visit_charge: Option<u32>,
    pub icu_visit_charge: Option<u32>,
    pub round_frequency: Option<RoundFrequency>,
    pub surgery_fee: Option<u32>,
    pub ot_eligibility: bool,
    pub surgery_types: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    pub weekly_schedule: WeeklySchedule,
    pub locations: Option<String>,
    pub emergency_oncall: bool,
    pub leaves_offdays: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banking {
    pub bank_account: Option<String>,
    pub ifsc_code: Option<String>,
    pub pan_number: Option<String>,
    pub upi_id: Option<String>,
    pub payment_mode: Option<PaymentMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginAccess {
    pub username: Option<String>,
    /// PHC-style PBKDF2 hash; the plain password is never stored.
    pub password_hash: Option<String>,
    pub role: Option<DoctorRole>,
    pub access_level: Option<AccessLevel>,
}

impl Doctor {
    pub fn from_fields(fields: &FieldMap) -> Result<Self, FieldError> {
        Ok(Self {
            id: fields.required("ID")?,
            personal: DoctorPersonal {
                full_name: fields.required("full_name")?,
                gender: fields.parse_required("gender")?,
                dob: fields.date("dob")?,
                age: fields.parse("age")?,
                contact_primary: fields.required("contact_primary")?,
                contact_alternate: fields.opt("contact_alternate"),
                email: fields.opt("email"),
                address: fields.opt("address"),
                photo_url: fields.opt("photo_url"),
            },
            professional: Professional {
                qualification: fields.parse_required("qualification")?,
                specialization: fields.required("specialization")?,
                sub_specialization: fields.opt("sub_specialization"),
                registration_number: fields.required("registration_number")?,
                experience_years: fields.parse("experience_years")?,
                fellowships: fields.opt("fellowships"),
            },
            employment: Employment {
                doctor_type: fields.parse_required("doctor_type")?,
                department: fields.parse_required("department")?,
                joining_date: fields.date("joining_date")?,
                status: fields.parse_required("status")?,
            },
            consultation: Consultation {
                opd_fee_initial: fields.parse("opd_fee_initial")?,
                opd_fee_followup: fields.parse("opd_fee_followup")?,
                opd_max_patients: fields.parse("opd_max_patients")?,
                ipd_visit_charge: fields.parse("ipd_visit_charge")?,
                icu_visit_charge: fields.parse("icu_visit_charge")?,
                round_frequency: fields.parse("round_frequency")?,
                surgery_fee: fields.parse("surgery_fee")?,
                ot_eligibility: fields.flag("ot_eligibility"),
                surgery_types: fields.opt("surgery_types"),
            },
            availability: Availability {
                weekly_schedule: WeeklySchedule::read_fields(fields)?,
                locations: fields.opt("locations"),
                emergency_oncall: fields.flag("emergency_oncall"),
                leaves_offdays: fields.opt("leaves_offdays"),
            },
            banking: Banking {
                bank_account: fields.opt("bank_account"),
                ifsc_code: fields.opt("ifsc_code"),
                pan_number: fields.opt("pan_number"),
                upi_id: fields.opt("upi_id"),
                payment_mode: fields.parse("payment_mode")?,
            },
            login: LoginAccess {
                username: fields.opt("username"),
                password_hash: fields.opt("password_hash"),
                role: fields.parse("role")?,
                access_level: fields.parse("access_level")?,
            },
        })
    }

    /// Every column of `DOCTOR_COLUMNS`, blanks included.
    pub fn to_fields(&self) -> FieldMap {
        let mut f = FieldMap::new();
        f.set("ID", self.id.as_str());

        let p = &self.personal;
        f.set("full_name", p.full_name.as_str());
        f.set("gender", p.gender.as_str());
        f.set_opt("dob", p.dob.map(|d| d.format(DATE_FORMAT)));
        f.set_opt("age", p.age);
        f.set("contact_primary", p.contact_primary.as_str());
        f.set_opt("contact_alternate", p.contact_alternate.as_ref());
        f.set_opt("email", p.email.as_ref());
        f.set_opt("address", p.address.as_ref());
        f.set_opt("photo_url", p.photo_url.as_ref());

        let pr = &self.professional;
        f.set("qualification", pr.qualification.as_str());
        f.set("specialization", pr.specialization.as_str());
        f.set_opt("sub_specialization", pr.sub_specialization.as_ref());
        f.set("registration_number", pr.registration_number.as_str());
        f.set_opt("experience_years", pr.experience_years);
        f.set_opt("fellowships", pr.fellowships.as_ref());

        let e = &self.employment;
        f.set("doctor_type", e.doctor_type.as_str());
        f.set("department", e.department.as_str());
        f.set_opt("joining_date", e.joining_date.map(|d| d.format(DATE_FORMAT)));
        f.set("status", e.status.as_str());

        let c = &self.consultation;
        f.set_opt("opd_fee_initial", c.opd_fee_initial);
        f.set_opt("opd_fee_followup", c.opd_fee_followup);
        f.set_opt("opd_max_patients", c.opd_max_patients);
        f.set_opt("ipd_visit_charge", c.ipd_visit_charge);
        f.set_opt("icu_visit_charge", c.icu_visit_charge);
        f.set_opt("round_frequency", c.round_frequency);
        f.set_opt("surgery_fee", c.surgery_fee);
        f.set_flag("ot_eligibility", c.ot_eligibility);
        f.set_opt("surgery_types", c.surgery_types.as_ref());

        let a = &self.availability;
        a.weekly_schedule.write_fields(&mut f);
        f.set_opt("locations", a.locations.as_ref());
        f.set_flag("emergency_oncall", a.emergency_oncall);
        f.set_opt("leaves_offdays", a.leaves_offdays.as_ref());

        let b = &self.banking;
        f.set_opt("bank_account", b.bank_account.as_ref());
        f.set_opt("ifsc_code", b.ifsc_code.as_ref());
        f.set_opt("pan_number", b.pan_number.as_ref());
        f.set_opt("upi_id", b.upi_id.as_ref());
        f.set_opt("payment_mode", b.payment_mode);

        let l = &self.login;
        f.set_opt("username", l.username.as_ref());
        f.set_opt("password_hash", l.password_hash.as_ref());
        f.set_opt("role", l.role);
        f.set_opt("access_level", l.access_level);

        f
    }
}
