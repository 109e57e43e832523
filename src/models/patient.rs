use chrono::NaiveDate;

use super::enums::{BillingType, ClaimType, Gender, MaritalStatus};
use super::fields::{FieldError, FieldMap, DATE_FORMAT};

/// Prefix of the Medical Record Number, e.g. `P0001`.
pub const MRN_PREFIX: &str = "P";

/// Emergency contacts are stored as repeated column groups.
pub const MAX_EMERGENCY_CONTACTS: usize = 2;

/// Column order of the patients sheet. `ID` holds the MRN.
pub const PATIENT_COLUMNS: &[&str] = &[
    "ID",
    // personal
    "full_name",
    "gender",
    "dob",
    "age",
    "blood_group",
    "marital_status",
    "photo_url",
    // contact
    "mobile_primary",
    "mobile_alternate",
    "email",
    "address_permanent",
    "address_local",
    // identification
    "aadhar_number",
    "pan_number",
    "govt_id_upload",
    // emergency
    "emergency_name_1",
    "emergency_relationship_1",
    "emergency_mobile_1",
    "emergency_address_1",
    "emergency_name_2",
    "emergency_relationship_2",
    "emergency_mobile_2",
    "emergency_address_2",
    // medical
    "allergies",
    "existing_conditions",
    "past_surgeries",
    "current_medication",
    "family_history",
    "habits",
    // treatment
    "diagnosis",
    "treatment_for",
    "procedures_planned",
    "tests_recommended",
    // insurance
    "billing_type",
    "insurance_provider",
    "policy_number",
    "tpa_details",
    "claim_type",
    // consent
    "treatment_consent",
    "surgery_consent",
    "privacy_consent",
    "guardian_details",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub mrn: String,
    pub personal: PatientPersonal,
    pub contact: PatientContact,
    pub identification: Identification,
    pub emergency_contacts: Vec<EmergencyContact>,
    pub medical: MedicalBackground,
    pub treatment: TreatmentPlan,
    pub insurance: InsuranceInfo,
    pub consent: Consent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientPersonal {
    pub full_name: String,
    pub gender: Gender,
    pub dob: Option<NaiveDate>,
    /// Derived from `dob` on every save; entered by hand only when `dob` is unknown.
    pub age: Option<u32>,
    pub blood_group: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientContact {
    pub mobile_primary: String,
    pub mobile_alternate: Option<String>,
    pub email: Option<String>,
    pub address_permanent: Option<String>,
    pub address_local: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identification {
    pub aadhar_number: Option<String>,
    pub pan_number: Option<String>,
    pub govt_id_upload: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: Option<String>,
    pub mobile: String,
    pub address: Option<String>,
}

/// Column / form field name for slot `n` (1-based), e.g. `emergency_mobile_2`.
pub fn emergency_field(field: &str, slot: usize) -> String {
    format!("emergency_{field}_{slot}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicalBackground {
    pub allergies: Option<String>,
    pub existing_conditions: Option<String>,
    pub past_surgeries: Option<String>,
    pub current_medication: Option<String>,
    pub family_history: Option<String>,
    pub habits: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreatmentPlan {
    pub diagnosis: Option<String>,
    pub treatment_for: Option<String>,
    pub procedures_planned: Option<String>,
    pub tests_recommended: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsuranceInfo {
    pub billing_type: BillingType,
    pub insurance_provider: Option<String>,
    pub policy_number: Option<String>,
    pub tpa_details: Option<String>,
    pub claim_type: Option<ClaimType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consent {
    pub treatment_consent: bool,
    pub surgery_consent: bool,
    pub privacy_consent: bool,
    pub guardian_details: Option<String>,
}

impl Patient {
    /// Build a patient from named cells. The MRN comes from the `ID` cell.
    pub fn from_fields(fields: &FieldMap) -> Result<Self, FieldError> {
        let mut emergency_contacts = Vec::new();
        for slot in 1..=MAX_EMERGENCY_CONTACTS {
            if let Some(contact) = EmergencyContact::read_slot(fields, slot)? {
                emergency_contacts.push(contact);
            }
        }

        Ok(Self {
            mrn: fields.required("ID")?,
            personal: PatientPersonal {
                full_name: fields.required("full_name")?,
                gender: fields.parse_required("gender")?,
                dob: fields.date("dob")?,
                age: fields.parse("age")?,
                blood_group: fields.opt("blood_group"),
                marital_status: fields.parse("marital_status")?,
                photo_url: fields.opt("photo_url"),
            },
            contact: PatientContact {
                mobile_primary: fields.required("mobile_primary")?,
                mobile_alternate: fields.opt("mobile_alternate"),
                email: fields.opt("email"),
                address_permanent: fields.opt("address_permanent"),
                address_local: fields.opt("address_local"),
            },
            identification: Identification {
                aadhar_number: fields.opt("aadhar_number"),
                pan_number: fields.opt("pan_number"),
                govt_id_upload: fields.opt("govt_id_upload"),
            },
            emergency_contacts,
            medical: MedicalBackground {
                allergies: fields.opt("allergies"),
                existing_conditions: fields.opt("existing_conditions"),
                past_surgeries: fields.opt("past_surgeries"),
                current_medication: fields.opt("current_medication"),
                family_history: fields.opt("family_history"),
                habits: fields.opt("habits"),
            },
            treatment: TreatmentPlan {
                diagnosis: fields.opt("diagnosis"),
                treatment_for: fields.opt("treatment_for"),
                procedures_planned: fields.opt("procedures_planned"),
                tests_recommended: fields.opt("tests_recommended"),
            },
            insurance: InsuranceInfo {
                billing_type: fields.parse_required("billing_type")?,
                insurance_provider: fields.opt("insurance_provider"),
                policy_number: fields.opt("policy_number"),
                tpa_details: fields.opt("tpa_details"),
                claim_type: fields.parse("claim_type")?,
            },
            consent: Consent {
                treatment_consent: fields.flag("treatment_consent"),
                surgery_consent: fields.flag("surgery_consent"),
                privacy_consent: fields.flag("privacy_consent"),
                guardian_details: fields.opt("guardian_details"),
            },
        })
    }

    /// Every column of `PATIENT_COLUMNS`, blanks included.
    pub fn to_fields(&self) -> FieldMap {
        let mut f = FieldMap::new();
        f.set("ID", self.mrn.as_str());

        let p = &self.personal;
        f.set("full_name", p.full_name.as_str());
        f.set("gender", p.gender.as_str());
        f.set_opt("dob", p.dob.map(|d| d.format(DATE_FORMAT)));
        f.set_opt("age", p.age);
        f.set_opt("blood_group", p.blood_group.as_ref());
        f.set_opt("marital_status", p.marital_status);
        f.set_opt("photo_url", p.photo_url.as_ref());

        let c = &self.contact;
        f.set("mobile_primary", c.mobile_primary.as_str());
        f.set_opt("mobile_alternate", c.mobile_alternate.as_ref());
        f.set_opt("email", c.email.as_ref());
        f.set_opt("address_permanent", c.address_permanent.as_ref());
        f.set_opt("address_local", c.address_local.as_ref());

        let i = &self.identification;
        f.set_opt("aadhar_number", i.aadhar_number.as_ref());
        f.set_opt("pan_number", i.pan_number.as_ref());
        f.set_opt("govt_id_upload", i.govt_id_upload.as_ref());

        for slot in 1..=MAX_EMERGENCY_CONTACTS {
            let contact = self.emergency_contacts.get(slot - 1);
            EmergencyContact::write_slot(contact, &mut f, slot);
        }

        let m = &self.medical;
        f.set_opt("allergies", m.allergies.as_ref());
        f.set_opt("existing_conditions", m.existing_conditions.as_ref());
        f.set_opt("past_surgeries", m.past_surgeries.as_ref());
        f.set_opt("current_medication", m.current_medication.as_ref());
        f.set_opt("family_history", m.family_history.as_ref());
        f.set_opt("habits", m.habits.as_ref());

        let t = &self.treatment;
        f.set_opt("diagnosis", t.diagnosis.as_ref());
        f.set_opt("treatment_for", t.treatment_for.as_ref());
        f.set_opt("procedures_planned", t.procedures_planned.as_ref());
        f.set_opt("tests_recommended", t.tests_recommended.as_ref());

        let ins = &self.insurance;
        f.set("billing_type", ins.billing_type.as_str());
        f.set_opt("insurance_provider", ins.insurance_provider.as_ref());
        f.set_opt("policy_number", ins.policy_number.as_ref());
        f.set_opt("tpa_details", ins.tpa_details.as_ref());
        f.set_opt("claim_type", ins.claim_type);

        let con = &self.consent;
        f.set_flag("treatment_consent", con.treatment_consent);
        f.set_flag("surgery_consent", con.surgery_consent);
        f.set_flag("privacy_consent", con.privacy_consent);
        f.set_opt("guardian_details", con.guardian_details.as_ref());

        f
    }
}

impl EmergencyContact {
    /// `None` when every cell of the slot is blank.
    fn read_slot(fields: &FieldMap, slot: usize) -> Result<Option<Self>, FieldError> {
        let name = fields.opt(&emergency_field("name", slot));
        let relationship = fields.opt(&emergency_field("relationship", slot));
        let mobile = fields.opt(&emergency_field("mobile", slot));
        let address = fields.opt(&emergency_field("address", slot));

        if name.is_none() && relationship.is_none() && mobile.is_none() && address.is_none() {
            return Ok(None);
        }

        Ok(Some(Self {
            name: name.ok_or_else(|| {
                FieldError::new(emergency_field("name", slot), "is required for an emergency contact")
            })?,
            relationship,
            mobile: mobile.ok_or_else(|| {
                FieldError::new(emergency_field("mobile", slot), "is required for an emergency contact")
            })?,
            address,
        }))
    }

    fn write_slot(contact: Option<&Self>, fields: &mut FieldMap, slot: usize) {
        fields.set_opt(&emergency_field("name", slot), contact.map(|c| &c.name));
        fields.set_opt(
            &emergency_field("relationship", slot),
            contact.and_then(|c| c.relationship.as_ref()),
        );
        fields.set_opt(&emergency_field("mobile", slot), contact.map(|c| &c.mobile));
        fields.set_opt(
            &emergency_field("address", slot),
            contact.and_then(|c| c.address.as_ref()),
        );
    }
}
