use crate::models::{
    Doctor, FieldError, FieldMap, Patient, DOCTOR_COLUMNS, DOCTOR_ID_PREFIX, MRN_PREFIX,
    PATIENT_COLUMNS,
};

/// A record that lives in one row of a sheet.
pub trait TableRecord: Clone + Send + Sync + 'static {
    /// Human-readable table name for logs and errors.
    const TABLE: &'static str;
    const ID_PREFIX: &'static str;
    /// Header row; the first column is always `ID`.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> &str;
    fn to_fields(&self) -> FieldMap;
    fn from_fields(fields: &FieldMap) -> Result<Self, FieldError>;
}

impl TableRecord for Patient {
    const TABLE: &'static str = "patients";
    const ID_PREFIX: &'static str = MRN_PREFIX;
    const COLUMNS: &'static [&'static str] = PATIENT_COLUMNS;

    fn id(&self) -> &str {
        &self.mrn
    }

    fn to_fields(&self) -> FieldMap {
        Patient::to_fields(self)
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, FieldError> {
        Patient::from_fields(fields)
    }
}

impl TableRecord for Doctor {
    const TABLE: &'static str = "doctors";
    const ID_PREFIX: &'static str = DOCTOR_ID_PREFIX;
    const COLUMNS: &'static [&'static str] = DOCTOR_COLUMNS;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> FieldMap {
        Doctor::to_fields(self)
    }

    fn from_fields(fields: &FieldMap) -> Result<Self, FieldError> {
        Doctor::from_fields(fields)
    }
}

/// Numeric part of an identifier carrying `prefix`, e.g. `P0042` → 42.
pub fn sequence_of(id: &str, prefix: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.parse().ok()
}

/// `P` + 1 → `P0001`; wider numbers keep all their digits.
pub fn format_id(prefix: &str, sequence: u64) -> String {
    format!("{prefix}{sequence:04}")
}
