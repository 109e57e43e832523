//! Registration and edit of patient and doctor records.
//!
//! A submission is collected against its form catalog, validated, given
//! its derived values (age, identifier, password hash) and written to the
//! matching sheet. Every write goes through the table's lock, so identifier
//! allocation and uniqueness checks see the rows they are written against.

pub mod doctors;
pub mod password;
pub mod patients;

use chrono::NaiveDate;

pub use doctors::{doctor_prefill, edit_doctor, register_doctor};
pub use password::{hash_password, verify_password};
pub use patients::{edit_patient, patient_prefill, register_patient};

use crate::forms::{
    calculate_age, collect_submission, validate_submission, FormCatalog, ValidationError,
    DOCTOR_FORM, PATIENT_FORM,
};
use crate::models::{Doctor, FieldMap, Patient};
use crate::store::{CsvTable, Registry, StoreError, TableRecord};

/// Errors surfaced by registration and edit.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid submission: {0}")]
    Validation(#[from] ValidationError),
    #[error("No such record in {table}: {id}")]
    NotFound { table: &'static str, id: String },
    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { table, id } => RegistryError::NotFound { table, id },
            other => RegistryError::Storage(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    Created,
    Updated,
}

impl SaveAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveAction::Created => "created",
            SaveAction::Updated => "updated",
        }
    }
}

/// A registrable record: its sheet, its form and its save operations.
///
/// Lets the HTTP layer serve patients and doctors with one set of handlers.
pub trait Entity: TableRecord {
    /// Singular display name, e.g. `Patient`.
    const LABEL: &'static str;
    /// Registration page path.
    const HOME: &'static str;
    /// Collection path: new records are posted here, edits live under `{COLLECTION}/{id}/edit`.
    const COLLECTION: &'static str;

    fn catalog() -> &'static FormCatalog;
    fn table(registry: &Registry) -> &CsvTable<Self>;
    fn register(
        registry: &Registry,
        values: &FieldMap,
        today: NaiveDate,
    ) -> Result<Self, RegistryError>;
    fn edit(
        registry: &Registry,
        id: &str,
        values: &FieldMap,
        today: NaiveDate,
    ) -> Result<Self, RegistryError>;
    /// Form values for editing this record, age recomputed for `today`.
    fn prefill(&self, today: NaiveDate) -> FieldMap;
    fn display_name(&self) -> &str;
    /// Flash line after a save, e.g. `Patient created: Asha Rao | Mobile: 98765 43210`.
    fn saved_message(&self, action: SaveAction) -> String;
}

impl Entity for Patient {
    const LABEL: &'static str = "Patient";
    const HOME: &'static str = "/";
    const COLLECTION: &'static str = "/patients";

    fn catalog() -> &'static FormCatalog {
        &PATIENT_FORM
    }

    fn table(registry: &Registry) -> &CsvTable<Self> {
        &registry.patients
    }

    fn register(
        registry: &Registry,
        values: &FieldMap,
        today: NaiveDate,
    ) -> Result<Self, RegistryError> {
        register_patient(registry, values, today)
    }

    fn edit(
        registry: &Registry,
        id: &str,
        values: &FieldMap,
        today: NaiveDate,
    ) -> Result<Self, RegistryError> {
        edit_patient(registry, id, values, today)
    }

    fn prefill(&self, today: NaiveDate) -> FieldMap {
        patient_prefill(self, today)
    }

    fn display_name(&self) -> &str {
        &self.personal.full_name
    }

    fn saved_message(&self, action: SaveAction) -> String {
        format!(
            "Patient {}: {} | Mobile: {}",
            action.as_str(),
            self.personal.full_name,
            self.contact.mobile_primary
        )
    }
}

impl Entity for Doctor {
    const LABEL: &'static str = "Doctor";
    const HOME: &'static str = "/doctors";
    const COLLECTION: &'static str = "/doctors";

    fn catalog() -> &'static FormCatalog {
        &DOCTOR_FORM
    }

    fn table(registry: &Registry) -> &CsvTable<Self> {
        &registry.doctors
    }

    fn register(
        registry: &Registry,
        values: &FieldMap,
        today: NaiveDate,
    ) -> Result<Self, RegistryError> {
        register_doctor(registry, values, today)
    }

    fn edit(
        registry: &Registry,
        id: &str,
        values: &FieldMap,
        today: NaiveDate,
    ) -> Result<Self, RegistryError> {
        edit_doctor(registry, id, values, today)
    }

    fn prefill(&self, today: NaiveDate) -> FieldMap {
        doctor_prefill(self, today)
    }

    fn display_name(&self) -> &str {
        &self.personal.full_name
    }

    fn saved_message(&self, action: SaveAction) -> String {
        format!(
            "Doctor {}: {} | Registration: {}",
            action.as_str(),
            self.personal.full_name,
            self.professional.registration_number
        )
    }
}

/// Collect, validate and derive the age of a submission.
///
/// A known date of birth always wins over a hand-entered age.
fn prepare_submission(
    catalog: &FormCatalog,
    values: &FieldMap,
    today: NaiveDate,
) -> Result<FieldMap, ValidationError> {
    let mut fields = collect_submission(catalog, values);
    validate_submission(catalog, &fields, today).inspect_err(|e| {
        tracing::warn!(entity = catalog.entity, field = %e.field, "Rejected submission: {}", e.message);
    })?;
    refresh_age(&mut fields, today);
    Ok(fields)
}

/// Recompute `age` from `dob`; leaves a manual age alone when `dob` is blank.
fn refresh_age(fields: &mut FieldMap, today: NaiveDate) {
    if let Ok(Some(dob)) = fields.date("dob") {
        fields.set_opt("age", calculate_age(dob, today));
    }
}

/// Fail early with `NotFound` before validating an edit.
fn require_existing<R: TableRecord>(table: &CsvTable<R>, id: &str) -> Result<R, RegistryError> {
    table.get(id)?.ok_or_else(|| RegistryError::NotFound {
        table: R::TABLE,
        id: id.to_string(),
    })
}
