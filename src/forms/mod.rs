//! Form handling: the field catalog, boundary validation and derived values.

pub mod age;
pub mod catalog;
pub mod validate;

pub use age::calculate_age;
pub use catalog::{FieldKind, FieldSpec, FormCatalog, Tab, DOCTOR_FORM, PATIENT_FORM};
pub use validate::{collect_submission, validate_submission};

use crate::models::FieldError;

/// A missing or malformed field, located on its tab.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{label} ({tab_label}): {message}")]
pub struct ValidationError {
    pub tab: &'static str,
    pub tab_label: &'static str,
    pub field: String,
    pub label: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(catalog: &FormCatalog, field: &str, message: impl Into<String>) -> Self {
        let (tab, tab_label, label) = match catalog.lookup(field) {
            Some((tab, found)) => (tab.key, tab.label, found.label.to_string()),
            None => ("", "", field.to_string()),
        };
        Self {
            tab,
            tab_label,
            field: field.to_string(),
            label,
            message: message.into(),
        }
    }

    pub fn from_field_error(catalog: &FormCatalog, err: FieldError) -> Self {
        Self::new(catalog, &err.field, err.message)
    }

    /// Sentence shown above the form, e.g. `Full Name is required.`
    pub fn user_message(&self) -> String {
        format!("{} {}.", self.label, self.message)
    }
}
