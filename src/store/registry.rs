use std::path::Path;

use super::table::CsvTable;
use super::StoreError;
use crate::config::{DOCTOR_FILE, PATIENT_FILE};
use crate::models::{Doctor, Patient};

/// The two sheets of the hospital register.
///
/// Created once at startup and handed to the HTTP layer; there is no
/// process-wide instance.
pub struct Registry {
    pub patients: CsvTable<Patient>,
    pub doctors: CsvTable<Doctor>,
}

impl Registry {
    /// Open both sheets under `data_dir`, writing header rows where missing.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let registry = Self {
            patients: CsvTable::new(data_dir.join(PATIENT_FILE)),
            doctors: CsvTable::new(data_dir.join(DOCTOR_FILE)),
        };
        registry.patients.ensure_initialized()?;
        registry.doctors.ensure_initialized()?;
        tracing::info!(dir = %data_dir.display(), "Registry sheets ready");
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_both_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::open(dir.path()).unwrap();
        assert!(dir.path().join("patients.csv").exists());
        assert!(dir.path().join("doctors.csv").exists());
        assert!(registry.patients.all().unwrap().is_empty());
        assert!(registry.doctors.all().unwrap().is_empty());
    }

    #[test]
    fn open_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("records");
        Registry::open(&nested).unwrap();
        assert!(nested.join("patients.csv").exists());
    }
}
