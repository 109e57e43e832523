use chrono::NaiveDate;

use super::{prepare_submission, refresh_age, require_existing, RegistryError};
use crate::forms::{ValidationError, PATIENT_FORM};
use crate::models::{BillingType, FieldMap, Patient};
use crate::store::Registry;

/// Register a new patient under the next free MRN.
pub fn register_patient(
    registry: &Registry,
    values: &FieldMap,
    today: NaiveDate,
) -> Result<Patient, RegistryError> {
    let fields = prepare_patient(values, today)?;
    let patient = registry.patients.insert_with(|mrn, _rows| {
        build_patient(fields, &mrn).map_err(RegistryError::from)
    })?;
    tracing::info!(mrn = %patient.mrn, "Patient registered");
    Ok(patient)
}

/// Replace patient `mrn` with the submitted values. The MRN itself never changes.
pub fn edit_patient(
    registry: &Registry,
    mrn: &str,
    values: &FieldMap,
    today: NaiveDate,
) -> Result<Patient, RegistryError> {
    require_existing(&registry.patients, mrn)?;
    let fields = prepare_patient(values, today)?;
    let patient = registry.patients.update_with(mrn, |_current, _rows| {
        build_patient(fields, mrn).map_err(RegistryError::from)
    })?;
    tracing::info!(mrn = %patient.mrn, "Patient updated");
    Ok(patient)
}

/// Edit-form values for `patient`.
pub fn patient_prefill(patient: &Patient, today: NaiveDate) -> FieldMap {
    let mut fields = patient.to_fields();
    refresh_age(&mut fields, today);
    fields
}

fn prepare_patient(values: &FieldMap, today: NaiveDate) -> Result<FieldMap, ValidationError> {
    let fields = prepare_submission(&PATIENT_FORM, values, today)?;
    if fields.get("billing_type") == BillingType::Insurance.as_str() {
        for name in ["insurance_provider", "policy_number"] {
            if fields.get(name).is_empty() {
                return Err(ValidationError::new(
                    &PATIENT_FORM,
                    name,
                    "is required for Insurance billing",
                ));
            }
        }
    }
    Ok(fields)
}

fn build_patient(mut fields: FieldMap, mrn: &str) -> Result<Patient, ValidationError> {
    fields.set("ID", mrn);
    Patient::from_fields(&fields).map_err(|e| ValidationError::from_field_error(&PATIENT_FORM, e))
}
