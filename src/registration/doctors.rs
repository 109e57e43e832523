use chrono::NaiveDate;

use super::password::{hash_password, verify_password};
use super::{prepare_submission, refresh_age, require_existing, RegistryError};
use crate::forms::{ValidationError, DOCTOR_FORM};
use crate::models::{Doctor, FieldMap};
use crate::store::Registry;

/// Register a new doctor under the next free identifier.
pub fn register_doctor(
    registry: &Registry,
    values: &FieldMap,
    today: NaiveDate,
) -> Result<Doctor, RegistryError> {
    let (fields, password) = prepare_doctor(values, today)?;
    let password_hash = password.map(|p| hash_password(&p));
    let doctor = registry.doctors.insert_with(|id, rows| {
        let mut doctor = build_doctor(fields, &id)?;
        ensure_unique_registration(&doctor, rows)?;
        doctor.login.password_hash = password_hash;
        Ok::<_, RegistryError>(doctor)
    })?;
    tracing::info!(id = %doctor.id, "Doctor registered");
    Ok(doctor)
}

/// Replace doctor `id` with the submitted values.
///
/// A blank password keeps the stored hash, and so does re-entering the
/// current password.
pub fn edit_doctor(
    registry: &Registry,
    id: &str,
    values: &FieldMap,
    today: NaiveDate,
) -> Result<Doctor, RegistryError> {
    let existing = require_existing(&registry.doctors, id)?;
    let (fields, password) = prepare_doctor(values, today)?;
    let password_hash = password.and_then(|p| match &existing.login.password_hash {
        Some(hash) if verify_password(&p, hash) => None,
        _ => Some(hash_password(&p)),
    });
    let doctor = registry.doctors.update_with(id, |current, rows| {
        let mut doctor = build_doctor(fields, id)?;
        ensure_unique_registration(&doctor, rows)?;
        doctor.login.password_hash =
            password_hash.or_else(|| current.login.password_hash.clone());
        Ok::<_, RegistryError>(doctor)
    })?;
    tracing::info!(id = %doctor.id, "Doctor updated");
    Ok(doctor)
}

/// Edit-form values for `doctor`. The password hash never leaves the sheet.
pub fn doctor_prefill(doctor: &Doctor, today: NaiveDate) -> FieldMap {
    let mut fields = doctor.to_fields();
    fields.remove("password_hash");
    refresh_age(&mut fields, today);
    fields
}

/// Validated fields plus a newly entered password, if any.
fn prepare_doctor(
    values: &FieldMap,
    today: NaiveDate,
) -> Result<(FieldMap, Option<String>), ValidationError> {
    let mut fields = prepare_submission(&DOCTOR_FORM, values, today)?;
    let password = fields.remove("password").filter(|p| !p.is_empty());
    Ok((fields, password))
}

fn build_doctor(mut fields: FieldMap, id: &str) -> Result<Doctor, ValidationError> {
    fields.set("ID", id);
    Doctor::from_fields(&fields).map_err(|e| ValidationError::from_field_error(&DOCTOR_FORM, e))
}

/// Registration numbers are unique across the sheet, ignoring case.
fn ensure_unique_registration(doctor: &Doctor, rows: &[Doctor]) -> Result<(), ValidationError> {
    let number = &doctor.professional.registration_number;
    let taken = rows.iter().any(|other| {
        other.id != doctor.id
            && other
                .professional
                .registration_number
                .eq_ignore_ascii_case(number)
    });
    if taken {
        return Err(ValidationError::new(
            &DOCTOR_FORM,
            "registration_number",
            "is already registered to another doctor",
        ));
    }
    Ok(())
}
