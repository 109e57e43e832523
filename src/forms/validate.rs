use chrono::NaiveDate;

use super::catalog::{FieldKind, FieldSpec, FormCatalog};
use super::ValidationError;
use crate::models::schedule::TimeRange;
use crate::models::{FieldMap, DATE_FORMAT};

/// Check every catalog field of a submission, in tab order.
/// The first offending field is reported.
pub fn validate_submission(
    catalog: &FormCatalog,
    values: &FieldMap,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    for (_, field) in catalog.fields() {
        let value = values.get(field.name);
        if value.is_empty() {
            if field.required {
                return Err(ValidationError::new(catalog, field.name, "is required"));
            }
            continue;
        }
        check_value(field, value, today)
            .map_err(|message| ValidationError::new(catalog, field.name, message))?;
    }
    Ok(())
}

/// Keep only catalog fields, trimmed, with checkboxes as `Yes`/`No`.
/// Anything else the browser sent, including an `ID`, is dropped.
pub fn collect_submission(catalog: &FormCatalog, values: &FieldMap) -> FieldMap {
    let mut collected = FieldMap::new();
    for (_, field) in catalog.fields() {
        match field.kind {
            FieldKind::Checkbox => collected.set_flag(field.name, values.flag(field.name)),
            _ => collected.set(field.name, values.get(field.name)),
        }
    }
    collected
}

fn check_value(field: &FieldSpec, value: &str, today: NaiveDate) -> Result<(), String> {
    match field.kind {
        FieldKind::Select(options) => {
            if !options.contains(&value) {
                return Err(format!("must be one of: {}", options.join(", ")));
            }
        }
        FieldKind::Date => {
            parse_date(value)?;
        }
        FieldKind::BirthDate => {
            if parse_date(value)? > today {
                return Err("cannot be in the future".into());
            }
        }
        FieldKind::Number => {
            if value.parse::<u32>().is_err() {
                return Err("must be a whole number, 0 or more".into());
            }
        }
        FieldKind::Tel => {
            let allowed = value
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
            if !allowed || !value.chars().any(|c| c.is_ascii_digit()) {
                return Err("must contain digits, spaces, +, - or brackets only".into());
            }
        }
        FieldKind::Email => {
            let valid = match value.split_once('@') {
                Some((local, domain)) => {
                    !local.is_empty()
                        && !domain.is_empty()
                        && !domain.contains('@')
                        && !value.chars().any(char::is_whitespace)
                }
                None => false,
            };
            if !valid {
                return Err("is not a valid email address".into());
            }
        }
        FieldKind::TimeRange => {
            value.parse::<TimeRange>()?;
        }
        FieldKind::Text
        | FieldKind::TextArea
        | FieldKind::Checkbox
        | FieldKind::Password => {}
    }
    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| "must be a date (YYYY-MM-DD)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::catalog::{DOCTOR_FORM, PATIENT_FORM};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn valid_patient() -> FieldMap {
        let mut f = FieldMap::new();
        f.set("full_name", "Asha Rao");
        f.set("gender", "Female");
        f.set("mobile_primary", "+91 98765-43210");
        f.set("billing_type", "Cash");
        f
    }

    #[test]
    fn accepts_minimal_patient() {
        assert!(validate_submission(&PATIENT_FORM, &valid_patient(), today()).is_ok());
    }

    #[test]
    fn missing_mandatory_field_names_tab() {
        let mut f = valid_patient();
        f.set("billing_type", "  ");
        let err = validate_submission(&PATIENT_FORM, &f, today()).unwrap_err();
        assert_eq!(err.field, "billing_type");
        assert_eq!(err.tab, "insurance");
        assert_eq!(err.message, "is required");
    }

    #[test]
    fn first_missing_field_in_tab_order() {
        let err = validate_submission(&PATIENT_FORM, &FieldMap::new(), today()).unwrap_err();
        assert_eq!(err.field, "full_name");
    }

    #[test]
    fn unknown_select_option() {
        let mut f = valid_patient();
        f.set("gender", "Unknown");
        let err = validate_submission(&PATIENT_FORM, &f, today()).unwrap_err();
        assert_eq!(err.field, "gender");
        assert!(err.message.starts_with("must be one of"));
    }

    #[test]
    fn future_birth_date_rejected() {
        let mut f = valid_patient();
        f.set("dob", "2030-05-05");
        let err = validate_submission(&PATIENT_FORM, &f, today()).unwrap_err();
        assert_eq!(err.field, "dob");
    }

    #[test]
    fn malformed_date_rejected() {
        let mut f = valid_patient();
        f.set("dob", "05/05/2000");
        assert!(validate_submission(&PATIENT_FORM, &f, today()).is_err());
    }

    #[test]
    fn phone_with_letters_rejected() {
        let mut f = valid_patient();
        f.set("mobile_alternate", "call me");
        let err = validate_submission(&PATIENT_FORM, &f, today()).unwrap_err();
        assert_eq!(err.field, "mobile_alternate");
    }

    #[test]
    fn email_needs_at_sign() {
        let mut f = valid_patient();
        f.set("email", "asha.example.com");
        assert_eq!(
            validate_submission(&PATIENT_FORM, &f, today()).unwrap_err().field,
            "email"
        );
        f.set("email", "asha@example.com");
        assert!(validate_submission(&PATIENT_FORM, &f, today()).is_ok());
    }

    #[test]
    fn negative_number_rejected() {
        let mut f = valid_patient();
        f.set("age", "-3");
        assert_eq!(
            validate_submission(&PATIENT_FORM, &f, today()).unwrap_err().field,
            "age"
        );
    }

    #[test]
    fn schedule_range_checked() {
        let mut f = FieldMap::new();
        for (name, value) in [
            ("full_name", "Dr. Meera Iyer"),
            ("gender", "Female"),
            ("contact_primary", "9811111111"),
            ("qualification", "MD"),
            ("specialization", "Cardiology"),
            ("registration_number", "KMC-4411"),
            ("doctor_type", "Consultant"),
            ("department", "Cardiology"),
            ("status", "Active"),
            ("schedule_wed", "18:00-09:00"),
        ] {
            f.set(name, value);
        }
        let err = validate_submission(&DOCTOR_FORM, &f, today()).unwrap_err();
        assert_eq!(err.field, "schedule_wed");
        assert_eq!(err.tab, "availability");
    }

    #[test]
    fn collect_drops_unknown_fields_and_coerces_checkboxes() {
        let mut f = valid_patient();
        f.set("ID", "P9999");
        f.set("privacy_consent", "on");
        f.set("full_name", "  Asha Rao  ");
        let collected = collect_submission(&PATIENT_FORM, &f);
        assert!(!collected.contains("ID"));
        assert_eq!(collected.get("privacy_consent"), "Yes");
        assert_eq!(collected.get("surgery_consent"), "No");
        assert_eq!(collected.get("full_name"), "Asha Rao");
    }
}
