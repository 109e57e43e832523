//! Flat name → value maps shared by submitted forms and table rows.
//!
//! Both a browser form and a CSV row reduce to the same shape: a set of
//! named string cells. Records convert to and from `FieldMap`, so one
//! mapping per entity serves the form prefill, the form submission and
//! the spreadsheet row.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Checkbox values the browser (or an older sheet) may send for "checked".
const TRUTHY: &[&str] = &["on", "yes", "true", "1"];

/// A single bad cell, named by its field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Named string cells with blank-means-absent semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap(BTreeMap<String, String>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trimmed value, or `""` when the field is missing.
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(|v| v.trim()).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Trimmed value, `None` when missing or blank.
    pub fn opt(&self, name: &str) -> Option<String> {
        let value = self.get(name);
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn set_opt<T: ToString>(&mut self, name: &str, value: Option<T>) {
        let value = value.map(|v| v.to_string()).unwrap_or_default();
        self.set(name, value);
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.set(name, if value { "Yes" } else { "No" });
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn flag(&self, name: &str) -> bool {
        let value = self.get(name).to_ascii_lowercase();
        TRUTHY.contains(&value.as_str())
    }

    pub fn required(&self, name: &str) -> Result<String, FieldError> {
        self.opt(name)
            .ok_or_else(|| FieldError::new(name, "is required"))
    }

    /// Parse a non-blank value; blank yields `Ok(None)`.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, FieldError> {
        match self.opt(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| FieldError::new(name, format!("'{raw}' is not valid"))),
        }
    }

    pub fn parse_required<T: FromStr>(&self, name: &str) -> Result<T, FieldError> {
        self.parse(name)?
            .ok_or_else(|| FieldError::new(name, "is required"))
    }

    pub fn date(&self, name: &str) -> Result<Option<NaiveDate>, FieldError> {
        match self.opt(name) {
            None => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                .map(Some)
                .map_err(|_| {
                    FieldError::new(name, format!("'{raw}' is not a date (expected YYYY-MM-DD)"))
                }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, String>> for FieldMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<std::collections::HashMap<String, String>> for FieldMap {
    fn from(map: std::collections::HashMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn get_trims_and_defaults_to_empty() {
        let fields = map(&[("full_name", "  Asha Rao ")]);
        assert_eq!(fields.get("full_name"), "Asha Rao");
        assert_eq!(fields.get("email"), "");
    }

    #[test]
    fn blank_is_absent() {
        let fields = map(&[("email", "   ")]);
        assert_eq!(fields.opt("email"), None);
        assert!(fields.required("email").is_err());
    }

    #[test]
    fn flag_accepts_browser_and_sheet_spellings() {
        let fields = map(&[("a", "on"), ("b", "Yes"), ("c", "TRUE"), ("d", "No"), ("e", "")]);
        assert!(fields.flag("a"));
        assert!(fields.flag("b"));
        assert!(fields.flag("c"));
        assert!(!fields.flag("d"));
        assert!(!fields.flag("e"));
        assert!(!fields.flag("missing"));
    }

    #[test]
    fn set_flag_writes_yes_no() {
        let mut fields = FieldMap::new();
        fields.set_flag("privacy_consent", true);
        fields.set_flag("surgery_consent", false);
        assert_eq!(fields.get("privacy_consent"), "Yes");
        assert_eq!(fields.get("surgery_consent"), "No");
    }

    #[test]
    fn parse_reports_field_name() {
        let fields = map(&[("experience_years", "ten")]);
        let err = fields.parse::<u32>("experience_years").unwrap_err();
        assert_eq!(err.field, "experience_years");
        assert_eq!(fields.parse::<u32>("missing").unwrap(), None);
    }

    #[test]
    fn date_rejects_other_formats() {
        let fields = map(&[("dob", "2000-01-01"), ("bad", "01/01/2000")]);
        assert_eq!(
            fields.date("dob").unwrap(),
            NaiveDate::from_ymd_opt(2000, 1, 1)
        );
        assert!(fields.date("bad").is_err());
    }
}
