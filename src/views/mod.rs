//! Server-rendered HTML pages.
//!
//! Pages are plain `format!` templates around one shared layout. Every
//! value that came from a user or a sheet goes through [`escape`].

pub mod form;
pub mod pages;

pub use pages::{
    edit_page, error_page, list_page, registration_page, EditPage, ListPage, RegistrationPage,
};

use crate::forms::{FieldKind, FieldSpec};
use crate::models::{Doctor, Patient};
use crate::registration::Entity;
use crate::search::Searchable;

/// How a record shows up in tables and previews.
pub trait RecordView: Entity + Searchable {
    /// Column headings of the view-all table.
    const LIST_COLUMNS: &'static [&'static str];

    /// Cells matching `LIST_COLUMNS`.
    fn list_row(&self) -> Vec<String>;

    /// Rows shown at the top of `tab` in the preview, formatted by the record.
    fn preview_rows(&self, _tab: &str) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Catalog fields the preview leaves to `preview_rows`.
    fn folded_in_preview(_field: &FieldSpec) -> bool {
        false
    }
}

impl RecordView for Patient {
    const LIST_COLUMNS: &'static [&'static str] =
        &["MRN", "Name", "Gender", "Age", "Mobile", "Billing"];

    fn list_row(&self) -> Vec<String> {
        vec![
            self.mrn.clone(),
            self.personal.full_name.clone(),
            self.personal.gender.to_string(),
            self.personal.age.map(|a| a.to_string()).unwrap_or_default(),
            self.contact.mobile_primary.clone(),
            self.insurance.billing_type.to_string(),
        ]
    }
}

impl RecordView for Doctor {
    const LIST_COLUMNS: &'static [&'static str] = &[
        "ID",
        "Name",
        "Registration",
        "Department",
        "Specialization",
        "Type",
        "Availability",
        "Status",
    ];

    fn list_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.personal.full_name.clone(),
            self.professional.registration_number.clone(),
            self.employment.department.to_string(),
            self.professional.specialization.clone(),
            self.employment.doctor_type.to_string(),
            self.availability.weekly_schedule.to_string(),
            self.employment.status.to_string(),
        ]
    }

    fn preview_rows(&self, tab: &str) -> Vec<(&'static str, String)> {
        let schedule = &self.availability.weekly_schedule;
        if tab != "availability" || schedule.is_empty() {
            return Vec::new();
        }
        vec![("Weekly schedule", schedule.to_string())]
    }

    /// The seven day cells collapse into one weekly schedule row.
    fn folded_in_preview(field: &FieldSpec) -> bool {
        field.kind == FieldKind::TimeRange
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Query string from key/value pairs, e.g. `search=asha&page=2`.
pub fn query_string(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).unwrap_or_default()
}

/// Full HTML document around `body`.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} · Hospital Registry</title>
  <style>{STYLE}</style>
</head>
<body>
  <nav class="top">
    <strong>Hospital Registry</strong>
    <a href="/">Patients</a>
    <a href="/patients/view-all">All patients</a>
    <a href="/doctors">Doctors</a>
    <a href="/doctors/view-all">All doctors</a>
  </nav>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = escape(title),
    )
}

const STYLE: &str = r#"
    * { box-sizing: border-box; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917; margin: 0;
    }
    nav.top { display: flex; gap: 16px; align-items: center; padding: 12px 24px; background: #4a7c59; }
    nav.top a, nav.top strong { color: white; text-decoration: none; }
    main { max-width: 1100px; margin: 0 auto; padding: 24px; }
    h1 { font-size: 22px; }
    .flash { padding: 12px 16px; border-radius: 8px; margin-bottom: 16px; }
    .flash.success { background: #dcfce7; color: #166534; }
    .flash.error { background: #fee2e2; color: #991b1b; }
    details.tab { background: white; border: 1px solid #d6d3d1; border-radius: 8px; margin-bottom: 8px; }
    details.tab > summary { padding: 10px 14px; font-weight: 600; cursor: pointer; }
    details.tab.has-error > summary { color: #dc2626; }
    .fields { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 12px; padding: 0 14px 14px; }
    .field label { display: block; font-size: 13px; color: #57534e; margin-bottom: 4px; }
    .field.invalid input, .field.invalid select, .field.invalid textarea { border-color: #dc2626; }
    input, select, textarea { width: 100%; padding: 8px; border: 1px solid #d6d3d1; border-radius: 6px; font: inherit; }
    input[type=checkbox] { width: auto; }
    .req { color: #dc2626; }
    .btn { display: inline-block; padding: 10px 18px; border-radius: 8px; border: none; background: #4a7c59; color: white; font: inherit; cursor: pointer; text-decoration: none; }
    .btn.secondary { background: white; color: #44403c; border: 1px solid #d6d3d1; }
    table { width: 100%; border-collapse: collapse; background: white; margin-bottom: 16px; }
    th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e7e5e4; vertical-align: top; }
    .search { display: flex; gap: 8px; margin-bottom: 16px; }
    .search input { max-width: 360px; }
    .muted { color: #78716c; }
    .pager { display: flex; gap: 12px; align-items: center; }
    section { margin-bottom: 24px; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup() {
        assert_eq!(
            escape(r#"<b>"Rao" & 'Sons'</b>"#),
            "&lt;b&gt;&quot;Rao&quot; &amp; &#39;Sons&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("Asha Rao"), "Asha Rao");
    }

    #[test]
    fn query_string_encodes_values() {
        assert_eq!(
            query_string(&[("search", "asha rao"), ("page", "2")]),
            "search=asha+rao&page=2"
        );
    }

    #[test]
    fn layout_escapes_title() {
        let html = layout("<x>", "<p>body</p>");
        assert!(html.contains("<title>&lt;x&gt; · Hospital Registry</title>"));
        assert!(html.contains("<p>body</p>"));
    }
}
