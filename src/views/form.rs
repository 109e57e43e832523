//! Tabbed registration form rendered from a form catalog.

use std::fmt::Write;

use super::escape;
use crate::forms::{FieldKind, FieldSpec, FormCatalog, ValidationError};
use crate::models::FieldMap;

/// Render every tab of `catalog` as a collapsible section inside one `<form>`.
///
/// The tab holding `error` is opened and marked; otherwise the first tab is open.
pub fn render_form(
    catalog: &FormCatalog,
    values: &FieldMap,
    action: &str,
    submit_label: &str,
    error: Option<&ValidationError>,
) -> String {
    let mut html = String::new();
    let _ = writeln!(html, r#"<form method="post" action="{}">"#, escape(action));

    for (index, tab) in catalog.tabs.iter().enumerate() {
        let has_error = error.is_some_and(|e| e.tab == tab.key);
        let open = has_error || (error.is_none() && index == 0);
        let _ = writeln!(
            html,
            r#"<details class="tab{}" id="tab-{}"{}><summary>{}</summary><div class="fields">"#,
            if has_error { " has-error" } else { "" },
            tab.key,
            if open { " open" } else { "" },
            escape(tab.label),
        );
        for field in tab.fields {
            let invalid = error.is_some_and(|e| e.field == field.name);
            render_field(&mut html, field, values, invalid);
        }
        html.push_str("</div></details>\n");
    }

    let _ = writeln!(
        html,
        r#"<button class="btn" type="submit">{}</button></form>"#,
        escape(submit_label)
    );
    html
}

fn render_field(html: &mut String, field: &FieldSpec, values: &FieldMap, invalid: bool) {
    let name = field.name;
    let value = escape(values.get(name));
    let required = if field.required { " required" } else { "" };
    let marker = if field.required {
        r#" <span class="req">*</span>"#
    } else {
        ""
    };

    let _ = write!(
        html,
        r#"<div class="field{}"><label for="f-{name}">{}{marker}</label>"#,
        if invalid { " invalid" } else { "" },
        escape(field.label),
    );

    match field.kind {
        FieldKind::TextArea => {
            let _ = write!(
                html,
                r#"<textarea id="f-{name}" name="{name}" rows="2"{required}>{value}</textarea>"#
            );
        }
        FieldKind::Select(options) => {
            let _ = write!(html, r#"<select id="f-{name}" name="{name}"{required}>"#);
            html.push_str(r#"<option value="">-- Select --</option>"#);
            let current = values.get(name);
            for option in options {
                let selected = if *option == current { " selected" } else { "" };
                let option = escape(option);
                let _ = write!(html, r#"<option value="{option}"{selected}>{option}</option>"#);
            }
            html.push_str("</select>");
        }
        FieldKind::Checkbox => {
            let checked = if values.flag(name) { " checked" } else { "" };
            let _ = write!(
                html,
                r#"<input type="checkbox" id="f-{name}" name="{name}" value="Yes"{checked}>"#
            );
        }
        FieldKind::Password => {
            // Never echoed back, not even after a failed submit.
            let _ = write!(
                html,
                r#"<input type="password" id="f-{name}" name="{name}" autocomplete="new-password">"#
            );
        }
        FieldKind::Number => {
            let _ = write!(
                html,
                r#"<input type="number" min="0" step="1" id="f-{name}" name="{name}" value="{value}"{required}>"#
            );
        }
        FieldKind::TimeRange => {
            let _ = write!(
                html,
                r#"<input type="text" placeholder="09:00-17:00" id="f-{name}" name="{name}" value="{value}"{required}>"#
            );
        }
        FieldKind::Text
        | FieldKind::Date
        | FieldKind::BirthDate
        | FieldKind::Tel
        | FieldKind::Email => {
            let input_type = match field.kind {
                FieldKind::Date | FieldKind::BirthDate => "date",
                FieldKind::Tel => "tel",
                FieldKind::Email => "email",
                _ => "text",
            };
            let _ = write!(
                html,
                r#"<input type="{input_type}" id="f-{name}" name="{name}" value="{value}"{required}>"#
            );
        }
    }
    html.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{DOCTOR_FORM, PATIENT_FORM};

    #[test]
    fn renders_every_tab_and_marks_required() {
        let html = render_form(&PATIENT_FORM, &FieldMap::new(), "/patients", "Register", None);
        for tab in PATIENT_FORM.tabs {
            assert!(html.contains(&format!(r#"id="tab-{}""#, tab.key)));
        }
        assert!(html.contains(r#"name="mobile_primary" value="" required"#));
        assert!(html.contains(r#"<details class="tab" id="tab-personal" open>"#));
    }

    #[test]
    fn prefilled_values_are_escaped_and_selected() {
        let mut values = FieldMap::new();
        values.set("full_name", r#"Asha "Ash" Rao"#);
        values.set("gender", "Female");
        values.set("privacy_consent", "Yes");
        let html = render_form(&PATIENT_FORM, &values, "/patients", "Register", None);
        assert!(html.contains("value=\"Asha &quot;Ash&quot; Rao\""));
        assert!(html.contains(r#"<option value="Female" selected>Female</option>"#));
        assert!(html.contains(r#"name="privacy_consent" value="Yes" checked"#));
    }

    #[test]
    fn error_opens_its_tab() {
        let err = ValidationError::new(&PATIENT_FORM, "billing_type", "is required");
        let html = render_form(&PATIENT_FORM, &FieldMap::new(), "/patients", "Register", Some(&err));
        assert!(html.contains(r#"<details class="tab has-error" id="tab-insurance" open>"#));
        assert!(html.contains(r#"<details class="tab" id="tab-personal">"#));
        assert!(html.contains(r#"<div class="field invalid"><label for="f-billing_type">"#));
    }

    #[test]
    fn password_is_never_echoed() {
        let mut values = FieldMap::new();
        values.set("password", "hunter22");
        let html = render_form(&DOCTOR_FORM, &values, "/doctors", "Register", None);
        assert!(!html.contains("hunter22"));
    }
}
