use std::fmt::Write;

use super::form::render_form;
use super::{escape, layout, query_string, RecordView};
use crate::forms::{FieldKind, ValidationError};
use crate::models::FieldMap;
use crate::search::Page;

/// Registration page: form, search box, results and a read-only preview.
pub struct RegistrationPage<'a, E> {
    pub values: &'a FieldMap,
    pub error: Option<&'a ValidationError>,
    pub flash: Option<&'a str>,
    /// `None` until a search has been submitted.
    pub search: Option<&'a str>,
    pub results: &'a [&'a E],
    pub selected: Option<&'a E>,
}

pub struct EditPage<'a> {
    pub id: &'a str,
    pub values: &'a FieldMap,
    pub error: Option<&'a ValidationError>,
}

pub struct ListPage<'a, E> {
    pub search: &'a str,
    pub page: &'a Page<&'a E>,
}

pub fn registration_page<E: RecordView>(page: &RegistrationPage<'_, E>) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{} Registration</h1>", E::LABEL);
    push_flash(&mut body, page.flash, page.error);

    // Search
    let query = page.search.unwrap_or("");
    let _ = writeln!(
        body,
        r#"<section><form class="search" method="get" action="{home}"><input type="search" name="search" value="{q}" placeholder="Search by name, ID or phone"><button class="btn secondary" type="submit">Search</button></form>"#,
        home = E::HOME,
        q = escape(query),
    );
    if page.search.is_some() {
        if page.results.is_empty() {
            body.push_str(r#"<p class="muted">No results</p>"#);
        } else {
            push_table(&mut body, page.results, |record| {
                let preview = format!(
                    "{}?{}",
                    E::HOME,
                    query_string(&[("search", query), ("selected_id", record.id())])
                );
                format!(
                    r#"<a href="{}">Preview</a> · <a href="{}">Edit</a>"#,
                    escape(&preview),
                    edit_url::<E>(record.id())
                )
            });
        }
    }
    body.push_str("</section>\n");

    if let Some(record) = page.selected {
        push_preview(&mut body, record);
    }

    let _ = writeln!(
        body,
        "<section><h2>New {}</h2><p class=\"muted\">Next ID is assigned on save.</p>",
        E::LABEL
    );
    body.push_str(&render_form(
        E::catalog(),
        page.values,
        E::COLLECTION,
        &format!("Register {}", E::LABEL),
        page.error,
    ));
    body.push_str("</section>\n");

    layout(&format!("{} Registration", E::LABEL), &body)
}

pub fn edit_page<E: RecordView>(page: &EditPage<'_>) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>Edit {} {}</h1>", E::LABEL, escape(page.id));
    push_flash(&mut body, None, page.error);
    let _ = writeln!(
        body,
        r#"<div class="field"><label>ID</label><input type="text" value="{}" readonly disabled></div>"#,
        escape(page.id)
    );
    body.push_str(&render_form(
        E::catalog(),
        page.values,
        &edit_url::<E>(page.id),
        "Save changes",
        page.error,
    ));
    let _ = writeln!(
        body,
        r#"<p><a class="btn secondary" href="{}">Cancel</a></p>"#,
        E::HOME
    );
    layout(&format!("Edit {}", page.id), &body)
}

pub fn list_page<E: RecordView>(page: &ListPage<'_, E>) -> String {
    let listing = page.page;
    let base = format!("{}/view-all", E::COLLECTION);
    let mut body = String::new();
    let _ = writeln!(body, "<h1>All {}s</h1>", E::LABEL);
    let _ = writeln!(
        body,
        r#"<form class="search" method="get" action="{base}"><input type="search" name="search" value="{}" placeholder="Filter"><button class="btn secondary" type="submit">Filter</button></form>"#,
        escape(page.search),
    );
    let _ = writeln!(
        body,
        r#"<p class="muted">{} record(s)</p>"#,
        listing.total_items
    );

    if listing.items.is_empty() {
        body.push_str(r#"<p class="muted">No results</p>"#);
    } else {
        push_table(&mut body, &listing.items, |record| {
            format!(r#"<a href="{}">Edit</a>"#, edit_url::<E>(record.id()))
        });
    }

    let link = |n: usize| {
        let n = n.to_string();
        escape(&format!(
            "{base}?{}",
            query_string(&[("search", page.search), ("page", n.as_str())])
        ))
    };
    body.push_str(r#"<div class="pager">"#);
    if listing.has_prev() {
        let _ = write!(body, r#"<a href="{}">&laquo; Previous</a>"#, link(listing.page - 1));
    }
    let _ = write!(
        body,
        "<span>Page {} of {}</span>",
        listing.page, listing.total_pages
    );
    if listing.has_next() {
        let _ = write!(body, r#"<a href="{}">Next &raquo;</a>"#, link(listing.page + 1));
    }
    body.push_str("</div>\n");

    layout(&format!("All {}s", E::LABEL), &body)
}

/// Bare page for 404 and 500 responses.
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        r#"<h1>{}</h1><p>{}</p><p><a class="btn secondary" href="/">Back to registration</a></p>"#,
        escape(title),
        escape(message)
    );
    layout(title, &body)
}

fn edit_url<E: RecordView>(id: &str) -> String {
    format!("{}/{}/edit", E::COLLECTION, escape(id))
}

fn push_flash(body: &mut String, flash: Option<&str>, error: Option<&ValidationError>) {
    if let Some(message) = flash.filter(|m| !m.is_empty()) {
        let _ = writeln!(body, r#"<div class="flash success">{}</div>"#, escape(message));
    }
    if let Some(err) = error {
        let _ = writeln!(
            body,
            r##"<div class="flash error"><a href="#tab-{}">{}</a>: {}</div>"##,
            err.tab,
            escape(err.tab_label),
            escape(&err.user_message())
        );
    }
}

fn push_table<E: RecordView>(body: &mut String, records: &[&E], actions: impl Fn(&E) -> String) {
    body.push_str("<table><thead><tr>");
    for column in E::LIST_COLUMNS {
        let _ = write!(body, "<th>{}</th>", escape(column));
    }
    body.push_str("<th></th></tr></thead><tbody>\n");
    for &record in records {
        body.push_str("<tr>");
        for cell in record.list_row() {
            let _ = write!(body, "<td>{}</td>", escape(&cell));
        }
        let _ = writeln!(body, "<td>{}</td></tr>", actions(record));
    }
    body.push_str("</tbody></table>\n");
}

/// Read-only view of every filled field, grouped by tab.
fn push_preview<E: RecordView>(body: &mut String, record: &E) {
    let fields = record.to_fields();
    let _ = writeln!(
        body,
        r#"<section><h2>{} {}</h2><p><a class="btn" href="{}">Edit</a></p><table>"#,
        escape(record.id()),
        escape(record.display_name()),
        edit_url::<E>(record.id())
    );
    for tab in E::catalog().tabs {
        let mut filled = record.preview_rows(tab.key);
        filled.extend(
            tab.fields
                .iter()
                .filter(|f| f.kind != FieldKind::Password && !E::folded_in_preview(f))
                .map(|f| (f.label, fields.get(f.name).to_string()))
                .filter(|(_, value)| !value.is_empty()),
        );
        if filled.is_empty() {
            continue;
        }
        let _ = writeln!(body, r#"<tr><th colspan="2">{}</th></tr>"#, escape(tab.label));
        for (label, value) in filled {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape(label),
                escape(&value)
            );
        }
    }
    body.push_str("</table></section>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::PATIENT_FORM;
    use crate::models::{Doctor, Patient};
    use crate::search::paginate;

    fn meera() -> Doctor {
        let mut f = FieldMap::new();
        for (name, value) in [
            ("ID", "D0001"),
            ("full_name", "Dr. Meera Iyer"),
            ("gender", "Female"),
            ("contact_primary", "9811111111"),
            ("qualification", "MD"),
            ("specialization", "Cardiology"),
            ("registration_number", "KMC-4411"),
            ("doctor_type", "Consultant"),
            ("department", "Cardiology"),
            ("status", "Active"),
            ("schedule_wed", "17:00-20:00"),
            ("schedule_mon", "09:00-12:00"),
            ("locations", "OPD Block B"),
        ] {
            f.set(name, value);
        }
        Doctor::from_fields(&f).unwrap()
    }

    fn asha() -> Patient {
        let mut f = FieldMap::new();
        f.set("ID", "P0001");
        f.set("full_name", "Asha Rao");
        f.set("gender", "Female");
        f.set("mobile_primary", "9876543210");
        f.set("billing_type", "Cash");
        f.set("allergies", "Penicillin <severe>");
        Patient::from_fields(&f).unwrap()
    }

    #[test]
    fn registration_page_shows_no_results() {
        let html = registration_page::<Doctor>(&RegistrationPage {
            values: &FieldMap::new(),
            error: None,
            flash: None,
            search: Some("UNKNOWN-999"),
            results: &[],
            selected: None,
        });
        assert!(html.contains("No results"));
        assert!(html.contains(r#"action="/doctors""#));
    }

    #[test]
    fn registration_page_lists_results_and_preview() {
        let patient = asha();
        let html = registration_page(&RegistrationPage {
            values: &FieldMap::new(),
            error: None,
            flash: Some("Patient created: Asha Rao | Mobile: 9876543210"),
            search: Some("asha"),
            results: &[&patient],
            selected: Some(&patient),
        });
        assert!(html.contains("Patient created: Asha Rao | Mobile: 9876543210"));
        assert!(html.contains("<td>P0001</td>"));
        assert!(html.contains(r#"href="/patients/P0001/edit""#));
        assert!(html.contains("/?search=asha&amp;selected_id=P0001"));
        assert!(html.contains("Penicillin &lt;severe&gt;"));
        assert!(!html.contains("No results"));
    }

    #[test]
    fn no_search_means_no_result_block() {
        let html = registration_page::<Patient>(&RegistrationPage {
            values: &FieldMap::new(),
            error: None,
            flash: None,
            search: None,
            results: &[],
            selected: None,
        });
        assert!(!html.contains("No results"));
    }

    #[test]
    fn edit_page_names_error_tab() {
        let err = ValidationError::new(&PATIENT_FORM, "mobile_primary", "is required");
        let html = edit_page::<Patient>(&EditPage {
            id: "P0001",
            values: &asha().to_fields(),
            error: Some(&err),
        });
        assert!(html.contains("Edit Patient P0001"));
        assert!(html.contains("2. Contact Details"));
        assert!(html.contains("Mobile Number (Primary) is required."));
        assert!(html.contains(r#"action="/patients/P0001/edit""#));
    }

    #[test]
    fn list_page_builds_pager_links() {
        let patients: Vec<Patient> = (1..=25)
            .map(|n| {
                let mut p = asha();
                p.mrn = format!("P{n:04}");
                p
            })
            .collect();
        let refs: Vec<&Patient> = patients.iter().collect();
        let page = paginate(refs, 1, 20);
        let html = list_page(&ListPage {
            search: "asha rao",
            page: &page,
        });
        assert!(html.contains("Page 1 of 2"));
        assert!(html.contains("/patients/view-all?search=asha+rao&amp;page=2"));
        assert!(html.contains("<td>P0020</td>"));
        assert!(!html.contains("<td>P0021</td>"));
    }

    #[test]
    fn doctor_preview_shows_weekly_schedule_in_one_row() {
        let doctor = meera();
        let html = registration_page(&RegistrationPage {
            values: &FieldMap::new(),
            error: None,
            flash: None,
            search: None,
            results: &[],
            selected: Some(&doctor),
        });
        assert!(html.contains(
            "<tr><td>Weekly schedule</td><td>Mon 09:00-12:00; Wed 17:00-20:00</td></tr>"
        ));
        assert!(html.contains("<tr><td>Locations (multiple branches)</td><td>OPD Block B</td></tr>"));
        assert!(!html.contains("<td>Monday (HH:MM-HH:MM)</td>"));
    }

    #[test]
    fn doctor_list_has_availability_column() {
        let doctor = meera();
        let refs = vec![&doctor];
        let page = paginate(refs, 1, 20);
        let html = list_page(&ListPage {
            search: "",
            page: &page,
        });
        assert!(html.contains("<th>Availability</th>"));
        assert!(html.contains("<td>Mon 09:00-12:00; Wed 17:00-20:00</td>"));
    }
}
