//! Linear-scan search over sheet rows, and paging for the list views.

use crate::models::{Doctor, Patient};

/// Rows per view-all page; also the cap on JSON search results.
pub const PAGE_SIZE: usize = 20;

/// Where a query comes from. Each page searches a different set of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Search box beside the registration form.
    Registration,
    /// View-all listing; a blank query lists everything.
    Directory,
    /// JSON lookup used by other screens.
    Api,
}

/// A record that can be found by free-text query.
pub trait Searchable {
    /// Field values matched against the query for `scope`.
    fn search_keys(&self, scope: SearchScope) -> Vec<&str>;
}

impl Searchable for Patient {
    fn search_keys(&self, scope: SearchScope) -> Vec<&str> {
        let mut keys = vec![
            self.personal.full_name.as_str(),
            self.mrn.as_str(),
            self.contact.mobile_primary.as_str(),
        ];
        if scope == SearchScope::Directory {
            keys.extend(self.contact.email.as_deref());
            keys.extend(self.identification.aadhar_number.as_deref());
        }
        keys
    }
}

impl Searchable for Doctor {
    fn search_keys(&self, scope: SearchScope) -> Vec<&str> {
        let mut keys = vec![
            self.personal.full_name.as_str(),
            self.id.as_str(),
            self.professional.registration_number.as_str(),
            self.personal.contact_primary.as_str(),
        ];
        match scope {
            SearchScope::Registration => {}
            SearchScope::Directory => {
                keys.push(self.employment.doctor_type.as_str());
                keys.push(self.employment.department.as_str());
                keys.push(self.professional.specialization.as_str());
            }
            SearchScope::Api => {
                keys.push(self.professional.specialization.as_str());
                keys.push(self.employment.department.as_str());
            }
        }
        keys
    }
}

/// Records whose keys contain the trimmed query, ignoring case, in sheet order.
///
/// A blank query matches nothing, except in the directory where it lists all.
pub fn search<'a, T: Searchable>(records: &'a [T], query: &str, scope: SearchScope) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return match scope {
            SearchScope::Directory => records.iter().collect(),
            SearchScope::Registration | SearchScope::Api => Vec::new(),
        };
    }
    records
        .iter()
        .filter(|record| {
            record
                .search_keys(scope)
                .iter()
                .any(|key| key.to_lowercase().contains(&needle))
        })
        .collect()
}

/// One page of a list, 1-based.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `items` into pages of `per_page`; out-of-range pages are clamped.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();
    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}
