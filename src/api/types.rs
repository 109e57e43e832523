//! Shared types for the HTTP layer.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::store::Registry;

// ═══════════════════════════════════════════════════════════
// App context, shared state for every route
// ═══════════════════════════════════════════════════════════

/// Handed to every handler through `State<AppContext>`.
#[derive(Clone)]
pub struct AppContext {
    pub registry: Arc<Registry>,
}

impl AppContext {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The date ages are computed against.
    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
