//! Tabular store: one CSV sheet per entity, header row first.
//!
//! Every mutation is a whole-file read, an in-memory change and a
//! whole-file rewrite through a temp file renamed over the original, so
//! a failed write never leaves a half-written sheet behind.

pub mod records;
pub mod registry;
pub mod table;

pub use records::TableRecord;
pub use registry::Registry;
pub use table::CsvTable;

use thiserror::Error;

use crate::models::FieldError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Corrupt row {id} in {table}: {source}")]
    CorruptRow {
        table: &'static str,
        id: String,
        #[source]
        source: FieldError,
    },

    #[error("Record not found: {table} with id {id}")]
    NotFound { table: &'static str, id: String },

    #[error("Duplicate id {id} in {table}")]
    DuplicateId { table: &'static str, id: String },

    #[error("Table lock poisoned")]
    LockPoisoned,
}
