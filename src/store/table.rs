use std::fs::{self, File};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;

use super::records::{format_id, sequence_of, TableRecord};
use super::StoreError;
use crate::models::FieldMap;

/// One CSV sheet holding records of type `R`.
///
/// The mutex serializes read-modify-write inside this process only.
/// Two processes sharing a file still race; the later rewrite wins.
pub struct CsvTable<R> {
    path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<fn() -> R>,
}

impl<R: TableRecord> CsvTable<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the sheet with its header row if it is missing or empty.
    pub fn ensure_initialized(&self) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        self.init_unlocked()
    }

    /// All rows in sheet order.
    pub fn all(&self) -> Result<Vec<R>, StoreError> {
        let _guard = self.lock()?;
        self.read_unlocked()
    }

    pub fn get(&self, id: &str) -> Result<Option<R>, StoreError> {
        let _guard = self.lock()?;
        Ok(self
            .read_unlocked()?
            .into_iter()
            .find(|record| record.id() == id))
    }

    /// Linear scan; matches come back in sheet order.
    pub fn find(&self, predicate: impl Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        let _guard = self.lock()?;
        Ok(self
            .read_unlocked()?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }

    /// The identifier the next inserted record will receive.
    pub fn next_identifier(&self) -> Result<String, StoreError> {
        let _guard = self.lock()?;
        Ok(next_id_for(&self.read_unlocked()?))
    }

    pub fn append(&self, record: &R) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        let mut rows = self.read_unlocked()?;
        if rows.iter().any(|r| r.id() == record.id()) {
            return Err(StoreError::DuplicateId {
                table: R::TABLE,
                id: record.id().to_string(),
            });
        }
        rows.push(record.clone());
        self.write_unlocked(&rows)
    }

    /// Replace the row whose identifier is `id`.
    pub fn update(&self, id: &str, record: &R) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        let mut rows = self.read_unlocked()?;
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found::<R>(id))?;
        *slot = record.clone();
        self.write_unlocked(&rows)
    }

    /// Allocate the next identifier, build the record against the current
    /// rows and append it, all under one lock.
    pub fn insert_with<E>(
        &self,
        build: impl FnOnce(String, &[R]) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.lock()?;
        let mut rows = self.read_unlocked()?;
        let record = build(next_id_for(&rows), &rows)?;
        rows.push(record.clone());
        self.write_unlocked(&rows)?;
        Ok(record)
    }

    /// Rebuild the row `id` from its current value and the other rows, under one lock.
    pub fn update_with<E>(
        &self,
        id: &str,
        build: impl FnOnce(&R, &[R]) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.lock()?;
        let mut rows = self.read_unlocked()?;
        let index = rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| not_found::<R>(id))?;
        let record = build(&rows[index], &rows)?;
        rows[index] = record.clone();
        self.write_unlocked(&rows)?;
        Ok(record)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn init_unlocked(&self) -> Result<(), StoreError> {
        let empty = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };
        if empty {
            self.write_unlocked(&[])?;
            tracing::info!(table = R::TABLE, path = %self.path.display(), "Created sheet with header row");
        }
        Ok(())
    }

    fn read_unlocked(&self) -> Result<Vec<R>, StoreError> {
        self.init_unlocked()?;

        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            // Cells are matched to columns by header name, not position.
            let fields: FieldMap = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.trim().to_string(), v.to_string()))
                .collect();
            let id = fields.get("ID");
            if id.is_empty() {
                continue;
            }
            let parsed = R::from_fields(&fields).map_err(|source| StoreError::CorruptRow {
                table: R::TABLE,
                id: id.to_string(),
                source,
            })?;
            rows.push(parsed);
        }
        Ok(rows)
    }

    fn write_unlocked(&self, rows: &[R]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = csv::Writer::from_writer(&mut tmp);
            writer.write_record(R::COLUMNS)?;
            for record in rows {
                let fields = record.to_fields();
                writer.write_record(R::COLUMNS.iter().map(|column| fields.get(column)))?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

fn next_id_for<R: TableRecord>(rows: &[R]) -> String {
    let highest = rows
        .iter()
        .filter_map(|r| sequence_of(r.id(), R::ID_PREFIX))
        .max()
        .unwrap_or(0);
    format_id(R::ID_PREFIX, highest + 1)
}

fn not_found<R: TableRecord>(id: &str) -> StoreError {
    StoreError::NotFound {
        table: R::TABLE,
        id: id.to_string(),
    }
}
