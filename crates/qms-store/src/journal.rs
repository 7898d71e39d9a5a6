//! One JSON file per collection, rewritten atomically on every change.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use qms_model::{AssignmentRecord, NewAssignment, RecordId, RecordKind};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};
use crate::port::AssignmentStore;

/// An ordered collection of records backed by a JSON array on disk.
///
/// A journal without a path lives in memory only.
#[derive(Debug, Clone)]
pub struct Journal<T> {
    path: Option<PathBuf>,
    records: Vec<T>,
}

impl<T> Journal<T> {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Serialize + DeserializeOwned> Journal<T> {
    /// Load the collection at `path`. A missing file is an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = load_records(&path)?;
        tracing::debug!(path = %path.display(), count = records.len(), "opened collection");
        Ok(Self {
            path: Some(path),
            records,
        })
    }

    /// Append `record` and persist the collection.
    ///
    /// On a failed write the record is dropped again, so memory never runs
    /// ahead of disk.
    pub fn push(&mut self, record: T) -> Result<&T> {
        let index = self.records.len();
        self.records.push(record);
        if let Err(err) = self.flush() {
            self.records.truncate(index);
            return Err(err);
        }
        Ok(&self.records[index])
    }

    /// Apply `change` to the records and persist; rolls back if the write fails.
    pub fn update<R>(&mut self, change: impl FnOnce(&mut Vec<T>) -> R) -> Result<R>
    where
        T: Clone,
    {
        let snapshot = self.records.clone();
        let outcome = change(&mut self.records);
        if let Err(err) = self.flush() {
            self.records = snapshot;
            return Err(err);
        }
        Ok(outcome)
    }

    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(&self.records)
            .map_err(|source| StoreError::Serialization { source })?;
        write_atomic(path, &bytes)
    }
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `bytes` to a sibling temp file, sync it, then rename over `path`.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "collection written");
    Ok(())
}

/// Assignment store persisted as a journal.
#[derive(Debug, Clone)]
pub struct JournalStore {
    journal: Journal<AssignmentRecord>,
}

impl JournalStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            journal: Journal::open(path)?,
        })
    }

    pub fn in_memory() -> Self {
        Self {
            journal: Journal::in_memory(),
        }
    }

    pub fn len(&self) -> usize {
        self.journal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }
}

impl AssignmentStore for JournalStore {
    fn append(&mut self, entry: NewAssignment) -> Result<AssignmentRecord> {
        let record = AssignmentRecord::from_new(
            RecordId::generate(RecordKind::Assignment),
            entry,
            Utc::now(),
        );
        let stored = self.journal.push(record)?;
        tracing::info!(
            id = %stored.id,
            area = %stored.area,
            station = %stored.station,
            operator = %stored.operator_id,
            date = %stored.date,
            "assignment recorded"
        );
        Ok(stored.clone())
    }

    fn query_all(&self) -> &[AssignmentRecord] {
        self.journal.records()
    }
}
