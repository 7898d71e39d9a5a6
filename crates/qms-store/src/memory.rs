use chrono::Utc;
use qms_model::{AssignmentRecord, NewAssignment, RecordId, RecordKind};

use crate::error::Result;
use crate::port::AssignmentStore;

/// Vec-backed store with no persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<AssignmentRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AssignmentStore for MemoryStore {
    fn append(&mut self, entry: NewAssignment) -> Result<AssignmentRecord> {
        let record = AssignmentRecord::from_new(
            RecordId::generate(RecordKind::Assignment),
            entry,
            Utc::now(),
        );
        self.records.push(record.clone());
        Ok(record)
    }

    fn query_all(&self) -> &[AssignmentRecord] {
        &self.records
    }
}
