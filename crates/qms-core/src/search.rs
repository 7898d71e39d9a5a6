use qms_model::{Area, NgRecord};
use qms_store::Database;

/// Search over the NG registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryFilter {
    /// Case-insensitive substring matched against vendor, customer, firmware,
    /// PCB number and operator name or id. Blank matches everything.
    pub term: String,
    pub area: Option<Area>,
    /// Keep only records the submitter confirmed as a repeat PCB.
    pub duplicates_only: bool,
}

impl RegistryFilter {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn with_area(mut self, area: Option<Area>) -> Self {
        self.area = area;
        self
    }

    pub fn duplicates_only(mut self, enabled: bool) -> Self {
        self.duplicates_only = enabled;
        self
    }

    pub fn matches(&self, record: &NgRecord) -> bool {
        if self.area.is_some_and(|area| area != record.header.area) {
            return false;
        }
        if self.duplicates_only && !record.duplicate_confirmed {
            return false;
        }
        let term = self.term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        let operator = record.operator.as_ref();
        [
            Some(record.vendor.as_str()),
            Some(record.customer.as_str()),
            Some(record.firmware.as_str()),
            record.pcb(),
            operator.map(|op| op.name.as_str()),
            operator.map(|op| op.id.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
    }

    /// Matching records, newest date first.
    pub fn apply<'a>(&self, records: &'a [NgRecord]) -> Vec<&'a NgRecord> {
        let mut hits: Vec<&NgRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .collect();
        // Stable: same-day records keep insertion order.
        hits.sort_by(|a, b| b.date().cmp(&a.date()));
        tracing::debug!(term = %self.term, hits = hits.len(), "registry search");
        hits
    }

    pub fn search<'a>(&self, db: &'a Database) -> Vec<&'a NgRecord> {
        self.apply(db.ng_records())
    }
}
