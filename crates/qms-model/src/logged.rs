use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ProductionDate, RecordId, RecordKind};

/// Body of a form submission that is stored in an append-only collection.
pub trait Entry {
    const KIND: RecordKind;

    /// Production date the entry is logged against.
    fn date(&self) -> ProductionDate;
}

/// A stored entry: identifier and insertion time wrapped around the form body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logged<T> {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Entry> Logged<T> {
    pub fn new(body: T, created_at: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::generate(T::KIND),
            created_at,
            body,
        }
    }

    pub fn date(&self) -> ProductionDate {
        self.body.date()
    }
}

impl<T> std::ops::Deref for Logged<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.body
    }
}
