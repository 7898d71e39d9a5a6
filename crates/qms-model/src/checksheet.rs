//! Process, patrolling and general checksheets.
//!
//! A checksheet is a header plus a fixed list of checkpoints, each marked by
//! the quality checker. Sheets are stored whole; every submission appends a
//! new sheet, even for a line and shift that was already checked.

use serde::{Deserialize, Serialize};

use crate::logged::{Entry, Logged};
use crate::{ModelError, ProductionDate, RecordKind, Shift};

labelled_enum! {
    /// Checkpoint verdict on the RF coding, process and general sheets.
    CheckStatus as "checkpoint status" {
        Ok => "OK",
        NotOk => "NOT OK",
        Pending => "",
    }
}

labelled_enum! {
    /// Checkpoint verdict on the patrolling sheet.
    PatrolStatus as "patrol status" {
        Ok => "OK",
        Nok => "NOK",
        NotBecomeOk => "Not Become OK",
        Pending => "",
    }
}

/// A verdict that may flag a failed checkpoint.
pub trait Verdict {
    fn is_failure(&self) -> bool;
}

impl Verdict for CheckStatus {
    fn is_failure(&self) -> bool {
        matches!(self, CheckStatus::NotOk)
    }
}

impl Verdict for PatrolStatus {
    fn is_failure(&self) -> bool {
        matches!(self, PatrolStatus::Nok | PatrolStatus::NotBecomeOk)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetHeader {
    pub date: ProductionDate,
    pub shift: Shift,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint<S = CheckStatus> {
    pub id: String,
    pub description: String,
    pub status: S,
    #[serde(default)]
    pub remarks: String,
}

pub type PatrolCheckpoint = Checkpoint<PatrolStatus>;

fn count_failures<S: Verdict>(points: &[Checkpoint<S>]) -> usize {
    points.iter().filter(|point| point.status.is_failure()).count()
}

fn require_points<T>(points: &[T]) -> Result<(), ModelError> {
    if points.is_empty() {
        return Err(ModelError::MissingField("checkpoints"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfCodingChecksheet {
    #[serde(flatten)]
    pub header: SheetHeader,
    pub area: String,
    pub line_no: String,
    pub line_leader: String,
    pub user_id: String,
    pub quality_checker: String,
    pub checkpoints: Vec<Checkpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessChecksheet {
    #[serde(flatten)]
    pub header: SheetHeader,
    pub area: String,
    pub line_no: String,
    pub line_leader: String,
    pub supervisor: String,
    pub quality_checker: String,
    pub user_id: String,
    pub checkpoints: Vec<Checkpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatrollingChecksheet {
    #[serde(flatten)]
    pub header: SheetHeader,
    pub area: String,
    pub line_no: String,
    pub line_leader: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<String>,
    pub quality_checker: String,
    pub user_id: String,
    pub time_slot: String,
    pub checkpoints: Vec<PatrolCheckpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralCheckItem {
    pub category: String,
    #[serde(flatten)]
    pub point: Checkpoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralChecksheet {
    #[serde(flatten)]
    pub header: SheetHeader,
    pub checked_by: String,
    pub items: Vec<GeneralCheckItem>,
}

impl RfCodingChecksheet {
    pub fn not_ok_count(&self) -> usize {
        count_failures(&self.checkpoints)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        require_points(&self.checkpoints)
    }
}

impl ProcessChecksheet {
    pub fn not_ok_count(&self) -> usize {
        count_failures(&self.checkpoints)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        require_points(&self.checkpoints)
    }
}

impl PatrollingChecksheet {
    pub fn not_ok_count(&self) -> usize {
        count_failures(&self.checkpoints)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.time_slot.trim().is_empty() {
            return Err(ModelError::MissingField("timeSlot"));
        }
        require_points(&self.checkpoints)
    }
}

impl GeneralChecksheet {
    pub fn not_ok_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.point.status.is_failure())
            .count()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        require_points(&self.items)
    }
}

impl Entry for RfCodingChecksheet {
    const KIND: RecordKind = RecordKind::RfCodingSheet;

    fn date(&self) -> ProductionDate {
        self.header.date
    }
}

impl Entry for ProcessChecksheet {
    const KIND: RecordKind = RecordKind::ProcessSheet;

    fn date(&self) -> ProductionDate {
        self.header.date
    }
}

impl Entry for PatrollingChecksheet {
    const KIND: RecordKind = RecordKind::PatrollingSheet;

    fn date(&self) -> ProductionDate {
        self.header.date
    }
}

impl Entry for GeneralChecksheet {
    const KIND: RecordKind = RecordKind::GeneralSheet;

    fn date(&self) -> ProductionDate {
        self.header.date
    }
}

pub type RfCodingSheetRecord = Logged<RfCodingChecksheet>;
pub type ProcessSheetRecord = Logged<ProcessChecksheet>;
pub type PatrollingSheetRecord = Logged<PatrollingChecksheet>;
pub type GeneralSheetRecord = Logged<GeneralChecksheet>;
