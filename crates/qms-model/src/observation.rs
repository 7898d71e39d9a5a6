use serde::{Deserialize, Serialize};

use crate::logged::{Entry, Logged};
use crate::ng::RecordHeader;
use crate::{ModelError, ProductionDate, RecordKind};

labelled_enum! {
    ObservationCategory as "observation category" {
        Material => "Material Related",
        Line => "Line Related",
        Operator => "Operator Related",
        General => "General Observation",
    }
}

labelled_enum! {
    ObservationStatus as "observation status" {
        Pending => "Pending",
        InProgress => "In Progress",
        Closed => "Closed",
    }
}

labelled_enum! {
    ObservationSeverity as "severity" {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

/// A process observation raised on the line, with its corrective action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationEntry {
    #[serde(flatten)]
    pub header: RecordHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_leader: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_name: Option<String>,
    #[serde(rename = "observationCategory")]
    pub category: ObservationCategory,
    pub issue_description: String,
    pub issue_found_at: String,
    pub responsible_type: String,
    pub corrective_action: String,
    pub action_owner: String,
    pub target_date: ProductionDate,
    pub quantity_affected: u32,
    pub status: ObservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closure_date: Option<ProductionDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub observer_name: String,
    pub observer_employee_id: String,
    pub severity: ObservationSeverity,
    #[serde(default)]
    pub is_repeated: bool,
}

pub type ObservationRecord = Logged<ObservationEntry>;

impl ObservationEntry {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.issue_description.trim().is_empty() {
            return Err(ModelError::MissingField("issueDescription"));
        }
        if self.observer_employee_id.trim().is_empty() {
            return Err(ModelError::MissingField("observerEmployeeId"));
        }
        if self.status == ObservationStatus::Closed && self.closure_date.is_none() {
            return Err(ModelError::MissingField("closureDate"));
        }
        Ok(())
    }
}

impl Entry for ObservationEntry {
    const KIND: RecordKind = RecordKind::Observation;

    fn date(&self) -> ProductionDate {
        self.header.date
    }
}
