//! Operator deployment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Area, ModelError, OperatorId, ProductionDate, RecordId, Shift, StationId};

/// One operator's placement at one station, for one shift, on one date.
///
/// Immutable once stored; the assignment log only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    pub id: RecordId,
    pub date: ProductionDate,
    pub shift: Shift,
    #[serde(rename = "areaId")]
    pub area: Area,
    #[serde(rename = "stationId")]
    pub station: StationId,
    pub station_label: String,
    pub operator_id: OperatorId,
    pub operator_name: String,
    pub created_at: DateTime<Utc>,
}

impl AssignmentRecord {
    pub fn from_new(id: RecordId, entry: NewAssignment, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            date: entry.date,
            shift: entry.shift,
            area: entry.area,
            station: entry.station,
            station_label: entry.station_label,
            operator_id: entry.operator_id,
            operator_name: entry.operator_name,
            created_at,
        }
    }
}

/// A validated assignment waiting to be appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub date: ProductionDate,
    pub shift: Shift,
    #[serde(rename = "areaId")]
    pub area: Area,
    #[serde(rename = "stationId")]
    pub station: StationId,
    pub station_label: String,
    pub operator_id: OperatorId,
    pub operator_name: String,
}

/// The in-progress deployment form.
///
/// Operator and station are optional because the form is evaluated while the
/// submitter is still typing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDraft {
    pub date: ProductionDate,
    pub shift: Shift,
    #[serde(rename = "areaId")]
    pub area: Area,
    #[serde(rename = "stationId", default)]
    pub station: Option<StationId>,
    #[serde(default)]
    pub station_label: Option<String>,
    #[serde(default)]
    pub operator_id: Option<OperatorId>,
    #[serde(default)]
    pub operator_name: String,
}

impl AssignmentDraft {
    /// Fresh form for `date`: shift A, RF coding, bench 1, no operator.
    pub fn new(date: ProductionDate) -> Self {
        Self {
            date,
            shift: Shift::A,
            area: Area::RfCoding,
            station: StationId::new("1").ok(),
            station_label: None,
            operator_id: None,
            operator_name: String::new(),
        }
    }

    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_area(mut self, area: Area) -> Self {
        self.area = area;
        self
    }

    pub fn with_station(mut self, station: Option<StationId>) -> Self {
        self.station = station;
        self
    }

    pub fn with_operator_id(mut self, operator_id: Option<OperatorId>) -> Self {
        self.operator_id = operator_id;
        self
    }

    pub fn with_operator_name(mut self, name: impl Into<String>) -> Self {
        self.operator_name = name.into();
        self
    }

    pub fn with_station_label(mut self, label: Option<String>) -> Self {
        self.station_label = label;
        self
    }

    /// Label shown for the station: the manual override when set, else derived.
    pub fn resolved_station_label(&self) -> Option<String> {
        match (&self.station_label, &self.station) {
            (Some(label), _) if !label.trim().is_empty() => Some(label.trim().to_string()),
            (_, Some(station)) => Some(station.default_label()),
            _ => None,
        }
    }

    /// Validate the mandatory deployment fields.
    pub fn to_new_assignment(&self) -> Result<NewAssignment, ModelError> {
        let operator_name = self.operator_name.trim();
        if operator_name.is_empty() {
            return Err(ModelError::MissingField("operatorName"));
        }
        let operator_id = self
            .operator_id
            .clone()
            .ok_or(ModelError::MissingField("operatorId"))?;
        let station = self
            .station
            .clone()
            .ok_or(ModelError::MissingField("stationId"))?;
        let station_label = self
            .resolved_station_label()
            .unwrap_or_else(|| station.default_label());
        Ok(NewAssignment {
            date: self.date,
            shift: self.shift,
            area: self.area,
            station,
            station_label,
            operator_id,
            operator_name: operator_name.to_string(),
        })
    }
}
