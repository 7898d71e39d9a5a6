//! Non-good (NG) unit entries from the RF coding and main PCB coding forms.

use serde::{Deserialize, Serialize};

use crate::logged::{Entry, Logged};
use crate::{Area, ModelError, OperatorId, ProductionDate, RecordKind, Shift, StationId};

/// Where and when something was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHeader {
    pub date: ProductionDate,
    pub shift: Shift,
    #[serde(rename = "areaId")]
    pub area: Area,
    #[serde(rename = "stationId")]
    pub station: StationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_label: Option<String>,
}

impl RecordHeader {
    /// Station label if the submitter gave one, otherwise the derived name.
    pub fn station_display(&self) -> String {
        self.station_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map_or_else(|| self.station.default_label(), str::to_string)
    }
}

labelled_enum! {
    /// Role of the person filling an NG form.
    SubmitterRole as "submitter role" {
        Operator => "Operator",
        LineLeader => "Line Leader",
        Inspector => "Quality Inspector",
    }
}

labelled_enum! {
    Block as "block" {
        A => "A",
        B => "B",
    }
}

labelled_enum! {
    RgType as "RG type" {
        FourG => "4G",
        Rf => "RF",
    }
}

labelled_enum! {
    PcbType as "PCB type" {
        G23 => "G23",
        G13 => "G13",
        Cavili => "Cavili",
        Other => "Other",
    }
}

labelled_enum! {
    IssueType as "issue type" {
        Process => "Process Issue",
        Vendor => "Vendor Issue",
    }
}

labelled_enum! {
    IssueCategory as "issue category" {
        DigitCut => "Digit Cut",
        PcbOff => "PCB Off",
        ProgrammingFail => "Programming Fail",
        OperationSkip => "Operation Skip",
        NoClear => "No Clear",
        ComponentsDamage => "Components Damage",
        OtherIssue => "Other Issue",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submitter {
    pub name: String,
    pub employee_id: String,
    pub role: SubmitterRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorRef {
    pub name: String,
    pub id: OperatorId,
}

/// Form-specific part of an NG entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NgDetail {
    RfCoding {
        block: Block,
        rg_type: RgType,
        part_code: String,
        pcb_type: PcbType,
        issue_description: String,
        ng_reason: String,
    },
    MainPcb {
        issue_type: IssueType,
        issue_category: IssueCategory,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        component_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        other_issue_description: Option<String>,
        reason_description: String,
        shift_incharge_production: String,
    },
}

/// A logged defective-unit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NgEntry {
    #[serde(flatten)]
    pub header: RecordHeader,
    pub vendor: String,
    pub customer: String,
    pub firmware: String,
    pub line_leader: String,
    pub quantity: u32,
    pub submitter: Submitter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<OperatorRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcb_number: Option<String>,
    #[serde(default)]
    pub duplicate_confirmed: bool,
    pub detail: NgDetail,
}

pub type NgRecord = Logged<NgEntry>;

impl NgEntry {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.quantity == 0 {
            return Err(ModelError::InvalidQuantity);
        }
        if self.vendor.trim().is_empty() {
            return Err(ModelError::MissingField("vendor"));
        }
        if self.submitter.employee_id.trim().is_empty() {
            return Err(ModelError::MissingField("submitterEmployeeId"));
        }
        Ok(())
    }

    /// Issue bucket used for Pareto analysis.
    pub fn issue_key(&self) -> String {
        let key = match &self.detail {
            NgDetail::MainPcb { issue_category, .. } => issue_category.as_str().to_string(),
            NgDetail::RfCoding {
                issue_description, ..
            } => issue_description.trim().to_string(),
        };
        if key.is_empty() {
            "Uncategorized".to_string()
        } else {
            key
        }
    }

    /// Free-text issue summary shown in registry listings.
    pub fn issue_summary(&self) -> &str {
        match &self.detail {
            NgDetail::RfCoding {
                issue_description, ..
            } => issue_description,
            NgDetail::MainPcb {
                issue_category, ..
            } => issue_category.as_str(),
        }
    }

    /// Non-blank PCB number, if one was scanned or typed.
    pub fn pcb(&self) -> Option<&str> {
        self.pcb_number
            .as_deref()
            .map(str::trim)
            .filter(|pcb| !pcb.is_empty())
    }
}

impl Entry for NgEntry {
    const KIND: RecordKind = RecordKind::Ng;

    fn date(&self) -> ProductionDate {
        self.header.date
    }
}
