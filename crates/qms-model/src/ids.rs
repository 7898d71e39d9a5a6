#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Record families, each with its own identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Assignment,
    Ng,
    Observation,
    RfCodingSheet,
    ProcessSheet,
    PatrollingSheet,
    GeneralSheet,
    User,
}

impl RecordKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            RecordKind::Assignment => "ASGN",
            RecordKind::Ng => "REC",
            RecordKind::Observation => "OBS",
            RecordKind::RfCodingSheet => "RFCH",
            RecordKind::ProcessSheet => "PROC",
            RecordKind::PatrollingSheet => "PATR",
            RecordKind::GeneralSheet => "GEN",
            RecordKind::User => "USER",
        }
    }
}

/// Opaque record identifier, minted once at insertion.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate(kind: RecordKind) -> Self {
        let token = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
        Self(format!("{}_{}", kind.prefix(), token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind_prefix(&self) -> Option<&str> {
        self.0.split_once('_').map(|(prefix, _)| prefix)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Physical bench/station within an area: a bench number or a free-text label.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyStation);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_numbered(&self) -> bool {
        self.0.chars().all(|c| c.is_ascii_digit())
    }

    /// Display name used when the submitter does not override it.
    pub fn default_label(&self) -> String {
        if self.is_numbered() {
            format!("Station {}", self.0)
        } else {
            self.0.clone()
        }
    }

    /// Compact bench tag used on dashboards ("ST-4").
    pub fn bench_tag(&self) -> String {
        format!("ST-{}", self.0)
    }
}

impl TryFrom<String> for StationId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StationId> for String {
    fn from(value: StationId) -> Self {
        value.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operator identifier as typed by the submitter. Not checked against a roster.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct OperatorId(String);

impl OperatorId {
    /// Shortest identifier worth looking up; anything shorter is still being typed.
    pub const MIN_LOOKUP_LEN: usize = 3;

    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyOperator);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_lookup_eligible(&self) -> bool {
        self.0.chars().count() >= Self::MIN_LOOKUP_LEN
    }
}

impl TryFrom<String> for OperatorId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OperatorId> for String {
    fn from(value: OperatorId) -> Self {
        value.0
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
