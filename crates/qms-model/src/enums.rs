//! Shift and production-area enumerations shared by every form kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Production shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shift {
    A,
    B,
    C,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::A, Shift::B, Shift::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::A => "A",
            Shift::B => "B",
            Shift::C => "C",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let code = normalized.strip_prefix("SHIFT").unwrap_or(&normalized).trim();
        match code {
            "A" => Ok(Shift::A),
            "B" => Ok(Shift::B),
            "C" => Ok(Shift::C),
            _ => Err(ModelError::UnknownValue {
                kind: "shift",
                value: s.to_string(),
            }),
        }
    }
}

/// Production area (module) on the factory floor.
///
/// The serialized form is the stable area code (`RF_CODING`, `PCB_1PH`, ...);
/// [`Area::label`] is what people read on screens and in exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Area {
    #[serde(rename = "RF_CODING")]
    RfCoding,
    #[serde(rename = "PCB_1PH")]
    Pcb1Phase,
    #[serde(rename = "PCB_3PH")]
    Pcb3Phase,
    #[serde(rename = "LTCT")]
    Ltct,
}

impl Area {
    pub const ALL: [Area; 4] = [Area::RfCoding, Area::Pcb1Phase, Area::Pcb3Phase, Area::Ltct];

    /// Stable code stored in records.
    pub fn code(&self) -> &'static str {
        match self {
            Area::RfCoding => "RF_CODING",
            Area::Pcb1Phase => "PCB_1PH",
            Area::Pcb3Phase => "PCB_3PH",
            Area::Ltct => "LTCT",
        }
    }

    /// Human-readable area name.
    pub fn label(&self) -> &'static str {
        match self {
            Area::RfCoding => "RF Coding Area",
            Area::Pcb1Phase => "Main PCB 1 Phase",
            Area::Pcb3Phase => "Main PCB 3 Phase",
            Area::Ltct => "LTCT Coding Area",
        }
    }

    /// Number of numbered benches in the area. "Other" is always allowed on top.
    pub fn bench_count(&self) -> u8 {
        match self {
            Area::RfCoding | Area::Pcb1Phase => 12,
            Area::Pcb3Phase => 6,
            Area::Ltct => 5,
        }
    }

    /// Selectable station identifiers: `1..=bench_count` followed by `Other`.
    pub fn station_choices(&self) -> Vec<String> {
        (1..=self.bench_count())
            .map(|bench| bench.to_string())
            .chain(std::iter::once("Other".to_string()))
            .collect()
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Area {
    type Err = ModelError;

    /// Accepts the area code in any case, with `-` or spaces in place of `_`,
    /// the short aliases `RF` / `PCB1` / `PCB3`, or the full label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(area) = Area::ALL
            .into_iter()
            .find(|area| area.label().eq_ignore_ascii_case(trimmed))
        {
            return Ok(area);
        }
        let normalized = trimmed.to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "RF_CODING" | "RF" => Ok(Area::RfCoding),
            "PCB_1PH" | "PCB1" | "PCB_1" => Ok(Area::Pcb1Phase),
            "PCB_3PH" | "PCB3" | "PCB_3" => Ok(Area::Pcb3Phase),
            "LTCT" => Ok(Area::Ltct),
            _ => Err(ModelError::UnknownValue {
                kind: "area",
                value: s.to_string(),
            }),
        }
    }
}
