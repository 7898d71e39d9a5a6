//! Typed records for the shop-floor quality workspace.
//!
//! Every form kind (operator deployment, NG entry, process observation and
//! the checksheets) is an explicit struct sharing a small date/shift header.
//! Identifiers and production dates are newtypes so that ordering and
//! comparison rules live in one place.

/// Declares a closed vocabulary whose serialized form is its display label.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| $crate::ModelError::UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

pub mod assignment;
pub mod checksheet;
pub mod date;
pub mod enums;
pub mod error;
pub mod ids;
pub mod logged;
pub mod ng;
pub mod observation;
pub mod user;

pub use assignment::{AssignmentDraft, AssignmentRecord, NewAssignment};
pub use checksheet::{
    CheckStatus, Checkpoint, GeneralCheckItem, GeneralChecksheet, GeneralSheetRecord,
    PatrolCheckpoint, PatrolStatus, PatrollingChecksheet, PatrollingSheetRecord,
    ProcessChecksheet, ProcessSheetRecord, RfCodingChecksheet, RfCodingSheetRecord, SheetHeader,
    Verdict,
};
pub use date::ProductionDate;
pub use enums::{Area, Shift};
pub use error::{ModelError, Result};
pub use ids::{OperatorId, RecordId, RecordKind, StationId};
pub use logged::{Entry, Logged};
pub use ng::{
    Block, IssueCategory, IssueType, NgDetail, NgEntry, NgRecord, OperatorRef, PcbType,
    RecordHeader, RgType, Submitter, SubmitterRole,
};
pub use observation::{
    ObservationCategory, ObservationEntry, ObservationRecord, ObservationSeverity,
    ObservationStatus,
};
pub use user::{NewUser, User, UserRole, UserStatus};
