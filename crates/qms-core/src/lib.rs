//! Decision logic for the shop-floor quality workspace.
//!
//! - [`rotation`]: flags manpower changes at a station and operator movement
//!   between areas while a deployment form is filled in.
//! - [`monitor`]: keeps that alert current as the form is edited and submits it.
//! - [`analytics`]: dashboard figures for NG records and observations.
//! - [`search`]: NG registry filtering.

pub mod analytics;
pub mod error;
pub mod monitor;
pub mod rotation;
pub mod search;

pub use analytics::{
    DailyTotal, ObservationAnalytics, ParetoRow, ProductionAnalytics, ShiftTotal, Tally,
    TimeRange,
};
pub use error::{CoreError, Result};
pub use monitor::{DraftMonitor, Submission};
pub use rotation::{RotationAlert, evaluate};
pub use search::RegistryFilter;
