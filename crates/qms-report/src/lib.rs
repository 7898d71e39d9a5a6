//! Master registry export.
//!
//! [`MasterWorkbook::from_database`] flattens every collection into a fixed
//! set of sheets (checksheets become one row per checkpoint). The workbook is
//! then written either as a single `.xlsx` file or as a directory of CSV
//! files.

mod csv_export;
mod error;
mod sheets;
mod xlsx;

pub use csv_export::{slug, write_csv_dir};
pub use error::{ReportError, Result};
pub use sheets::{
    Cell, Column, DEPLOYMENT_SHEET, GENERAL_SHEET, MasterWorkbook, NG_SHEET, OBSERVATION_SHEET,
    PATROLLING_SHEET, PROCESS_SHEET, RF_CODING_SHEET, Sheet,
};
pub use xlsx::{write_xlsx, xlsx_bytes};
