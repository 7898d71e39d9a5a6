use std::path::PathBuf;

use thiserror::Error;

/// Export failure.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to {operation}: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write workbook: {path}")]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Failed to write CSV: {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Sheet '{sheet}' has more rows than a worksheet can hold")]
    TooManyRows { sheet: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;
