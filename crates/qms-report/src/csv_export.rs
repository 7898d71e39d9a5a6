use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};
use crate::sheets::{MasterWorkbook, Sheet};

/// Write one CSV file per sheet into `dir` and return the written paths.
pub fn write_csv_dir(workbook: &MasterWorkbook, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        operation: "create directory",
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(workbook.sheets.len());
    for sheet in &workbook.sheets {
        let path = dir.join(format!("{}.csv", slug(sheet.name)));
        write_sheet(sheet, &path).map_err(|source| ReportError::Csv {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), rows = sheet.rows.len(), "sheet exported");
        written.push(path);
    }
    tracing::info!(dir = %dir.display(), files = written.len(), "CSV export written");
    Ok(written)
}

fn write_sheet(sheet: &Sheet, path: &Path) -> std::result::Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(sheet.headers())?;
    for row in &sheet.rows {
        writer.write_record(row.iter().map(|cell| cell.to_text()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Lower-case file stem: `RF Coding Area Report` becomes `rf_coding_area_report`.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}
