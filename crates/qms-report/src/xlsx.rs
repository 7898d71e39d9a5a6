use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::{ReportError, Result};
use crate::sheets::{Cell, MasterWorkbook, Sheet};

/// Worksheet row limit, less the header row.
const MAX_DATA_ROWS: usize = 1_048_575;

/// Write the workbook as a single `.xlsx` file, one worksheet per sheet.
pub fn write_xlsx(workbook: &MasterWorkbook, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut book = build(workbook, path)?;
    book.save(path).map_err(|source| ReportError::Xlsx {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), sheets = workbook.sheets.len(), "workbook written");
    Ok(())
}

/// Render the workbook to memory.
pub fn xlsx_bytes(workbook: &MasterWorkbook) -> Result<Vec<u8>> {
    let placeholder = Path::new("<memory>");
    let mut book = build(workbook, placeholder)?;
    book.save_to_buffer().map_err(|source| ReportError::Xlsx {
        path: placeholder.to_path_buf(),
        source,
    })
}

fn build(workbook: &MasterWorkbook, path: &Path) -> Result<Workbook> {
    let mut book = Workbook::new();
    let header = Format::new().set_bold();
    for sheet in &workbook.sheets {
        if sheet.rows.len() > MAX_DATA_ROWS {
            return Err(ReportError::TooManyRows {
                sheet: sheet.name.to_string(),
            });
        }
        write_sheet(&mut book, sheet, &header).map_err(|source| ReportError::Xlsx {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(book)
}

fn write_sheet(
    book: &mut Workbook,
    sheet: &Sheet,
    header: &Format,
) -> std::result::Result<(), XlsxError> {
    let worksheet = book.add_worksheet();
    worksheet.set_name(sheet.name)?;

    for (col, column) in (0u16..).zip(sheet.columns) {
        worksheet.write_string_with_format(0, col, column.header, header)?;
        worksheet.set_column_width(col, column.width)?;
    }

    for (row, cells) in (1u32..).zip(&sheet.rows) {
        for (col, cell) in (0u16..).zip(cells) {
            match cell {
                Cell::Text(text) if text.is_empty() => {}
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text.as_str())?;
                }
                Cell::Number(value) => {
                    worksheet.write_number(row, col, *value)?;
                }
            }
        }
    }
    Ok(())
}
