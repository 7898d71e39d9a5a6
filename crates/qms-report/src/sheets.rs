//! Tabular layout of the master registry workbook.

use qms_model::{Checkpoint, ProductionDate, Shift};
use qms_store::{AssignmentStore, Database};

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    /// Value as it appears in a CSV file.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(value) => value.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Number(f64::from(value))
    }
}

impl From<ProductionDate> for Cell {
    fn from(value: ProductionDate) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<Shift> for Cell {
    fn from(value: Shift) -> Self {
        Cell::Text(value.as_str().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub width: f64,
}

const fn col(header: &'static str, width: f64) -> Column {
    Column { header, width }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: &'static str, columns: &'static [Column]) -> Self {
        Self {
            name,
            columns,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width for {}", self.name);
        self.rows.push(row);
    }

    pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.header)
    }
}

pub const NG_SHEET: &str = "NG_Master_Registry";
pub const OBSERVATION_SHEET: &str = "Observations_Master_Registry";
pub const RF_CODING_SHEET: &str = "RF Coding Area Report";
pub const PROCESS_SHEET: &str = "Process Check Sheet Report";
pub const PATROLLING_SHEET: &str = "Patrolling Inspection Report";
pub const DEPLOYMENT_SHEET: &str = "Operator_Deployment_Log";
pub const GENERAL_SHEET: &str = "General Check Sheet Report";

const NG_COLUMNS: &[Column] = &[
    col("Date", 12.0),
    col("Shift", 8.0),
    col("Area", 15.0),
    col("Station", 15.0),
    col("PCB ID", 20.0),
    col("Vendor", 15.0),
    col("Operator", 20.0),
    col("Qty", 8.0),
    col("User ID", 15.0),
];

const OBSERVATION_COLUMNS: &[Column] = &[
    col("Date", 12.0),
    col("Shift", 8.0),
    col("Area", 20.0),
    col("Category", 20.0),
    col("Problem", 40.0),
    col("Status", 12.0),
    col("User ID", 15.0),
];

const LINE_CHECK_COLUMNS: &[Column] = &[
    col("Date", 12.0),
    col("Shift", 8.0),
    col("Line No", 10.0),
    col("Leader", 20.0),
    col("User ID", 15.0),
    col("Checkpoint", 40.0),
    col("Status", 12.0),
    col("Remarks", 25.0),
];

const PATROLLING_COLUMNS: &[Column] = &[
    col("Date", 12.0),
    col("Shift", 8.0),
    col("Time Slot", 25.0),
    col("Line No", 10.0),
    col("User ID", 15.0),
    col("Checkpoint", 40.0),
    col("Status", 12.0),
    col("Remarks", 25.0),
];

const DEPLOYMENT_COLUMNS: &[Column] = &[
    col("Date", 12.0),
    col("Shift", 8.0),
    col("Area", 20.0),
    col("Station", 15.0),
    col("Operator", 25.0),
    col("Operator ID", 15.0),
];

const GENERAL_COLUMNS: &[Column] = &[
    col("Date", 12.0),
    col("Shift", 8.0),
    col("Checked By", 15.0),
    col("Category", 20.0),
    col("Checkpoint", 40.0),
    col("Status", 12.0),
    col("Remarks", 25.0),
];

/// Every collection of a database flattened into sheets.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterWorkbook {
    pub sheets: Vec<Sheet>,
}

impl MasterWorkbook {
    pub fn from_database(db: &Database) -> Self {
        let sheets = vec![
            ng_sheet(db),
            observation_sheet(db),
            line_check_sheet(
                RF_CODING_SHEET,
                db.rf_coding_sheets().iter().map(|record| LineCheck {
                    date: record.header.date,
                    shift: record.header.shift,
                    line_no: &record.line_no,
                    leader: &record.line_leader,
                    user_id: &record.user_id,
                    points: &record.checkpoints,
                }),
            ),
            line_check_sheet(
                PROCESS_SHEET,
                db.process_sheets().iter().map(|record| LineCheck {
                    date: record.header.date,
                    shift: record.header.shift,
                    line_no: &record.line_no,
                    leader: &record.line_leader,
                    user_id: &record.user_id,
                    points: &record.checkpoints,
                }),
            ),
            patrolling_sheet(db),
            deployment_sheet(db),
            general_sheet(db),
        ];
        let rows: usize = sheets.iter().map(|sheet| sheet.rows.len()).sum();
        tracing::debug!(sheets = sheets.len(), rows, "master workbook assembled");
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// `Quality_Master_Registry_<date>.xlsx`
    pub fn default_file_name(date: ProductionDate) -> String {
        format!("Quality_Master_Registry_{date}.xlsx")
    }
}

fn ng_sheet(db: &Database) -> Sheet {
    let mut sheet = Sheet::new(NG_SHEET, NG_COLUMNS);
    for record in db.ng_records() {
        sheet.push(vec![
            record.header.date.into(),
            record.header.shift.into(),
            record.header.area.code().into(),
            record.header.station_display().into(),
            record.pcb().unwrap_or_default().into(),
            record.vendor.as_str().into(),
            record
                .operator
                .as_ref()
                .map(|operator| operator.name.as_str())
                .unwrap_or_default()
                .into(),
            record.quantity.into(),
            record.submitter.employee_id.as_str().into(),
        ]);
    }
    sheet
}

fn observation_sheet(db: &Database) -> Sheet {
    let mut sheet = Sheet::new(OBSERVATION_SHEET, OBSERVATION_COLUMNS);
    for record in db.observations() {
        sheet.push(vec![
            record.header.date.into(),
            record.header.shift.into(),
            record.header.area.label().into(),
            record.category.as_str().into(),
            record.issue_description.as_str().into(),
            record.status.as_str().into(),
            record.observer_employee_id.as_str().into(),
        ]);
    }
    sheet
}

struct LineCheck<'a> {
    date: ProductionDate,
    shift: Shift,
    line_no: &'a str,
    leader: &'a str,
    user_id: &'a str,
    points: &'a [Checkpoint],
}

fn line_check_sheet<'a>(name: &'static str, checks: impl Iterator<Item = LineCheck<'a>>) -> Sheet {
    let mut sheet = Sheet::new(name, LINE_CHECK_COLUMNS);
    for check in checks {
        for point in check.points {
            sheet.push(vec![
                check.date.into(),
                check.shift.into(),
                check.line_no.into(),
                check.leader.into(),
                check.user_id.into(),
                point.description.as_str().into(),
                point.status.as_str().into(),
                point.remarks.as_str().into(),
            ]);
        }
    }
    sheet
}

fn patrolling_sheet(db: &Database) -> Sheet {
    let mut sheet = Sheet::new(PATROLLING_SHEET, PATROLLING_COLUMNS);
    for record in db.patrolling_sheets() {
        for point in &record.checkpoints {
            sheet.push(vec![
                record.header.date.into(),
                record.header.shift.into(),
                record.time_slot.as_str().into(),
                record.line_no.as_str().into(),
                record.user_id.as_str().into(),
                point.description.as_str().into(),
                point.status.as_str().into(),
                point.remarks.as_str().into(),
            ]);
        }
    }
    sheet
}

fn deployment_sheet(db: &Database) -> Sheet {
    let mut sheet = Sheet::new(DEPLOYMENT_SHEET, DEPLOYMENT_COLUMNS);
    for record in db.assignments().query_all() {
        sheet.push(vec![
            record.date.into(),
            record.shift.into(),
            record.area.label().into(),
            record.station_label.as_str().into(),
            record.operator_name.as_str().into(),
            record.operator_id.as_str().into(),
        ]);
    }
    sheet
}

fn general_sheet(db: &Database) -> Sheet {
    let mut sheet = Sheet::new(GENERAL_SHEET, GENERAL_COLUMNS);
    for record in db.general_sheets() {
        for item in &record.items {
            sheet.push(vec![
                record.header.date.into(),
                record.header.shift.into(),
                record.checked_by.as_str().into(),
                item.category.as_str().into(),
                item.point.description.as_str().into(),
                item.point.status.as_str().into(),
                item.point.remarks.as_str().into(),
            ]);
        }
    }
    sheet
}
