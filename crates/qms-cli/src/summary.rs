//! Terminal rendering for command results.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use qms_core::{RotationAlert, Submission, Tally};
use qms_model::{Area, AssignmentRecord, NgRecord, User};
use qms_store::Database;

use crate::commands::{Dashboard, ExportOutcome, RecordOutcome, UserOutcome};

pub fn print_areas() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Area"),
        header_cell("Benches"),
        header_cell("Stations"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for area in Area::ALL {
        table.add_row(vec![
            Cell::new(area.code()),
            Cell::new(area.label()),
            Cell::new(area.bench_count()),
            Cell::new(area.station_choices().join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn print_alert(alert: &RotationAlert, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(alert)?);
        return Ok(());
    }
    match alert.message() {
        Some(message) => println!("{message} (last seen {})", prior_date(alert)),
        None => println!("No rotation alert."),
    }
    Ok(())
}

fn prior_date(alert: &RotationAlert) -> String {
    match alert {
        RotationAlert::StationChanged { prior_date, .. }
        | RotationAlert::Movement { prior_date, .. } => prior_date.to_string(),
        RotationAlert::Clear => "-".to_string(),
    }
}

pub fn print_submission(submission: &Submission) {
    let record = &submission.record;
    println!(
        "Saved {} - {} ({}) at {} / {} on {} shift {}",
        record.id,
        record.operator_name,
        record.operator_id,
        record.area.label(),
        record.station_label,
        record.date,
        record.shift
    );
    if let Some(message) = submission.alert.message() {
        println!("Alert in force: {message}");
    }
}

pub fn print_history(records: &[AssignmentRecord]) {
    if records.is_empty() {
        println!("No deployments found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Shift"),
        header_cell("Area"),
        header_cell("Station"),
        header_cell("Operator"),
        header_cell("Operator ID"),
    ]);
    apply_table_style(&mut table);
    for record in records {
        table.add_row(vec![
            Cell::new(record.date),
            Cell::new(record.shift),
            Cell::new(record.area.label()),
            Cell::new(&record.station_label),
            Cell::new(&record.operator_name),
            Cell::new(&record.operator_id),
        ]);
    }
    println!("{table}");
}

pub fn print_record(outcome: &RecordOutcome) {
    println!("Saved {} to {}", outcome.id, outcome.collection.label());
    if outcome.duplicate_pcb {
        println!("Marked as a repeat PCB.");
    }
    if let Some(not_ok) = outcome.not_ok {
        println!("{not_ok} checkpoint(s) not OK");
    }
}

pub fn print_dashboard(dashboard: &Dashboard, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(dashboard)?);
        return Ok(());
    }
    let production = &dashboard.production;
    println!(
        "{} - {} window ending {} - {} NG unit(s)",
        production.area.label(),
        production.range,
        production.today,
        production.total
    );

    let mut pareto = Table::new();
    pareto.set_header(vec![
        header_cell("Issue"),
        header_cell("Entries"),
        header_cell("Cumulative %"),
    ]);
    apply_table_style(&mut pareto);
    align_column(&mut pareto, 1, CellAlignment::Right);
    align_column(&mut pareto, 2, CellAlignment::Right);
    for row in &production.pareto {
        pareto.add_row(vec![
            Cell::new(&row.issue),
            Cell::new(row.count),
            Cell::new(row.cumulative_percent),
        ]);
    }
    println!("{pareto}");

    let mut shifts = Table::new();
    shifts.set_header(vec![header_cell("Shift"), header_cell("NG Qty")]);
    apply_table_style(&mut shifts);
    align_column(&mut shifts, 1, CellAlignment::Right);
    for row in &production.shifts {
        shifts.add_row(vec![Cell::new(row.shift), Cell::new(row.value)]);
    }
    println!("{shifts}");

    print_tallies("Line", "NG Qty", &production.lines);
    print_tallies("Vendor", "NG Qty", &production.vendors);

    let observations = &dashboard.observations;
    println!("{} observation(s)", observations.total);
    print_tallies("Operator", "Observations", &observations.operator_repetition);
    print_tallies("Vendor", "Observations", &observations.material);
    print_tallies("Line Leader", "Observations", &observations.line_leader);
    Ok(())
}

fn print_tallies(name: &str, value: &str, rows: &[Tally]) {
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell(name), header_cell(value)]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![Cell::new(&row.name), Cell::new(row.value)]);
    }
    println!("{table}");
}

pub fn print_search(records: &[&NgRecord]) {
    if records.is_empty() {
        println!("No NG records match.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Shift"),
        header_cell("Area"),
        header_cell("Station"),
        header_cell("PCB"),
        header_cell("Vendor"),
        header_cell("Issue"),
        header_cell("Qty"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 7, CellAlignment::Right);
    for record in records {
        let pcb = Cell::new(record.pcb().unwrap_or("-"));
        let pcb = if record.duplicate_confirmed {
            pcb.fg(Color::DarkYellow).add_attribute(Attribute::Bold)
        } else {
            pcb
        };
        table.add_row(vec![
            Cell::new(record.header.date),
            Cell::new(record.header.shift),
            Cell::new(record.header.area.code()),
            Cell::new(record.header.station_display()),
            pcb,
            Cell::new(&record.vendor),
            Cell::new(record.issue_summary()),
            Cell::new(record.quantity),
        ]);
    }
    println!("{table}");
    println!("{} record(s)", records.len());
}

pub fn print_export(outcome: &ExportOutcome, db: &Database) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Collection"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (collection, count) in db.counts() {
        table.add_row(vec![Cell::new(collection.label()), Cell::new(count)]);
    }
    println!("{table}");
    println!("Workbook: {}", outcome.workbook.display());
    for path in &outcome.csv_files {
        println!("CSV: {}", path.display());
    }
}

pub fn print_user(outcome: &UserOutcome) {
    match outcome {
        UserOutcome::Added(user) => println!("Registered {} ({})", user.username, user.role),
        UserOutcome::Listed(users) => print_users(users),
        UserOutcome::StatusChanged(user) => println!("{} is now {}", user.username, user.status),
        UserOutcome::Deleted(user) => println!("Deleted {}", user.username),
        UserOutcome::LoggedIn(user) => {
            println!("Signed in as {} ({}, {})", user.name, user.username, user.role);
        }
        UserOutcome::Bootstrapped(Some(user)) => {
            println!("Created initial manager account '{}'", user.username);
        }
        UserOutcome::Bootstrapped(None) => println!("Accounts already exist; nothing to do."),
    }
}

fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("No users registered. Run `qms user bootstrap` to create one.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Username"),
        header_cell("Name"),
        header_cell("Employee ID"),
        header_cell("Role"),
        header_cell("Status"),
        header_cell("Last Login"),
    ]);
    apply_table_style(&mut table);
    for user in users {
        let status = if user.is_active() {
            Cell::new(user.status).fg(Color::Green)
        } else {
            Cell::new(user.status).fg(Color::Red)
        };
        let last_login = user
            .last_login_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&user.username),
            Cell::new(&user.name),
            Cell::new(&user.employee_id),
            Cell::new(user.role),
            status,
            Cell::new(last_login),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
