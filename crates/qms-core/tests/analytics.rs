//! Dashboard aggregation and registry search.

use chrono::Utc;
use qms_core::{ObservationAnalytics, ProductionAnalytics, RegistryFilter, TimeRange};
use qms_model::{
    Area, Block, IssueCategory, IssueType, Logged, NgDetail, NgEntry, NgRecord,
    ObservationCategory, ObservationEntry, ObservationRecord, ObservationSeverity,
    ObservationStatus, OperatorId, OperatorRef, PcbType, ProductionDate, RecordHeader, RgType,
    Shift, StationId, Submitter, SubmitterRole,
};

fn date(value: &str) -> ProductionDate {
    ProductionDate::parse(value).unwrap()
}

fn header(day: &str, shift: Shift, area: Area, bench: &str) -> RecordHeader {
    RecordHeader {
        date: date(day),
        shift,
        area,
        station: StationId::new(bench).unwrap(),
        station_label: None,
    }
}

fn pcb_ng(day: &str, shift: Shift, bench: &str, vendor: &str, qty: u32, issue: IssueCategory) -> NgRecord {
    Logged::new(
        NgEntry {
            header: header(day, shift, Area::Pcb1Phase, bench),
            vendor: vendor.to_string(),
            customer: "Utility North".to_string(),
            firmware: "v2.1".to_string(),
            line_leader: "Ravi".to_string(),
            quantity: qty,
            submitter: Submitter {
                name: "Meena".to_string(),
                employee_id: "EMP-22".to_string(),
                role: SubmitterRole::Inspector,
            },
            operator: Some(OperatorRef {
                name: "Kiran Rao".to_string(),
                id: OperatorId::new("OP-314").unwrap(),
            }),
            pcb_number: Some(format!("PCB-{day}-{bench}")),
            duplicate_confirmed: false,
            detail: NgDetail::MainPcb {
                issue_type: IssueType::Process,
                issue_category: issue,
                component_name: None,
                other_issue_description: None,
                reason_description: "Checked at rework".to_string(),
                shift_incharge_production: "Karan".to_string(),
            },
        },
        Utc::now(),
    )
}

fn rf_ng(day: &str, description: &str) -> NgRecord {
    let mut record = pcb_ng(day, Shift::A, "1", "Acme", 1, IssueCategory::OtherIssue);
    record.body.header.area = Area::RfCoding;
    record.body.detail = NgDetail::RfCoding {
        block: Block::B,
        rg_type: RgType::Rf,
        part_code: "RF-77".to_string(),
        pcb_type: PcbType::G13,
        issue_description: description.to_string(),
        ng_reason: "Coding fail".to_string(),
    };
    record
}

fn observation(day: &str, operator: Option<&str>, vendor: Option<&str>) -> ObservationRecord {
    Logged::new(
        ObservationEntry {
            header: header(day, Shift::B, Area::Ltct, "2"),
            vendor: vendor.map(str::to_string),
            line_leader: None,
            operator_name: operator.map(str::to_string),
            category: ObservationCategory::Operator,
            issue_description: "Gloves not worn".to_string(),
            issue_found_at: "Bench 2".to_string(),
            responsible_type: "Operator".to_string(),
            corrective_action: "Briefed".to_string(),
            action_owner: "Ravi".to_string(),
            target_date: date(day),
            quantity_affected: 0,
            status: ObservationStatus::Pending,
            closure_date: None,
            remarks: None,
            observer_name: "Meena".to_string(),
            observer_employee_id: "EMP-22".to_string(),
            severity: ObservationSeverity::Low,
            is_repeated: false,
        },
        Utc::now(),
    )
}

// 2024-03-06 is a Wednesday; its week starts on Sunday 2024-03-03.
const TODAY: &str = "2024-03-06";

#[test]
fn time_ranges_follow_calendar_boundaries() {
    let today = date(TODAY);
    assert!(TimeRange::Daily.contains(today, today));
    assert!(!TimeRange::Daily.contains(date("2024-03-05"), today));
    assert!(TimeRange::Weekly.contains(date("2024-03-03"), today));
    assert!(!TimeRange::Weekly.contains(date("2024-03-02"), today));
    assert!(TimeRange::Monthly.contains(date("2024-03-01"), today));
    assert!(!TimeRange::Monthly.contains(date("2024-02-29"), today));
}

#[test]
fn production_figures_for_the_week() {
    let records = vec![
        pcb_ng("2024-03-02", Shift::A, "1", "Acme", 9, IssueCategory::PcbOff),
        pcb_ng("2024-03-04", Shift::A, "1", "Acme", 3, IssueCategory::DigitCut),
        pcb_ng("2024-03-04", Shift::B, "2", "Bolt", 2, IssueCategory::DigitCut),
        pcb_ng("2024-03-06", Shift::B, "2", "Bolt", 1, IssueCategory::PcbOff),
        pcb_ng("2024-03-06", Shift::A, "4", "Acme", 4, IssueCategory::DigitCut),
        rf_ng("2024-03-06", "Wrong ID"),
    ];
    let stats = ProductionAnalytics::compute(&records, Area::Pcb1Phase, TimeRange::Weekly, date(TODAY));

    assert_eq!(stats.total, 10);
    let trend: Vec<_> = stats.trend.iter().map(|row| (row.date.to_string(), row.value)).collect();
    assert_eq!(
        trend,
        [("2024-03-04".to_string(), 5), ("2024-03-06".to_string(), 5)]
    );

    let vendors: Vec<_> = stats.vendors.iter().map(|row| (row.name.as_str(), row.value)).collect();
    assert_eq!(vendors, [("Acme", 7), ("Bolt", 3)]);

    let shifts: Vec<_> = stats.shifts.iter().map(|row| (row.shift, row.value)).collect();
    assert_eq!(shifts, [(Shift::A, 7), (Shift::B, 3), (Shift::C, 0)]);

    let stations: Vec<_> = stats.stations.iter().map(|row| (row.name.as_str(), row.value)).collect();
    assert_eq!(stations, [("ST-4", 4), ("ST-1", 3), ("ST-2", 3)]);
    assert_eq!(stats.lines, stats.stations);

    let pareto: Vec<_> = stats
        .pareto
        .iter()
        .map(|row| (row.issue.as_str(), row.count, row.cumulative_percent))
        .collect();
    assert_eq!(pareto, [("Digit Cut", 3, 75), ("PCB Off", 1, 100)]);
}

#[test]
fn station_labels_name_the_lines() {
    let mut record = pcb_ng(TODAY, Shift::C, "7", "Acme", 2, IssueCategory::NoClear);
    record.body.header.station_label = Some("Rework cell".to_string());
    let stats = ProductionAnalytics::compute(&[record], Area::Pcb1Phase, TimeRange::Daily, date(TODAY));
    assert_eq!(stats.lines[0].name, "Rework cell");
    assert_eq!(stats.stations[0].name, "ST-7");
}

#[test]
fn rf_issue_descriptions_feed_the_pareto() {
    let records = vec![rf_ng(TODAY, "Wrong ID"), rf_ng(TODAY, "  ")];
    let stats = ProductionAnalytics::compute(&records, Area::RfCoding, TimeRange::Daily, date(TODAY));
    let issues: Vec<_> = stats.pareto.iter().map(|row| row.issue.as_str()).collect();
    assert_eq!(issues, ["Uncategorized", "Wrong ID"]);
}

#[test]
fn empty_window_has_zero_shifts() {
    let stats = ProductionAnalytics::compute(&[], Area::Ltct, TimeRange::Monthly, date(TODAY));
    assert_eq!(stats.total, 0);
    assert!(stats.pareto.is_empty());
    assert_eq!(stats.shifts.len(), 3);
    assert!(stats.shifts.iter().all(|row| row.value == 0));
}

#[test]
fn observation_figures_use_placeholders() {
    let mut observations = vec![
        observation("2024-03-01", Some("Kiran"), Some("Acme")),
        observation("2024-03-05", Some("Kiran"), None),
        observation("2024-03-06", Some(" "), Some("Acme")),
        observation("2024-02-28", Some("Kiran"), Some("Acme")),
    ];
    for index in 0..12 {
        observations.push(observation("2024-03-02", Some(&format!("Temp {index:02}")), None));
    }
    let stats =
        ObservationAnalytics::compute(&observations, Area::Ltct, TimeRange::Monthly, date(TODAY));

    assert_eq!(stats.total, 15);
    assert_eq!(stats.operator_repetition.len(), 10);
    assert_eq!(stats.operator_repetition[0].name, "Kiran");
    assert_eq!(stats.operator_repetition[0].value, 2);
    assert_eq!(stats.operator_repetition[1].name, "Temp 00");
    assert!(!stats.operator_repetition.iter().any(|row| row.name == "Unnamed Operator"));

    let material: Vec<_> = stats.material.iter().map(|row| (row.name.as_str(), row.value)).collect();
    assert_eq!(material, [("Unknown Vendor", 13), ("Acme", 2)]);
    assert_eq!(stats.line_leader[0].name, "Unassigned");
    assert_eq!(stats.trend.first().map(|row| row.date), Some(date("2024-03-01")));
}

#[test]
fn registry_filter_matches_fields_and_flags() {
    let mut repeat = pcb_ng("2024-03-05", Shift::A, "3", "Bolt", 1, IssueCategory::PcbOff);
    repeat.body.duplicate_confirmed = true;
    let records = vec![
        pcb_ng("2024-03-04", Shift::A, "1", "Acme", 1, IssueCategory::PcbOff),
        repeat,
        rf_ng("2024-03-06", "Wrong ID"),
    ];

    let by_vendor = RegistryFilter::new("bolt").apply(&records);
    assert_eq!(by_vendor.len(), 1);

    let by_operator = RegistryFilter::new("op-314").apply(&records);
    assert_eq!(by_operator.len(), 3);
    assert_eq!(by_operator[0].date(), date("2024-03-06"));

    let by_area = RegistryFilter::new("").with_area(Some(Area::RfCoding)).apply(&records);
    assert_eq!(by_area.len(), 1);

    let duplicates = RegistryFilter::default().duplicates_only(true).apply(&records);
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].vendor, "Bolt");

    assert!(RegistryFilter::new("nothing-like-this").apply(&records).is_empty());
}
