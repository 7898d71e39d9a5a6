//! Tests for qms-model types.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use qms_model::{
    Area, AssignmentDraft, AssignmentRecord, CheckStatus, Checkpoint, GeneralCheckItem,
    GeneralChecksheet, IssueCategory, IssueType, ModelError, NgDetail, NgEntry, OperatorId,
    PatrolCheckpoint, PatrolStatus, PatrollingChecksheet, ProductionDate, RecordHeader, RecordId,
    RecordKind, Shift, SheetHeader, StationId, Submitter, SubmitterRole,
};

fn date(value: &str) -> ProductionDate {
    ProductionDate::parse(value).expect("valid date")
}

fn main_pcb_entry(category: IssueCategory) -> NgEntry {
    NgEntry {
        header: RecordHeader {
            date: date("2024-03-04"),
            shift: Shift::B,
            area: Area::Pcb1Phase,
            station: StationId::new("3").unwrap(),
            station_label: None,
        },
        vendor: "Acme Boards".to_string(),
        customer: "Utility North".to_string(),
        firmware: "v2.1".to_string(),
        line_leader: "Ravi".to_string(),
        quantity: 2,
        submitter: Submitter {
            name: "Meena".to_string(),
            employee_id: "EMP-22".to_string(),
            role: SubmitterRole::Inspector,
        },
        operator: None,
        pcb_number: Some(" PCB-991 ".to_string()),
        duplicate_confirmed: false,
        detail: NgDetail::MainPcb {
            issue_type: IssueType::Process,
            issue_category: category,
            component_name: None,
            other_issue_description: None,
            reason_description: "Solder bridge".to_string(),
            shift_incharge_production: "Karan".to_string(),
        },
    }
}

#[test]
fn assignment_record_uses_wire_field_names() {
    let record = AssignmentRecord {
        id: RecordId::generate(RecordKind::Assignment),
        date: date("2024-01-02"),
        shift: Shift::A,
        area: Area::RfCoding,
        station: StationId::new("1").unwrap(),
        station_label: "Station 1".to_string(),
        operator_id: OperatorId::new("OP1").unwrap(),
        operator_name: "Alice".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 2, 6, 0, 0).unwrap(),
    };
    let value = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(value["areaId"], "RF_CODING");
    assert_eq!(value["stationId"], "1");
    assert_eq!(value["operatorId"], "OP1");
    assert_eq!(value["date"], "2024-01-02");
    assert_eq!(value["shift"], "A");

    let back: AssignmentRecord = serde_json::from_value(value).expect("deserialize record");
    assert_eq!(back, record);
}

#[test]
fn malformed_dates_are_rejected_on_load() {
    let json = r#"{"date":"2024-1-2","shift":"A","areaId":"LTCT"}"#;
    let err = serde_json::from_str::<AssignmentDraft>(json).unwrap_err();
    assert!(err.to_string().contains("invalid production date"));
}

#[test]
fn draft_requires_every_deployment_field() {
    let draft = AssignmentDraft::new(date("2024-01-02"));
    assert_eq!(
        draft.to_new_assignment(),
        Err(ModelError::MissingField("operatorName"))
    );

    let draft = draft.with_operator_name("Alice");
    assert_eq!(
        draft.to_new_assignment(),
        Err(ModelError::MissingField("operatorId"))
    );

    let draft = draft
        .with_operator_id(OperatorId::new("OP1").ok())
        .with_station(None);
    assert_eq!(
        draft.to_new_assignment(),
        Err(ModelError::MissingField("stationId"))
    );
}

#[test]
fn draft_station_label_override_wins() {
    let draft = AssignmentDraft::new(date("2024-01-02"))
        .with_area(Area::Ltct)
        .with_station(StationId::new("Other").ok())
        .with_station_label(Some("Rework bench".to_string()))
        .with_operator_id(OperatorId::new("OP7").ok())
        .with_operator_name("Bina");
    let entry = draft.to_new_assignment().expect("complete draft");
    assert_eq!(entry.station_label, "Rework bench");
    assert_eq!(entry.area, Area::Ltct);

    let derived = AssignmentDraft::new(date("2024-01-02"))
        .with_station(StationId::new("4").ok())
        .with_operator_id(OperatorId::new("OP7").ok())
        .with_operator_name("Bina")
        .to_new_assignment()
        .expect("complete draft");
    assert_eq!(derived.station_label, "Station 4");
}

#[test]
fn ng_entry_detail_is_tagged_by_form() {
    let entry = main_pcb_entry(IssueCategory::DigitCut);
    let value = serde_json::to_value(&entry).expect("serialize entry");
    assert_eq!(value["detail"]["form"], "mainPcb");
    assert_eq!(value["detail"]["issueCategory"], "Digit Cut");
    assert_eq!(value["areaId"], "PCB_1PH");
    assert_eq!(value["submitter"]["role"], "Quality Inspector");

    let back: NgEntry = serde_json::from_value(value).expect("deserialize entry");
    assert_eq!(back, entry);
}

#[test]
fn ng_entry_issue_key_and_validation() {
    let entry = main_pcb_entry(IssueCategory::PcbOff);
    assert_eq!(entry.issue_key(), "PCB Off");
    assert_eq!(entry.pcb(), Some("PCB-991"));
    assert!(entry.validate().is_ok());

    let mut empty = main_pcb_entry(IssueCategory::PcbOff);
    empty.quantity = 0;
    assert_eq!(empty.validate(), Err(ModelError::InvalidQuantity));

    let mut rf = main_pcb_entry(IssueCategory::PcbOff);
    rf.detail = NgDetail::RfCoding {
        block: qms_model::Block::A,
        rg_type: qms_model::RgType::FourG,
        part_code: "P-1".to_string(),
        pcb_type: qms_model::PcbType::G23,
        issue_description: "   ".to_string(),
        ng_reason: "Coding fail".to_string(),
    };
    assert_eq!(rf.issue_key(), "Uncategorized");
}

#[test]
fn checksheets_count_failed_points() {
    let general = GeneralChecksheet {
        header: SheetHeader {
            date: date("2024-03-04"),
            shift: Shift::A,
        },
        checked_by: "EMP-4".to_string(),
        items: vec![
            GeneralCheckItem {
                category: "ESD".to_string(),
                point: Checkpoint {
                    id: "1".to_string(),
                    description: "Wrist strap tested".to_string(),
                    status: CheckStatus::NotOk,
                    remarks: "Strap torn".to_string(),
                },
            },
            GeneralCheckItem {
                category: "5S".to_string(),
                point: Checkpoint {
                    id: "2".to_string(),
                    description: "Bench clean".to_string(),
                    status: CheckStatus::Ok,
                    remarks: String::new(),
                },
            },
        ],
    };
    assert_eq!(general.not_ok_count(), 1);

    let patrol = PatrollingChecksheet {
        header: SheetHeader {
            date: date("2024-03-04"),
            shift: Shift::B,
        },
        area: "RF".to_string(),
        line_no: "2".to_string(),
        line_leader: "Ravi".to_string(),
        supervisor: None,
        quality_checker: "Meena".to_string(),
        user_id: "EMP-22".to_string(),
        time_slot: "10:00 - 12:00".to_string(),
        checkpoints: vec![
            PatrolCheckpoint {
                id: "1".to_string(),
                description: "Fixture alignment".to_string(),
                status: PatrolStatus::NotBecomeOk,
                remarks: String::new(),
            },
            PatrolCheckpoint {
                id: "2".to_string(),
                description: "Label check".to_string(),
                status: PatrolStatus::Pending,
                remarks: String::new(),
            },
        ],
    };
    assert_eq!(patrol.not_ok_count(), 1);
    let value = serde_json::to_value(&patrol).expect("serialize sheet");
    assert_eq!(value["checkpoints"][1]["status"], "");
    assert_eq!(value["timeSlot"], "10:00 - 12:00");
}

proptest! {
    #[test]
    fn date_order_matches_string_order(a in 0u32..2_900_000, b in 0u32..2_900_000) {
        let base = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let left = ProductionDate::from_naive(base + chrono::Days::new(u64::from(a))).unwrap();
        let right = ProductionDate::from_naive(base + chrono::Days::new(u64::from(b))).unwrap();
        prop_assert_eq!(left.cmp(&right), left.to_string().cmp(&right.to_string()));
    }

    #[test]
    fn canonical_form_parses_back(days in 0u32..2_900_000) {
        let base = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let value = ProductionDate::from_naive(base + chrono::Days::new(u64::from(days))).unwrap();
        prop_assert_eq!(ProductionDate::parse(&value.to_string()).unwrap(), value);
    }
}
