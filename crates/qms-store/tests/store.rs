//! Integration tests for qms-store.

use proptest::prelude::*;
use qms_model::{
    Area, NewAssignment, NewUser, OperatorId, ProductionDate, Shift, StationId, UserRole,
    UserStatus,
};
use qms_store::{
    AssignmentStore, AuthError, BOOTSTRAP_USERNAME, Collection, Database, JournalStore,
    MemoryStore, StoreError,
};
use tempfile::tempdir;

fn date(value: &str) -> ProductionDate {
    ProductionDate::parse(value).unwrap()
}

fn deployment(day: &str, area: Area, station: &str, operator: &str, name: &str) -> NewAssignment {
    let station = StationId::new(station).unwrap();
    NewAssignment {
        date: date(day),
        shift: Shift::A,
        area,
        station_label: station.default_label(),
        station,
        operator_id: OperatorId::new(operator).unwrap(),
        operator_name: name.to_string(),
    }
}

fn supervisor(username: &str, employee_id: &str) -> NewUser {
    NewUser {
        name: "Priya Nair".to_string(),
        employee_id: employee_id.to_string(),
        username: username.to_string(),
        mobile: "9800000001".to_string(),
        email: "priya@example.com".to_string(),
        role: UserRole::ShiftIncharge,
        password: "bench-12".to_string(),
    }
}

// ============================================================================
// Latest-before lookups
// ============================================================================

#[test]
fn station_lookup_uses_strictly_earlier_dates() {
    let mut store = MemoryStore::new();
    store
        .append(deployment("2024-01-01", Area::RfCoding, "1", "OP1", "Alice"))
        .unwrap();
    store
        .append(deployment("2024-01-03", Area::RfCoding, "1", "OP2", "Bala"))
        .unwrap();
    let station = StationId::new("1").unwrap();

    let hit = store
        .find_latest_before(Area::RfCoding, &station, date("2024-01-03"))
        .unwrap();
    assert_eq!(hit.operator_name, "Alice");

    assert!(store
        .find_latest_before(Area::RfCoding, &station, date("2024-01-01"))
        .is_none());
    assert!(store
        .find_latest_before(Area::Ltct, &station, date("2024-02-01"))
        .is_none());
}

#[test]
fn last_appended_wins_on_equal_dates() {
    let mut store = MemoryStore::new();
    store
        .append(deployment("2024-01-01", Area::RfCoding, "2", "OP1", "Alice"))
        .unwrap();
    store
        .append(deployment("2024-01-01", Area::RfCoding, "2", "OP9", "Chitra"))
        .unwrap();
    let station = StationId::new("2").unwrap();

    let hit = store
        .find_latest_before(Area::RfCoding, &station, date("2024-01-02"))
        .unwrap();
    assert_eq!(hit.operator_id.as_str(), "OP9");
}

#[test]
fn operator_lookup_spans_areas() {
    let mut store = MemoryStore::new();
    store
        .append(deployment("2024-01-01", Area::RfCoding, "1", "OP1", "Alice"))
        .unwrap();
    store
        .append(deployment("2024-01-02", Area::Pcb3Phase, "4", "OP1", "Alice"))
        .unwrap();
    let operator = OperatorId::new("OP1").unwrap();

    let hit = store
        .find_latest_before_by_operator(&operator, date("2024-01-05"))
        .unwrap();
    assert_eq!(hit.area, Area::Pcb3Phase);

    let history = store.operator_history(&operator);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].date, date("2024-01-02"));
}

proptest! {
    #[test]
    fn lookup_returns_latest_earlier_date(
        days in prop::collection::vec(1u32..28, 1..12),
        probe in 1u32..29,
    ) {
        let mut store = MemoryStore::new();
        for day in &days {
            let day = format!("2024-03-{day:02}");
            store.append(deployment(&day, Area::Ltct, "3", "OP5", "Devi")).unwrap();
        }
        let probe_date = date(&format!("2024-03-{probe:02}"));
        let station = StationId::new("3").unwrap();
        let expected = days.iter().copied().filter(|day| *day < probe).max();

        let found = store.find_latest_before(Area::Ltct, &station, probe_date);
        match expected {
            Some(day) => {
                let found = found.unwrap();
                prop_assert_eq!(found.date, date(&format!("2024-03-{day:02}")));
            }
            None => prop_assert!(found.is_none()),
        }
    }
}

// ============================================================================
// Journal persistence
// ============================================================================

#[test]
fn journal_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(Collection::Assignments.file_name());

    let first_id = {
        let mut store = JournalStore::open(&path).unwrap();
        let record = store
            .append(deployment("2024-01-01", Area::RfCoding, "1", "OP1", "Alice"))
            .unwrap();
        record.id
    };

    let reopened = JournalStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.query_all()[0].id, first_id);
    assert_eq!(first_id.kind_prefix(), Some("ASGN"));

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"areaId\": \"RF_CODING\""));
}

#[test]
fn corrupt_collection_fails_open() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("ng_records.json"), "[{]").unwrap();
    let err = Database::open(dir.path()).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
    assert!(err.suggestion().is_some());
}

#[test]
fn database_open_creates_files_on_first_write() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    assert!(db.counts().iter().all(|(_, count)| *count == 0));

    db.assignments_mut()
        .append(deployment("2024-01-01", Area::Pcb1Phase, "7", "OP3", "Gita"))
        .unwrap();
    assert!(dir.path().join("operator_assignments.json").exists());
    assert!(!dir.path().join("ng_records.json").exists());

    let db = Database::open(dir.path()).unwrap();
    let counts = db.counts();
    assert_eq!(counts[0], (Collection::Assignments, 1));
}

// ============================================================================
// User registry
// ============================================================================

#[test]
fn duplicate_username_or_employee_id_is_rejected() {
    let mut db = Database::in_memory();
    let users = db.users_mut();
    users.add_user(supervisor("priya", "EMP-1")).unwrap();

    let err = users.add_user(supervisor("priya", "EMP-2")).unwrap_err();
    assert!(matches!(err, StoreError::UserExists { field: "username", .. }));

    let err = users.add_user(supervisor("priya2", "EMP-1")).unwrap_err();
    assert!(matches!(err, StoreError::UserExists { field: "employee id", .. }));

    assert!(!users.is_username_available("priya"));
    assert!(users.is_username_available("priya2"));
    assert!(users.find_by_mobile("9800000001").is_some());
    assert!(users.find_by_mobile("").is_none());
}

#[test]
fn login_checks_password_then_status() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    let created = db.users_mut().add_user(supervisor("priya", "EMP-1")).unwrap();
    assert!(created.password_hash.as_deref().is_some_and(|hash| hash.starts_with("$argon2")));
    assert!(created.last_login_at.is_none());

    let users = db.users_mut();
    assert!(matches!(
        users.validate_credentials("priya", "wrong"),
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        users.validate_credentials("nobody", "bench-12"),
        Err(AuthError::InvalidCredentials)
    ));

    let user = users.validate_credentials("priya", "bench-12").unwrap();
    assert!(user.last_login_at.is_some());

    users.set_status("priya", UserStatus::Disabled).unwrap();
    assert!(matches!(
        users.validate_credentials("priya", "bench-12"),
        Err(AuthError::AccountDisabled)
    ));

    let reopened = Database::open(dir.path()).unwrap();
    let stored = reopened.users().find_by_username("priya").unwrap();
    assert_eq!(stored.status, UserStatus::Disabled);
    assert!(stored.last_login_at.is_some());
}

#[test]
fn delete_and_bootstrap() {
    let mut db = Database::in_memory();
    let users = db.users_mut();

    let admin = users.ensure_bootstrap_admin("first-run").unwrap().unwrap();
    assert_eq!(admin.username, BOOTSTRAP_USERNAME);
    assert_eq!(admin.role, UserRole::Manager);
    assert!(users.ensure_bootstrap_admin("again").unwrap().is_none());

    let removed = users.delete_user(admin.id.as_str()).unwrap();
    assert_eq!(removed.id, admin.id);
    assert!(users.list().is_empty());
    assert!(matches!(
        users.delete_user("admin"),
        Err(StoreError::UnknownUser(_))
    ));
}

// ============================================================================
// Form collections
// ============================================================================

fn ng_entry(area: Area, pcb: Option<&str>, quantity: u32) -> qms_model::NgEntry {
    use qms_model::{
        IssueCategory, IssueType, NgDetail, NgEntry, RecordHeader, Submitter, SubmitterRole,
    };
    NgEntry {
        header: RecordHeader {
            date: date("2024-03-04"),
            shift: Shift::A,
            area,
            station: StationId::new("2").unwrap(),
            station_label: None,
        },
        vendor: "Acme Boards".to_string(),
        customer: "Utility North".to_string(),
        firmware: "v2.1".to_string(),
        line_leader: "Ravi".to_string(),
        quantity,
        submitter: Submitter {
            name: "Meena".to_string(),
            employee_id: "EMP-22".to_string(),
            role: SubmitterRole::LineLeader,
        },
        operator: None,
        pcb_number: pcb.map(str::to_string),
        duplicate_confirmed: false,
        detail: NgDetail::MainPcb {
            issue_type: IssueType::Vendor,
            issue_category: IssueCategory::ComponentsDamage,
            component_name: Some("C12".to_string()),
            other_issue_description: None,
            reason_description: "Cracked capacitor".to_string(),
            shift_incharge_production: "Karan".to_string(),
        },
    }
}

#[test]
fn duplicate_pcb_is_scoped_to_area() {
    let mut db = Database::in_memory();
    let record = db
        .add_ng_record(ng_entry(Area::Pcb1Phase, Some("PCB-100"), 1))
        .unwrap();
    assert_eq!(record.id.kind_prefix(), Some("REC"));

    assert!(db.is_duplicate_pcb("PCB-100", Area::Pcb1Phase));
    assert!(db.is_duplicate_pcb(" PCB-100 ", Area::Pcb1Phase));
    assert!(!db.is_duplicate_pcb("PCB-100", Area::Pcb3Phase));
    assert!(!db.is_duplicate_pcb("", Area::Pcb1Phase));
}

#[test]
fn invalid_entries_are_not_stored() {
    let mut db = Database::in_memory();
    let err = db
        .add_ng_record(ng_entry(Area::Pcb1Phase, None, 0))
        .unwrap_err();
    assert!(matches!(err, StoreError::Invalid(_)));
    assert!(db.ng_records().is_empty());
}
