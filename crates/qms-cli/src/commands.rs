//! Subcommand implementations.
//!
//! Each `run_*` function works on an open [`Database`] and returns what it
//! produced; rendering lives in `summary`.

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use qms_core::{
    DraftMonitor, ObservationAnalytics, ProductionAnalytics, RegistryFilter, RotationAlert,
    Submission,
};
use qms_model::{
    AssignmentRecord, GeneralChecksheet, NgEntry, NgRecord, NewUser, ObservationEntry,
    PatrollingChecksheet, ProcessChecksheet, ProductionDate, RecordId, RfCodingChecksheet, User,
    UserStatus,
};
use qms_report::{MasterWorkbook, write_csv_dir, write_xlsx};
use qms_store::{AssignmentStore, AuthError, Collection, Database, JournalStore, StoreError};

use crate::cli::{
    AssignArgs, ChecksheetKind, DashboardArgs, DraftArgs, ExportArgs, HistoryArgs, RecordCommand,
    SearchArgs, UserCommand,
};

pub fn open_database(dir: &Path) -> Result<Database> {
    let db = Database::open(dir)
        .with_context(|| format!("open data directory {}", dir.display()))?;
    info!(path = %dir.display(), "data directory opened");
    Ok(db)
}

/// Fill the deployment form field by field. Area goes before station since
/// changing the area resets the bench. A missing `--station` leaves the
/// station empty.
fn fill_form(args: &DraftArgs, store: &JournalStore) -> DraftMonitor {
    let mut monitor = DraftMonitor::new(args.date.unwrap_or_else(ProductionDate::today));
    monitor.set_shift(store, args.shift);
    monitor.set_area(store, args.area);
    monitor.set_station(store, args.station.clone());
    monitor.set_operator_id(store, args.operator_id.clone());
    monitor
}

pub fn run_check(db: &Database, args: &DraftArgs) -> RotationAlert {
    fill_form(args, db.assignments()).alert().clone()
}

pub fn run_assign(db: &mut Database, args: &AssignArgs) -> Result<Submission> {
    let mut monitor = fill_form(&args.draft, db.assignments());
    monitor.set_operator_name(args.operator_name.clone().unwrap_or_default());
    monitor.set_station_label(args.station_label.clone());
    let submission = monitor
        .submit(db.assignments_mut())
        .context("save deployment")?;
    Ok(submission)
}

/// Deployment history, newest first.
pub fn run_history(db: &Database, args: &HistoryArgs) -> Vec<AssignmentRecord> {
    let store = db.assignments();
    let records = match (&args.area, &args.station, &args.operator_id) {
        (Some(area), Some(station), _) => store.station_history(*area, station),
        (_, _, Some(operator_id)) => store.operator_history(operator_id),
        _ => Vec::new(),
    };
    let limit = args.limit.unwrap_or(usize::MAX);
    records.into_iter().take(limit).cloned().collect()
}

/// What `record` appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub collection: Collection,
    pub id: RecordId,
    /// Saved after a duplicate PCB warning.
    pub duplicate_pcb: bool,
    /// Checkpoints marked not OK, for checksheets.
    pub not_ok: Option<usize>,
}

pub fn run_record(db: &mut Database, command: &RecordCommand) -> Result<RecordOutcome> {
    match command {
        RecordCommand::Ng {
            file,
            allow_duplicate,
        } => {
            let mut entry: NgEntry = read_json(file)?;
            let repeated = entry
                .pcb()
                .filter(|pcb| db.is_duplicate_pcb(pcb, entry.header.area))
                .map(str::to_string);
            if let Some(pcb) = &repeated {
                if !allow_duplicate {
                    bail!(
                        "PCB {pcb} is already recorded as NG in {}; \
                         rerun with --allow-duplicate to log it again",
                        entry.header.area.label()
                    );
                }
                warn!(pcb = %pcb, area = %entry.header.area, "duplicate PCB logged");
                entry.duplicate_confirmed = true;
            }
            let record = db.add_ng_record(entry).context("save NG record")?;
            Ok(RecordOutcome {
                collection: Collection::NgRecords,
                id: record.id.clone(),
                duplicate_pcb: repeated.is_some(),
                not_ok: None,
            })
        }
        RecordCommand::Observation { file } => {
            let entry: ObservationEntry = read_json(file)?;
            let record = db.add_observation(entry).context("save observation")?;
            Ok(RecordOutcome {
                collection: Collection::Observations,
                id: record.id.clone(),
                duplicate_pcb: false,
                not_ok: None,
            })
        }
        RecordCommand::Checksheet { kind, file } => {
            let (collection, id, not_ok) = match kind {
                ChecksheetKind::RfCoding => {
                    let sheet: RfCodingChecksheet = read_json(file)?;
                    let not_ok = sheet.not_ok_count();
                    let record = db.add_rf_coding_sheet(sheet).context("save checksheet")?;
                    (Collection::RfCodingSheets, record.id.clone(), not_ok)
                }
                ChecksheetKind::Process => {
                    let sheet: ProcessChecksheet = read_json(file)?;
                    let not_ok = sheet.not_ok_count();
                    let record = db.add_process_sheet(sheet).context("save checksheet")?;
                    (Collection::ProcessSheets, record.id.clone(), not_ok)
                }
                ChecksheetKind::Patrolling => {
                    let sheet: PatrollingChecksheet = read_json(file)?;
                    let not_ok = sheet.not_ok_count();
                    let record = db.add_patrolling_sheet(sheet).context("save checksheet")?;
                    (Collection::PatrollingSheets, record.id.clone(), not_ok)
                }
                ChecksheetKind::General => {
                    let sheet: GeneralChecksheet = read_json(file)?;
                    let not_ok = sheet.not_ok_count();
                    let record = db.add_general_sheet(sheet).context("save checksheet")?;
                    (Collection::GeneralSheets, record.id.clone(), not_ok)
                }
            };
            Ok(RecordOutcome {
                collection,
                id,
                duplicate_pcb: false,
                not_ok: Some(not_ok),
            })
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub production: ProductionAnalytics,
    pub observations: ObservationAnalytics,
}

pub fn run_dashboard(db: &Database, args: &DashboardArgs) -> Dashboard {
    let today = args.today.unwrap_or_else(ProductionDate::today);
    Dashboard {
        production: ProductionAnalytics::compute(db.ng_records(), args.area, args.range, today),
        observations: ObservationAnalytics::compute(
            db.observations(),
            args.area,
            args.range,
            today,
        ),
    }
}

pub fn run_search<'a>(db: &'a Database, args: &SearchArgs) -> Vec<&'a NgRecord> {
    RegistryFilter::new(args.term.clone().unwrap_or_default())
        .with_area(args.area)
        .duplicates_only(args.duplicates_only)
        .search(db)
}

/// Files written by `export`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub workbook: PathBuf,
    pub csv_files: Vec<PathBuf>,
}

pub fn run_export(
    db: &Database,
    args: &ExportArgs,
    output_dir: &Path,
    today: ProductionDate,
) -> Result<ExportOutcome> {
    let workbook = MasterWorkbook::from_database(db);
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| output_dir.join(MasterWorkbook::default_file_name(today)));
    write_xlsx(&workbook, &path).context("export workbook")?;
    let csv_files = match &args.csv_dir {
        Some(dir) => write_csv_dir(&workbook, dir).context("export CSV files")?,
        None => Vec::new(),
    };
    Ok(ExportOutcome {
        workbook: path,
        csv_files,
    })
}

/// Result of a `user` subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserOutcome {
    Added(User),
    Listed(Vec<User>),
    StatusChanged(User),
    Deleted(User),
    LoggedIn(User),
    /// `None` when accounts already existed.
    Bootstrapped(Option<User>),
}

/// Run a `user` subcommand. Passwords not given as flags are read as one
/// line from `input`.
pub fn run_user(
    db: &mut Database,
    command: &UserCommand,
    input: &mut dyn BufRead,
) -> Result<UserOutcome> {
    let users = db.users_mut();
    let outcome = match command {
        UserCommand::Add {
            name,
            employee_id,
            username,
            mobile,
            email,
            role,
            password,
        } => {
            let password = password_or_prompt(password.as_deref(), input)?;
            let user = users
                .add_user(NewUser {
                    name: name.clone(),
                    employee_id: employee_id.clone(),
                    username: username.clone(),
                    mobile: mobile.clone(),
                    email: email.clone(),
                    role: *role,
                    password,
                })
                .context("register user")?;
            UserOutcome::Added(user)
        }
        UserCommand::List => UserOutcome::Listed(users.list().to_vec()),
        UserCommand::Disable { user } => {
            UserOutcome::StatusChanged(users.set_status(user, UserStatus::Disabled)?)
        }
        UserCommand::Enable { user } => {
            UserOutcome::StatusChanged(users.set_status(user, UserStatus::Active)?)
        }
        UserCommand::Delete { user } => UserOutcome::Deleted(users.delete_user(user)?),
        UserCommand::Login { username, password } => {
            let password = password_or_prompt(password.as_deref(), input)?;
            UserOutcome::LoggedIn(users.validate_credentials(username, &password)?)
        }
        UserCommand::Bootstrap { password } => {
            let password = password_or_prompt(password.as_deref(), input)?;
            UserOutcome::Bootstrapped(users.ensure_bootstrap_admin(&password)?)
        }
    };
    Ok(outcome)
}

/// First suggestion offered by a storage error in `error`'s chain.
pub fn error_hint(error: &anyhow::Error) -> Option<&'static str> {
    error.chain().find_map(|cause| {
        if let Some(store) = cause.downcast_ref::<StoreError>() {
            store.suggestion()
        } else {
            cause.downcast_ref::<AuthError>().and_then(AuthError::suggestion)
        }
    })
}

fn password_or_prompt(flag: Option<&str>, input: &mut dyn BufRead) -> Result<String> {
    if let Some(password) = flag {
        return Ok(password.to_string());
    }
    let mut line = String::new();
    input.read_line(&mut line).context("read password")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("no password given; pass --password or pipe it on stdin");
    }
    Ok(password)
}
