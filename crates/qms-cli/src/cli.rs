//! CLI argument definitions for the shop-floor quality tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use serde::{Deserialize, Serialize};

use qms_core::TimeRange;
use qms_model::{Area, ModelError, OperatorId, ProductionDate, Shift, StationId, UserRole};

#[derive(Parser)]
#[command(
    name = "qms",
    version,
    about = "Shop-floor quality records - deployments, NG entries, checksheets",
    long_about = "Record operator deployments, NG entries, process observations and\n\
                  checksheets for the production floor.\n\n\
                  Deployments are checked against history: a manpower change at a\n\
                  station or an operator moving between areas raises an alert."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and the config file).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (default: pretty, or the config file's choice).
    #[arg(long = "log-format", value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: ./qms.toml, then the user config dir).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the record collections (overrides the config file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List production areas and their benches.
    Areas,

    /// Evaluate a deployment without saving it.
    Check(CheckArgs),

    /// Save an operator deployment.
    Assign(AssignArgs),

    /// Show deployment history for a station or an operator.
    History(HistoryArgs),

    /// Append a form submission read from a JSON file.
    Record(RecordArgs),

    /// Production and observation figures for one area.
    Dashboard(DashboardArgs),

    /// Search the NG registry.
    Search(SearchArgs),

    /// Export every collection as the master registry workbook.
    Export(ExportArgs),

    /// Manage management accounts.
    User(UserArgs),
}

/// Deployment form fields.
#[derive(Debug, Clone, Args)]
pub struct DraftArgs {
    /// Production date, YYYY-MM-DD (default: today).
    #[arg(long, value_name = "DATE")]
    pub date: Option<ProductionDate>,

    #[arg(long, default_value = "A")]
    pub shift: Shift,

    /// Area code, alias or label (RF_CODING, PCB_1PH, PCB_3PH, LTCT).
    #[arg(long, default_value = "RF_CODING")]
    pub area: Area,

    /// Bench number or "Other". Required to save; without it no alert is raised.
    #[arg(long, value_name = "STATION", value_parser = parse_station)]
    pub station: Option<StationId>,

    #[arg(long = "operator-id", value_name = "ID", value_parser = parse_operator)]
    pub operator_id: Option<OperatorId>,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub draft: DraftArgs,

    /// Print the alert as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct AssignArgs {
    #[command(flatten)]
    pub draft: DraftArgs,

    #[arg(long = "operator-name", value_name = "NAME")]
    pub operator_name: Option<String>,

    /// Station label shown in reports (default: "Station <n>").
    #[arg(long = "station-label", value_name = "LABEL")]
    pub station_label: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct HistoryArgs {
    #[arg(long, requires = "station")]
    pub area: Option<Area>,

    #[arg(
        long,
        value_parser = parse_station,
        requires = "area",
        conflicts_with = "operator_id",
        required_unless_present = "operator_id"
    )]
    pub station: Option<StationId>,

    #[arg(long = "operator-id", value_name = "ID", value_parser = parse_operator)]
    pub operator_id: Option<OperatorId>,

    /// Show at most this many rows, newest first.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct RecordArgs {
    #[command(subcommand)]
    pub kind: RecordCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RecordCommand {
    /// NG entry from the RF or main PCB coding forms.
    Ng {
        #[arg(long, value_name = "PATH")]
        file: PathBuf,

        /// Save even when the PCB number is already on record for the area.
        #[arg(long = "allow-duplicate")]
        allow_duplicate: bool,
    },

    /// Process observation.
    Observation {
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },

    /// One of the line or floor checksheets.
    Checksheet {
        #[arg(long, value_enum)]
        kind: ChecksheetKind,

        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChecksheetKind {
    RfCoding,
    Process,
    Patrolling,
    General,
}

#[derive(Debug, Clone, Args)]
pub struct DashboardArgs {
    #[arg(long)]
    pub area: Area,

    #[arg(long, default_value = "daily")]
    pub range: TimeRange,

    /// Reference date for the range (default: today).
    #[arg(long, value_name = "DATE")]
    pub today: Option<ProductionDate>,

    /// Print the figures as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Matches PCB number, vendor, area, operator or submitter id.
    #[arg(value_name = "TERM")]
    pub term: Option<String>,

    #[arg(long)]
    pub area: Option<Area>,

    /// Only entries saved after a duplicate PCB warning.
    #[arg(long = "duplicates-only")]
    pub duplicates_only: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Workbook path (default: <output_dir>/Quality_Master_Registry_<date>.xlsx).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write one CSV file per sheet into this directory.
    #[arg(long = "csv-dir", value_name = "DIR")]
    pub csv_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserCommand {
    /// Register a new account. The password is read from stdin when omitted.
    Add {
        #[arg(long)]
        name: String,

        #[arg(long = "employee-id")]
        employee_id: String,

        #[arg(long)]
        username: String,

        #[arg(long, default_value = "")]
        mobile: String,

        #[arg(long, default_value = "")]
        email: String,

        /// manager or shift-incharge.
        #[arg(long, value_parser = parse_role, default_value = "shift-incharge")]
        role: UserRole,

        #[arg(long)]
        password: Option<String>,
    },

    /// List registered accounts.
    List,

    /// Block an account from signing in.
    Disable {
        /// User id or username.
        user: String,
    },

    /// Re-enable a disabled account.
    Enable {
        /// User id or username.
        user: String,
    },

    /// Remove an account.
    Delete {
        /// User id or username.
        user: String,
    },

    /// Check credentials and record the sign-in.
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: Option<String>,
    },

    /// Create the initial manager account when none exists.
    Bootstrap {
        #[arg(long)]
        password: Option<String>,
    },
}

/// CLI log level choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_station(value: &str) -> Result<StationId, ModelError> {
    StationId::new(value)
}

fn parse_operator(value: &str) -> Result<OperatorId, ModelError> {
    OperatorId::new(value)
}

fn parse_role(value: &str) -> Result<UserRole, ModelError> {
    value.replace(['-', '_'], " ").parse()
}
