//! Shop-floor quality CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use qms_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use qms_cli::commands::{
    error_hint, open_database, run_assign, run_check, run_dashboard, run_export, run_history,
    run_record, run_search, run_user,
};
use qms_cli::config::Config;
use qms_cli::logging::{LogConfig, LogFormat, init_logging};
use qms_cli::summary::{
    print_alert, print_areas, print_dashboard, print_export, print_history, print_record,
    print_search, print_submission, print_user,
};
use qms_model::ProductionDate;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    let loaded = match Config::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(error) => {
            report(&anyhow::Error::new(error));
            return ExitCode::FAILURE;
        }
    };
    let log_config = log_config_from_cli(&cli, &loaded.config);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    if let Some(path) = &loaded.source {
        tracing::info!(path = %path.display(), "configuration loaded");
    }
    match run(&cli, &loaded.config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    if matches!(cli.command, Command::Areas) {
        print_areas();
        return Ok(());
    }
    let data_dir = config.data_dir(cli.data_dir.as_deref());
    let mut db = open_database(&data_dir)?;
    match &cli.command {
        Command::Areas => print_areas(),
        Command::Check(args) => print_alert(&run_check(&db, &args.draft), args.json)?,
        Command::Assign(args) => print_submission(&run_assign(&mut db, args)?),
        Command::History(args) => print_history(&run_history(&db, args)),
        Command::Record(args) => print_record(&run_record(&mut db, &args.kind)?),
        Command::Dashboard(args) => print_dashboard(&run_dashboard(&db, args), args.json)?,
        Command::Search(args) => print_search(&run_search(&db, args)),
        Command::Export(args) => {
            let outcome = run_export(&db, args, &config.output_dir(), ProductionDate::today())?;
            print_export(&outcome, &db);
        }
        Command::User(args) => {
            let outcome = run_user(&mut db, &args.command, &mut io::stdin().lock())?;
            print_user(&outcome);
        }
    }
    Ok(())
}

/// Print the error chain, plus a hint when a storage error knows one.
fn report(error: &anyhow::Error) {
    eprintln!("error: {error:#}");
    if let Some(hint) = error_hint(error) {
        eprintln!("hint: {hint}");
    }
}

/// Build logging configuration. Precedence: --log-level, then -v/-q, then
/// the config file, then the default (warn).
fn log_config_from_cli(cli: &Cli, config: &Config) -> LogConfig {
    let from_file = if cli.verbosity.is_present() {
        None
    } else {
        config.logging.level
    };
    let explicit = cli.log_level.or(from_file);
    let mut log_config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    log_config.use_env_filter = !(cli.verbosity.is_present() || explicit.is_some());
    if let Some(level) = explicit {
        log_config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    log_config.format = match cli.log_format.or(config.logging.format) {
        Some(LogFormatArg::Pretty) | None => LogFormat::Pretty,
        Some(LogFormatArg::Compact) => LogFormat::Compact,
        Some(LogFormatArg::Json) => LogFormat::Json,
    };
    log_config.log_file = cli.log_file.clone();
    log_config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    log_config
}
