//! mamekit CLI
//!
//! Command-line interface for partitioning, merging, and archiving MAME
//! catalogs and for copying the ROMs and images they name.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamekit_lib::log_sink::format_exception;
use mamekit_lib::settings::{load_settings, settings_path};
use mamekit_lib::{LogFile, SessionLog, Settings};

mod cli_types;
mod commands;
mod error;
mod logger;
mod progress;

use cli_types::{Cli, Commands, ConfigAction, DatAction};
use error::CliError;

/// Exit status for a run stopped with Ctrl-C.
const EXIT_CANCELLED: u8 = 130;

/// State shared by every command of one invocation.
pub(crate) struct Session {
    pub settings: Settings,
    pub log: SessionLog,
    pub quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.quiet, cli.verbose);

    let settings = match load_settings() {
        Ok(s) => s,
        Err(e) => {
            log::warn!("{e}; using defaults");
            Settings::default()
        }
    };

    let log = match open_session_log(cli.logfile.clone().or_else(|| settings.log.file.clone())) {
        Ok(log) => log,
        Err(e) => return finish(Err(e), None),
    };

    let session = Session {
        settings,
        log,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::FullList { catalog, output } => {
            commands::partition::run_full_list(&session, &catalog, output)
        }
        Commands::Partition {
            catalog,
            by,
            output,
        } => commands::partition::run_partition(&session, &catalog, by.into(), output),
        Commands::Software {
            dir,
            output,
            workers,
        } => commands::software::run_software(&session, &dir, output, workers),
        Commands::Merge { inputs, xml, dat } => {
            commands::merge::run_merge(&session, &inputs, xml, dat)
        }
        Commands::Dat { action } => match action {
            DatAction::Show { file, json, limit } => {
                commands::dat::run_dat_show(&file, json, limit)
            }
        },
        Commands::Copy {
            kind,
            record_sets,
            from,
            to,
        } => commands::copy::run_copy(&session, kind.into(), record_sets, from, to),
        Commands::Config { action } => run_config(&action),
    };

    finish(result, Some(&session))
}

fn run_config(action: &ConfigAction) -> Result<(), CliError> {
    let path = settings_path();
    match action {
        ConfigAction::Show => commands::config::run_config_show(&path),
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Set { key, value } => commands::config::run_config_set(&path, key, value),
        ConfigAction::Unset { key } => commands::config::run_config_unset(&path, key),
    }
}

fn open_session_log(path: Option<PathBuf>) -> Result<SessionLog, CliError> {
    let log = SessionLog::new();
    match path {
        Some(path) => {
            let file = LogFile::open(&path).map_err(|e| {
                CliError::config(format!("cannot open log file {}: {e}", path.display()))
            })?;
            log::debug!("Logging session to {}", path.display());
            Ok(log.with_file(file))
        }
        None => Ok(log),
    }
}

fn finish(result: Result<(), CliError>, session: Option<&Session>) -> ExitCode {
    match result {
        Ok(()) => {
            // Per-item failures were logged as they happened
            let errors = session.map_or(0, |s| s.log.error_count());
            if errors > 0 {
                log::warn!(
                    "Finished with {} {}",
                    errors,
                    if errors == 1 { "error" } else { "errors" }
                );
                if let Some(path) = session.and_then(|s| s.log.file_path()) {
                    log::warn!("See {} for details", path.display());
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) if e.is_cancelled() => {
            log::warn!("{}", "Cancelled".if_supports_color(Stdout, |t| t.yellow()));
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(e) => {
            let message = format_exception(&e, "mamekit");
            log::error!("{message}");
            ExitCode::FAILURE
        }
    }
}
