//! Run command - execute a command script against a fresh database.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use gisdb::engine::{EngineError, QueryEngine};
use tracing::{info, warn};

use crate::error::CliError;
use crate::report::Report;
use crate::runner::CliRunner;
use crate::script::{read_script, Command, ScriptEntry};

/// Arguments for the run command.
#[derive(Debug, Default)]
pub struct RunArgs {
    pub db_file: PathBuf,
    pub script_file: PathBuf,
    pub log_file: PathBuf,
    pub config: Option<PathBuf>,
    pub debug: bool,
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Commands that were executed, including failed ones.
    pub commands: usize,
    /// Commands that returned an error.
    pub failed: usize,
    /// Script lines that could not be parsed.
    pub skipped: usize,
    /// Whether the script ended with `quit`.
    pub quit: bool,
}

/// Run the run command.
pub fn run(args: RunArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.config.as_deref(), args.debug)?;
    runner.log_startup("run");

    let entries = load_script(&args.script_file)?;
    let mut engine = runner.create_engine(&args.db_file)?;

    let report_error = |error| CliError::Report {
        path: args.log_file.clone(),
        error,
    };
    let file = File::create(&args.log_file).map_err(report_error)?;
    let mut report = Report::new(BufWriter::new(file));
    report
        .banner(&args.db_file, &args.script_file, &args.log_file)
        .map_err(report_error)?;

    let summary = execute(&mut engine, &entries, &mut report).map_err(report_error)?;
    report.finish().map_err(report_error)?;

    info!(
        commands = summary.commands,
        failed = summary.failed,
        skipped = summary.skipped,
        "Script finished"
    );
    println!(
        "Executed {} command(s) from {} ({} failed, {} skipped)",
        summary.commands,
        args.script_file.display(),
        summary.failed,
        summary.skipped
    );
    println!("Log written to {}", args.log_file.display());

    Ok(())
}

fn load_script(path: &Path) -> Result<Vec<ScriptEntry>, CliError> {
    let script_error = |error| CliError::Script {
        path: path.to_path_buf(),
        error,
    };
    let file = File::open(path).map_err(script_error)?;
    read_script(BufReader::new(file)).map_err(script_error)
}

/// Execute script entries in order until `quit` or the end of the script.
///
/// Command failures are written to the report and the session continues.
pub fn execute<W: Write>(
    engine: &mut QueryEngine,
    entries: &[ScriptEntry],
    report: &mut Report<W>,
) -> std::io::Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    for entry in entries {
        let command = match &entry.command {
            Ok(command) => command,
            Err(error) => {
                warn!(line = entry.line, error = %error, "Skipping script line");
                summary.skipped += 1;
                report.script_error(&entry.text, error)?;
                continue;
            }
        };

        summary.commands += 1;
        report.command(summary.commands, &entry.text)?;

        if !dispatch(engine, command, report)? {
            summary.failed += 1;
        }

        if matches!(command, Command::Quit) {
            summary.quit = true;
            break;
        }
        report.separator()?;
    }

    Ok(summary)
}

/// Run one command, writing its result. Returns `false` if it failed.
fn dispatch<W: Write>(
    engine: &mut QueryEngine,
    command: &Command,
    report: &mut Report<W>,
) -> std::io::Result<bool> {
    let outcome: Result<(), EngineError> = match command {
        Command::World {
            west,
            east,
            south,
            north,
        } => {
            let bounds = engine.world(west, east, south, north);
            report.world(&bounds)?;
            Ok(())
        }
        Command::Import { file } => match engine.import(file) {
            Ok(stats) => Ok(report.import(&stats)?),
            Err(e) => Err(e),
        },
        Command::WhatIs { name, region } => match engine.what_is(name, region) {
            Ok(results) => Ok(report.what_is(name, region, &results)?),
            Err(e) => Err(e),
        },
        Command::WhatIsAt {
            latitude,
            longitude,
        } => match engine.what_is_at(latitude, longitude) {
            Ok(results) => Ok(report.what_is_at(latitude, longitude, &results)?),
            Err(e) => Err(e),
        },
        Command::WhatIsIn {
            latitude,
            longitude,
            half_height,
            half_width,
        } => match engine.what_is_in(latitude, longitude, *half_height, *half_width) {
            Ok(results) => Ok(report.what_is_in(
                latitude,
                longitude,
                *half_height,
                *half_width,
                &results,
            )?),
            Err(e) => Err(e),
        },
        Command::Show(structure) => Ok(report.dump(&engine.show(*structure))?),
        Command::Quit => Ok(report.quit()?),
    };

    match outcome {
        Ok(()) => Ok(true),
        Err(error) => {
            warn!(command = ?command, error = %error, "Command failed");
            report.failure(&error)?;
            Ok(false)
        }
    }
}
