//! gisdb CLI - Command-line interface
//!
//! Runs command scripts against the gisdb feature database and manages its
//! configuration file.

mod commands;
mod error;
mod report;
mod runner;
mod script;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::run::RunArgs;

#[derive(Parser)]
#[command(name = "gisdb")]
#[command(version, about = "Index and query geographic feature records", long_about = None)]
struct Cli {
    /// Configuration file to use instead of ~/.gisdb/config.ini
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a command script, writing results to a log file
    Run {
        /// Database file to create (truncated if it exists)
        db_file: PathBuf,

        /// Command script to execute
        script_file: PathBuf,

        /// Log file for command results (truncated if it exists)
        log_file: PathBuf,

        /// Enable debug logging, mirrored to stderr
        #[arg(long)]
        debug: bool,
    },

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            db_file,
            script_file,
            log_file,
            debug,
        } => commands::run::run(RunArgs {
            db_file,
            script_file,
            log_file,
            config: cli.config,
            debug,
        }),
        Commands::Config(command) => commands::config::run(command, cli.config.as_deref()),
    };

    if let Err(e) = result {
        e.exit();
    }
}
