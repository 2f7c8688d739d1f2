//! CLI runner for common setup and operations.
//!
//! Encapsulates configuration loading, logging initialization and database
//! creation so command handlers only deal with their own work.

use std::path::{Path, PathBuf};

use gisdb::config::{config_file_path, ConfigFile};
use gisdb::engine::QueryEngine;
use gisdb::logging::{init_logging, LogOptions, LoggingGuard};
use tracing::info;

use crate::error::CliError;

/// Resolve the config file path: the `--config` override or the default.
pub fn resolve_config_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path)
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file override; the default path is used when `None`
    /// * `debug_mode` - When true, logs at debug level and mirrors events to stderr
    pub fn new(config_path: Option<&Path>, debug_mode: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load_from(&resolve_config_path(config_path))?;

        let options = LogOptions {
            debug: debug_mode,
            stderr: debug_mode,
        };
        let logging_guard = init_logging(
            &config.logging.directory,
            &config.logging.file,
            options,
        )
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("gisdb v{}", gisdb::VERSION);
        info!("gisdb CLI: {} command", command);
        info!(
            log = %self.config.log_path().display(),
            index_capacity = self.config.index.initial_capacity,
            load_limit = self.config.index.load_limit,
            pool_capacity = self.config.cache.capacity,
            "Configuration loaded"
        );
    }

    /// Create the database file and an engine over it.
    pub fn create_engine(&self, db_path: &Path) -> Result<QueryEngine, CliError> {
        QueryEngine::create(db_path, &self.config.engine_config())
            .map_err(CliError::Database)
            .inspect(|_| info!(path = %db_path.display(), "Database file created"))
    }
}
