//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::engine::EngineConfig;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Name index settings
    pub index: IndexSettings,
    /// Buffer pool settings
    pub cache: CacheSettings,
    /// Diagnostic log settings
    pub logging: LoggingSettings,
}

/// Name index configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSettings {
    /// Number of slots the name index starts with
    pub initial_capacity: usize,
    /// Load factor above which the name index doubles, in (0, 1]
    pub load_limit: f64,
}

/// Buffer pool configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Number of records held in memory
    pub capacity: usize,
}

/// Diagnostic log configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory the log file is written to
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
}

impl ConfigFile {
    /// Sizing for the query engine.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            index_capacity: self.index.initial_capacity,
            load_limit: self.index.load_limit,
            pool_capacity: self.cache.capacity,
        }
    }
}
