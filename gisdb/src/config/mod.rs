//! Configuration for gisdb.
//!
//! Settings are read from an INI file (`~/.gisdb/config.ini` by default).
//! A missing file yields defaults; any key may be omitted.
//!
//! ```text
//! [index]
//! initial_capacity = 1024
//! load_limit = 0.7
//!
//! [cache]
//! capacity = 15
//!
//! [logging]
//! directory = logs
//! file = gisdb.log
//! ```
//!
//! # Example
//!
//! ```
//! use gisdb::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! let engine_config = config.engine_config();
//! assert_eq!(engine_config.pool_capacity, 15);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_LIMIT, DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_FILE,
    DEFAULT_POOL_CAPACITY,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{CacheSettings, ConfigFile, IndexSettings, LoggingSettings};
