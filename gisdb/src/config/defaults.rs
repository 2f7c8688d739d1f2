//! Default values for all configuration settings.

use std::path::PathBuf;

use super::settings::*;
use crate::cache;
use crate::engine::DEFAULT_INDEX_CAPACITY;
use crate::name_index;

/// Default initial name index capacity.
pub const DEFAULT_INITIAL_CAPACITY: usize = DEFAULT_INDEX_CAPACITY;

/// Default name index load limit.
pub const DEFAULT_LOAD_LIMIT: f64 = name_index::DEFAULT_LOAD_LIMIT;

/// Default buffer pool capacity.
pub const DEFAULT_POOL_CAPACITY: usize = cache::DEFAULT_CAPACITY;

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "gisdb.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            index: IndexSettings {
                initial_capacity: DEFAULT_INITIAL_CAPACITY,
                load_limit: DEFAULT_LOAD_LIMIT,
            },
            cache: CacheSettings {
                capacity: DEFAULT_POOL_CAPACITY,
            },
            logging: LoggingSettings {
                directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
