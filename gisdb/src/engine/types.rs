//! Engine configuration, results and error types.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cache;
use crate::name_index;
use crate::store::{RecordError, StoreError};

/// Initial name index capacity used by the database.
pub const DEFAULT_INDEX_CAPACITY: usize = 1024;

/// Sizing for the engine's in-memory structures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Initial number of name index slots.
    pub index_capacity: usize,
    /// Load factor above which the name index doubles.
    pub load_limit: f64,
    /// Number of records held by the buffer pool.
    pub pool_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_capacity: DEFAULT_INDEX_CAPACITY,
            load_limit: name_index::DEFAULT_LOAD_LIMIT,
            pool_capacity: cache::DEFAULT_CAPACITY,
        }
    }
}

/// World rectangle in arc-seconds.
///
/// The spatial index covers `[west, east) × [south, north)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorldBounds {
    pub west: i64,
    pub east: i64,
    pub south: i64,
    pub north: i64,
}

/// Summary of one import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportStats {
    /// Records appended to the store.
    pub records: usize,
    /// Distinct name index keys the import added to or created.
    pub name_entries: usize,
    /// Distinct coordinates the import added to or created.
    pub locations: usize,
    /// Integer mean feature name length in characters; 0 for an empty import.
    pub average_name_length: usize,
    /// Records whose coordinate fell outside the world or was absent.
    pub out_of_bounds: usize,
}

/// Index structure selectable by the `show` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    Quad,
    Hash,
    Pool,
}

impl Structure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Structure::Quad => "quad",
            Structure::Hash => "hash",
            Structure::Pool => "pool",
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown structure name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown structure '{0}', expected quad, hash or pool")]
pub struct ParseStructureError(pub String);

impl FromStr for Structure {
    type Err = ParseStructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quad" => Ok(Structure::Quad),
            "hash" => Ok(Structure::Hash),
            "pool" => Ok(Structure::Pool),
            _ => Err(ParseStructureError(s.to_string())),
        }
    }
}

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The import file could not be opened or read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data line could not be parsed; nothing was imported.
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord {
        line: usize,
        #[source]
        reason: RecordError,
    },

    /// An index referred to an offset the store cannot read.
    #[error("Invalid record offset {offset}: {reason}")]
    InvalidOffset { offset: u64, reason: &'static str },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidOffset { offset, reason } => {
                EngineError::InvalidOffset { offset, reason }
            }
            other => EngineError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_from_str() {
        assert_eq!("quad".parse::<Structure>().unwrap(), Structure::Quad);
        assert_eq!("hash".parse::<Structure>().unwrap(), Structure::Hash);
        assert_eq!(" Pool ".parse::<Structure>().unwrap(), Structure::Pool);
        assert_eq!(
            "tree".parse::<Structure>().unwrap_err(),
            ParseStructureError("tree".to_string())
        );
    }

    #[test]
    fn test_structure_display_round_trips() {
        for structure in [Structure::Quad, Structure::Hash, Structure::Pool] {
            assert_eq!(structure.to_string().parse::<Structure>().unwrap(), structure);
        }
    }

    #[test]
    fn test_invalid_offset_is_kept_distinct() {
        let err: EngineError = StoreError::InvalidOffset {
            offset: 7,
            reason: "offset is not the start of a record",
        }
        .into();
        assert!(matches!(err, EngineError::InvalidOffset { offset: 7, .. }));

        let err: EngineError = StoreError::Io(std::io::Error::other("disk")).into();
        assert!(matches!(err, EngineError::Store(StoreError::Io(_))));
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.index_capacity, 1024);
        assert_eq!(config.load_limit, 0.7);
        assert_eq!(config.pool_capacity, 15);
    }
}
