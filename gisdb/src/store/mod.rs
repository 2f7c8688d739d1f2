//! Record storage.
//!
//! Records are pipe-delimited lines appended to a single text file. A record
//! is identified by the byte offset of its first character, which both
//! indexes store.
//!
//! ```text
//! offset 0    FEATURE_ID|FEATURE_NAME|...|DATE_EDITED     header
//! offset 265  1482324|Afton|Populated Place|VA|...
//! offset 382  1482325|Springfield|Populated Place|VA|...
//! ```

mod file;
mod record;

use std::path::PathBuf;

pub use file::RecordStore;
pub use record::{Record, RecordError, DELIMITER, FIELD_COUNT, HEADER};

/// Error type for record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open record store {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Record store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record offset {offset}: {reason}")]
    InvalidOffset { offset: u64, reason: &'static str },
}
