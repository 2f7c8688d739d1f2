//! Query engine.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────┐
//!   import ─────► │ RecordStore  │ ─── offsets ──┬──► HashTable<NameEntry>
//!                 └──────────────┘               └──► QuadTree
//!
//!   what_is ────► HashTable ─┐
//!   what_is_at ─► QuadTree  ─┼─► offsets ─► BufferPool ─(miss)─► RecordStore
//!   what_is_in ─► QuadTree  ─┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use gisdb::engine::{EngineConfig, QueryEngine};
//!
//! # fn main() -> Result<(), gisdb::engine::EngineError> {
//! let mut engine = QueryEngine::create("db.txt", &EngineConfig::default())?;
//! engine.world("0800000W", "0750000W", "360000N", "400000N");
//! let stats = engine.import("VA_Monterey.txt")?;
//! println!("imported {} records", stats.records);
//!
//! for (offset, line) in engine.what_is("Springfield", "VA")? {
//!     println!("{}: {}", offset, line);
//! }
//! # Ok(())
//! # }
//! ```

mod query;
mod types;

pub use query::{QueryEngine, QueryResult};
pub use types::{
    EngineConfig, EngineError, ImportStats, ParseStructureError, Structure, WorldBounds,
    DEFAULT_INDEX_CAPACITY,
};
