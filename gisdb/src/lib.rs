//! gisdb - flat-file geographic feature database
//!
//! Appends pipe-delimited feature records to a single data file and answers
//! queries by name and region, by exact coordinate, and by coordinate
//! rectangle. Two in-memory indexes map keys to record byte offsets:
//!
//! - [`name_index`]: a chained hash table keyed by `name|region`
//! - [`spatial`]: a point-region quadtree keyed by arc-second coordinates
//!
//! Record text is read through the LRU [`cache`] before falling back to the
//! [`store`]. The [`engine`] ties the pieces together.
//!
//! # Example
//!
//! ```no_run
//! use gisdb::engine::{EngineConfig, QueryEngine};
//!
//! # fn main() -> Result<(), gisdb::engine::EngineError> {
//! let mut engine = QueryEngine::create("db.txt", &EngineConfig::default())?;
//! engine.world("0794500W", "0792000W", "381500N", "383000N");
//! engine.import("VA_Highland.txt")?;
//!
//! let hits = engine.what_is_in("382000N", "0793000W", 60, 90)?;
//! println!("{} records in range", hits.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod coord;
pub mod engine;
pub mod logging;
pub mod name_index;
pub mod spatial;
pub mod store;

/// Version of the gisdb library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
