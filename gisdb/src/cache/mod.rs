//! Record buffer pool.
//!
//! A small LRU cache sitting between the query engine and the record store.
//! Hot offsets are served from memory; a miss falls through to the store and
//! the fetched text is put back into the pool.
//!
//! ```text
//! MRU → [877] → [104] → [233] → LRU   (capacity 15 by default)
//! ```

mod buffer_pool;
mod stats;

pub use buffer_pool::{BufferPool, DEFAULT_CAPACITY};
pub use stats::PoolStats;
