//! Name index: a chained hash table keyed by feature name and region.
//!
//! # Architecture
//!
//! ```text
//! HashTable<NameEntry>
//! ├── slot 17 → [Springfield|VA → [104, 877]]
//! ├── slot 42 → [Blue Ridge|VA → [233], Afton|VA → [512]]
//! └── ...
//! ```
//!
//! Entries implement [`Hashable`], which supplies a deterministic FNV-1
//! hash and lets a duplicate key's payload be merged into the stored entry.
//! The table doubles its slot count whenever an insert pushes the load
//! factor above the configured limit.
//!
//! # Usage
//!
//! ```
//! use gisdb::name_index::{HashTable, NameEntry};
//!
//! let mut table = HashTable::new(1024, 0.7);
//! table.insert(NameEntry::new("Springfield", "VA", 104));
//! table.insert(NameEntry::new("Springfield", "VA", 877));
//!
//! let entry = table.find(&NameEntry::probe("Springfield", "VA")).unwrap();
//! assert_eq!(entry.offsets(), &[104, 877]);
//! ```

mod entry;
mod hashable;
mod table;

pub use entry::{NameEntry, KEY_SEPARATOR};
pub use hashable::{fnv1_hash, Hashable, FNV_OFFSET_BASIS, FNV_PRIME};
pub use table::{HashTable, DEFAULT_CAPACITY, DEFAULT_LOAD_LIMIT};
