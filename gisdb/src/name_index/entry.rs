//! Name index entry: a feature key and the offsets of its records.

use std::fmt;

use super::hashable::{fnv1_hash, Hashable};

/// Separator between the feature name and the region code in a key.
pub const KEY_SEPARATOR: char = '|';

/// Feature key (`name|region`) with the record offsets that share it.
///
/// Offsets keep their insertion order and never repeat.
#[derive(Debug, Clone)]
pub struct NameEntry {
    key: String,
    offsets: Vec<u64>,
}

impl NameEntry {
    /// Create an entry for `name` in `region` holding a single offset.
    pub fn new(name: &str, region: &str, offset: u64) -> Self {
        Self {
            key: Self::compose_key(name, region),
            offsets: vec![offset],
        }
    }

    /// Create an offset-less entry used only to look up a key.
    pub fn probe(name: &str, region: &str) -> Self {
        Self {
            key: Self::compose_key(name, region),
            offsets: Vec::new(),
        }
    }

    /// Build the composite key `name|region`.
    pub fn compose_key(name: &str, region: &str) -> String {
        let mut key = String::with_capacity(name.len() + region.len() + 1);
        key.push_str(name);
        key.push(KEY_SEPARATOR);
        key.push_str(region);
        key
    }

    /// The composite key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Record offsets in insertion order.
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Append an offset unless it is already present.
    ///
    /// Returns `true` if the offset was added.
    pub fn add_offset(&mut self, offset: u64) -> bool {
        if self.offsets.contains(&offset) {
            return false;
        }
        self.offsets.push(offset);
        true
    }
}

impl PartialEq for NameEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NameEntry {}

impl Hashable for NameEntry {
    fn hash_code(&self) -> u32 {
        fnv1_hash(&self.key)
    }

    fn absorb(&mut self, other: Self) {
        for offset in other.offsets {
            self.add_offset(offset);
        }
    }
}

impl fmt::Display for NameEntry {
    /// Formats as `[key, [o1, o2]]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, [", self.key)?;
        for (i, offset) in self.offsets.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", offset)?;
        }
        f.write_str("]]")
    }
}
