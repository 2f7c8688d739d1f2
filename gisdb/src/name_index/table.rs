//! Separate-chaining hash table with load-factor driven resizing.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};

use super::hashable::Hashable;

/// Default number of slots for a general-purpose table.
pub const DEFAULT_CAPACITY: usize = 256;

/// Default load factor above which the table doubles.
pub const DEFAULT_LOAD_LIMIT: f64 = 0.7;

/// Hash table resolving collisions by chaining.
///
/// Each slot holds a chain of entries; a new key is pushed to the front of its
/// chain. Inserting a key that is already present merges the new entry into
/// the stored one via [`Hashable::absorb`]. When the load factor
/// (`len / capacity`) exceeds the load limit after an insert, the slot count
/// doubles and every entry is rehashed. Chain order after a resize is
/// whatever the rehash produces.
pub struct HashTable<T: Hashable> {
    slots: Vec<VecDeque<T>>,
    len: usize,
    load_limit: f64,
}

impl<T: Hashable> HashTable<T> {
    /// Create a table with `capacity` slots and the given load limit.
    ///
    /// A capacity of zero is raised to one. A load limit that is not a
    /// positive number falls back to [`DEFAULT_LOAD_LIMIT`].
    pub fn new(capacity: usize, load_limit: f64) -> Self {
        let load_limit = if load_limit > 0.0 {
            load_limit
        } else {
            tracing::warn!(
                requested = load_limit,
                default = DEFAULT_LOAD_LIMIT,
                "Invalid hash table load limit, using default"
            );
            DEFAULT_LOAD_LIMIT
        };

        Self {
            slots: empty_slots(capacity.max(1)),
            len: 0,
            load_limit,
        }
    }

    /// Insert an entry, merging it into an equal entry if one exists.
    ///
    /// Returns `true` if a new entry was stored, `false` if it was merged.
    pub fn insert(&mut self, entry: T) -> bool {
        let slot = self.slot_of(&entry);
        let chain = &mut self.slots[slot];

        if let Some(existing) = chain.iter_mut().find(|e| **e == entry) {
            existing.absorb(entry);
            return false;
        }

        chain.push_front(entry);
        self.len += 1;

        while self.load() > self.load_limit {
            self.grow();
        }
        true
    }

    /// Find the stored entry equal to `probe`.
    pub fn find(&self, probe: &T) -> Option<&T> {
        self.slots[self.slot_of(probe)].iter().find(|e| *e == probe)
    }

    /// Find the stored entry equal to `probe`, mutably.
    pub fn find_mut(&mut self, probe: &T) -> Option<&mut T> {
        let slot = self.slot_of(probe);
        self.slots[slot].iter_mut().find(|e| *e == probe)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Load limit that triggers a resize.
    pub fn load_limit(&self) -> f64 {
        self.load_limit
    }

    /// Current load factor.
    pub fn load(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// Length of the longest chain.
    pub fn longest_chain(&self) -> usize {
        self.slots.iter().map(VecDeque::len).max().unwrap_or(0)
    }

    /// Iterate over all entries, slot by slot.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    fn slot_of(&self, entry: &T) -> usize {
        entry.hash_code() as usize % self.slots.len()
    }

    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let old_slots = std::mem::replace(&mut self.slots, empty_slots(old_capacity * 2));

        for entry in old_slots.into_iter().flatten() {
            let slot = self.slot_of(&entry);
            self.slots[slot].push_front(entry);
        }

        tracing::debug!(
            entries = self.len,
            old_capacity,
            new_capacity = self.slots.len(),
            "Resized hash table"
        );
    }
}

impl<T: Hashable + fmt::Display> HashTable<T> {
    /// Render table statistics and every non-empty slot.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "Number of elements: {}", self.len);
        let _ = writeln!(out, "Number of slots: {}", self.slots.len());
        let _ = writeln!(out, "Maximum elements in a slot: {}", self.longest_chain());
        let _ = writeln!(out, "Load limit: {}", self.load_limit);
        out.push('\n');
        out.push_str("Slot Contents\n");

        for (index, chain) in self.slots.iter().enumerate() {
            if chain.is_empty() {
                continue;
            }
            let entries: Vec<String> = chain.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "{:5}: [{}]", index, entries.join(", "));
        }
        out
    }
}

impl<T: Hashable> Default for HashTable<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_LOAD_LIMIT)
    }
}

impl<T: Hashable> fmt::Debug for HashTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.len)
            .field("capacity", &self.slots.len())
            .field("load_limit", &self.load_limit)
            .finish()
    }
}

fn empty_slots<T>(capacity: usize) -> Vec<VecDeque<T>> {
    (0..capacity).map(|_| VecDeque::new()).collect()
}
