//! Bounded LRU cache of record text keyed by store offset.

use std::collections::{HashMap, VecDeque};
use std::fmt::Write as _;

use super::stats::PoolStats;

/// Default number of records held by the pool.
pub const DEFAULT_CAPACITY: usize = 15;

/// LRU buffer pool mapping record offsets to record text.
///
/// The recency list runs from most recently used (front) to least recently
/// used (back). Every offset in the list has exactly one entry in the map.
#[derive(Debug)]
pub struct BufferPool {
    entries: HashMap<u64, String>,
    recency: VecDeque<u64>,
    capacity: usize,
    stats: PoolStats,
}

impl BufferPool {
    /// Create a pool holding at most `capacity` records.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity + 1),
            recency: VecDeque::with_capacity(capacity + 1),
            capacity,
            stats: PoolStats::default(),
        }
    }

    /// Look up an offset, promoting it to most recently used on a hit.
    pub fn get(&mut self, offset: u64) -> Option<&str> {
        if !self.entries.contains_key(&offset) {
            self.stats.misses += 1;
            return None;
        }
        self.stats.hits += 1;
        self.promote(offset);
        self.entries.get(&offset).map(String::as_str)
    }

    /// Store the text for an offset as most recently used.
    ///
    /// Replaces the text of an offset that is already cached. Inserting a new
    /// offset into a full pool evicts the least recently used entry.
    pub fn put(&mut self, offset: u64, text: String) {
        if let Some(existing) = self.entries.get_mut(&offset) {
            *existing = text;
            self.promote(offset);
            return;
        }

        self.entries.insert(offset, text);
        self.recency.push_front(offset);

        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.recency.pop_back() {
                self.entries.remove(&evicted);
                self.stats.evictions += 1;
                tracing::trace!(offset = evicted, "Evicted record from buffer pool");
            }
        }
    }

    /// Returns true if the offset is cached. Does not affect recency.
    pub fn contains(&self, offset: u64) -> bool {
        self.entries.contains_key(&offset)
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Hit, miss and eviction counters.
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Cached offsets from most to least recently used.
    pub fn offsets(&self) -> impl Iterator<Item = u64> + '_ {
        self.recency.iter().copied()
    }

    /// Render the pool from most to least recently used.
    pub fn dump(&self) -> String {
        let mut out = String::from("MRU\n");
        for offset in &self.recency {
            if let Some(text) = self.entries.get(offset) {
                let _ = writeln!(out, "\t{} {}", offset, text);
            }
        }
        out.push_str("LRU\n");
        out
    }

    fn promote(&mut self, offset: u64) {
        if self.recency.front() == Some(&offset) {
            return;
        }
        if let Some(position) = self.recency.iter().position(|o| *o == offset) {
            self.recency.remove(position);
            self.recency.push_front(offset);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
