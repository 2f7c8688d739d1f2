//! Indexed coordinate with the offsets of the records located there.

use std::fmt;

/// An integer coordinate in arc-seconds and the record offsets sharing it.
///
/// `x` is longitude and `y` is latitude. Two points are equal when their
/// coordinates are equal; offsets do not take part in the comparison.
#[derive(Debug, Clone)]
pub struct SpatialPoint {
    x: i64,
    y: i64,
    offsets: Vec<u64>,
}

impl SpatialPoint {
    /// Create a point holding a single record offset.
    pub fn new(x: i64, y: i64, offset: u64) -> Self {
        Self {
            x,
            y,
            offsets: vec![offset],
        }
    }

    /// Longitude in arc-seconds.
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Latitude in arc-seconds.
    pub fn y(&self) -> i64 {
        self.y
    }

    /// Returns true if the point sits at `(x, y)`.
    pub fn is_at(&self, x: i64, y: i64) -> bool {
        self.x == x && self.y == y
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

impl PartialEq for SpatialPoint {
    fn eq(&self, other: &Self) -> bool {
        self.is_at(other.x, other.y)
    }
}

impl Eq for SpatialPoint {}

impl fmt::Display for SpatialPoint {
    /// Formats as `[(x, y), [o1, o2]]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[({}, {}), [", self.x, self.y)?;
        for (i, offset) in self.offsets.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", offset)?;
        }
        f.write_str("]]")
    }
}
