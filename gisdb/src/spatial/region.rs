//! Region geometry for the quadtree.
//!
//! Tree regions are half-open (`[lo, hi)` on both axes) so sibling quadrants
//! never share a boundary. Query rectangles are closed (`[lo, hi]`) so a
//! caller asking for a box includes its edges.

use std::fmt;

/// One of the four children of an internal quadtree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NE,
    NW,
    SE,
    SW,
}

impl Quadrant {
    /// All quadrants in child storage order.
    pub const ALL: [Quadrant; 4] = [Quadrant::NE, Quadrant::NW, Quadrant::SE, Quadrant::SW];

    /// Position of this quadrant in an internal node's child array.
    pub fn index(self) -> usize {
        match self {
            Quadrant::NE => 0,
            Quadrant::NW => 1,
            Quadrant::SE => 2,
            Quadrant::SW => 3,
        }
    }
}

/// Half-open rectangle `[x_lo, x_hi) × [y_lo, y_hi)` covered by a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x_lo: i64,
    pub x_hi: i64,
    pub y_lo: i64,
    pub y_hi: i64,
}

impl Region {
    pub fn new(x_lo: i64, x_hi: i64, y_lo: i64, y_hi: i64) -> Self {
        Self {
            x_lo,
            x_hi,
            y_lo,
            y_hi,
        }
    }

    /// Returns true if `(x, y)` lies inside the region.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.x_lo <= x && x < self.x_hi && self.y_lo <= y && y < self.y_hi
    }

    /// Integer midpoint `(x_mid, y_mid)`.
    pub fn midpoint(&self) -> (i64, i64) {
        (
            self.x_lo + (self.x_hi - self.x_lo) / 2,
            self.y_lo + (self.y_hi - self.y_lo) / 2,
        )
    }

    /// Classify a point into the quadrant that contains it.
    ///
    /// Points on a midpoint line belong to the quadrant on the high side.
    /// Returns `None` for points outside the region.
    pub fn quadrant_of(&self, x: i64, y: i64) -> Option<Quadrant> {
        if !self.contains(x, y) {
            return None;
        }
        let (x_mid, y_mid) = self.midpoint();
        let quadrant = match (x >= x_mid, y >= y_mid) {
            (true, true) => Quadrant::NE,
            (false, true) => Quadrant::NW,
            (false, false) => Quadrant::SW,
            (true, false) => Quadrant::SE,
        };
        Some(quadrant)
    }

    /// Sub-region covered by `quadrant`.
    pub fn child(&self, quadrant: Quadrant) -> Region {
        let (x_mid, y_mid) = self.midpoint();
        match quadrant {
            Quadrant::NE => Region::new(x_mid, self.x_hi, y_mid, self.y_hi),
            Quadrant::NW => Region::new(self.x_lo, x_mid, y_mid, self.y_hi),
            Quadrant::SE => Region::new(x_mid, self.x_hi, self.y_lo, y_mid),
            Quadrant::SW => Region::new(self.x_lo, x_mid, self.y_lo, y_mid),
        }
    }

    /// Returns true if this half-open region shares a point with the closed
    /// rectangle.
    pub fn overlaps(&self, rect: &Rect) -> bool {
        self.x_lo <= rect.x_hi
            && rect.x_lo < self.x_hi
            && self.y_lo <= rect.y_hi
            && rect.y_lo < self.y_hi
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) x [{}, {})",
            self.x_lo, self.x_hi, self.y_lo, self.y_hi
        )
    }
}

/// Closed query rectangle `[x_lo, x_hi] × [y_lo, y_hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x_lo: i64,
    pub x_hi: i64,
    pub y_lo: i64,
    pub y_hi: i64,
}

impl Rect {
    pub fn new(x_lo: i64, x_hi: i64, y_lo: i64, y_hi: i64) -> Self {
        Self {
            x_lo,
            x_hi,
            y_lo,
            y_hi,
        }
    }

    /// Rectangle centred on `(x, y)` extending `half_width` and `half_height`
    /// in each direction. Edges clamp at the `i64` range.
    pub fn around(x: i64, y: i64, half_width: i64, half_height: i64) -> Self {
        Self::new(
            x.saturating_sub(half_width),
            x.saturating_add(half_width),
            y.saturating_sub(half_height),
            y.saturating_add(half_height),
        )
    }

    /// Returns true if `(x, y)` lies inside or on the edge of the rectangle.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.x_lo <= x && x <= self.x_hi && self.y_lo <= y && y <= self.y_hi
    }

    /// Returns true if either axis has `lo > hi`.
    pub fn is_inverted(&self) -> bool {
        self.x_lo > self.x_hi || self.y_lo > self.y_hi
    }
}
