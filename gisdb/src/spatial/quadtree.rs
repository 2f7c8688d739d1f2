//! Point-region quadtree over a fixed world rectangle.

use std::fmt::Write as _;

use super::point::SpatialPoint;
use super::region::{Quadrant, Rect, Region};

/// A node of the quadtree.
///
/// A leaf holds exactly one distinct coordinate. An internal node owns its
/// four children in [`Quadrant::index`] order.
#[derive(Debug, Clone, Default)]
pub enum QuadNode {
    #[default]
    Empty,
    Leaf(SpatialPoint),
    Internal(Box<[QuadNode; 4]>),
}

impl QuadNode {
    fn empty_children() -> Box<[QuadNode; 4]> {
        Box::new([
            QuadNode::Empty,
            QuadNode::Empty,
            QuadNode::Empty,
            QuadNode::Empty,
        ])
    }

    fn insert(&mut self, region: Region, point: SpatialPoint) -> bool {
        match self {
            QuadNode::Empty => {
                *self = QuadNode::Leaf(point);
                true
            }
            QuadNode::Leaf(existing) if *existing == point => false,
            QuadNode::Leaf(_) => {
                let previous = std::mem::replace(self, QuadNode::Internal(Self::empty_children()));
                if let QuadNode::Leaf(previous) = previous {
                    self.insert(region, previous);
                }
                self.insert(region, point)
            }
            QuadNode::Internal(children) => match region.quadrant_of(point.x(), point.y()) {
                Some(quadrant) => children[quadrant.index()].insert(region.child(quadrant), point),
                None => false,
            },
        }
    }

    fn find(&self, region: Region, x: i64, y: i64) -> Option<&SpatialPoint> {
        match self {
            QuadNode::Empty => None,
            QuadNode::Leaf(point) => point.is_at(x, y).then_some(point),
            QuadNode::Internal(children) => {
                let quadrant = region.quadrant_of(x, y)?;
                children[quadrant.index()].find(region.child(quadrant), x, y)
            }
        }
    }

    fn find_mut(&mut self, region: Region, x: i64, y: i64) -> Option<&mut SpatialPoint> {
        match self {
            QuadNode::Empty => None,
            QuadNode::Leaf(point) => point.is_at(x, y).then_some(point),
            QuadNode::Internal(children) => {
                let quadrant = region.quadrant_of(x, y)?;
                children[quadrant.index()].find_mut(region.child(quadrant), x, y)
            }
        }
    }

    fn collect_range<'a>(&'a self, region: Region, rect: &Rect, out: &mut Vec<&'a SpatialPoint>) {
        match self {
            QuadNode::Empty => {}
            QuadNode::Leaf(point) => {
                if rect.contains(point.x(), point.y()) {
                    out.push(point);
                }
            }
            QuadNode::Internal(children) => {
                for quadrant in Quadrant::ALL {
                    let child_region = region.child(quadrant);
                    if child_region.overlaps(rect) {
                        children[quadrant.index()].collect_range(child_region, rect, out);
                    }
                }
            }
        }
    }

    fn write_tree(&self, padding: &str, out: &mut String) {
        match self {
            QuadNode::Empty => {
                let _ = writeln!(out, "{}*", padding);
            }
            QuadNode::Leaf(point) => {
                let _ = writeln!(out, "{}{}", padding, point);
            }
            QuadNode::Internal(children) => {
                let deeper = format!("{}---", padding);
                children[Quadrant::SW.index()].write_tree(&deeper, out);
                children[Quadrant::SE.index()].write_tree(&deeper, out);
                let _ = writeln!(out, "{}@", padding);
                children[Quadrant::NE.index()].write_tree(&deeper, out);
                children[Quadrant::NW.index()].write_tree(&deeper, out);
            }
        }
    }
}

/// Point-region quadtree indexing record offsets by coordinate.
///
/// Coordinates outside the world rectangle are rejected on insert and never
/// found.
///
/// # Example
///
/// ```
/// use gisdb::spatial::{QuadTree, SpatialPoint};
///
/// let mut tree = QuadTree::new(-100, 100, -50, 50);
/// assert!(tree.insert(SpatialPoint::new(10, 10, 1)));
/// assert!(!tree.insert(SpatialPoint::new(200, 0, 2)));
/// assert!(tree.find(200, 0).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct QuadTree {
    region: Region,
    root: QuadNode,
    len: usize,
}

impl QuadTree {
    /// Create an empty tree over `[x_min, x_max) × [y_min, y_max)`.
    pub fn new(x_min: i64, x_max: i64, y_min: i64, y_max: i64) -> Self {
        Self {
            region: Region::new(x_min, x_max, y_min, y_max),
            root: QuadNode::Empty,
            len: 0,
        }
    }

    /// World rectangle covered by the tree.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Root node, for inspection.
    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    /// Number of distinct coordinates stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a point.
    ///
    /// Returns `false` without changing the tree if the point lies outside
    /// the world or its coordinate is already present. Use
    /// [`find_mut`](Self::find_mut) to add offsets to an existing coordinate.
    pub fn insert(&mut self, point: SpatialPoint) -> bool {
        if !self.region.contains(point.x(), point.y()) {
            tracing::debug!(
                x = point.x(),
                y = point.y(),
                world = %self.region,
                "Point outside world rejected"
            );
            return false;
        }
        let inserted = self.root.insert(self.region, point);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Find the point stored at `(x, y)`.
    pub fn find(&self, x: i64, y: i64) -> Option<&SpatialPoint> {
        if !self.region.contains(x, y) {
            return None;
        }
        self.root.find(self.region, x, y)
    }

    /// Find the point stored at `(x, y)`, mutably.
    pub fn find_mut(&mut self, x: i64, y: i64) -> Option<&mut SpatialPoint> {
        if !self.region.contains(x, y) {
            return None;
        }
        self.root.find_mut(self.region, x, y)
    }

    /// All points inside the closed rectangle `[x_lo, x_hi] × [y_lo, y_hi]`.
    ///
    /// An inverted rectangle matches nothing.
    pub fn find_range(&self, x_lo: i64, x_hi: i64, y_lo: i64, y_hi: i64) -> Vec<&SpatialPoint> {
        self.find_in(&Rect::new(x_lo, x_hi, y_lo, y_hi))
    }

    /// All points inside a closed rectangle.
    pub fn find_in(&self, rect: &Rect) -> Vec<&SpatialPoint> {
        let mut found = Vec::new();
        if rect.is_inverted() || !self.region.overlaps(rect) {
            return found;
        }
        self.root.collect_range(self.region, rect, &mut found);
        found
    }

    /// Render the tree sideways.
    ///
    /// Children print in SW, SE, node, NE, NW order with `---` added per
    /// level; `*` marks an empty subtree and `@` an internal node.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.root.write_tree("", &mut out);
        out
    }
}
