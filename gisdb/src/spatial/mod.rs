//! Spatial index: a point-region quadtree keyed by arc-second coordinates.
//!
//! # Architecture
//!
//! ```text
//! QuadTree  world [x_min, x_max) × [y_min, y_max)
//! └── Internal @ midpoint
//!     ├── NE → Leaf [(x, y), [offsets]]
//!     ├── NW → Internal ...
//!     ├── SE → Empty
//!     └── SW → Leaf ...
//! ```
//!
//! Each leaf holds one distinct coordinate together with every record offset
//! located there. A second coordinate landing in a leaf splits it into an
//! internal node. Node regions are half-open; query rectangles are closed.
//!
//! # Usage
//!
//! ```
//! use gisdb::spatial::{QuadTree, SpatialPoint};
//!
//! let mut tree = QuadTree::new(-100, 100, -50, 50);
//! tree.insert(SpatialPoint::new(10, 10, 104));
//! tree.insert(SpatialPoint::new(-20, 5, 233));
//! tree.find_mut(10, 10).unwrap().add_offset(877);
//!
//! let hits = tree.find_range(0, 20, 0, 20);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].offsets(), &[104, 877]);
//! ```

mod point;
mod quadtree;
mod region;

pub use point::SpatialPoint;
pub use quadtree::{QuadNode, QuadTree};
pub use region::{Quadrant, Rect, Region};
