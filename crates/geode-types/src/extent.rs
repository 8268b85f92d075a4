//! Spatial bounding extents.
//!
//! Trees and features may carry a 2-D bounding [`Extent`] covering all of
//! the geometry beneath them. Traversal uses extents to prune entire
//! subtrees without fetching them: if a subtree's extent fails the caller's
//! bounds filter, nothing inside it can match.

use serde::{Deserialize, Serialize};

/// An axis-aligned 2-D bounding extent.
///
/// Coordinates are in the dataset's CRS; the extent carries no CRS
/// information of its own. An extent is always non-degenerate in the sense
/// that `min <= max` on both axes; [`Extent::new`] normalizes its inputs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    /// Create an extent from two corners, normalizing min/max per axis.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// A degenerate extent covering a single point.
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// Returns `true` if the two extents share any point (edges count).
    pub fn intersects(&self, other: &Extent) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Returns `true` if `other` lies entirely within this extent.
    pub fn contains(&self, other: &Extent) -> bool {
        self.min_x <= other.min_x
            && self.max_x >= other.max_x
            && self.min_y <= other.min_y
            && self.max_y >= other.max_y
    }

    /// The smallest extent covering both `self` and `other`.
    pub fn expand_to_include(&self, other: &Extent) -> Extent {
        Extent {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Width of the extent along the x axis.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the extent along the y axis.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
