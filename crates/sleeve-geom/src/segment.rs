//! Straight centerline segments.

use serde::{Deserialize, Serialize};

use crate::{Dir3, Point3, Vec3};
use nalgebra::Unit;

/// A straight line segment between two points.
///
/// Mechanical runs are reduced to segments before ray casting; curved
/// centerlines are not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub start: Point3,
    /// End point.
    pub end: Point3,
}

impl Segment {
    /// Create a segment from two endpoints.
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction and length of the segment.
    ///
    /// Returns `None` for a degenerate segment shorter than `min_length`,
    /// so callers can skip malformed centerlines instead of casting a ray
    /// with an undefined direction.
    pub fn axis(&self, min_length: f64) -> Option<(Dir3, f64)> {
        let d: Vec3 = self.end - self.start;
        Unit::try_new_and_get(d, min_length)
    }
}
