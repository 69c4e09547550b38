#![warn(missing_docs)]

//! Geometry primitives for the sleeve placement core.
//!
//! Thin wrappers around nalgebra providing the value types the core
//! consumes: points, vectors, directions, centerline segments, rays,
//! bounding boxes, and bounded rectangular wall faces ([`Panel`]).
//!
//! All coordinates are f64 in model units; lengths and ray parameters
//! share those units.

mod aabb;
mod panel;
mod ray;
mod segment;

pub use aabb::Aabb;
pub use panel::Panel;
pub use ray::Ray;
pub use segment::Segment;

use nalgebra::{Unit, Vector3};

/// A location in model space.
pub type Point3 = nalgebra::Point3<f64>;

/// A displacement or edge vector.
pub type Vec3 = Vector3<f64>;

/// A normalized direction.
pub type Dir3 = Unit<Vector3<f64>>;

/// Comparison thresholds for geometric predicates.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance threshold in model units.
    pub linear: f64,
    /// Angular threshold in radians, for parallelism tests.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 model units linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Whether a scalar distance is negligible.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Whether two points coincide within the linear threshold.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
