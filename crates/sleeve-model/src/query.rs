//! Spatial query vocabulary shared by the planner and its intersectors.

use serde::{Deserialize, Serialize};

use crate::ElementRef;
use sleeve_geom::Ray;

/// One raw crossing of a ray with a wall face.
///
/// Candidates are per face: a ray through a layered wall yields one
/// candidate per boundary it pierces, all carrying the same target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingCandidate {
    /// Distance from the ray origin to the face, along the ray.
    pub proximity: f64,
    /// The wall the face belongs to.
    pub target: ElementRef,
}

/// Answers ray queries against the walls of a model.
///
/// Implementations return every face crossing with `proximity` in
/// `[0, max_proximity]`, in no particular order and without collapsing
/// duplicates. The caller owns deduplication and ordering.
pub trait SpatialIntersector {
    /// All face crossings of `ray` up to `max_proximity` away.
    fn find(&self, ray: &Ray, max_proximity: f64) -> Vec<CrossingCandidate>;
}
