#![warn(missing_docs)]

//! Ray queries against the walls of a building model.
//!
//! This crate answers the spatial question at the heart of opening
//! placement: which wall faces does a run centerline cross, and how far
//! from its start? Walls are harvested from a document into a
//! [`WallIndex`] and queried through a BVH, so a model with thousands of
//! walls costs logarithmic work per run instead of a linear scan.
//!
//! # Architecture
//!
//! - [`bvh`] - SAH-built bounding volume hierarchy over wall faces
//! - [`WallIndex`] - visible-wall harvesting plus the query surface used
//!   by the planner
//!
//! Hits are reported per face and unordered; collapsing several faces of
//! one wall into a single crossing is the planner's job.

pub mod bvh;
mod index;

pub use bvh::{Bvh, FaceHit, FaceRecord};
pub use index::WallIndex;
