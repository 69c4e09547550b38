#![warn(missing_docs)]

//! Placement host abstraction for sleeve openings.
//!
//! A [`PlacementHost`] is the mutable side of opening placement: it
//! activates templates, instantiates them, and writes instance
//! parameters, all inside named transactions that either commit whole or
//! leave the host untouched. [`MemoryHost`] is the in-process
//! implementation used by the pipeline and its tests; a live model
//! connector would implement the same trait.

pub mod error;
mod memory;

pub use error::{HostError, Result};
pub use memory::MemoryHost;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use sleeve_geom::Point3;
use sleeve_model::{ElementId, ElementRef};
use sleeve_plan::PlacementInstruction;

/// Structural role of a placed instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructuralKind {
    /// Plain opening, carries no load. The normal case for sleeves.
    NonStructural,
    /// Load-bearing placement.
    Structural,
}

/// A placed opening instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Id the host assigned at creation.
    pub id: ElementId,
    /// Template the instance was stamped from.
    pub template: ElementId,
    /// Wall the opening belongs to.
    pub wall: ElementRef,
    /// Level the instance is hosted on.
    pub level: ElementId,
    /// Center of the opening.
    pub location: Point3,
    /// Structural role.
    pub structural: StructuralKind,
    /// Instance parameter values, keyed by parameter name.
    pub parameters: HashMap<String, f64>,
}

/// The mutable surface a placement pass drives.
///
/// Methods mutate host state directly; [`transaction`](Self::transaction)
/// scopes a group of mutations so a failure anywhere in the group undoes
/// all of it.
pub trait PlacementHost: Sized {
    /// Activate a template so instances can be stamped from it.
    ///
    /// Activating an already active template is a no-op.
    fn activate_template(&mut self, template: ElementId) -> Result<()>;

    /// Create one opening instance from an instruction.
    ///
    /// The instruction's template must have been activated first.
    fn create_instance(
        &mut self,
        instruction: &PlacementInstruction,
        structural: StructuralKind,
    ) -> Result<ElementId>;

    /// Write a named parameter of a placed instance.
    ///
    /// Fails if the instance's template family does not expose `name`.
    fn set_parameter(&mut self, instance: ElementId, name: &str, value: f64) -> Result<()>;

    /// Run `f` as a named transaction.
    ///
    /// When `f` returns `Err`, every mutation it made is rolled back and
    /// the error is passed through.
    fn transaction<T, E, F>(&mut self, name: &str, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Self) -> std::result::Result<T, E>;
}
