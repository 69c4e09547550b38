#![warn(missing_docs)]

//! sleeve — wall opening placement for duct and pipe runs.
//!
//! Where a duct or pipe centerline crosses a wall, the wall needs a
//! penetration sleeve. This crate walks the runs of the mechanical
//! document, finds every wall they cross in the coordination model, and
//! places one circular opening per crossing, sized to the run diameter
//! and centered on the centerline.
//!
//! # Example
//!
//! ```ignore
//! use sleeve::{place_openings, MemoryHost, PlanSettings, Project};
//!
//! let project = Project::from_json(&std::fs::read_to_string("project.json")?)?;
//! let settings = PlanSettings::default();
//! let mut host = MemoryHost::from_document(&project.documents[0]);
//!
//! let report = place_openings(&project, &settings, &mut host)?;
//! println!("placed {} openings", report.placed);
//! ```

use thiserror::Error;

mod run;

pub use run::{place_openings, plan_openings, PlacementReport};

pub use sleeve_geom::{Point3, Segment, Tolerance};
pub use sleeve_host::{HostError, Instance, MemoryHost, PlacementHost, StructuralKind};
pub use sleeve_model::{Document, ElementId, ElementRef, Project, Run, RunKind};
pub use sleeve_plan::{PlacementInstruction, PlanError, PlanOutcome, PlanSettings};
pub use sleeve_raycast::WallIndex;

/// Errors returned by the placement pipeline.
#[derive(Error, Debug)]
pub enum RunError {
    /// The project has no open documents.
    #[error("project has no open documents")]
    NoDocuments,

    /// No open document title carries the mechanical marker.
    #[error("no open document titled with '{marker}'")]
    MechanicalDocumentNotFound {
        /// The marker that was searched for.
        marker: String,
    },

    /// The active document has no opening template with the configured family.
    #[error("opening family '{family}' is not loaded")]
    TemplateNotFound {
        /// The family name that was looked up.
        family: String,
    },

    /// The active document has no non-template 3D view to query in.
    #[error("no usable 3D view in the active document")]
    ViewNotFound,

    /// Planning failed.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),

    /// A host mutation failed.
    #[error("placement failed: {0}")]
    Host(#[from] HostError),
}
