//! Error types for placement planning.

use thiserror::Error;

use sleeve_model::{ElementId, ElementRef};

/// Errors that can occur while planning placements.
#[derive(Error, Debug)]
pub enum PlanError {
    /// A crossing referenced a wall the architectural document does not contain.
    #[error("crossed wall {wall} not found in the architectural document")]
    WallNotFound {
        /// The unresolved wall reference.
        wall: ElementRef,
    },

    /// A crossed wall is based on a level missing from the document.
    #[error("level {level} of wall {wall} not found")]
    LevelNotFound {
        /// The wall whose base level is missing.
        wall: ElementRef,
        /// The missing level id.
        level: ElementId,
    },

    /// Invalid placement settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for planning operations.
pub type Result<T> = std::result::Result<T, PlanError>;
