#![warn(missing_docs)]

//! Placement planning for sleeve openings.
//!
//! This crate turns the centerlines of duct and pipe runs into placement
//! instructions: one circular opening per wall each run crosses, centered
//! on the centerline at the wall and sized to the run diameter. Raw
//! per-face hits come from a
//! [`SpatialIntersector`](sleeve_model::query::SpatialIntersector)
//! implementation; this crate owns deduplication, ordering, and reference
//! resolution.
//!
//! # Example
//!
//! ```ignore
//! use sleeve_plan::plan_placements;
//! use sleeve_geom::Tolerance;
//!
//! let index = // ... WallIndex over the architectural document
//! let outcome = plan_placements(&arch, &mech.runs, template, &index, &Tolerance::DEFAULT)?;
//!
//! println!("Openings to place: {}", outcome.instructions.len());
//! ```

pub mod dedup;
pub mod error;
pub mod planner;

pub use dedup::{dedup_crossings, Crossing};
pub use error::{PlanError, Result};
pub use planner::{plan_placements, PlacementInstruction, PlanOutcome};

use serde::{Deserialize, Serialize};

/// Placement parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSettings {
    /// Family name of the opening template.
    pub family: String,
    /// Instance parameter receiving the opening width.
    pub width_param: String,
    /// Instance parameter receiving the opening height.
    pub height_param: String,
    /// Substring identifying the mechanical document among open documents.
    pub mechanical_marker: String,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            family: "Sleeve Opening".to_string(),
            width_param: "Width".to_string(),
            height_param: "Height".to_string(),
            mechanical_marker: "MEP".to_string(),
        }
    }
}

impl PlanSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.family.is_empty() {
            return Err(PlanError::InvalidSettings(
                "family name must not be empty".into(),
            ));
        }
        if self.width_param.is_empty() || self.height_param.is_empty() {
            return Err(PlanError::InvalidSettings(
                "size parameter names must not be empty".into(),
            ));
        }
        if self.mechanical_marker.is_empty() {
            return Err(PlanError::InvalidSettings(
                "mechanical document marker must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_valid() {
        assert!(PlanSettings::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_settings() {
        let settings = PlanSettings {
            family: String::new(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = PlanSettings {
            width_param: String::new(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = PlanSettings {
            mechanical_marker: String::new(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
