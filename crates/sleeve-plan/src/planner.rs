//! Turning run centerlines into placement instructions.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use sleeve_geom::{Point3, Ray, Tolerance};
use sleeve_model::query::SpatialIntersector;
use sleeve_model::{Document, ElementId, ElementRef, Run};

use crate::dedup::dedup_crossings;
use crate::error::{PlanError, Result};

/// Everything needed to place one opening instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementInstruction {
    /// The run the opening lets through.
    pub run: ElementId,
    /// The template (family symbol) to instantiate.
    pub template: ElementId,
    /// The crossed wall hosting the opening.
    pub wall: ElementRef,
    /// Base level of the crossed wall.
    pub level: ElementId,
    /// Center of the opening, on the run centerline at the wall.
    pub location: Point3,
    /// Opening width, equal to the run diameter.
    pub width: f64,
    /// Opening height, equal to the run diameter.
    pub height: f64,
}

/// Result of a planning pass over a set of runs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    /// Instructions grouped per run in input order, ordered by proximity
    /// within each run.
    pub instructions: Vec<PlacementInstruction>,
    /// Number of runs queried for crossings.
    pub planned_runs: usize,
    /// Number of runs skipped as too short to define a direction.
    pub skipped_runs: usize,
}

/// Plan one opening per (run, crossed wall) pair.
///
/// Casts each run centerline from its start point, keeps crossings no
/// further than the run length, and collapses per-face hits into one
/// crossing per wall. Each crossing becomes an instruction whose location
/// lies on the centerline at the crossing distance and whose size is the
/// run diameter.
///
/// Runs too short to define a direction are skipped with a warning, not
/// an error. A crossing whose wall or level cannot be resolved in `arch`
/// fails the whole pass.
pub fn plan_placements(
    arch: &Document,
    runs: &[Run],
    template: ElementId,
    intersector: &impl SpatialIntersector,
    tol: &Tolerance,
) -> Result<PlanOutcome> {
    let mut instructions = Vec::new();
    let mut planned_runs = 0;
    let mut skipped_runs = 0;

    for run in runs {
        let segment = run.segment();
        let Some((direction, length)) = segment.axis(tol.linear) else {
            warn!("run {} is too short to define a direction, skipping", run.id);
            skipped_runs += 1;
            continue;
        };
        planned_runs += 1;

        let ray = Ray::new(segment.start, direction.into_inner());
        let crossings = dedup_crossings(intersector.find(&ray, length));
        debug!("run {}: {} wall crossings", run.id, crossings.len());

        for crossing in crossings {
            let wall = arch
                .wall(&crossing.target)
                .ok_or(PlanError::WallNotFound {
                    wall: crossing.target,
                })?;
            let level = arch.level(wall.level).ok_or(PlanError::LevelNotFound {
                wall: crossing.target,
                level: wall.level,
            })?;

            instructions.push(PlacementInstruction {
                run: run.id,
                template,
                wall: crossing.target,
                level: level.id,
                location: segment.start + direction.into_inner() * crossing.proximity,
                width: run.diameter,
                height: run.diameter,
            });
        }
    }

    Ok(PlanOutcome {
        instructions,
        planned_runs,
        skipped_runs,
    })
}
