//! The end-to-end placement pipeline.

use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use sleeve_geom::Tolerance;
use sleeve_host::{PlacementHost, StructuralKind};
use sleeve_model::{Document, ElementId, OpeningTemplate, Project, RunKind, View3d};
use sleeve_plan::{plan_placements, PlanOutcome, PlanSettings};
use sleeve_raycast::WallIndex;

use crate::RunError;

/// Summary of a completed placement pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Opening instances placed.
    pub placed: usize,
    /// Openings placed for duct runs.
    pub ducts: usize,
    /// Openings placed for pipe runs.
    pub pipes: usize,
    /// Runs queried for crossings.
    pub planned_runs: usize,
    /// Runs skipped as too short to define a direction.
    pub skipped_runs: usize,
}

/// Everything the pipeline needs resolved before it touches geometry.
struct Resolved<'a> {
    active: &'a Document,
    mech: &'a Document,
    template: &'a OpeningTemplate,
    view: &'a View3d,
}

fn resolve_preconditions<'a>(
    project: &'a Project,
    settings: &PlanSettings,
) -> Result<Resolved<'a>, RunError> {
    settings.validate()?;

    let active = project.documents.first().ok_or(RunError::NoDocuments)?;
    let mech = project
        .document_titled(&settings.mechanical_marker)
        .ok_or_else(|| RunError::MechanicalDocumentNotFound {
            marker: settings.mechanical_marker.clone(),
        })?;
    let template = active
        .template_by_family(&settings.family)
        .ok_or_else(|| RunError::TemplateNotFound {
            family: settings.family.clone(),
        })?;
    let view = active.default_view().ok_or(RunError::ViewNotFound)?;

    debug!(
        "resolved: active '{}', mechanical '{}', family '{}', view '{}'",
        active.title, mech.title, template.family, view.name
    );

    Ok(Resolved {
        active,
        mech,
        template,
        view,
    })
}

/// Plan openings without touching any host.
///
/// Runs the same preconditions and planning as [`place_openings`] and
/// returns the instructions that a placement pass would execute.
pub fn plan_openings(project: &Project, settings: &PlanSettings) -> Result<PlanOutcome, RunError> {
    let resolved = resolve_preconditions(project, settings)?;
    let tol = Tolerance::DEFAULT;

    let index = WallIndex::build(resolved.active, resolved.view, tol);
    let outcome = plan_placements(
        resolved.active,
        &resolved.mech.runs,
        resolved.template.id,
        &index,
        &tol,
    )?;
    Ok(outcome)
}

/// Place one opening per wall crossing of every mechanical run.
///
/// The pass runs in two transactions against `host`: one that activates
/// the opening template, and one that creates all instances and writes
/// their size parameters. A failure inside the placement transaction
/// rolls every instance of the batch back; the activation, once
/// committed, stays.
pub fn place_openings<H: PlacementHost>(
    project: &Project,
    settings: &PlanSettings,
    host: &mut H,
) -> Result<PlacementReport, RunError> {
    let resolved = resolve_preconditions(project, settings)?;
    let tol = Tolerance::DEFAULT;

    let index = WallIndex::build(resolved.active, resolved.view, tol);

    host.transaction("activate opening template", |h| {
        h.activate_template(resolved.template.id)
    })?;

    let outcome = plan_placements(
        resolved.active,
        &resolved.mech.runs,
        resolved.template.id,
        &index,
        &tol,
    )?;

    host.transaction("place openings", |h| {
        for instruction in &outcome.instructions {
            let id = h.create_instance(instruction, StructuralKind::NonStructural)?;
            h.set_parameter(id, &settings.width_param, instruction.width)?;
            h.set_parameter(id, &settings.height_param, instruction.height)?;
        }
        Ok::<_, crate::HostError>(())
    })?;

    let kinds: HashMap<ElementId, RunKind> =
        resolved.mech.runs.iter().map(|r| (r.id, r.kind)).collect();
    let ducts = outcome
        .instructions
        .iter()
        .filter(|i| kinds.get(&i.run) == Some(&RunKind::Duct))
        .count();
    let pipes = outcome
        .instructions
        .iter()
        .filter(|i| kinds.get(&i.run) == Some(&RunKind::Pipe))
        .count();

    let report = PlacementReport {
        placed: outcome.instructions.len(),
        ducts,
        pipes,
        planned_runs: outcome.planned_runs,
        skipped_runs: outcome.skipped_runs,
    };
    info!(
        "placed {} openings ({} duct, {} pipe) across {} runs, {} skipped",
        report.placed, report.ducts, report.pipes, report.planned_runs, report.skipped_runs
    );

    Ok(report)
}
