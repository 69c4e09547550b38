//! Collapsing per-face crossings into per-wall crossings.

use std::collections::HashMap;

use sleeve_model::query::CrossingCandidate;
use sleeve_model::ElementRef;

/// One wall crossed by a run, with the distance to its near face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Distance from the run start to the wall, along the run.
    pub proximity: f64,
    /// The crossed wall.
    pub target: ElementRef,
}

/// Collapse raw face crossings into one crossing per wall.
///
/// A layered wall reports one candidate per pierced boundary, all with the
/// same wall reference. Candidates are grouped by that reference and the
/// smallest proximity represents the group, so the result does not depend
/// on the order hits come back in. Output is sorted by proximity, run
/// start outward.
pub fn dedup_crossings(candidates: Vec<CrossingCandidate>) -> Vec<Crossing> {
    let mut nearest: HashMap<ElementRef, f64> = HashMap::new();
    for candidate in candidates {
        nearest
            .entry(candidate.target)
            .and_modify(|proximity| *proximity = proximity.min(candidate.proximity))
            .or_insert(candidate.proximity);
    }

    let mut crossings: Vec<Crossing> = nearest
        .into_iter()
        .map(|(target, proximity)| Crossing { proximity, target })
        .collect();
    crossings.sort_by(|a, b| a.proximity.partial_cmp(&b.proximity).unwrap());
    crossings
}
