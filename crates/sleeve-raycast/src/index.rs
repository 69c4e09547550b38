//! Harvesting wall faces from a document into a queryable index.

use std::collections::HashSet;

use log::{debug, trace};

use sleeve_geom::{Ray, Tolerance};
use sleeve_model::query::{CrossingCandidate, SpatialIntersector};
use sleeve_model::{Document, ElementId, ElementRef, View3d, Wall};

use crate::bvh::{Bvh, FaceRecord};

/// Spatial index over the visible walls of a document.
///
/// Collects the faces of host walls and of walls seen through link
/// instances, skipping anything hidden in the scoping view, and builds a
/// BVH over them. The index answers the ray queries the planner issues,
/// one per run.
#[derive(Debug, Clone)]
pub struct WallIndex {
    bvh: Bvh,
}

impl WallIndex {
    /// Index the walls of `doc` visible in `view`.
    ///
    /// An id in the view's hidden list suppresses the matching host wall,
    /// linked wall, or an entire link instance. Faces with no usable
    /// normal are dropped.
    pub fn build(doc: &Document, view: &View3d, tol: Tolerance) -> Self {
        let hidden: HashSet<ElementId> = view.hidden.iter().copied().collect();
        let mut faces = Vec::new();

        for wall in &doc.walls {
            if hidden.contains(&wall.id) {
                trace!("wall {} hidden in view {}", wall.id, view.name);
                continue;
            }
            collect_faces(wall, ElementRef::direct(wall.id), &mut faces);
        }

        for link in &doc.links {
            if hidden.contains(&link.id) {
                trace!("link {} hidden in view {}", link.id, view.name);
                continue;
            }
            for wall in &link.walls {
                if hidden.contains(&wall.id) {
                    continue;
                }
                collect_faces(wall, ElementRef::linked(link.id, wall.id), &mut faces);
            }
        }

        debug!(
            "indexed {} wall faces of '{}' in view {}",
            faces.len(),
            doc.title,
            view.name
        );

        Self {
            bvh: Bvh::build(faces, tol),
        }
    }

    /// All face crossings of `ray`, unordered.
    pub fn cast(&self, ray: &Ray) -> Vec<crate::bvh::FaceHit> {
        self.bvh.cast(ray)
    }

    /// Number of indexed faces.
    pub fn len(&self) -> usize {
        self.bvh.len()
    }

    /// Whether the index holds no faces.
    pub fn is_empty(&self) -> bool {
        self.bvh.is_empty()
    }
}

impl SpatialIntersector for WallIndex {
    fn find(&self, ray: &Ray, max_proximity: f64) -> Vec<CrossingCandidate> {
        self.bvh
            .cast(ray)
            .into_iter()
            .filter(|hit| hit.t <= max_proximity)
            .map(|hit| CrossingCandidate {
                proximity: hit.t,
                target: hit.target,
            })
            .collect()
    }
}

fn collect_faces(wall: &Wall, target: ElementRef, faces: &mut Vec<FaceRecord>) {
    for panel in &wall.panels {
        if panel.normal().is_none() {
            debug!("skipping degenerate face on wall {target}");
            continue;
        }
        faces.push(FaceRecord {
            target,
            panel: *panel,
        });
    }
}
