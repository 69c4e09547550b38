//! Bounding volume hierarchy over wall faces.
//!
//! Construction splits by the Surface Area Heuristic (SAH); traversal
//! collects every forward crossing, not just the closest.

use sleeve_geom::{Aabb, Panel, Point3, Ray, Tolerance};
use sleeve_model::ElementRef;

/// One ray-testable wall face.
#[derive(Debug, Clone)]
pub struct FaceRecord {
    /// Wall the face belongs to.
    pub target: ElementRef,
    /// Geometry of the face.
    pub panel: Panel,
}

/// One crossing of a ray with an indexed face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceHit {
    /// Ray parameter of the crossing (distance from the origin).
    pub t: f64,
    /// Wall whose face was crossed.
    pub target: ElementRef,
}

/// A node of the hierarchy: a leaf holds face indices, an internal node
/// holds two children.
#[derive(Debug, Clone)]
enum BvhNode {
    /// Indices into the owning [`Bvh`]'s face array.
    Leaf { aabb: Aabb, faces: Vec<usize> },
    /// Two-way split of the faces below this node.
    Internal {
        aabb: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

/// Bounding Volume Hierarchy over wall faces.
#[derive(Debug, Clone)]
pub struct Bvh {
    root: Option<BvhNode>,
    faces: Vec<FaceRecord>,
    tol: Tolerance,
}

impl Bvh {
    /// Build a BVH over the given faces using SAH construction.
    ///
    /// Face boxes are fattened by the linear tolerance so that flat faces
    /// (zero extent along their normal) still have usable bounds.
    pub fn build(faces: Vec<FaceRecord>, tol: Tolerance) -> Self {
        let mut face_data: Vec<(usize, Aabb, Point3)> = faces
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let mut aabb = record.panel.aabb();
                aabb.expand(tol.linear);
                let centroid = aabb.center();
                (index, aabb, centroid)
            })
            .collect();

        let root = if face_data.is_empty() {
            None
        } else {
            Some(build_node(&mut face_data))
        };

        Self { root, faces, tol }
    }

    /// All crossings of `ray` with indexed faces.
    ///
    /// Hits come back in traversal order, not by distance, and one face can
    /// appear once per crossing. Callers that need ordering sort themselves.
    pub fn cast(&self, ray: &Ray) -> Vec<FaceHit> {
        let mut hits = Vec::new();

        if let Some(ref root) = self.root {
            self.cast_node(ray, root, &mut hits);
        }

        hits
    }

    /// Number of indexed faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether the hierarchy indexes no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    fn cast_node(&self, ray: &Ray, node: &BvhNode, hits: &mut Vec<FaceHit>) {
        match node {
            BvhNode::Leaf { aabb, faces } => {
                if ray.intersect_aabb(aabb).is_some() {
                    for &index in faces {
                        let record = &self.faces[index];
                        if let Some(t) = record.panel.intersect(ray, &self.tol) {
                            hits.push(FaceHit {
                                t,
                                target: record.target,
                            });
                        }
                    }
                }
            }
            BvhNode::Internal { aabb, left, right } => {
                if ray.intersect_aabb(aabb).is_some() {
                    self.cast_node(ray, left, hits);
                    self.cast_node(ray, right, hits);
                }
            }
        }
    }
}

/// Recursively build a subtree over `face_data` (index, box, centroid).
fn build_node(face_data: &mut [(usize, Aabb, Point3)]) -> BvhNode {
    let mut bounds = Aabb::empty();
    for (_, aabb, _) in face_data.iter() {
        bounds.include_point(&aabb.min);
        bounds.include_point(&aabb.max);
    }

    // Few enough faces to test directly
    if face_data.len() <= 4 {
        return BvhNode::Leaf {
            aabb: bounds,
            faces: face_data.iter().map(|(index, _, _)| *index).collect(),
        };
    }

    let (best_axis, best_pos) = find_best_split(face_data, &bounds);
    let mid = partition_faces(face_data, best_axis, best_pos);

    // Fallback if partition degenerates: split in the middle
    let mid = if mid == 0 || mid == face_data.len() {
        face_data.len() / 2
    } else {
        mid
    };

    let (left_data, right_data) = face_data.split_at_mut(mid);

    BvhNode::Internal {
        aabb: bounds,
        left: Box::new(build_node(left_data)),
        right: Box::new(build_node(right_data)),
    }
}

/// Pick the split axis and position with the lowest SAH cost.
fn find_best_split(face_data: &[(usize, Aabb, Point3)], bounds: &Aabb) -> (usize, f64) {
    const NUM_BUCKETS: usize = 12;

    let extent = bounds.max - bounds.min;

    let mut best_cost = f64::INFINITY;
    let mut best_axis = 0;
    let mut best_pos = 0.0;

    for axis in 0..3 {
        let axis_extent = extent[axis];
        if axis_extent < 1e-10 {
            continue;
        }
        let axis_min = bounds.min[axis];

        let mut bucket_counts = [0usize; NUM_BUCKETS];
        let mut bucket_bounds = [Aabb::empty(); NUM_BUCKETS];

        // Bucket faces by centroid along this axis
        for (_, aabb, centroid) in face_data {
            let b = ((centroid[axis] - axis_min) / axis_extent * NUM_BUCKETS as f64) as usize;
            let b = b.min(NUM_BUCKETS - 1);

            bucket_counts[b] += 1;
            bucket_bounds[b].include_point(&aabb.min);
            bucket_bounds[b].include_point(&aabb.max);
        }

        // Sweep candidate splits
        for split in 1..NUM_BUCKETS {
            let mut left_count = 0;
            let mut left_bounds = Aabb::empty();
            for i in 0..split {
                left_count += bucket_counts[i];
                if bucket_counts[i] > 0 {
                    left_bounds.include_point(&bucket_bounds[i].min);
                    left_bounds.include_point(&bucket_bounds[i].max);
                }
            }

            let mut right_count = 0;
            let mut right_bounds = Aabb::empty();
            for i in split..NUM_BUCKETS {
                right_count += bucket_counts[i];
                if bucket_counts[i] > 0 {
                    right_bounds.include_point(&bucket_bounds[i].min);
                    right_bounds.include_point(&bucket_bounds[i].max);
                }
            }

            if left_count == 0 || right_count == 0 {
                continue;
            }

            // traversal cost + area-weighted face counts per side
            let total_area = surface_area(bounds);
            let cost = 0.125
                + surface_area(&left_bounds) / total_area * left_count as f64
                + surface_area(&right_bounds) / total_area * right_count as f64;

            if cost < best_cost {
                best_cost = cost;
                best_axis = axis;
                best_pos = axis_min + (split as f64 / NUM_BUCKETS as f64) * axis_extent;
            }
        }
    }

    (best_axis, best_pos)
}

/// Partition faces in place: centroids below `pos` on `axis` go left.
fn partition_faces(face_data: &mut [(usize, Aabb, Point3)], axis: usize, pos: f64) -> usize {
    let mut left = 0;
    let mut right = face_data.len();

    while left < right {
        if face_data[left].2[axis] < pos {
            left += 1;
        } else {
            right -= 1;
            face_data.swap(left, right);
        }
    }

    left
}

fn surface_area(aabb: &Aabb) -> f64 {
    let d = aabb.max - aabb.min;
    2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleeve_geom::Vec3;
    use sleeve_model::ElementId;

    fn wall_face(id: u64, y: f64) -> FaceRecord {
        FaceRecord {
            target: ElementRef::direct(ElementId(id)),
            panel: Panel::vertical(
                Point3::new(0.0, y, 0.0),
                Point3::new(10.0, y, 0.0),
                3.0,
            ),
        }
    }

    #[test]
    fn test_bvh_build() {
        let faces: Vec<FaceRecord> = (0..10).map(|i| wall_face(i, i as f64)).collect();
        let bvh = Bvh::build(faces, Tolerance::DEFAULT);
        assert_eq!(bvh.len(), 10);
        assert!(!bvh.is_empty());
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = Bvh::build(Vec::new(), Tolerance::DEFAULT);
        assert!(bvh.is_empty());
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(bvh.cast(&ray).is_empty());
    }

    #[test]
    fn test_bvh_cast_all_crossings() {
        // Eight parallel faces at y = 1..8, ray pierces them all.
        let faces: Vec<FaceRecord> = (1..=8).map(|i| wall_face(i, i as f64)).collect();
        let bvh = Bvh::build(faces, Tolerance::DEFAULT);

        let ray = Ray::new(Point3::new(5.0, 0.0, 1.5), Vec3::new(0.0, 1.0, 0.0));
        let mut hits = bvh.cast(&ray);
        assert_eq!(hits.len(), 8);

        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap());
        for (i, hit) in hits.iter().enumerate() {
            let expected = (i + 1) as f64;
            assert!((hit.t - expected).abs() < 1e-12);
            assert_eq!(hit.target, ElementRef::direct(ElementId(i as u64 + 1)));
        }
    }

    #[test]
    fn test_bvh_cast_miss() {
        let faces: Vec<FaceRecord> = (1..=8).map(|i| wall_face(i, i as f64)).collect();
        let bvh = Bvh::build(faces, Tolerance::DEFAULT);

        // Above every face
        let ray = Ray::new(Point3::new(5.0, 0.0, 50.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(bvh.cast(&ray).is_empty());
    }

    #[test]
    fn test_bvh_matches_linear_scan() {
        // A mixed set: faces along y, along x, and at varied heights.
        let mut faces = Vec::new();
        for i in 0..12 {
            faces.push(wall_face(i, 1.0 + i as f64 * 0.7));
        }
        for i in 0..12 {
            faces.push(FaceRecord {
                target: ElementRef::direct(ElementId(100 + i)),
                panel: Panel::vertical(
                    Point3::new(1.0 + i as f64 * 0.5, 0.0, 0.0),
                    Point3::new(1.0 + i as f64 * 0.5, 10.0, 0.0),
                    4.0,
                ),
            });
        }

        let tol = Tolerance::DEFAULT;
        let bvh = Bvh::build(faces.clone(), tol);

        let rays = [
            Ray::new(Point3::new(5.0, -1.0, 1.5), Vec3::new(0.0, 1.0, 0.0)),
            Ray::new(Point3::new(-1.0, 5.0, 2.0), Vec3::new(1.0, 0.0, 0.0)),
            Ray::new(Point3::new(-1.0, -1.0, 1.0), Vec3::new(1.0, 1.0, 0.1)),
            Ray::new(Point3::new(5.0, 20.0, 1.5), Vec3::new(0.0, 1.0, 0.0)),
        ];

        for ray in &rays {
            let mut expected: Vec<FaceHit> = faces
                .iter()
                .filter_map(|record| {
                    record.panel.intersect(ray, &tol).map(|t| FaceHit {
                        t,
                        target: record.target,
                    })
                })
                .collect();
            let mut hits = bvh.cast(ray);

            expected.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap());
            hits.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap());
            assert_eq!(hits, expected);
        }
    }

    #[test]
    fn test_bvh_linked_targets() {
        let faces = vec![FaceRecord {
            target: ElementRef::linked(ElementId(7), ElementId(42)),
            panel: Panel::vertical(
                Point3::new(0.0, 3.0, 0.0),
                Point3::new(10.0, 3.0, 0.0),
                3.0,
            ),
        }];
        let bvh = Bvh::build(faces, Tolerance::DEFAULT);

        let ray = Ray::new(Point3::new(5.0, 0.0, 1.5), Vec3::new(0.0, 1.0, 0.0));
        let hits = bvh.cast(&ray);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, ElementRef::linked(ElementId(7), ElementId(42)));
    }
}
