//! Bounded rectangular faces — the ray-testable surface of a wall.

use nalgebra::Unit;
use serde::{Deserialize, Serialize};

use crate::{Aabb, Dir3, Point3, Ray, Tolerance, Vec3};

/// A bounded rectangular face in 3D.
///
/// Defined by an origin corner and two orthogonal edge vectors whose
/// lengths give the extents. A wall registers one panel per solid face,
/// so a layered wall contributes several parallel panels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Corner of the rectangle.
    pub origin: Point3,
    /// First edge vector (not normalized; its length is the extent).
    pub u: Vec3,
    /// Second edge vector, orthogonal to `u`.
    pub v: Vec3,
}

impl Panel {
    /// Create a panel from a corner and two edge vectors.
    pub fn new(origin: Point3, u: Vec3, v: Vec3) -> Self {
        Self { origin, u, v }
    }

    /// Vertical rectangle: bottom edge from `a` to `b`, extruded up by `height`.
    ///
    /// This is the common shape of a wall face in plan-based models.
    pub fn vertical(a: Point3, b: Point3, height: f64) -> Self {
        Self {
            origin: a,
            u: b - a,
            v: Vec3::new(0.0, 0.0, height),
        }
    }

    /// Unit normal of the panel, `None` when an edge is degenerate.
    pub fn normal(&self) -> Option<Dir3> {
        Unit::try_new(self.u.cross(&self.v), 1e-12)
    }

    /// A copy of this panel displaced along its normal by `distance`.
    ///
    /// Used to derive the far face of a layered wall from its near face.
    /// Returns `None` for a degenerate panel.
    pub fn offset(&self, distance: f64) -> Option<Panel> {
        let n = self.normal()?;
        Some(Panel {
            origin: self.origin + n.as_ref() * distance,
            u: self.u,
            v: self.v,
        })
    }

    /// Axis-aligned bounding box of the four corners.
    pub fn aabb(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        aabb.include_point(&self.origin);
        aabb.include_point(&(self.origin + self.u));
        aabb.include_point(&(self.origin + self.v));
        aabb.include_point(&(self.origin + self.u + self.v));
        aabb
    }

    /// Forward crossing parameter of `ray` through this rectangle.
    ///
    /// Closed-form plane solve followed by an in-bounds check of the
    /// projected hit. Returns `None` when the ray is parallel to the
    /// panel within tolerance, hits behind the origin, or misses the
    /// rectangle. Boundary hits (shared edges of adjacent panels) are
    /// inclusive, so a grazing ray can report both neighbors.
    pub fn intersect(&self, ray: &Ray, tol: &Tolerance) -> Option<f64> {
        let normal = self.normal()?;
        let denom = ray.direction.as_ref().dot(normal.as_ref());

        // Ray is parallel to the panel plane
        if denom.abs() < tol.angular {
            return None;
        }

        let t = (self.origin - ray.origin).dot(normal.as_ref()) / denom;

        // Crossing behind the ray origin
        if t < 0.0 {
            return None;
        }

        let w = ray.at(t) - self.origin;
        let a = w.dot(&self.u) / self.u.norm_squared();
        let b = w.dot(&self.v) / self.v.norm_squared();

        if (0.0..=1.0).contains(&a) && (0.0..=1.0).contains(&b) {
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_panel() -> Panel {
        // Rectangle in the XZ plane: x in [0, 4], z in [0, 3], at y = 2.
        Panel::new(
            Point3::new(0.0, 2.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
        )
    }

    #[test]
    fn test_panel_hit_perpendicular() {
        let panel = unit_panel();
        let ray = Ray::new(Point3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0));
        let t = panel.intersect(&ray, &Tolerance::DEFAULT).unwrap();
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_panel_miss_outside_bounds() {
        let panel = unit_panel();
        // Pierces the plane but left of the rectangle.
        let ray = Ray::new(Point3::new(-1.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(panel.intersect(&ray, &Tolerance::DEFAULT).is_none());
    }

    #[test]
    fn test_panel_miss_parallel() {
        let panel = unit_panel();
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(panel.intersect(&ray, &Tolerance::DEFAULT).is_none());
    }

    #[test]
    fn test_panel_miss_behind() {
        let panel = unit_panel();
        let ray = Ray::new(Point3::new(1.0, 5.0, 1.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(panel.intersect(&ray, &Tolerance::DEFAULT).is_none());
    }

    #[test]
    fn test_panel_edge_hit_inclusive() {
        let panel = unit_panel();
        // Exactly on the rectangle corner.
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(panel.intersect(&ray, &Tolerance::DEFAULT).is_some());
    }

    #[test]
    fn test_panel_angled_hit() {
        let panel = unit_panel();
        // 45 degrees in the XY plane towards the panel.
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 0.0));
        let t = panel.intersect(&ray, &Tolerance::DEFAULT).unwrap();
        let expected = 2.0 * 2.0_f64.sqrt();
        assert!((t - expected).abs() < 1e-12);
        let hit = ray.at(t);
        assert!((hit.x - 2.0).abs() < 1e-12);
        assert!((hit.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_panel_vertical_and_offset() {
        let panel = Panel::vertical(
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(6.0, 1.0, 0.0),
            3.0,
        );
        let n = panel.normal().unwrap();
        assert!(n.x.abs() < 1e-12);
        assert!((n.y.abs() - 1.0).abs() < 1e-12);
        assert!(n.z.abs() < 1e-12);

        let far = panel.offset(0.2).unwrap();
        assert!(((far.origin.y - panel.origin.y).abs() - 0.2).abs() < 1e-12);
        // Offset panel is parallel: same ray hits both, 0.2 apart.
        let ray = Ray::new(Point3::new(3.0, -1.0, 1.5), Vec3::new(0.0, 1.0, 0.0));
        let tol = Tolerance::DEFAULT;
        let t_near = panel.intersect(&ray, &tol).unwrap();
        let t_far = far.intersect(&ray, &tol).unwrap();
        assert!(((t_far - t_near).abs() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_panel_degenerate() {
        let panel = Panel::new(
            Point3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
        );
        assert!(panel.normal().is_none());
        assert!(panel.offset(1.0).is_none());
        let ray = Ray::new(Point3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(panel.intersect(&ray, &Tolerance::DEFAULT).is_none());
    }

    #[test]
    fn test_panel_aabb() {
        let panel = unit_panel();
        let aabb = panel.aabb();
        assert!((aabb.min.x - 0.0).abs() < 1e-12);
        assert!((aabb.max.x - 4.0).abs() < 1e-12);
        assert!((aabb.min.y - 2.0).abs() < 1e-12);
        assert!((aabb.max.y - 2.0).abs() < 1e-12);
        assert!((aabb.max.z - 3.0).abs() < 1e-12);
    }
}
