//! Rays and the slab test against bounding boxes.

use crate::{Aabb, Dir3, Point3, Vec3};

/// A half-line cast from a run start point through the model.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Start of the cast.
    pub origin: Point3,
    /// Unit direction of travel.
    pub direction: Dir3,
    /// Reciprocal direction components, precomputed for the slab test.
    inv_direction: Vec3,
    /// Per-axis direction signs selecting the near/far box planes.
    sign: [usize; 3],
}

impl Ray {
    /// Build a ray from an origin and a direction.
    ///
    /// The direction is normalized here; it must be non-zero.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let dir = Dir3::new_normalize(direction);
        let inv = Vec3::new(1.0 / dir.x, 1.0 / dir.y, 1.0 / dir.z);
        let sign = [
            if inv.x < 0.0 { 1 } else { 0 },
            if inv.y < 0.0 { 1 } else { 0 },
            if inv.z < 0.0 { 1 } else { 0 },
        ];
        Self {
            origin,
            direction: dir,
            inv_direction: inv,
            sign,
        }
    }

    /// Point at parameter `t` along the ray.
    ///
    /// The direction is unit length, so `t` is the distance from the
    /// origin in model units.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }

    /// Entry and exit parameters of the ray through `aabb`, by the slab
    /// method.
    ///
    /// `None` when the box is missed or lies entirely behind the origin;
    /// an origin inside the box reports entry at zero. Axis-aligned rays
    /// produce infinite reciprocals, which the slab comparisons absorb.
    #[inline]
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<(f64, f64)> {
        let bounds = [aabb.min, aabb.max];

        let tx1 = (bounds[self.sign[0]].x - self.origin.x) * self.inv_direction.x;
        let tx2 = (bounds[1 - self.sign[0]].x - self.origin.x) * self.inv_direction.x;

        let mut t_min = tx1;
        let mut t_max = tx2;

        let ty1 = (bounds[self.sign[1]].y - self.origin.y) * self.inv_direction.y;
        let ty2 = (bounds[1 - self.sign[1]].y - self.origin.y) * self.inv_direction.y;

        t_min = t_min.max(ty1);
        t_max = t_max.min(ty2);

        let tz1 = (bounds[self.sign[2]].z - self.origin.z) * self.inv_direction.z;
        let tz2 = (bounds[1 - self.sign[2]].z - self.origin.z) * self.inv_direction.z;

        t_min = t_min.max(tz1);
        t_max = t_max.min(tz2);

        if t_max >= t_min && t_max >= 0.0 {
            Some((t_min.max(0.0), t_max))
        } else {
            None
        }
    }
}
