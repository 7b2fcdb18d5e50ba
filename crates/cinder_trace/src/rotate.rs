//! Rotation wrapper about the Y axis.

use crate::hittable::{HitRecord, Hittable};
use cinder_math::util::degrees_to_radians;
use cinder_math::{Aabb, Interval, Mat3, Ray, Vec3};

/// Child primitive rotated about +Y by a fixed angle.
///
/// The world box is derived from the child's box over the requested time
/// interval, so moving children stay bounded for any shutter. It bounds the
/// rotated box, not the rotated geometry.
pub struct RotateY {
    object: Box<dyn Hittable>,
    /// Local to world.
    rotation: Mat3,
    /// World to local.
    inverse: Mat3,
}

impl RotateY {
    /// Rotate `object` by `degrees` (counter-clockwise seen from +Y).
    pub fn new(object: Box<dyn Hittable>, degrees: f32) -> Self {
        let rotation = Mat3::from_rotation_y(degrees_to_radians(degrees));
        let inverse = rotation.transpose();

        if object.bounding_box(0.0, 1.0).is_none() {
            log::warn!("RotateY wraps an unbounded object; it cannot be placed in a BVH");
        }

        Self {
            object,
            rotation,
            inverse,
        }
    }
}

/// Box around all 8 rotated corners of `aabb`.
fn rotate_aabb(rotation: &Mat3, aabb: &Aabb) -> Aabb {
    let (lo, hi) = (aabb.min(), aabb.max());
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);

    for i in 0..8 {
        let corner = Vec3::new(
            if i & 1 == 0 { lo.x } else { hi.x },
            if i & 2 == 0 { lo.y } else { hi.y },
            if i & 4 == 0 { lo.z } else { hi.z },
        );
        let rotated = *rotation * corner;
        min = min.min(rotated);
        max = max.max(rotated);
    }

    Aabb::from_corners(min, max)
}

impl Hittable for RotateY {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let local_ray = Ray::new(
            self.inverse * ray.origin(),
            self.inverse * ray.direction(),
            ray.time(),
        );

        // Rotation preserves dot products, so front_face carries over as is.
        let mut rec = self.object.hit(&local_ray, ray_t)?;
        rec.p = self.rotation * rec.p;
        rec.normal = self.rotation * rec.normal;
        Some(rec)
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        self.object
            .bounding_box(time0, time1)
            .map(|local| rotate_aabb(&self.rotation, &local))
    }
}
