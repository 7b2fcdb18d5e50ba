//! Axis-aligned box made of six rectangles.

use crate::hittable::{HitRecord, Hittable, HittableList, MaterialId};
use crate::rect::AxisRect;
use cinder_math::{Aabb, Interval, Ray, Vec3};

/// Closed box between corners `p0` and `p1` (`p0 <= p1` componentwise).
pub struct BoxShape {
    bbox: Aabb,
    sides: HittableList,
}

impl BoxShape {
    pub fn new(p0: Vec3, p1: Vec3, material: MaterialId) -> Self {
        let mut sides = HittableList::new();

        sides.add(Box::new(AxisRect::xy(p0.x, p1.x, p0.y, p1.y, p1.z, material)));
        sides.add(Box::new(AxisRect::xy(p0.x, p1.x, p0.y, p1.y, p0.z, material)));
        sides.add(Box::new(AxisRect::xz(p0.x, p1.x, p0.z, p1.z, p1.y, material)));
        sides.add(Box::new(AxisRect::xz(p0.x, p1.x, p0.z, p1.z, p0.y, material)));
        sides.add(Box::new(AxisRect::yz(p0.y, p1.y, p0.z, p1.z, p1.x, material)));
        sides.add(Box::new(AxisRect::yz(p0.y, p1.y, p0.z, p1.z, p0.x, material)));

        Self {
            bbox: Aabb::from_corners(p0, p1),
            sides,
        }
    }
}

impl Hittable for BoxShape {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.sides.hit(ray, ray_t)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(self.bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn unit_cube() -> BoxShape {
        BoxShape::new(Vec3::ZERO, Vec3::ONE, MaterialId(2))
    }

    #[test]
    fn test_box_hits_nearest_face() {
        let ray = Ray::new_simple(Vec3::new(0.5, 0.5, 5.0), -Vec3::Z);
        let rec = unit_cube().hit(&ray, Interval::from_min(0.001)).expect("hit");

        assert!((rec.t - 4.0).abs() < EPS);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.material, MaterialId(2));
    }

    #[test]
    fn test_box_hit_from_each_axis() {
        let cube = unit_cube();
        let rays = [
            Ray::new_simple(Vec3::new(-3.0, 0.5, 0.5), Vec3::X),
            Ray::new_simple(Vec3::new(0.5, 4.0, 0.5), -Vec3::Y),
            Ray::new_simple(Vec3::new(0.5, 0.5, -2.0), Vec3::Z),
        ];
        for ray in rays {
            let rec = cube.hit(&ray, Interval::from_min(0.001)).expect("hit");
            assert!(rec.normal.dot(ray.direction()) < 0.0);
        }
    }

    #[test]
    fn test_box_hit_from_inside_finds_exit_face() {
        let ray = Ray::new_simple(Vec3::splat(0.5), Vec3::X);
        let rec = unit_cube().hit(&ray, Interval::from_min(0.001)).expect("hit");

        assert!((rec.t - 0.5).abs() < EPS);
        assert_eq!(rec.normal, -Vec3::X);
    }

    #[test]
    fn test_box_miss() {
        let ray = Ray::new_simple(Vec3::new(2.0, 2.0, 5.0), -Vec3::Z);
        assert!(unit_cube().hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_box_bounding_box_is_corners() {
        let cube = BoxShape::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 3.0, 4.0), MaterialId(0));
        let bbox = cube.bounding_box(0.0, 1.0).expect("bounded");

        assert_eq!(bbox.min(), Vec3::new(-1.0, 0.0, 2.0));
        assert_eq!(bbox.max(), Vec3::new(1.0, 3.0, 4.0));
    }
}
