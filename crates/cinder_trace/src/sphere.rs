//! Sphere primitives: static and linearly moving.

use crate::hittable::{HitRecord, Hittable, MaterialId};
use cinder_math::sampling::{random_to_sphere, random_unit_vector};
use cinder_math::util::PI;
use cinder_math::{Aabb, Interval, Onb, Ray, Vec3};
use rand::RngCore;

/// Lower ray bound when checking whether a sampled direction sees the light.
const SHADOW_EPSILON: f32 = 0.001;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
    bbox: Aabb,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_corners(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// Get the UV coordinates for a point on the unit sphere.
///
/// theta is measured down from +Y, phi around Y starting at -X.
fn sphere_uv(p: Vec3) -> (f32, f32) {
    let theta = (-p.y).acos();
    let phi = (-p.z).atan2(p.x) + PI;

    (phi / (2.0 * PI), theta / PI)
}

/// Shared quadratic solve for both sphere kinds.
fn hit_sphere(
    center: Vec3,
    radius: f32,
    material: MaterialId,
    ray: &Ray,
    ray_t: Interval,
) -> Option<HitRecord> {
    let oc = ray.origin() - center;
    let a = ray.direction().length_squared();
    let half_b = oc.dot(ray.direction());
    let c = oc.length_squared() - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant <= 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();

    // Nearer root first, then the far side.
    let mut root = (-half_b - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (-half_b + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    let p = ray.at(root);
    let outward_normal = (p - center) / radius;
    let mut rec = HitRecord::new(ray, root, outward_normal, material);
    (rec.u, rec.v) = sphere_uv(outward_normal);
    Some(rec)
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        hit_sphere(self.center, self.radius, self.material, ray, ray_t)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(self.bbox)
    }

    /// Uniform density over the cone of directions that see the sphere. From
    /// inside, every direction sees it and the density is uniform over the
    /// full sphere of directions.
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        let ray = Ray::new_simple(origin, direction);
        if self.hit(&ray, Interval::from_min(SHADOW_EPSILON)).is_none() {
            return 0.0;
        }

        let distance_squared = (self.center - origin).length_squared();
        let radius_squared = self.radius * self.radius;
        if distance_squared <= radius_squared {
            return 1.0 / (4.0 * PI);
        }

        let cos_theta_max = (1.0 - radius_squared / distance_squared).sqrt();
        let solid_angle = 2.0 * PI * (1.0 - cos_theta_max);

        1.0 / solid_angle
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let direction = self.center - origin;
        let distance_squared = direction.length_squared();
        if distance_squared <= self.radius * self.radius {
            return random_unit_vector(rng);
        }

        let uvw = Onb::build_from_w(direction);
        uvw.local_vec(random_to_sphere(self.radius, distance_squared, rng))
    }
}

/// A sphere whose center moves linearly from `center0` at `time0` to
/// `center1` at `time1`. Rays see it at the position for their own time.
#[derive(Debug, Clone)]
pub struct MovingSphere {
    center0: Vec3,
    center1: Vec3,
    time0: f32,
    time1: f32,
    radius: f32,
    material: MaterialId,
}

impl MovingSphere {
    pub fn new(
        center0: Vec3,
        center1: Vec3,
        time0: f32,
        time1: f32,
        radius: f32,
        material: MaterialId,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
        }
    }

    /// Center at `time`. Times outside the keyframes extrapolate.
    pub fn center(&self, time: f32) -> Vec3 {
        let s = (time - self.time0) / (self.time1 - self.time0);
        self.center0 + s * (self.center1 - self.center0)
    }
}

impl Hittable for MovingSphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        hit_sphere(self.center(ray.time()), self.radius, self.material, ray, ray_t)
    }

    /// Union of the boxes at both ends of the interval. Conservative for the
    /// swept volume.
    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        let rvec = Vec3::splat(self.radius);
        let c0 = self.center(time0);
        let c1 = self.center(time1);
        let box0 = Aabb::from_corners(c0 - rvec, c0 + rvec);
        let box1 = Aabb::from_corners(c1 - rvec, c1 + rvec);

        Some(Aabb::surrounding(&box0, &box1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_sphere_hit_nearest_root() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, MaterialId(4));
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let rec = sphere.hit(&ray, Interval::from_min(0.001)).expect("hit");
        assert!((rec.t - 4.0).abs() < EPS);
        assert!((rec.p - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
        assert!((rec.normal - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
        assert!(rec.front_face);
        assert_eq!(rec.material, MaterialId(4));
    }

    #[test]
    fn test_sphere_hit_far_root_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, MaterialId(0));
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Z);

        let rec = sphere.hit(&ray, Interval::from_min(0.001)).expect("hit");
        assert!((rec.t - 1.0).abs() < EPS);
        // Outward normal is kept, the ray leaves through the back face.
        assert!((rec.normal - Vec3::Z).length() < EPS);
        assert!(!rec.front_face);
    }

    #[test]
    fn test_sphere_far_root_used_when_near_root_out_of_range() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, MaterialId(0));
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let rec = sphere.hit(&ray, Interval::new(4.5, 100.0)).expect("hit");
        assert!((rec.t - 6.0).abs() < EPS);
        assert!(sphere.hit(&ray, Interval::new(0.001, 3.9)).is_none());
    }

    #[test]
    fn test_sphere_miss_and_tangent() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, MaterialId(0));

        let away = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z);
        assert!(sphere.hit(&away, Interval::from_min(0.001)).is_none());

        // Grazing ray: discriminant is exactly zero.
        let tangent = Ray::new_simple(Vec3::new(1.0, 0.0, -5.0), Vec3::Z);
        assert!(sphere.hit(&tangent, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_sphere_bounding_box() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.5, MaterialId(0));
        let bbox = sphere.bounding_box(0.0, 1.0).expect("bounded");

        assert_eq!(bbox.min(), Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(bbox.max(), Vec3::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn test_sphere_uv_range() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, MaterialId(0));
        let ray = Ray::new_simple(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);
        let rec = sphere.hit(&ray, Interval::from_min(0.001)).expect("hit");

        // Top pole maps to v = 1.
        assert!((rec.v - 1.0).abs() < 1e-3);
        assert!((0.0..=1.0).contains(&rec.u));
    }

    #[test]
    fn test_moving_sphere_uses_ray_time() {
        let sphere = MovingSphere::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            0.0,
            1.0,
            1.0,
            MaterialId(0),
        );
        assert_eq!(sphere.center(0.5), Vec3::new(5.0, 0.0, 0.0));

        let early = Ray::new(Vec3::new(5.0, 0.0, -5.0), Vec3::Z, 0.0);
        let middle = Ray::new(Vec3::new(5.0, 0.0, -5.0), Vec3::Z, 0.5);
        assert!(sphere.hit(&early, Interval::from_min(0.001)).is_none());

        let rec = sphere.hit(&middle, Interval::from_min(0.001)).expect("hit");
        assert!((rec.t - 4.0).abs() < EPS);
        assert!((rec.normal + Vec3::Z).length() < EPS);
    }

    #[test]
    fn test_moving_sphere_bounding_box_covers_both_ends() {
        let sphere = MovingSphere::new(
            Vec3::ZERO,
            Vec3::new(4.0, 2.0, 0.0),
            0.0,
            1.0,
            1.0,
            MaterialId(0),
        );
        let bbox = sphere.bounding_box(0.0, 1.0).expect("bounded");

        assert_eq!(bbox.min(), Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(bbox.max(), Vec3::new(5.0, 3.0, 1.0));
    }

    #[test]
    fn test_sphere_light_sampling_hits_sphere() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -10.0), 2.0, MaterialId(0));
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..500 {
            let direction = sphere.random(Vec3::ZERO, &mut rng);
            assert!(sphere.pdf_value(Vec3::ZERO, direction) > 0.0);
        }
        assert_eq!(sphere.pdf_value(Vec3::ZERO, Vec3::Z), 0.0);
    }

    #[test]
    fn test_sphere_pdf_is_inverse_solid_angle() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, MaterialId(0));
        // cos_theta_max = sqrt(1 - 1/4)
        let cos_theta_max = 0.75_f32.sqrt();
        let expected = 1.0 / (2.0 * PI * (1.0 - cos_theta_max));

        let value = sphere.pdf_value(Vec3::ZERO, -Vec3::Z);
        assert!((value - expected).abs() < 1e-3 * expected);
    }

    #[test]
    fn test_sphere_pdf_from_inside_integrates_to_one() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, MaterialId(0));
        let origin = Vec3::new(0.5, 0.0, 0.0);
        assert!((sphere.pdf_value(origin, Vec3::X) - 1.0 / (4.0 * PI)).abs() < EPS);

        // Uniform directions have density 1/4π; the estimator of ∫ pdf dω is
        // then the mean of pdf * 4π.
        let mut rng = StdRng::seed_from_u64(13);
        let n = 200_000;
        let integral = (0..n)
            .map(|_| {
                let direction = random_unit_vector(&mut rng);
                sphere.pdf_value(origin, direction) as f64 * 4.0 * std::f64::consts::PI
            })
            .sum::<f64>()
            / n as f64;
        assert!((integral - 1.0).abs() < 0.01, "integral = {integral}");
    }

    #[test]
    fn test_sphere_sampling_from_inside_is_finite() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, MaterialId(0));
        let mut rng = StdRng::seed_from_u64(17);

        for origin in [Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)] {
            for _ in 0..200 {
                let direction = sphere.random(origin, &mut rng);
                assert!(direction.is_finite());
                assert!((direction.length() - 1.0).abs() < 1e-4);
            }
        }
    }
}
