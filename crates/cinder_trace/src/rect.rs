//! Axis-aligned rectangles, the building block for boxes and area lights.

use crate::hittable::{HitRecord, Hittable, MaterialId};
use cinder_math::{Aabb, Interval, Ray, Vec3};
use rand::{Rng, RngCore};

/// Half-thickness added along the fixed axis so the bounding box never has a
/// zero-width slab.
const RECT_THICKNESS: f32 = 0.0001;

/// Lower ray bound when checking whether a sampled direction sees the light.
const SHADOW_EPSILON: f32 = 0.001;

/// Plane a rectangle lies in, named by its two free axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectPlane {
    Xy,
    Xz,
    Yz,
}

impl RectPlane {
    /// (first free axis, second free axis, fixed axis)
    const fn axes(self) -> (usize, usize, usize) {
        match self {
            RectPlane::Xy => (0, 1, 2),
            RectPlane::Xz => (0, 2, 1),
            RectPlane::Yz => (1, 2, 0),
        }
    }
}

/// Rectangle spanning `a` and `b` on the free axes at coordinate `k` on the
/// fixed axis.
///
/// Reported normals face the incoming ray, which is the convention one-sided
/// emitters rely on.
#[derive(Debug, Clone)]
pub struct AxisRect {
    plane: RectPlane,
    a: Interval,
    b: Interval,
    k: f32,
    material: MaterialId,
}

impl AxisRect {
    pub fn new(plane: RectPlane, a: Interval, b: Interval, k: f32, material: MaterialId) -> Self {
        Self {
            plane,
            a,
            b,
            k,
            material,
        }
    }

    /// Rectangle in the plane `z = k`.
    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: MaterialId) -> Self {
        Self::new(RectPlane::Xy, Interval::new(x0, x1), Interval::new(y0, y1), k, material)
    }

    /// Rectangle in the plane `y = k`.
    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: MaterialId) -> Self {
        Self::new(RectPlane::Xz, Interval::new(x0, x1), Interval::new(z0, z1), k, material)
    }

    /// Rectangle in the plane `x = k`.
    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: MaterialId) -> Self {
        Self::new(RectPlane::Yz, Interval::new(y0, y1), Interval::new(z0, z1), k, material)
    }

    pub fn plane(&self) -> RectPlane {
        self.plane
    }

    pub fn area(&self) -> f32 {
        self.a.size() * self.b.size()
    }

    /// Unit vector along the fixed axis.
    fn axis_normal(&self) -> Vec3 {
        let (_, _, k_axis) = self.plane.axes();
        let mut n = Vec3::ZERO;
        n[k_axis] = 1.0;
        n
    }
}

impl Hittable for AxisRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let (a_axis, b_axis, k_axis) = self.plane.axes();
        let origin = ray.origin();
        let direction = ray.direction();

        // A ray parallel to the plane gives +-inf or NaN here; neither
        // survives the containment checks below.
        let t = (self.k - origin[k_axis]) / direction[k_axis];
        if !ray_t.contains(t) {
            return None;
        }

        let a = origin[a_axis] + t * direction[a_axis];
        let b = origin[b_axis] + t * direction[b_axis];
        if !self.a.contains(a) || !self.b.contains(b) {
            return None;
        }

        let outward_normal = self.axis_normal();
        let mut rec = HitRecord::new(ray, t, outward_normal, self.material);
        rec.set_face_normal(ray, outward_normal);
        rec.u = (a - self.a.min) / self.a.size();
        rec.v = (b - self.b.min) / self.b.size();
        Some(rec)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        let (a_axis, b_axis, k_axis) = self.plane.axes();
        let mut min = Vec3::ZERO;
        let mut max = Vec3::ZERO;

        min[a_axis] = self.a.min;
        max[a_axis] = self.a.max;
        min[b_axis] = self.b.min;
        max[b_axis] = self.b.max;
        min[k_axis] = self.k - RECT_THICKNESS;
        max[k_axis] = self.k + RECT_THICKNESS;

        Some(Aabb::from_corners(min, max))
    }

    /// Area-light density: converts the uniform area measure to solid angle.
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        let ray = Ray::new_simple(origin, direction);
        let Some(rec) = self.hit(&ray, Interval::from_min(SHADOW_EPSILON)) else {
            return 0.0;
        };

        let distance_squared = rec.t * rec.t * direction.length_squared();
        let cosine = (direction.dot(rec.normal) / direction.length()).abs();

        distance_squared / (cosine * self.area())
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let (a_axis, b_axis, k_axis) = self.plane.axes();
        let mut point = Vec3::ZERO;

        point[a_axis] = self.a.min + rng.gen::<f32>() * self.a.size();
        point[b_axis] = self.b.min + rng.gen::<f32>() * self.b.size();
        point[k_axis] = self.k;

        point - origin
    }
}
