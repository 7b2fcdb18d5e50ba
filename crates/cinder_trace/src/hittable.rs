//! Hittable trait and HitRecord for ray-object intersection.

use cinder_math::{Aabb, Interval, Ray, Vec3};
use rand::{Rng, RngCore};

/// Opaque reference to a material owned by the shading layer.
///
/// The intersection core only stores and returns it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Record of a ray-object intersection.
///
/// Spheres report their geometric outward normal; planar shapes report the
/// normal facing against the incoming ray. `front_face` tells the two
/// situations apart for either kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    pub normal: Vec3,
    pub material: MaterialId,
    /// Surface coordinates in [0, 1]
    pub u: f32,
    pub v: f32,
    /// Whether the ray arrived from the outward side of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Record with the normal stored as given.
    pub fn new(ray: &Ray, t: f32, normal: Vec3, material: MaterialId) -> Self {
        Self {
            t,
            p: ray.at(t),
            normal,
            material,
            u: 0.0,
            v: 0.0,
            front_face: ray.direction().dot(normal) < 0.0,
        }
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The stored normal always points against the ray.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `ray` whose parameter lies in `ray_t`.
    ///
    /// Callers pass their current best distance as `ray_t.max` so farther
    /// surfaces are rejected by the primitive itself.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;

    /// Box enclosing the object over the shutter interval `[time0, time1]`.
    ///
    /// `None` means the object has no finite bound (for example an empty
    /// list).
    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb>;

    /// Solid-angle density of [`Hittable::random`] directions from `origin`.
    fn pdf_value(&self, _origin: Vec3, _direction: Vec3) -> f32 {
        0.0
    }

    /// Direction from `origin` toward a sampled point on the object.
    fn random(&self, _origin: Vec3, _rng: &mut dyn RngCore) -> Vec3 {
        Vec3::X
    }
}

/// A list of hittable objects, searched linearly.
///
/// This is the reference container; [`crate::BvhNode`] answers the same
/// queries faster.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Hand the children over, e.g. to build a BVH from them.
    pub fn into_objects(self) -> Vec<Box<dyn Hittable>> {
        self.objects
    }
}

impl From<Vec<Box<dyn Hittable>>> for HittableList {
    fn from(objects: Vec<Box<dyn Hittable>>) -> Self {
        Self { objects }
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest = None;
        let mut search = ray_t;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, search) {
                search = search.with_max(rec.t);
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        if self.objects.is_empty() {
            return None;
        }

        self.objects.iter().try_fold(Aabb::EMPTY, |acc, object| {
            let bbox = object.bounding_box(time0, time1)?;
            Some(Aabb::surrounding(&acc, &bbox))
        })
    }

    /// Average of the children's densities, matching [`Hittable::random`]
    /// which picks a child uniformly.
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        if self.objects.is_empty() {
            return 0.0;
        }

        let weight = 1.0 / self.objects.len() as f32;
        self.objects
            .iter()
            .map(|object| weight * object.pdf_value(origin, direction))
            .sum()
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        if self.objects.is_empty() {
            return Vec3::X;
        }

        let index = rng.gen_range(0..self.objects.len());
        self.objects[index].random(origin, rng)
    }
}
