//! Cinder trace - ray/scene intersection core.
//!
//! Finds the nearest surface a ray strikes among a set of primitives and
//! provides the BVH that makes the query fast. Also carries the
//! importance-sampling densities used by the integrator to pick new ray
//! directions. Materials are referenced through an opaque [`MaterialId`];
//! shading, cameras and image output live outside this crate.

mod box_shape;
mod bvh;
mod error;
mod hittable;
mod pdf;
mod rect;
mod rotate;
mod scene;
mod sphere;

pub use box_shape::BoxShape;
pub use bvh::BvhNode;
pub use error::SceneError;
pub use hittable::{HitRecord, Hittable, HittableList, MaterialId};
pub use pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf};
pub use rect::{AxisRect, RectPlane};
pub use rotate::RotateY;
pub use scene::{closest_hits, Scene, TraceConfig};
pub use sphere::{MovingSphere, Sphere};

/// Re-export Vec3 and common math types from cinder_math
pub use cinder_math::{Aabb, Interval, Onb, Ray, Vec3};
