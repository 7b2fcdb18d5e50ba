//! Direction-sampling densities for importance sampling.
//!
//! A [`Pdf`] pairs a sampler with the density of the directions it
//! produces, so the integrator can weight each sample by `f / pdf`.

use crate::Hittable;
use cinder_math::sampling::random_cosine_direction;
use cinder_math::util::PI;
use cinder_math::{Onb, Vec3};
use rand::{Rng, RngCore};

pub trait Pdf {
    /// Solid-angle density of `direction`.
    fn value(&self, direction: Vec3) -> f32;

    /// Draw a direction distributed according to [`Pdf::value`].
    fn generate(&self, rng: &mut dyn RngCore) -> Vec3;
}

/// Cosine-weighted hemisphere around a surface normal.
#[derive(Debug, Clone, Copy)]
pub struct CosinePdf {
    uvw: Onb,
}

impl CosinePdf {
    pub fn new(normal: Vec3) -> Self {
        Self {
            uvw: Onb::build_from_w(normal),
        }
    }
}

impl Pdf for CosinePdf {
    fn value(&self, direction: Vec3) -> f32 {
        let cosine = direction.normalize().dot(self.uvw.w());
        if cosine <= 0.0 {
            0.0
        } else {
            cosine / PI
        }
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.uvw.local_vec(random_cosine_direction(rng))
    }
}

/// Samples directions from `origin` toward a target primitive, typically a
/// light. Primitives without sampling support report zero density.
pub struct HittablePdf<'a> {
    target: &'a dyn Hittable,
    origin: Vec3,
}

impl<'a> HittablePdf<'a> {
    pub fn new(target: &'a dyn Hittable, origin: Vec3) -> Self {
        Self { target, origin }
    }
}

impl Pdf for HittablePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        self.target.pdf_value(self.origin, direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.target.random(self.origin, rng)
    }
}

/// Equal-weight blend of two densities, e.g. light sampling combined with
/// the surface's own scattering distribution.
pub struct MixturePdf<'a> {
    first: &'a dyn Pdf,
    second: &'a dyn Pdf,
}

impl<'a> MixturePdf<'a> {
    pub fn new(first: &'a dyn Pdf, second: &'a dyn Pdf) -> Self {
        Self { first, second }
    }
}

impl Pdf for MixturePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        0.5 * self.first.value(direction) + 0.5 * self.second.value(direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        if rng.gen::<f32>() < 0.5 {
            self.first.generate(rng)
        } else {
            self.second.generate(rng)
        }
    }
}
