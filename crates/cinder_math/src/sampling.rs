//! Direction sampling for importance-sampled light transport.
//!
//! Every sampler takes the random source explicitly; nothing here keeps
//! global or thread-local state.

use crate::util::PI;
use crate::Vec3;
use rand::Rng;

/// Cosine-weighted direction on the hemisphere around local +Z
/// (Malley's method). The density is `z / π`.
pub fn random_cosine_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let r1: f32 = rng.gen();
    let r2: f32 = rng.gen();
    let z = (1.0 - r2).sqrt();

    let phi = 2.0 * PI * r1;
    let x = phi.cos() * r2.sqrt();
    let y = phi.sin() * r2.sqrt();

    Vec3::new(x, y, z)
}

/// Uniform direction on the whole unit sphere. The density is `1 / 4π`.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let r1: f32 = rng.gen();
    let r2: f32 = rng.gen();
    let z = 1.0 - 2.0 * r2;

    let phi = 2.0 * PI * r1;
    let sin_theta = (1.0 - z * z).max(0.0).sqrt();

    Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, z)
}

/// Uniform direction inside the cone (around local +Z) subtended by a
/// sphere of `radius` seen from `distance_squared` away.
pub fn random_to_sphere<R: Rng + ?Sized>(radius: f32, distance_squared: f32, rng: &mut R) -> Vec3 {
    let r1: f32 = rng.gen();
    let r2: f32 = rng.gen();
    let cos_theta_max = (1.0 - radius * radius / distance_squared).max(0.0).sqrt();
    let z = 1.0 + r2 * (cos_theta_max - 1.0);

    let phi = 2.0 * PI * r1;
    let sin_theta = (1.0 - z * z).max(0.0).sqrt();

    Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, z)
}
