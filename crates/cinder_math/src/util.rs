//! Small stateless numeric helpers shared by the geometry code.

pub use std::f32::consts::PI;

/// Comparison-based minimum. Unlike `f32::min`, a NaN in `a` is not
/// swallowed: `ffmin(NaN, b)` returns `b`, `ffmin(a, NaN)` returns NaN.
#[inline]
pub fn ffmin(a: f32, b: f32) -> f32 {
    if a < b {
        a
    } else {
        b
    }
}

/// Comparison-based maximum, mirror of [`ffmin`].
#[inline]
pub fn ffmax(a: f32, b: f32) -> f32 {
    if a > b {
        a
    } else {
        b
    }
}

#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}
