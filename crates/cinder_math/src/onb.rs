//! Orthonormal basis built around a single direction.

use crate::Vec3;

/// Local frame `(u, v, w)` with `w` along the input direction.
///
/// The frame is right-handed: `u × v = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onb {
    axis: [Vec3; 3],
}

impl Onb {
    /// Build a frame whose `w` axis is `n` normalized.
    ///
    /// The helper axis is switched to Y when `w` is close to X so the cross
    /// product never degenerates.
    pub fn build_from_w(n: Vec3) -> Self {
        let w = n.normalize();
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v = w.cross(a).normalize();
        let u = v.cross(w);
        Self { axis: [u, v, w] }
    }

    #[inline]
    pub fn u(&self) -> Vec3 {
        self.axis[0]
    }

    #[inline]
    pub fn v(&self) -> Vec3 {
        self.axis[1]
    }

    #[inline]
    pub fn w(&self) -> Vec3 {
        self.axis[2]
    }

    /// Map local coordinates to world space.
    #[inline]
    pub fn local(&self, a: f32, b: f32, c: f32) -> Vec3 {
        a * self.u() + b * self.v() + c * self.w()
    }

    #[inline]
    pub fn local_vec(&self, a: Vec3) -> Vec3 {
        self.local(a.x, a.y, a.z)
    }
}

impl std::ops::Index<usize> for Onb {
    type Output = Vec3;

    fn index(&self, i: usize) -> &Vec3 {
        &self.axis[i]
    }
}
