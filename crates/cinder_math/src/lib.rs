// Re-export glam for convenience
pub use glam::*;

// Cinder math types
mod aabb;
mod interval;
mod onb;
mod ray;
pub mod sampling;
pub mod util;

pub use aabb::Aabb;
pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;
