//! Errors raised while assembling a scene.

use thiserror::Error;

/// Construction-time misconfiguration. Query-time misses are never errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Cannot build a BVH from an empty primitive list")]
    EmptyScene,

    #[error("Primitive {index} has no bounding box and cannot be placed in a BVH")]
    Unbounded { index: usize },

    #[error("Invalid shutter interval: opens at {open} but closes at {close}")]
    InvalidShutter { open: f32, close: f32 },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
