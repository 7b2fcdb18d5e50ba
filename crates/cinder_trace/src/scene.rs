//! Scene assembly and batch queries.
//!
//! A [`Scene`] is a BVH built under a [`TraceConfig`]. Once built it is
//! read-only, so any number of threads may query it at once.

use crate::{BvhNode, HitRecord, Hittable, SceneError};
use cinder_math::{Aabb, Interval, Ray};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Scene build and query configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Start of the shutter interval used to bound moving primitives
    pub shutter_open: f32,
    /// End of the shutter interval
    pub shutter_close: f32,
    /// Smallest accepted hit distance, avoids self-intersection acne
    pub t_min: f32,
    /// Seed for the BVH split-axis choices
    pub seed: u64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            shutter_open: 0.0,
            shutter_close: 1.0,
            t_min: 0.001,
            seed: 0,
        }
    }
}

impl TraceConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        let config: TraceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.shutter_close < self.shutter_open {
            return Err(SceneError::InvalidShutter {
                open: self.shutter_open,
                close: self.shutter_close,
            });
        }
        if self.t_min <= 0.0 {
            log::warn!(
                "t_min = {} accepts hits at the ray origin; secondary rays may self-intersect",
                self.t_min
            );
        }
        Ok(())
    }

    /// Query range `[t_min, inf)`.
    pub fn ray_interval(&self) -> Interval {
        Interval::from_min(self.t_min)
    }
}

/// Immutable, BVH-accelerated collection of primitives.
pub struct Scene {
    root: BvhNode,
    config: TraceConfig,
}

impl Scene {
    /// Build the BVH over `objects`. The split axes come from an RNG seeded
    /// with `config.seed`, so equal inputs always give equal trees.
    pub fn build(objects: Vec<Box<dyn Hittable>>, config: TraceConfig) -> Result<Self, SceneError> {
        config.validate()?;

        let start = std::time::Instant::now();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let root = BvhNode::new(
            objects,
            config.shutter_open,
            config.shutter_close,
            &mut rng,
        )?;

        log::info!(
            "Scene built in {:?}: {} primitives, BVH depth {}",
            start.elapsed(),
            root.len(),
            root.depth()
        );

        Ok(Self { root, config })
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn root(&self) -> &BvhNode {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn bounds(&self) -> Aabb {
        self.root.bbox()
    }

    /// Nearest hit in `[config.t_min, inf)`.
    pub fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        self.root.hit(ray, self.config.ray_interval())
    }

    /// Nearest hit for every ray, computed in parallel.
    pub fn closest_hits(&self, rays: &[Ray]) -> Vec<Option<HitRecord>> {
        closest_hits(&self.root, rays, self.config.ray_interval())
    }
}

/// Query each ray against `world` on the rayon pool. Results keep the order
/// of `rays`.
pub fn closest_hits(world: &dyn Hittable, rays: &[Ray], ray_t: Interval) -> Vec<Option<HitRecord>> {
    rays.par_iter().map(|ray| world.hit(ray, ray_t)).collect()
}
