//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree built top-down by randomized-axis median splits. Each node
//! caches the box of its subtree so a ray that misses it skips the whole
//! subtree.

use crate::{HitRecord, Hittable, SceneError};
use cinder_math::{Aabb, Interval, Ray};
use rand::{Rng, RngCore};

/// A primitive paired with its box over the build interval.
type Entry = (Aabb, Box<dyn Hittable>);

/// BVH node - either a branch with two children or a single primitive.
pub enum BvhNode {
    Leaf {
        object: Box<dyn Hittable>,
        bbox: Aabb,
    },
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
}

impl BvhNode {
    /// Build a BVH over `objects` for the shutter interval `[time0, time1]`.
    ///
    /// Split axes are drawn from `rng`, so a seeded source gives the same
    /// tree every time. Fails when `objects` is empty or any object reports
    /// no bounding box.
    pub fn new(
        objects: Vec<Box<dyn Hittable>>,
        time0: f32,
        time1: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Self, SceneError> {
        if objects.is_empty() {
            return Err(SceneError::EmptyScene);
        }

        let entries = objects
            .into_iter()
            .enumerate()
            .map(|(index, object)| {
                object
                    .bounding_box(time0, time1)
                    .map(|bbox| (bbox, object))
                    .ok_or(SceneError::Unbounded { index })
            })
            .collect::<Result<Vec<Entry>, _>>()?;

        let root = Self::build(entries, rng);
        log::debug!(
            "BVH built: {} primitives, depth {}",
            root.len(),
            root.depth()
        );
        Ok(root)
    }

    /// Recursive construction. `entries` is never empty.
    fn build(mut entries: Vec<Entry>, rng: &mut dyn RngCore) -> Self {
        let axis = rng.gen_range(0..3);
        entries.sort_by(|(a, _), (b, _)| {
            a.axis_interval(axis)
                .min
                .total_cmp(&b.axis_interval(axis).min)
        });

        match entries.len() {
            1 => {
                let (bbox, object) = entries.swap_remove(0);
                BvhNode::Leaf { object, bbox }
            }
            2 => {
                let (right_box, right) = entries.swap_remove(1);
                let (left_box, left) = entries.swap_remove(0);
                Self::branch(
                    BvhNode::Leaf {
                        object: left,
                        bbox: left_box,
                    },
                    BvhNode::Leaf {
                        object: right,
                        bbox: right_box,
                    },
                )
            }
            n => {
                let right_entries = entries.split_off(n / 2);
                let left = Self::build(entries, rng);
                let right = Self::build(right_entries, rng);
                Self::branch(left, right)
            }
        }
    }

    fn branch(left: BvhNode, right: BvhNode) -> Self {
        let bbox = Aabb::surrounding(&left.bbox(), &right.bbox());
        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    pub fn bbox(&self) -> Aabb {
        match self {
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => *bbox,
        }
    }

    /// Number of primitives under this node.
    pub fn len(&self) -> usize {
        match self {
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => left.len() + right.len(),
        }
    }

    /// A built tree always holds at least one primitive.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Longest root-to-leaf path, counting the leaf.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            // The parent branch already tested this box.
            BvhNode::Leaf { object, .. } => object.hit(ray, ray_t),

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let left_hit = left.hit(ray, ray_t);

                // Only check right up to closest hit
                let right_t = left_hit.map_or(ray_t, |rec| ray_t.with_max(rec.t));
                right.hit(ray, right_t).or(left_hit)
            }
        }
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(self.bbox())
    }
}
