use super::{Bvh, BvhDebugView};
use crate::BoundingBox;

/// Bounding boxes of a BVH's nodes, bucketed by depth (root being at zero).
///
/// Used by the debug overlay; rebuilt whenever the BVH gets rebuilt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BvhDepthBounds {
    levels: Vec<Vec<BoundingBox>>,
}

impl BvhDepthBounds {
    pub fn new(bvh: &Bvh) -> Self {
        Self {
            levels: bvh.collect_bounds_by_depth(),
        }
    }

    /// Returns the number of levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Returns the total number of boxes, across all levels.
    pub fn len(&self) -> usize {
        self.levels.iter().map(|level| level.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns boxes at given depth; depths past the tree yield nothing.
    pub fn level(&self, depth: usize) -> &[BoundingBox] {
        self.levels.get(depth).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn levels(&self) -> &[Vec<BoundingBox>] {
        &self.levels
    }

    /// Returns boxes picked by given debug view.
    pub fn select<'a>(
        &'a self,
        view: &BvhDebugView,
    ) -> impl Iterator<Item = &'a BoundingBox> + 'a {
        view.depths(self.depth())
            .flat_map(move |depth| self.level(depth).iter())
    }
}
