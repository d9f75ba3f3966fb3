use std::ops::Range;

use glam::Vec3;

use super::{Bvh, BvhConfig, BvhNode, BvhNodeId};
use crate::{metric, Axis, BoundingBox, BvhPrimitive};

/// Builds BVHs using binned SAH.
///
/// Special thanks to:
/// - https://jacco.ompf2.com/2022/04/13/how-to-build-a-bvh-part-1-basics/,
/// - https://jacco.ompf2.com/2022/04/21/how-to-build-a-bvh-part-3-quick-builds/.
#[derive(Clone, Debug, Default)]
pub struct BvhBuilder {
    config: BvhConfig,
}

impl BvhBuilder {
    pub fn new(config: BvhConfig) -> Self {
        config.validate();

        Self { config }
    }

    pub fn config(&self) -> &BvhConfig {
        &self.config
    }

    pub fn build_from<P>(&self, primitives: &[P]) -> Bvh
    where
        P: BvhPrimitive,
    {
        let (centers, bounds): (Vec<_>, Vec<_>) = primitives
            .iter()
            .map(|primitive| (primitive.center(), primitive.bounding_box()))
            .unzip();

        self.build(&centers, &bounds)
    }

    /// Builds a BVH over primitives described by two parallel slices.
    ///
    /// # Panics
    ///
    /// Panics if the slices have different lengths or are empty.
    pub fn build(&self, centers: &[Vec3], bounds: &[BoundingBox]) -> Bvh {
        assert_eq!(
            centers.len(),
            bounds.len(),
            "got a different number of primitive centers and bounding boxes"
        );

        assert!(
            !centers.is_empty(),
            "cannot build a BVH without any primitives"
        );

        assert!(
            u32::try_from(centers.len()).is_ok(),
            "too many primitives: {}",
            centers.len()
        );

        log::info!("Building BVH; primitives = {}", centers.len());

        let bvh = metric("bvh::build", || {
            Builder::new(&self.config, centers, bounds).run()
        });

        let stats = bvh.stats();

        log::info!(
            "BVH built; nodes = {}, leaves = {}, depth = {}, max-leaf-size = {}",
            stats.nodes,
            stats.leaves,
            stats.depth,
            stats.max_leaf_size,
        );

        bvh
    }
}

struct Builder<'a> {
    config: &'a BvhConfig,
    centers: &'a [Vec3],
    bounds: &'a [BoundingBox],
    nodes: Vec<BvhNode>,
    indices: Vec<u32>,
    bins: Vec<Bin>,
}

impl<'a> Builder<'a> {
    fn new(
        config: &'a BvhConfig,
        centers: &'a [Vec3],
        bounds: &'a [BoundingBox],
    ) -> Self {
        let primitive_count = centers.len();

        // A binary tree with at most N leaves has at most 2N - 1 nodes
        let mut nodes = Vec::with_capacity(2 * primitive_count - 1);

        nodes.push(BvhNode::leaf(0, primitive_count as u32));

        Self {
            config,
            centers,
            bounds,
            nodes,
            indices: (0..primitive_count as u32).collect(),
            bins: vec![Bin::default(); config.bin_count],
        }
    }

    fn run(mut self) -> Bvh {
        let mut stack = vec![(BvhNodeId::root(), 0)];

        while let Some((node_id, depth)) = stack.pop() {
            if let Some([left_id, right_id]) = self.balance(node_id, depth) {
                // Right goes first so that the left subtree gets processed
                // (and numbered) before it
                stack.push((right_id, depth + 1));
                stack.push((left_id, depth + 1));
            }
        }

        self.nodes.shrink_to_fit();

        Bvh::new(self.nodes, self.indices)
    }

    /// Computes bounds of given leaf and splits it in two, if worthwhile.
    fn balance(
        &mut self,
        node_id: BvhNodeId,
        depth: usize,
    ) -> Option<[BvhNodeId; 2]> {
        let range = self.nodes[node_id.get() as usize].primitives();

        let bounds: BoundingBox = self.indices[range.clone()]
            .iter()
            .map(|&prim_id| self.bounds[prim_id as usize])
            .collect();

        self.nodes[node_id.get() as usize].set_bounds(bounds);

        let count = range.len();

        if count < self.config.min_primitives_per_leaf {
            return None;
        }

        if depth >= self.config.max_depth {
            if count > self.config.max_primitives_per_leaf {
                log::warn!(
                    "Reached maximum BVH depth; forcing a leaf with {} primitives",
                    count
                );
            }

            return None;
        }

        let plane = self.find_splitting_plane(range.clone(), bounds);
        let current_cost = bounds.half_area() * (count as f32);

        let pivot = plane
            .filter(|plane| plane.split_cost < current_cost)
            .and_then(|plane| self.partition(range.clone(), bounds, plane));

        let pivot = match pivot {
            Some(pivot) => pivot,

            // Splitting doesn't pay off and the node is small enough to stay
            // as a leaf
            None if count <= self.config.max_primitives_per_leaf => {
                return None;
            }

            // Splitting doesn't pay off, but the node is too large - this
            // happens e.g. when many primitives share the same center, so
            // let's fall back to splitting by the median
            None => {
                let split_by = plane.map_or(Axis::X, |plane| plane.split_by);

                self.median_split(range.clone(), split_by)
            }
        };

        debug_assert!(pivot > range.start && pivot < range.end);

        let left_id = BvhNodeId::new(self.nodes.len() as u32);
        let right_id = BvhNodeId::new(left_id.get() + 1);

        self.nodes.push(BvhNode::leaf(
            range.start as u32,
            (pivot - range.start) as u32,
        ));

        self.nodes
            .push(BvhNode::leaf(pivot as u32, (range.end - pivot) as u32));

        self.nodes[node_id.get() as usize].set_children(left_id);

        Some([left_id, right_id])
    }

    fn find_splitting_plane(
        &mut self,
        range: Range<usize>,
        bounds: BoundingBox,
    ) -> Option<SplittingPlane> {
        let bin_count = self.config.bin_count;
        let mut best: Option<SplittingPlane> = None;

        for split_by in Axis::all() {
            self.bins.fill(Bin::default());

            for &prim_id in &self.indices[range.clone()] {
                let prim_id = prim_id as usize;

                let bin_id = bin_index(
                    bin_count,
                    split_by,
                    self.centers[prim_id],
                    bounds,
                );

                self.bins[bin_id].count += 1;
                self.bins[bin_id].bounds += self.bounds[prim_id];
            }

            // ---

            let mut left_bounds = BoundingBox::default();
            let mut left_count = 0;

            for bin in self.bins.iter_mut() {
                left_bounds += bin.bounds;
                left_count += bin.count;
                bin.left_cost = left_bounds.half_area() * (left_count as f32);
            }

            // ---

            // Splitting at bin `i` means that bins `0..i` go to the left child
            // and bins `i..` go to the right one, so `0` is not a candidate
            let mut right_bounds = BoundingBox::default();
            let mut right_count = 0;

            for split_at in (1..bin_count).rev() {
                right_bounds += self.bins[split_at].bounds;
                right_count += self.bins[split_at].count;

                let split_cost = right_bounds.half_area()
                    * (right_count as f32)
                    + self.bins[split_at - 1].left_cost;

                let is_current_bin_better = best.map_or_else(
                    || split_cost.is_finite(),
                    |best| split_cost < best.split_cost,
                );

                if is_current_bin_better {
                    best = Some(SplittingPlane {
                        split_by,
                        split_at,
                        split_cost,
                    });
                }
            }
        }

        best
    }

    /// Moves primitives that fall before the plane to the front of `range`,
    /// returning the index of the first primitive that didn't.
    ///
    /// Returns `None` if one of the sides would end up empty.
    fn partition(
        &mut self,
        range: Range<usize>,
        bounds: BoundingBox,
        plane: SplittingPlane,
    ) -> Option<usize> {
        let mut pivot = range.start;

        for idx in range.clone() {
            let center = self.centers[self.indices[idx] as usize];

            let bin_id = bin_index(
                self.config.bin_count,
                plane.split_by,
                center,
                bounds,
            );

            if bin_id < plane.split_at {
                self.indices.swap(pivot, idx);
                pivot += 1;
            }
        }

        (pivot > range.start && pivot < range.end).then_some(pivot)
    }

    fn median_split(&mut self, range: Range<usize>, split_by: Axis) -> usize {
        let centers = self.centers;

        self.indices[range.clone()].sort_unstable_by(|&a, &b| {
            let a = centers[a as usize][split_by];
            let b = centers[b as usize][split_by];

            a.total_cmp(&b)
        });

        range.start + range.len() / 2
    }
}

/// Maps `center` into one of the `bin_count` bins spanning `bounds` along
/// `axis`.
///
/// Flat axes (and other non-finite corner cases) land in the first bin, while
/// centers lying exactly on `bounds.max()` land in the last one.
fn bin_index(
    bin_count: usize,
    axis: Axis,
    center: Vec3,
    bounds: BoundingBox,
) -> usize {
    let scale = (bin_count as f32) / bounds.diagonal()[axis];
    let bin_id = (center[axis] - bounds.min()[axis]) * scale;

    // Float-to-int casts saturate, turning negative values and NaNs into zero
    (bin_id as usize).min(bin_count - 1)
}

#[derive(Clone, Copy, Debug)]
struct SplittingPlane {
    split_by: Axis,
    split_at: usize,
    split_cost: f32,
}

#[derive(Clone, Copy, Debug, Default)]
struct Bin {
    bounds: BoundingBox,
    count: u32,
    left_cost: f32,
}
