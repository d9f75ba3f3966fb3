mod builder;
mod config;
mod debug_view;
mod depth_bounds;
mod node;
mod wireframe;

pub use self::builder::*;
pub use self::config::*;
pub use self::debug_view::*;
pub use self::depth_bounds::*;
pub use self::node::*;
pub use self::wireframe::*;
use crate::{gpu, BoundingBox, BvhPrimitive};

/// Bounding volume hierarchy laid out as a flat array.
///
/// The root lives at index zero and an internal node's children are always
/// adjacent (`left`, `left + 1`), which is exactly the layout the ray-tracing
/// shader expects. Leaves point into `primitive_indices`, a permutation of the
/// input primitives that makes every leaf's primitives contiguous.
#[derive(Clone, Debug, PartialEq)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    primitive_indices: Vec<u32>,
}

impl Bvh {
    /// Builds a BVH over `primitives` using the default configuration.
    pub fn build<P>(primitives: &[P]) -> Self
    where
        P: BvhPrimitive,
    {
        BvhBuilder::default().build_from(primitives)
    }

    pub(crate) fn new(
        nodes: Vec<BvhNode>,
        primitive_indices: Vec<u32>,
    ) -> Self {
        Self {
            nodes,
            primitive_indices,
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`, since a BVH has at least the root node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    pub fn primitive_indices(&self) -> &[u32] {
        &self.primitive_indices
    }

    pub fn root(&self) -> &BvhNode {
        self.node(BvhNodeId::root())
    }

    pub fn node(&self, id: BvhNodeId) -> &BvhNode {
        &self.nodes[id.get() as usize]
    }

    pub fn leaves(&self) -> impl Iterator<Item = &BvhNode> + '_ {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    /// Visits nodes depth-first (left child before right child), yielding
    /// each node together with its depth.
    pub fn walk(
        &self,
    ) -> impl Iterator<Item = (usize, BvhNodeId, &BvhNode)> + '_ {
        let mut stack = vec![(0, BvhNodeId::root())];

        std::iter::from_fn(move || {
            let (depth, id) = stack.pop()?;
            let node = self.node(id);

            if let Some([left_id, right_id]) = node.children() {
                stack.push((depth + 1, right_id));
                stack.push((depth + 1, left_id));
            }

            Some((depth, id, node))
        })
    }

    /// Returns the number of levels in this tree.
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _, _)| depth + 1).max().unwrap_or(0)
    }

    /// Returns bounding boxes of all nodes, bucketed by depth.
    pub fn collect_bounds_by_depth(&self) -> Vec<Vec<BoundingBox>> {
        let mut levels: Vec<Vec<BoundingBox>> = Vec::new();

        for (depth, _, node) in self.walk() {
            if depth >= levels.len() {
                levels.resize_with(depth + 1, Default::default);
            }

            levels[depth].push(node.bounds());
        }

        levels
    }

    /// Reorders `primitives` so that each leaf's primitives are contiguous,
    /// i.e. `result[i] = primitives[primitive_indices[i]]`.
    ///
    /// This is a one-way reorder: applying it to its own output doesn't yield
    /// the original order back.
    pub fn permute_primitives<T>(&self, primitives: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        assert_eq!(
            self.primitive_indices.len(),
            primitives.len(),
            "this BVH was built for a different number of primitives"
        );

        self.primitive_indices
            .iter()
            .map(|&id| primitives[id as usize].clone())
            .collect()
    }

    pub fn serialize(&self) -> Vec<gpu::BvhNode> {
        self.nodes.iter().map(BvhNode::serialize).collect()
    }

    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats {
            nodes: self.nodes.len(),
            ..Default::default()
        };

        for (depth, _, node) in self.walk() {
            stats.depth = stats.depth.max(depth + 1);

            if node.is_leaf() {
                stats.leaves += 1;
                stats.max_leaf_size =
                    stats.max_leaf_size.max(node.primitive_count() as usize);
                stats.sah_cost += node.sah_cost();
            }
        }

        stats
    }

    /// Checks this tree's structural invariants against the bounding boxes
    /// of the primitives it was built from, panicking on the first violation.
    pub fn validate(&self, bounds: &[BoundingBox]) {
        let primitive_count = self.primitive_indices.len();

        assert_eq!(
            primitive_count,
            bounds.len(),
            "this BVH was built for a different number of primitives"
        );

        let mut seen = vec![false; primitive_count];

        for &id in &self.primitive_indices {
            let id = id as usize;

            assert!(id < primitive_count, "primitive {id} is out of range");
            assert!(!seen[id], "primitive {id} is referenced more than once");

            seen[id] = true;
        }

        for (id, node) in self.nodes.iter().enumerate() {
            if let Some([left_id, right_id]) = node.children() {
                assert!(
                    (left_id.get() as usize) > id,
                    "node {id} points back at node {}",
                    left_id.get()
                );

                assert!(
                    (right_id.get() as usize) < self.nodes.len(),
                    "node {id} points past the end of the tree"
                );
            }
        }

        let mut visited = 0;
        let mut covered = 0;

        for (_, id, node) in self.walk() {
            visited += 1;

            if let Some(children) = node.children() {
                for child_id in children {
                    assert!(
                        node.bounds().contains(&self.node(child_id).bounds()),
                        "node {} doesn't contain its child {}",
                        id.get(),
                        child_id.get()
                    );
                }
            } else {
                let range = node.primitives();

                assert_eq!(
                    covered,
                    range.start,
                    "leaf {} leaves a gap or overlaps another leaf",
                    id.get()
                );

                for &prim_id in &self.primitive_indices[range.clone()] {
                    assert!(
                        node.bounds().contains(&bounds[prim_id as usize]),
                        "leaf {} doesn't contain primitive {prim_id}",
                        id.get()
                    );
                }

                covered = range.end;
            }
        }

        assert_eq!(self.nodes.len(), visited, "some nodes are unreachable");
        assert_eq!(primitive_count, covered, "some primitives are unreachable");
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BvhStats {
    pub nodes: usize,
    pub leaves: usize,
    pub depth: usize,
    pub max_leaf_size: usize,
    pub sah_cost: f32,
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};

    use super::*;

    fn bb(min: Vec3, max: Vec3) -> BoundingBox {
        BoundingBox::new(min, max)
    }

    /// Builds by hand:
    ///
    /// ```text
    ///        0
    ///      /   \
    ///     1     2
    ///          / \
    ///         3   4
    /// ```
    fn target() -> (Bvh, Vec<BoundingBox>) {
        let prims = vec![
            bb(vec3(4.0, 0.0, 0.0), vec3(5.0, 1.0, 1.0)),
            bb(vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 1.0)),
            bb(vec3(2.0, 0.0, 0.0), vec3(3.0, 1.0, 1.0)),
        ];

        let mut nodes = vec![
            BvhNode::leaf(0, 3),
            BvhNode::leaf(0, 1),
            BvhNode::leaf(1, 2),
            BvhNode::leaf(1, 1),
            BvhNode::leaf(2, 1),
        ];

        nodes[0].set_bounds(bb(Vec3::ZERO, vec3(5.0, 1.0, 1.0)));
        nodes[0].set_children(BvhNodeId::new(1));
        nodes[1].set_bounds(prims[1]);
        nodes[2].set_bounds(bb(vec3(2.0, 0.0, 0.0), vec3(5.0, 1.0, 1.0)));
        nodes[2].set_children(BvhNodeId::new(3));
        nodes[3].set_bounds(prims[2]);
        nodes[4].set_bounds(prims[0]);

        (Bvh::new(nodes, vec![1, 2, 0]), prims)
    }

    #[test]
    fn validate() {
        let (target, prims) = target();

        target.validate(&prims);
    }

    #[test]
    #[should_panic(expected = "referenced more than once")]
    fn validate_duplicated_primitive() {
        let (mut target, prims) = target();

        target.primitive_indices = vec![1, 1, 0];
        target.validate(&prims);
    }

    #[test]
    #[should_panic(expected = "doesn't contain primitive")]
    fn validate_escaped_primitive() {
        let (target, mut prims) = target();

        prims[0] = bb(Vec3::ZERO, Vec3::splat(10.0));
        target.validate(&prims);
    }

    #[test]
    fn walk() {
        let (target, _) = target();

        let actual: Vec<_> = target
            .walk()
            .map(|(depth, id, _)| (depth, id.get()))
            .collect();

        assert_eq!(vec![(0, 0), (1, 1), (1, 2), (2, 3), (2, 4)], actual);
        assert_eq!(3, target.depth());
        assert_eq!(3, target.leaves().count());
    }

    #[test]
    fn collect_bounds_by_depth() {
        let (target, prims) = target();
        let actual = target.collect_bounds_by_depth();

        assert_eq!(3, actual.len());
        assert_eq!(vec![target.root().bounds()], actual[0]);
        assert_eq!(vec![prims[1], target.nodes()[2].bounds()], actual[1]);
        assert_eq!(vec![prims[2], prims[0]], actual[2]);

        assert_eq!(
            target.nodes().len(),
            actual.iter().map(|level| level.len()).sum::<usize>()
        );
    }

    #[test]
    fn permute_primitives() {
        let (target, _) = target();

        let once = target.permute_primitives(&["a", "b", "c"]);
        let twice = target.permute_primitives(&once);

        assert_eq!(vec!["b", "c", "a"], once);
        assert_eq!(vec!["c", "a", "b"], twice);
    }

    #[test]
    #[should_panic(expected = "different number of primitives")]
    fn permute_primitives_with_wrong_length() {
        let (target, _) = target();

        target.permute_primitives(&[1, 2]);
    }

    #[test]
    fn serialize() {
        let (target, _) = target();
        let actual = target.serialize();

        assert_eq!(5, actual.len());
        assert!(!actual[0].is_leaf());
        assert_eq!(1, actual[0].first_child_or_primitive);
        assert_eq!(3, actual[2].first_child_or_primitive);
        assert_eq!(1, actual[3].first_child_or_primitive);
        assert_eq!(1, actual[3].primitive_count);
        assert_eq!(vec3(5.0, 1.0, 1.0), actual[0].max());
    }

    #[test]
    fn stats() {
        let (target, _) = target();
        let actual = target.stats();

        assert_eq!(5, actual.nodes);
        assert_eq!(3, actual.leaves);
        assert_eq!(3, actual.depth);
        assert_eq!(1, actual.max_leaf_size);
        assert_eq!(9.0, actual.sah_cost);
    }
}
