use std::ops::Range;

use crate::{gpu, BoundingBox};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BvhNode {
    first_child_or_primitive: u32,
    primitive_count: u32,
    bounds: BoundingBox,
}

impl BvhNode {
    pub(crate) fn leaf(first_primitive: u32, primitive_count: u32) -> Self {
        Self {
            first_child_or_primitive: first_primitive,
            primitive_count,
            bounds: Default::default(),
        }
    }

    pub fn first_child_or_primitive(&self) -> u32 {
        self.first_child_or_primitive
    }

    pub fn primitive_count(&self) -> u32 {
        self.primitive_count
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn is_leaf(&self) -> bool {
        self.primitive_count != 0
    }

    /// Returns ids of this node's children, or `None` for leaves.
    pub fn children(&self) -> Option<[BvhNodeId; 2]> {
        if self.is_leaf() {
            None
        } else {
            let left_id = BvhNodeId::new(self.first_child_or_primitive);

            Some([left_id, left_id.sibling()])
        }
    }

    /// Returns the range of this leaf's primitives within the BVH's
    /// permutation array; empty for internal nodes.
    pub fn primitives(&self) -> Range<usize> {
        if self.is_leaf() {
            let start = self.first_child_or_primitive as usize;

            start..(start + self.primitive_count as usize)
        } else {
            0..0
        }
    }

    pub fn sah_cost(&self) -> f32 {
        (self.primitive_count as f32) * self.bounds.half_area()
    }

    pub fn serialize(&self) -> gpu::BvhNode {
        gpu::BvhNode::new(
            self.bounds.min(),
            self.bounds.max(),
            self.first_child_or_primitive,
            self.primitive_count,
        )
    }

    pub(crate) fn set_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
    }

    pub(crate) fn set_children(&mut self, left_id: BvhNodeId) {
        self.first_child_or_primitive = left_id.get();
        self.primitive_count = 0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BvhNodeId(u32);

impl BvhNodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn root() -> Self {
        Self::new(0)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    fn sibling(&self) -> Self {
        Self::new(self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};

    use super::*;

    #[test]
    fn leaf() {
        let mut target = BvhNode::leaf(4, 3);

        target.set_bounds(BoundingBox::new(
            Vec3::ZERO,
            vec3(1.0, 2.0, 3.0),
        ));

        assert!(target.is_leaf());
        assert_eq!(None, target.children());
        assert_eq!(4..7, target.primitives());
        assert_eq!(3.0 * 11.0, target.sah_cost());

        let gpu = target.serialize();

        assert_eq!([0.0, 1.0, 0.0, 2.0, 0.0, 3.0], gpu.bounds);
        assert_eq!(4, gpu.first_child_or_primitive);
        assert_eq!(3, gpu.primitive_count);
    }

    #[test]
    fn internal() {
        let mut target = BvhNode::leaf(0, 10);

        target.set_children(BvhNodeId::new(5));

        assert!(!target.is_leaf());
        assert_eq!(
            Some([BvhNodeId::new(5), BvhNodeId::new(6)]),
            target.children()
        );
        assert_eq!(0..0, target.primitives());
        assert_eq!(0.0, target.sah_cost());
    }
}
