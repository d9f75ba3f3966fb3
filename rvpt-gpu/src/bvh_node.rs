use bytemuck::{Pod, Zeroable};
use glam::{vec3, Vec3};

/// BVH node, as seen by the ray-tracing shader.
///
/// Layout: `min.x, max.x, min.y, max.y, min.z, max.z` followed by
/// `first_child_or_primitive` and `primitive_count`, 32 bytes in total.
///
/// When `primitive_count` is zero, the node is internal and its children live
/// at `first_child_or_primitive` and `first_child_or_primitive + 1`;
/// otherwise the node is a leaf covering `primitive_count` primitives starting
/// at `first_child_or_primitive`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BvhNode {
    pub bounds: [f32; 6],
    pub first_child_or_primitive: u32,
    pub primitive_count: u32,
}

impl BvhNode {
    pub fn new(
        min: Vec3,
        max: Vec3,
        first_child_or_primitive: u32,
        primitive_count: u32,
    ) -> Self {
        Self {
            bounds: [min.x, max.x, min.y, max.y, min.z, max.z],
            first_child_or_primitive,
            primitive_count,
        }
    }

    pub fn min(&self) -> Vec3 {
        vec3(self.bounds[0], self.bounds[2], self.bounds[4])
    }

    pub fn max(&self) -> Vec3 {
        vec3(self.bounds[1], self.bounds[3], self.bounds[5])
    }

    pub fn is_leaf(&self) -> bool {
        self.primitive_count != 0
    }
}
