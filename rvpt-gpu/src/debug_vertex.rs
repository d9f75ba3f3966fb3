use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Vertex of the debug overlay's line list.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DebugVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub colour: Vec3,
}

impl DebugVertex {
    pub fn new(position: Vec3, colour: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::ZERO,
            colour,
        }
    }
}
