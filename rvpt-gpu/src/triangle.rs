use bytemuck::{Pod, Zeroable};
use glam::{vec3, Vec3, Vec4, Vec4Swizzles};

/// Triangle, as seen by the ray-tracing shader.
///
/// Each `vertexN.w` carries one component of the face normal, so that the
/// record fits in four vectors.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub vertex0: Vec4,
    pub vertex1: Vec4,
    pub vertex2: Vec4,
    pub material_id: u32,
    pub _padding: [u32; 3],
}

impl Triangle {
    pub fn new(vertices: [Vec3; 3], material_id: u32) -> Self {
        let [v0, v1, v2] = vertices;
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();

        Self {
            vertex0: v0.extend(normal.x),
            vertex1: v1.extend(normal.y),
            vertex2: v2.extend(normal.z),
            material_id,
            _padding: Default::default(),
        }
    }

    pub fn positions(&self) -> [Vec3; 3] {
        [self.vertex0.xyz(), self.vertex1.xyz(), self.vertex2.xyz()]
    }

    pub fn normal(&self) -> Vec3 {
        vec3(self.vertex0.w, self.vertex1.w, self.vertex2.w)
    }
}
