use glam::Vec3;

use crate::{gpu, BoundingBox, BvhPrimitive, GpuPrimitive};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangle {
    vertices: [Vec3; 3],
    material_id: u32,
}

impl Triangle {
    pub fn new(vertices: [impl Into<Vec3>; 3], material_id: u32) -> Self {
        Self {
            vertices: vertices.map(Into::into),
            material_id,
        }
    }

    pub fn with_vertices(mut self, vertices: [impl Into<Vec3>; 3]) -> Self {
        self.vertices = vertices.map(Into::into);
        self
    }

    pub fn with_material_id(mut self, material_id: u32) -> Self {
        self.material_id = material_id;
        self
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        self.vertices
    }

    pub fn material_id(&self) -> u32 {
        self.material_id
    }
}

impl BvhPrimitive for Triangle {
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices)
    }

    fn center(&self) -> Vec3 {
        self.vertices.into_iter().sum::<Vec3>() / 3.0
    }
}

impl GpuPrimitive for Triangle {
    type Gpu = gpu::Triangle;

    fn serialize(&self) -> Self::Gpu {
        gpu::Triangle::new(self.vertices, self.material_id)
    }
}
