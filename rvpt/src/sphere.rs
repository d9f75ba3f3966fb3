use glam::Vec3;

use crate::{gpu, BoundingBox, BvhPrimitive, GpuPrimitive};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material_id: u32,
}

impl Sphere {
    pub fn new(center: impl Into<Vec3>, radius: f32, material_id: u32) -> Self {
        Self {
            center: center.into(),
            radius,
            material_id,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material_id(&self) -> u32 {
        self.material_id
    }
}

impl BvhPrimitive for Sphere {
    fn bounding_box(&self) -> BoundingBox {
        let r = Vec3::splat(self.radius.abs());

        BoundingBox::new(self.center - r, self.center + r)
    }

    fn center(&self) -> Vec3 {
        self.center
    }
}

impl GpuPrimitive for Sphere {
    type Gpu = gpu::Sphere;

    fn serialize(&self) -> Self::Gpu {
        gpu::Sphere::new(self.center, self.radius, self.material_id)
    }
}
