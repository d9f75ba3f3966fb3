use bytemuck::Pod;
use glam::Vec3;

use crate::BoundingBox;

/// Anything that can be indexed by a BVH.
pub trait BvhPrimitive {
    fn bounding_box(&self) -> BoundingBox;
    fn center(&self) -> Vec3;
}

impl<T> BvhPrimitive for &T
where
    T: BvhPrimitive,
{
    fn bounding_box(&self) -> BoundingBox {
        T::bounding_box(self)
    }

    fn center(&self) -> Vec3 {
        T::center(self)
    }
}

/// Primitive that has a shader-side counterpart.
pub trait GpuPrimitive: BvhPrimitive {
    type Gpu: Pod;

    fn serialize(&self) -> Self::Gpu;
}
