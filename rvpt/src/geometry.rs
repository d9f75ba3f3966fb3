use std::fmt;

use derivative::Derivative;

use crate::{
    gpu, BoundingBox, Bvh, BvhBuilder, BvhDepthBounds, BvhPrimitive,
    GpuPrimitive,
};

/// A list of primitives of one kind, together with their BVH and the data
/// the shaders read.
///
/// Primitives are kept in insertion order here; the shader-side copy is kept
/// in BVH order (i.e. permuted through `primitive_indices`), so that each
/// leaf's primitives can be looked up through a contiguous range.
#[derive(Derivative)]
#[derivative(Debug(bound = "P: fmt::Debug"), Default(bound = ""))]
pub struct Geometry<P>
where
    P: GpuPrimitive,
{
    primitives: Vec<P>,
    bvh: Option<Bvh>,
    depth_bounds: BvhDepthBounds,

    #[derivative(Debug = "ignore")]
    gpu_nodes: Vec<gpu::BvhNode>,

    #[derivative(Debug = "ignore")]
    gpu_primitives: Vec<P::Gpu>,
}

impl<P> Geometry<P>
where
    P: GpuPrimitive,
{
    /// Adds a primitive; takes effect after the next [`Self::rebuild()`].
    pub fn add(&mut self, primitive: P) {
        self.primitives.push(primitive);
    }

    pub fn extend(&mut self, primitives: impl IntoIterator<Item = P>) {
        self.primitives.extend(primitives);
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn primitives(&self) -> &[P] {
        &self.primitives
    }

    /// Rebuilds the BVH and the shader-side data from the current primitives.
    pub fn rebuild(&mut self, builder: &BvhBuilder) {
        if self.primitives.is_empty() {
            log::debug!("No primitives; clearing geometry");

            self.bvh = None;
            self.depth_bounds = Default::default();
            self.gpu_nodes.clear();
            self.gpu_primitives.clear();

            return;
        }

        let bvh = builder.build_from(&self.primitives);

        if cfg!(debug_assertions) {
            let bounds: Vec<_> = self
                .primitives
                .iter()
                .map(BvhPrimitive::bounding_box)
                .collect();

            bvh.validate(&bounds);
        }

        let serialized: Vec<_> =
            self.primitives.iter().map(GpuPrimitive::serialize).collect();

        self.gpu_nodes = bvh.serialize();
        self.gpu_primitives = bvh.permute_primitives(&serialized);
        self.depth_bounds = BvhDepthBounds::new(&bvh);
        self.bvh = Some(bvh);
    }

    /// Returns the BVH built by the last [`Self::rebuild()`], if any.
    pub fn bvh(&self) -> Option<&Bvh> {
        self.bvh.as_ref()
    }

    pub fn depth_bounds(&self) -> &BvhDepthBounds {
        &self.depth_bounds
    }

    pub fn gpu_nodes(&self) -> &[gpu::BvhNode] {
        &self.gpu_nodes
    }

    /// Returns primitives in BVH order, as seen by the shaders.
    pub fn gpu_primitives(&self) -> &[P::Gpu] {
        &self.gpu_primitives
    }

    pub fn nodes_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.gpu_nodes)
    }

    pub fn primitives_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.gpu_primitives)
    }

    /// Returns the bounds of all primitives.
    pub fn bounding_box(&self) -> BoundingBox {
        self.primitives
            .iter()
            .map(BvhPrimitive::bounding_box)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;
    use crate::{BvhConfig, Sphere, Triangle};

    fn triangle(x: f32, material_id: u32) -> Triangle {
        Triangle::new(
            [vec3(x, 0.0, 0.0), vec3(x + 1.0, 0.0, 0.0), vec3(x, 1.0, 0.0)],
            material_id,
        )
    }

    #[test]
    fn rebuild() {
        let mut target = Geometry::default();

        target.extend((0..50).map(|i| triangle(i as f32 * 3.0, i)));
        target.rebuild(&BvhBuilder::default());

        let bvh = target.bvh().unwrap();

        assert_eq!(bvh.nodes().len(), target.gpu_nodes().len());
        assert_eq!(50, target.gpu_primitives().len());
        assert_eq!(bvh.depth(), target.depth_bounds().depth());
        assert_eq!(bvh.nodes().len() * 32, target.nodes_bytes().len());
        assert_eq!(50 * 64, target.primitives_bytes().len());

        for (node, gpu_node) in bvh.nodes().iter().zip(target.gpu_nodes()) {
            assert_eq!(node.serialize(), *gpu_node);
        }

        // Each leaf must be able to reach its primitives through a
        // contiguous range of the shader-side buffer
        for leaf in bvh.leaves() {
            for id in leaf.primitives() {
                let expected_id = bvh.primitive_indices()[id] as usize;
                let expected = &target.primitives()[expected_id];

                assert_eq!(expected.serialize(), target.gpu_primitives()[id]);

                assert!(leaf.bounds().contains(&expected.bounding_box()));
            }
        }
    }

    #[test]
    fn rebuild_after_clear() {
        let mut target = Geometry::default();

        target.add(Sphere::new(vec3(1.0, 2.0, 3.0), 1.0, 0));
        target.rebuild(&BvhBuilder::default());

        assert!(target.bvh().is_some());
        assert_eq!(1, target.gpu_nodes().len());

        target.clear();
        target.rebuild(&BvhBuilder::default());

        assert!(target.is_empty());
        assert!(target.bvh().is_none());
        assert!(target.gpu_nodes().is_empty());
        assert!(target.gpu_primitives().is_empty());
        assert!(target.depth_bounds().is_empty());
    }

    #[test]
    fn rebuild_with_custom_config() {
        let builder = BvhBuilder::new(
            BvhConfig::default()
                .with_min_primitives_per_leaf(1)
                .with_max_primitives_per_leaf(1),
        );

        let mut target = Geometry::default();

        target.extend((0..8).map(|i| triangle(i as f32 * 3.0, i)));
        target.rebuild(&builder);

        let bvh = target.bvh().unwrap();

        assert_eq!(15, bvh.nodes().len());
        assert!(bvh.leaves().all(|leaf| leaf.primitive_count() == 1));
    }

    #[test]
    fn bounding_box() {
        let mut target = Geometry::default();

        assert!(!target.bounding_box().is_set());

        target.add(triangle(0.0, 0));
        target.add(triangle(10.0, 0));

        assert_eq!(
            BoundingBox::new(vec3(0.0, 0.0, 0.0), vec3(11.0, 1.0, 0.0)),
            target.bounding_box()
        );
    }
}
