use glam::Vec3;

use crate::{
    gpu, metric, wireframe, BoundingBox, BvhBuilder, BvhConfig, BvhDebugView,
    Geometry, Sphere, Triangle,
};

const TRIANGLE_BOUNDS_COLOUR: Vec3 = Vec3::ONE;
const SPHERE_BOUNDS_COLOUR: Vec3 = Vec3::new(1.0, 1.0, 0.0);

/// Everything the ray tracer intersects rays against.
///
/// Triangles and spheres get separate BVHs, since the shaders traverse them
/// separately.
#[derive(Debug)]
pub struct Scene {
    builder: BvhBuilder,
    triangles: Geometry<Triangle>,
    spheres: Geometry<Sphere>,
    debug_view: BvhDebugView,
    dirty: bool,
}

impl Scene {
    pub fn new(config: BvhConfig) -> Self {
        Self {
            builder: BvhBuilder::new(config),
            triangles: Default::default(),
            spheres: Default::default(),
            debug_view: Default::default(),
            dirty: false,
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.add(triangle);
        self.dirty = true;
    }

    pub fn add_triangles(
        &mut self,
        triangles: impl IntoIterator<Item = Triangle>,
    ) {
        self.triangles.extend(triangles);
        self.dirty = true;
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.add(sphere);
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
        self.spheres.clear();
        self.dirty = true;
    }

    /// Returns whether the scene has changed since the last rebuild.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuilds BVHs and the shader-side data; no-op if nothing changed.
    pub fn rebuild(&mut self) {
        if !self.dirty {
            return;
        }

        log::info!(
            "Rebuilding scene (triangles={}, spheres={})",
            self.triangles.len(),
            self.spheres.len()
        );

        metric("scene::rebuild::triangles", || {
            self.triangles.rebuild(&self.builder);
        });

        metric("scene::rebuild::spheres", || {
            self.spheres.rebuild(&self.builder);
        });

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Scene rebuilt; bounds = {:?}", self.bounding_box());
        }

        self.dirty = false;
    }

    /// Returns the bounds of all triangles and spheres.
    pub fn bounding_box(&self) -> BoundingBox {
        self.triangles.bounding_box() + self.spheres.bounding_box()
    }

    pub fn triangles(&self) -> &Geometry<Triangle> {
        &self.triangles
    }

    pub fn spheres(&self) -> &Geometry<Sphere> {
        &self.spheres
    }

    pub fn debug_view(&self) -> &BvhDebugView {
        &self.debug_view
    }

    pub fn debug_view_mut(&mut self) -> &mut BvhDebugView {
        &mut self.debug_view
    }

    /// Returns the line list visualizing BVHs built by the last rebuild, as
    /// selected by the debug view.
    pub fn debug_vertices(&self) -> Vec<gpu::DebugVertex> {
        if !self.debug_view.enabled {
            return Vec::new();
        }

        let mut vertices = wireframe(
            self.triangles.depth_bounds().select(&self.debug_view),
            TRIANGLE_BOUNDS_COLOUR,
        );

        vertices.extend(wireframe(
            self.spheres.depth_bounds().select(&self.debug_view),
            SPHERE_BOUNDS_COLOUR,
        ));

        vertices
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Default::default())
    }
}
