use glam::{vec3, Vec3};

use crate::{gpu, BoundingBox};

/// Number of line-list vertices emitted per box.
pub const WIREFRAME_VERTICES_PER_BOX: usize = 24;

/// Converts boxes into a line list of their edges.
pub fn wireframe<'a>(
    boxes: impl IntoIterator<Item = &'a BoundingBox>,
    colour: Vec3,
) -> Vec<gpu::DebugVertex> {
    let boxes = boxes.into_iter();
    let mut vertices =
        Vec::with_capacity(boxes.size_hint().0 * WIREFRAME_VERTICES_PER_BOX);

    for bb in boxes {
        let (min, max) = (bb.min(), bb.max());

        let edges = [
            // Vertical edges
            (vec3(min.x, min.y, min.z), vec3(min.x, max.y, min.z)),
            (vec3(min.x, min.y, max.z), vec3(min.x, max.y, max.z)),
            (vec3(max.x, min.y, min.z), vec3(max.x, max.y, min.z)),
            (vec3(max.x, min.y, max.z), vec3(max.x, max.y, max.z)),
            // Top
            (vec3(min.x, max.y, min.z), vec3(min.x, max.y, max.z)),
            (vec3(max.x, max.y, min.z), vec3(max.x, max.y, max.z)),
            (vec3(min.x, max.y, max.z), vec3(max.x, max.y, max.z)),
            (vec3(min.x, max.y, min.z), vec3(max.x, max.y, min.z)),
            // Bottom
            (vec3(min.x, min.y, min.z), vec3(min.x, min.y, max.z)),
            (vec3(max.x, min.y, min.z), vec3(max.x, min.y, max.z)),
            (vec3(min.x, min.y, max.z), vec3(max.x, min.y, max.z)),
            (vec3(min.x, min.y, min.z), vec3(max.x, min.y, min.z)),
        ];

        for (a, b) in edges {
            vertices.push(gpu::DebugVertex::new(a, colour));
            vertices.push(gpu::DebugVertex::new(b, colour));
        }
    }

    vertices
}
