//! Records shared between rvpt's renderer and its shaders.
//!
//! Everything here is `#[repr(C)]` and `Pod`, so the host can upload slices
//! of these types verbatim through `bytemuck::cast_slice()`.

mod bvh_node;
mod debug_vertex;
mod sphere;
mod triangle;

pub use self::bvh_node::*;
pub use self::debug_vertex::*;
pub use self::sphere::*;
pub use self::triangle::*;
