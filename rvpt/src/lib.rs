//! Construction of bounding volume hierarchies for a GPU ray tracer.
//!
//! Primitives (triangles and spheres) get indexed with a binned-SAH BVH that's
//! laid out flat, in the exact form the ray-tracing shaders traverse; see
//! [`Scene`] for the entry point and [`BvhBuilder`] for the algorithm itself.

mod bvh;
mod geometry;
mod primitive;
mod scene;
mod sphere;
mod triangle;
mod utils;

pub use rvpt_gpu as gpu;

pub use self::bvh::*;
pub use self::geometry::*;
pub use self::primitive::*;
pub use self::scene::*;
pub use self::sphere::*;
pub use self::triangle::*;
pub use self::utils::*;
