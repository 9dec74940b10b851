/// Mesh trait and built-in primitives

use crate::scene::AABB;

/// Proxy meshes the renderer needs for its own passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Full-screen quad in NDC (-1..1)
    Quad,
    /// Unit sphere (radius 1), used for light and probe volumes
    Sphere,
    /// Unit cube (-1..1), used for cubemap capture
    Cube,
}

/// Opaque drawable geometry
pub trait Mesh: Send + Sync {
    /// Debug name
    fn name(&self) -> &str;

    /// Local-space bounds, used for frustum culling when present
    fn bounds(&self) -> Option<AABB> {
        None
    }

    /// False when the backend has no usable vertex data for this mesh
    fn is_valid(&self) -> bool {
        true
    }
}
