use std::sync::Arc;
use glam::{Mat4, Vec3};
use crate::graphics_device::Mesh;
use crate::material::MaterialKey;
use crate::scene::AABB;

/// One draw request, valid for a single frame
#[derive(Clone)]
pub struct RenderCommand {
    pub mesh: Arc<dyn Mesh>,
    pub material: MaterialKey,
    /// World transform
    pub transform: Mat4,
    /// World-space bounds, when the mesh reports local bounds
    pub bounds: Option<AABB>,
}

impl RenderCommand {
    pub fn new(mesh: Arc<dyn Mesh>, material: MaterialKey, transform: Mat4) -> Self {
        let bounds = mesh.bounds().map(|local| local.transformed(&transform));
        Self { mesh, material, transform, bounds }
    }

    /// World-space origin of the draw (translation of its transform)
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }
}
