/// Minimal hierarchical scene and the `RenderSource` expansion contract
///
/// The renderer does not own a scene. Anything that can enumerate
/// (mesh, material, world transform) triples can be pushed with
/// `Renderer::push_render_node` or captured by the probe baker.

use std::sync::Arc;
use glam::Mat4;
use crate::graphics_device::Mesh;
use crate::material::MaterialKey;

/// One drawable produced by a `RenderSource`
#[derive(Clone)]
pub struct DrawItem {
    pub mesh: Arc<dyn Mesh>,
    pub material: MaterialKey,
    /// World transform
    pub transform: Mat4,
}

/// Caller-owned scene representation the renderer can expand into draws
pub trait RenderSource {
    /// Append every drawable of this source to `out`, in traversal order
    fn collect_draws(&self, out: &mut Vec<DrawItem>);
}

/// A node of a simple transform hierarchy
///
/// A node only produces a draw when it has both a mesh and a material.
/// World transforms are `parent_world * local`.
#[derive(Clone)]
pub struct SceneNode {
    pub name: String,
    /// Local transform relative to the parent
    pub transform: Mat4,
    pub mesh: Option<Arc<dyn Mesh>>,
    pub material: Option<MaterialKey>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// Empty grouping node with an identity transform
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Mat4::IDENTITY,
            mesh: None,
            material: None,
            children: Vec::new(),
        }
    }

    /// Drawable node
    pub fn with_mesh(name: &str, mesh: Arc<dyn Mesh>, material: MaterialKey) -> Self {
        Self {
            mesh: Some(mesh),
            material: Some(material),
            ..Self::new(name)
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [SceneNode] {
        &mut self.children
    }

    fn collect_with_parent(&self, parent: &Mat4, out: &mut Vec<DrawItem>) {
        let world = *parent * self.transform;

        if let (Some(mesh), Some(material)) = (&self.mesh, self.material) {
            out.push(DrawItem {
                mesh: mesh.clone(),
                material,
                transform: world,
            });
        }

        for child in &self.children {
            child.collect_with_parent(&world, out);
        }
    }
}

impl RenderSource for SceneNode {
    fn collect_draws(&self, out: &mut Vec<DrawItem>) {
        self.collect_with_parent(&Mat4::IDENTITY, out);
    }
}

impl RenderSource for Vec<DrawItem> {
    fn collect_draws(&self, out: &mut Vec<DrawItem>) {
        out.extend_from_slice(self);
    }
}

#[cfg(test)]
#[path = "scene_node_tests.rs"]
mod tests;
