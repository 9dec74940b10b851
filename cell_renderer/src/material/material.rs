/// Material instance: shader, texture slots, uniform overrides and
/// render state.
///
/// A Material is pure data. Binding it into a command list is done by
/// the renderer when a draw is issued.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::graphics_device::{
    BlendFactor, CullFace, DepthCompare, RenderState, RenderStateFlags, Shader, Texture, UniformValue,
};

// ===== KIND AND PASS BUCKET =====

/// What a material is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Opaque surface rendered through the G-buffer
    Default,
    /// Surface rendered in the forward pass (transparency, special shading)
    Custom,
    /// Full-screen effect in the post-processing chain
    PostProcess,
}

/// Which part of the frame a material's commands go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassBucket {
    Deferred,
    Forward,
    PostProcess,
}

impl MaterialKind {
    /// The single kind-to-bucket table
    pub fn pass_bucket(&self) -> PassBucket {
        match self {
            MaterialKind::Default => PassBucket::Deferred,
            MaterialKind::Custom => PassBucket::Forward,
            MaterialKind::PostProcess => PassBucket::PostProcess,
        }
    }
}

// ===== TEXTURE SLOT =====

/// A texture bound to a named sampler at a fixed unit
#[derive(Clone)]
pub struct MaterialTextureSlot {
    name: String,
    texture: Arc<dyn Texture>,
    unit: u32,
}

impl MaterialTextureSlot {
    /// Sampler uniform name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn texture(&self) -> &Arc<dyn Texture> {
        &self.texture
    }

    pub fn unit(&self) -> u32 {
        self.unit
    }
}

// ===== MATERIAL =====

#[derive(Clone)]
pub struct Material {
    kind: MaterialKind,
    shader: Arc<dyn Shader>,
    textures: Vec<MaterialTextureSlot>,
    texture_names: FxHashMap<String, usize>,
    uniforms: Vec<(String, UniformValue)>,
    uniform_names: FxHashMap<String, usize>,
    state: RenderState,
}

impl Material {
    /// Material with no textures, no uniforms and the default render state
    pub fn new(kind: MaterialKind, shader: Arc<dyn Shader>) -> Self {
        Self {
            kind,
            shader,
            textures: Vec::new(),
            texture_names: FxHashMap::default(),
            uniforms: Vec::new(),
            uniform_names: FxHashMap::default(),
            state: RenderState::default(),
        }
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    pub fn pass_bucket(&self) -> PassBucket {
        self.kind.pass_bucket()
    }

    pub fn shader(&self) -> &Arc<dyn Shader> {
        &self.shader
    }

    // ===== TEXTURES =====

    /// Bind `texture` to sampler `name` at `unit`
    ///
    /// An existing slot with the same name is replaced in place, keeping
    /// its position in binding order.
    pub fn set_texture(&mut self, name: &str, texture: Arc<dyn Texture>, unit: u32) {
        let slot = MaterialTextureSlot {
            name: name.to_string(),
            texture,
            unit,
        };

        match self.texture_names.get(name) {
            Some(&index) => self.textures[index] = slot,
            None => {
                self.texture_names.insert(name.to_string(), self.textures.len());
                self.textures.push(slot);
            }
        }
    }

    pub fn texture(&self, name: &str) -> Option<&Arc<dyn Texture>> {
        self.texture_slot(name).map(|slot| &slot.texture)
    }

    pub fn texture_slot(&self, name: &str) -> Option<&MaterialTextureSlot> {
        self.texture_names.get(name).map(|&index| &self.textures[index])
    }

    /// Texture slots in binding order
    pub fn texture_slots(&self) -> &[MaterialTextureSlot] {
        &self.textures
    }

    // ===== UNIFORMS =====

    /// Set a uniform override, replacing a previous value of the same name
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) {
        match self.uniform_names.get(name) {
            Some(&index) => self.uniforms[index].1 = value,
            None => {
                self.uniform_names.insert(name.to_string(), self.uniforms.len());
                self.uniforms.push((name.to_string(), value));
            }
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.set_uniform(name, UniformValue::Int(value));
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniform_names.get(name).map(|&index| &self.uniforms[index].1)
    }

    /// Uniform overrides in insertion order
    pub fn uniforms(&self) -> &[(String, UniformValue)] {
        &self.uniforms
    }

    // ===== RENDER STATE =====

    pub fn render_state(&self) -> &RenderState {
        &self.state
    }

    pub fn render_state_mut(&mut self) -> &mut RenderState {
        &mut self.state
    }

    pub fn set_blend(&mut self, enabled: bool) {
        self.state.set(RenderStateFlags::BLEND, enabled);
    }

    pub fn set_blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.state.blend_src = src;
        self.state.blend_dst = dst;
    }

    pub fn set_cull(&mut self, enabled: bool) {
        self.state.set(RenderStateFlags::CULL, enabled);
    }

    pub fn set_cull_face(&mut self, face: CullFace) {
        self.state.cull_face = face;
    }

    pub fn set_depth_test(&mut self, enabled: bool) {
        self.state.set(RenderStateFlags::DEPTH_TEST, enabled);
    }

    pub fn set_depth_write(&mut self, enabled: bool) {
        self.state.set(RenderStateFlags::DEPTH_WRITE, enabled);
    }

    pub fn set_depth_compare(&mut self, compare: DepthCompare) {
        self.state.depth_compare = compare;
    }

    pub fn set_shadow_cast(&mut self, enabled: bool) {
        self.state.set(RenderStateFlags::SHADOW_CAST, enabled);
    }

    pub fn set_shadow_receive(&mut self, enabled: bool) {
        self.state.set(RenderStateFlags::SHADOW_RECEIVE, enabled);
    }

    pub fn casts_shadows(&self) -> bool {
        self.state.has(RenderStateFlags::SHADOW_CAST)
    }

    pub fn receives_shadows(&self) -> bool {
        self.state.has(RenderStateFlags::SHADOW_RECEIVE)
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
