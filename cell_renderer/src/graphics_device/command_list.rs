/// Command list trait and the small value types recorded into it

use std::sync::Arc;
use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::error::Result;
use super::{Mesh, RenderState, RenderTarget, Shader, Texture};

/// Command list for recording rendering commands
///
/// Commands are recorded in program order and executed on
/// `GraphicsDevice::submit`.
pub trait CommandList: Send + Sync {
    /// Begin recording commands
    fn begin(&mut self) -> Result<()>;

    /// Finish recording commands
    fn end(&mut self) -> Result<()>;

    /// Open a named debug group (shows up in GPU captures)
    fn push_debug_group(&mut self, name: &str) -> Result<()>;

    /// Close the innermost debug group
    fn pop_debug_group(&mut self) -> Result<()>;

    /// Bind a render target for writing; `None` selects the default framebuffer
    fn bind_render_target(&mut self, target: Option<&Arc<dyn RenderTarget>>) -> Result<()>;

    /// Bind one face of a cubemap at the given mip level as the color target
    fn bind_cubemap_face(&mut self, cubemap: &Arc<dyn Texture>, face: CubeFace, mip_level: u32) -> Result<()>;

    /// Clear the bound target's attachments
    fn clear(&mut self, values: &[ClearValue]) -> Result<()>;

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Apply fixed-function state for subsequent draws
    fn set_render_state(&mut self, state: &RenderState) -> Result<()>;

    fn bind_shader(&mut self, shader: &Arc<dyn Shader>) -> Result<()>;

    /// Set a uniform on the currently bound shader
    fn set_uniform(&mut self, name: &str, value: &UniformValue) -> Result<()>;

    /// Bind a texture to a sampler unit
    fn bind_texture(&mut self, unit: u32, texture: &Arc<dyn Texture>) -> Result<()>;

    /// Upload the per-frame global uniform block
    fn update_global_uniforms(&mut self, data: &[u8]) -> Result<()>;

    /// Copy the depth attachment of `src` into `dst`
    fn copy_depth(&mut self, src: &Arc<dyn RenderTarget>, dst: &Arc<dyn RenderTarget>) -> Result<()>;

    /// Draw a mesh with the current shader and state
    fn draw_mesh(&mut self, mesh: &Arc<dyn Mesh>) -> Result<()>;
}

/// Viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Viewport covering a `width` x `height` target at the origin
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// Clear value for an attachment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearValue {
    /// Color clear value (RGBA)
    Color([f32; 4]),
    /// Depth/stencil clear value
    DepthStencil { depth: f32, stencil: u32 },
}

/// Uniform value set through `CommandList::set_uniform`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

/// Cubemap face, in the conventional +X, -X, +Y, -Y, +Z, -Z layer order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    /// All six faces in layer order
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Layer index of the face
    pub fn index(&self) -> u32 {
        *self as u32
    }

    /// Viewing direction for the face
    pub fn direction(&self) -> Vec3 {
        match self {
            CubeFace::PositiveX => Vec3::X,
            CubeFace::NegativeX => Vec3::NEG_X,
            CubeFace::PositiveY => Vec3::Y,
            CubeFace::NegativeY => Vec3::NEG_Y,
            CubeFace::PositiveZ => Vec3::Z,
            CubeFace::NegativeZ => Vec3::NEG_Z,
        }
    }

    /// Up vector for the face (cubemap faces are addressed with -Y up,
    /// except the Y faces which use +Z / -Z)
    pub fn up(&self) -> Vec3 {
        match self {
            CubeFace::PositiveY => Vec3::Z,
            CubeFace::NegativeY => Vec3::NEG_Z,
            _ => Vec3::NEG_Y,
        }
    }
}
