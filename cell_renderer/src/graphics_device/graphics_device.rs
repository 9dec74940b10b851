/// GraphicsDevice trait - resource factory and command submission

use std::sync::Arc;
use crate::error::Result;
use super::{
    CommandList, Mesh, Primitive, RenderTarget, RenderTargetDesc, Shader, ShaderDesc,
    Texture, TextureDesc, TextureDimension, TextureFormat,
};

/// Backend entry point
///
/// The renderer holds the device as `Arc<Mutex<dyn GraphicsDevice>>` and
/// only locks it to create resources or submit recorded command lists.
pub trait GraphicsDevice: Send + Sync {
    /// Create a renderer-owned texture (cubemaps, lookup tables, fallbacks)
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Load a texture from disk
    fn load_texture(
        &mut self,
        name: &str,
        path: &str,
        dimension: TextureDimension,
        format: TextureFormat,
    ) -> Result<Arc<dyn Texture>>;

    /// Compile or fetch a shader program
    ///
    /// A compilation failure may either be reported as an error or as a
    /// shader whose `is_valid()` is false; the renderer skips draws with
    /// invalid shaders.
    fn load_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>>;

    /// Create one of the built-in proxy meshes
    fn create_mesh(&mut self, primitive: Primitive) -> Result<Arc<dyn Mesh>>;

    /// Create an offscreen render target
    fn create_render_target(&mut self, desc: RenderTargetDesc) -> Result<Arc<dyn RenderTarget>>;

    /// Allocate an empty command list
    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>>;

    /// Submit a recorded command list for execution
    fn submit(&mut self, commands: &dyn CommandList) -> Result<()>;

    /// Block until all submitted work has completed
    fn wait_idle(&self) -> Result<()>;
}
