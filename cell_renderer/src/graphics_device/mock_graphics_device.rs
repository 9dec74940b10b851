/// Mock graphics device for unit tests (no GPU required)
///
/// Every command recorded into a `MockCommandList`, every resource
/// creation and every submission is appended as a short string to a
/// shared log, so tests can assert on call order and counts.

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashSet;
use crate::error::{Error, Result};
use crate::scene::AABB;
use super::{
    ClearValue, CommandList, CubeFace, GraphicsDevice, Mesh, Primitive, RenderState,
    RenderTarget, RenderTargetDesc, Shader, ShaderDesc, Texture, TextureDesc,
    TextureDimension, TextureFormat, TextureInfo, UniformValue, Viewport,
};

/// Shared, append-only call log
pub type CommandLog = Arc<Mutex<Vec<String>>>;

/// Texture uploads recorded by name (texture name, initial data)
pub type UploadLog = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

/// Render target names whose creation fails, shared with the test
pub type TargetFailures = Arc<Mutex<FxHashSet<String>>>;

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub name: String,
    pub info: TextureInfo,
    pub valid: bool,
}

impl MockTexture {
    pub fn new(name: &str, width: u32, height: u32, dimension: TextureDimension) -> Self {
        Self {
            name: name.to_string(),
            info: TextureInfo {
                width,
                height,
                format: TextureFormat::R8G8B8A8_UNORM,
                dimension,
                mip_levels: 1,
            },
            valid: true,
        }
    }

    pub fn from_desc(desc: &TextureDesc) -> Self {
        Self {
            name: desc.name.clone(),
            info: TextureInfo::from(desc),
            valid: true,
        }
    }
}

impl Texture for MockTexture {
    fn name(&self) -> &str {
        &self.name
    }

    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn is_valid(&self) -> bool {
        self.valid
    }
}

// ============================================================================
// Mock Shader
// ============================================================================

#[derive(Debug)]
pub struct MockShader {
    pub name: String,
    pub valid: bool,
}

impl MockShader {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), valid: true }
    }

    pub fn invalid(name: &str) -> Self {
        Self { name: name.to_string(), valid: false }
    }
}

impl Shader for MockShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self) -> bool {
        self.valid
    }
}

// ============================================================================
// Mock Mesh
// ============================================================================

#[derive(Debug)]
pub struct MockMesh {
    pub name: String,
    pub bounds: Option<AABB>,
    pub valid: bool,
}

impl MockMesh {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), bounds: None, valid: true }
    }

    pub fn with_bounds(name: &str, bounds: AABB) -> Self {
        Self { name: name.to_string(), bounds: Some(bounds), valid: true }
    }

    pub fn invalid(name: &str) -> Self {
        Self { name: name.to_string(), bounds: None, valid: false }
    }
}

impl Mesh for MockMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> Option<AABB> {
        self.bounds
    }

    fn is_valid(&self) -> bool {
        self.valid
    }
}

// ============================================================================
// Mock RenderTarget
// ============================================================================

pub struct MockRenderTarget {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub colors: Vec<Arc<dyn Texture>>,
    pub depth: Option<Arc<dyn Texture>>,
}

impl MockRenderTarget {
    pub fn from_desc(desc: &RenderTargetDesc) -> Self {
        let colors = desc
            .color_formats
            .iter()
            .enumerate()
            .map(|(i, format)| {
                let mut texture = MockTexture::new(
                    &format!("{}.color{}", desc.name, i),
                    desc.width,
                    desc.height,
                    TextureDimension::Tex2D,
                );
                texture.info.format = *format;
                Arc::new(texture) as Arc<dyn Texture>
            })
            .collect();

        let depth = desc.depth_format.map(|format| {
            let mut texture = MockTexture::new(
                &format!("{}.depth", desc.name),
                desc.width,
                desc.height,
                TextureDimension::Tex2D,
            );
            texture.info.format = format;
            Arc::new(texture) as Arc<dyn Texture>
        });

        Self {
            name: desc.name.clone(),
            width: desc.width,
            height: desc.height,
            colors,
            depth,
        }
    }
}

impl RenderTarget for MockRenderTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_attachment_count(&self) -> usize {
        self.colors.len()
    }

    fn color_texture(&self, index: usize) -> Option<&Arc<dyn Texture>> {
        self.colors.get(index)
    }

    fn depth_texture(&self) -> Option<&Arc<dyn Texture>> {
        self.depth.as_ref()
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

pub struct MockCommandList {
    log: CommandLog,
}

impl MockCommandList {
    pub fn new(log: CommandLog) -> Self {
        Self { log }
    }

    fn record(&self, command: String) -> Result<()> {
        self.log
            .lock()
            .map_err(|_| Error::BackendError("mock command log poisoned".to_string()))?
            .push(command);
        Ok(())
    }
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        self.record("begin".to_string())
    }

    fn end(&mut self) -> Result<()> {
        self.record("end".to_string())
    }

    fn push_debug_group(&mut self, name: &str) -> Result<()> {
        self.record(format!("push_debug_group({})", name))
    }

    fn pop_debug_group(&mut self) -> Result<()> {
        self.record("pop_debug_group".to_string())
    }

    fn bind_render_target(&mut self, target: Option<&Arc<dyn RenderTarget>>) -> Result<()> {
        let name = target.map(|t| t.name().to_string()).unwrap_or_else(|| "default".to_string());
        self.record(format!("bind_render_target({})", name))
    }

    fn bind_cubemap_face(&mut self, cubemap: &Arc<dyn Texture>, face: CubeFace, mip_level: u32) -> Result<()> {
        self.record(format!("bind_cubemap_face({}, {}, {})", cubemap.name(), face.index(), mip_level))
    }

    fn clear(&mut self, values: &[ClearValue]) -> Result<()> {
        self.record(format!("clear({})", values.len()))
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.record(format!("set_viewport({}x{})", viewport.width, viewport.height))
    }

    fn set_render_state(&mut self, state: &RenderState) -> Result<()> {
        self.record(format!("set_render_state({:#x})", state.flags.bits()))
    }

    fn bind_shader(&mut self, shader: &Arc<dyn Shader>) -> Result<()> {
        self.record(format!("bind_shader({})", shader.name()))
    }

    fn set_uniform(&mut self, name: &str, _value: &UniformValue) -> Result<()> {
        self.record(format!("set_uniform({})", name))
    }

    fn bind_texture(&mut self, unit: u32, texture: &Arc<dyn Texture>) -> Result<()> {
        self.record(format!("bind_texture({}, {})", unit, texture.name()))
    }

    fn update_global_uniforms(&mut self, data: &[u8]) -> Result<()> {
        self.record(format!("update_global_uniforms({})", data.len()))
    }

    fn copy_depth(&mut self, src: &Arc<dyn RenderTarget>, dst: &Arc<dyn RenderTarget>) -> Result<()> {
        self.record(format!("copy_depth({} -> {})", src.name(), dst.name()))
    }

    fn draw_mesh(&mut self, mesh: &Arc<dyn Mesh>) -> Result<()> {
        self.record(format!("draw_mesh({})", mesh.name()))
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

pub struct MockGraphicsDevice {
    log: CommandLog,
    uploads: UploadLog,
    invalid_shaders: FxHashSet<String>,
    failing_targets: TargetFailures,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            uploads: Arc::new(Mutex::new(Vec::new())),
            invalid_shaders: FxHashSet::default(),
            failing_targets: Arc::new(Mutex::new(FxHashSet::default())),
        }
    }

    /// Shaders loaded under `name` will report `is_valid() == false`
    pub fn with_invalid_shader(mut self, name: &str) -> Self {
        self.invalid_shaders.insert(name.to_string());
        self
    }

    /// Render targets created under `name` will fail with a backend error
    pub fn with_failing_target(self, name: &str) -> Self {
        if let Ok(mut failing) = self.failing_targets.lock() {
            failing.insert(name.to_string());
        }
        self
    }

    /// Handle on the failing target names, editable after construction
    pub fn target_failures(&self) -> TargetFailures {
        self.failing_targets.clone()
    }

    /// Handle on the shared call log
    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }

    /// Handle on the recorded texture uploads
    pub fn uploads(&self) -> UploadLog {
        self.uploads.clone()
    }

    fn record(&self, entry: String) -> Result<()> {
        self.log
            .lock()
            .map_err(|_| Error::BackendError("mock command log poisoned".to_string()))?
            .push(entry);
        Ok(())
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        self.record(format!("create_texture({})", desc.name))?;
        if let Some(data) = &desc.data {
            self.uploads
                .lock()
                .map_err(|_| Error::BackendError("mock upload log poisoned".to_string()))?
                .push((desc.name.clone(), data.clone()));
        }
        Ok(Arc::new(MockTexture::from_desc(&desc)))
    }

    fn load_texture(
        &mut self,
        name: &str,
        _path: &str,
        dimension: TextureDimension,
        format: TextureFormat,
    ) -> Result<Arc<dyn Texture>> {
        self.record(format!("load_texture({})", name))?;
        let mut texture = MockTexture::new(name, 1, 1, dimension);
        texture.info.format = format;
        Ok(Arc::new(texture))
    }

    fn load_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>> {
        self.record(format!("load_shader({})", desc.name))?;
        if self.invalid_shaders.contains(&desc.name) {
            Ok(Arc::new(MockShader::invalid(&desc.name)))
        } else {
            Ok(Arc::new(MockShader::new(&desc.name)))
        }
    }

    fn create_mesh(&mut self, primitive: Primitive) -> Result<Arc<dyn Mesh>> {
        let mesh = match primitive {
            Primitive::Quad => MockMesh::new("quad"),
            Primitive::Sphere => MockMesh::with_bounds("sphere", AABB::new(-glam::Vec3::ONE, glam::Vec3::ONE)),
            Primitive::Cube => MockMesh::with_bounds("cube", AABB::new(-glam::Vec3::ONE, glam::Vec3::ONE)),
        };
        self.record(format!("create_mesh({})", mesh.name))?;
        Ok(Arc::new(mesh))
    }

    fn create_render_target(&mut self, desc: RenderTargetDesc) -> Result<Arc<dyn RenderTarget>> {
        self.record(format!("create_render_target({})", desc.name))?;
        let failing = self
            .failing_targets
            .lock()
            .map_err(|_| Error::BackendError("mock failure set poisoned".to_string()))?
            .contains(&desc.name);
        if failing {
            return Err(Error::BackendError(format!("Failed to create render target '{}'", desc.name)));
        }
        Ok(Arc::new(MockRenderTarget::from_desc(&desc)))
    }

    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList::new(self.log.clone())))
    }

    fn submit(&mut self, _commands: &dyn CommandList) -> Result<()> {
        self.record("submit".to_string())
    }

    fn wait_idle(&self) -> Result<()> {
        self.record("wait_idle".to_string())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
