#![allow(dead_code)]
//! Recording graphics device shared by the integration tests
//!
//! Implements the public backend traits without a GPU. Every recorded
//! command is appended to a shared trace, so tests can check what a frame
//! asked the backend to do.

use cell_renderer::cell::device::{
    ClearValue, CommandList, CubeFace, GraphicsDevice, Mesh, Primitive, RenderState, RenderTarget,
    RenderTargetDesc, Shader, ShaderDesc, Texture, TextureDesc, TextureDimension, TextureFormat,
    TextureInfo, UniformValue, Viewport,
};
use cell_renderer::cell::scene::AABB;
use cell_renderer::cell::Result;
use cell_renderer::glam::Vec3;
use std::sync::{Arc, Mutex};

pub type Trace = Arc<Mutex<Vec<String>>>;

// ============================================================================
// RESOURCES
// ============================================================================

pub struct TestTexture {
    name: String,
    info: TextureInfo,
}

impl TestTexture {
    pub fn new(name: &str, width: u32, height: u32, dimension: TextureDimension) -> Self {
        Self {
            name: name.to_string(),
            info: TextureInfo {
                width,
                height,
                format: TextureFormat::R16G16B16A16_SFLOAT,
                dimension,
                mip_levels: 1,
            },
        }
    }
}

impl Texture for TestTexture {
    fn name(&self) -> &str {
        &self.name
    }

    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

pub struct TestShader(pub String);

impl Shader for TestShader {
    fn name(&self) -> &str {
        &self.0
    }
}

pub struct TestMesh {
    name: String,
    bounds: Option<AABB>,
}

impl TestMesh {
    pub fn new(name: &str) -> Arc<dyn Mesh> {
        Arc::new(Self { name: name.to_string(), bounds: None })
    }

    /// Unit cube bounds
    pub fn bounded(name: &str) -> Arc<dyn Mesh> {
        Arc::new(Self { name: name.to_string(), bounds: Some(AABB::new(-Vec3::ONE, Vec3::ONE)) })
    }
}

impl Mesh for TestMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> Option<AABB> {
        self.bounds
    }
}

struct TestTarget {
    name: String,
    width: u32,
    height: u32,
    colors: Vec<Arc<dyn Texture>>,
    depth: Option<Arc<dyn Texture>>,
}

impl RenderTarget for TestTarget {
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

pub fn target(name: &str, width: u32, height: u32) -> Arc<dyn RenderTarget> {
    let color: Arc<dyn Texture> = Arc::new(TestTexture::new(&format!("{}/color", name), width, height, TextureDimension::Tex2D));
    Arc::new(TestTarget {
        name: name.to_string(),
        width,
        height,
        colors: vec![color],
        depth: None,
    })
}

// ============================================================================
// COMMAND LIST
// ============================================================================

struct TestCommandList {
    trace: Trace,
}

impl TestCommandList {
    fn push(&self, entry: String) -> Result<()> {
        self.trace.lock().unwrap().push(entry);
        Ok(())
    }
}

impl CommandList for TestCommandList {
    fn begin(&mut self) -> Result<()> {
        self.push("begin".to_string())
    }

    fn end(&mut self) -> Result<()> {
        self.push("end".to_string())
    }

    fn push_debug_group(&mut self, name: &str) -> Result<()> {
        self.push(format!("group {}", name))
    }

    fn pop_debug_group(&mut self) -> Result<()> {
        self.push("end group".to_string())
    }

    fn bind_render_target(&mut self, target: Option<&Arc<dyn RenderTarget>>) -> Result<()> {
        self.push(format!("target {}", target.map(|t| t.name()).unwrap_or("<screen>")))
    }

    fn bind_cubemap_face(&mut self, cubemap: &Arc<dyn Texture>, face: CubeFace, mip_level: u32) -> Result<()> {
        self.push(format!("face {} {} {}", cubemap.name(), face.index(), mip_level))
    }

    fn clear(&mut self, _values: &[ClearValue]) -> Result<()> {
        self.push("clear".to_string())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.push(format!("viewport {}x{}", viewport.width, viewport.height))
    }

    fn set_render_state(&mut self, _state: &RenderState) -> Result<()> {
        Ok(())
    }

    fn bind_shader(&mut self, shader: &Arc<dyn Shader>) -> Result<()> {
        self.push(format!("shader {}", shader.name()))
    }

    fn set_uniform(&mut self, _name: &str, _value: &UniformValue) -> Result<()> {
        Ok(())
    }

    fn bind_texture(&mut self, unit: u32, texture: &Arc<dyn Texture>) -> Result<()> {
        self.push(format!("texture {} {}", unit, texture.name()))
    }

    fn update_global_uniforms(&mut self, data: &[u8]) -> Result<()> {
        self.push(format!("globals {}", data.len()))
    }

    fn copy_depth(&mut self, src: &Arc<dyn RenderTarget>, dst: &Arc<dyn RenderTarget>) -> Result<()> {
        self.push(format!("copy depth {} {}", src.name(), dst.name()))
    }

    fn draw_mesh(&mut self, mesh: &Arc<dyn Mesh>) -> Result<()> {
        self.push(format!("draw {}", mesh.name()))
    }
}

// ============================================================================
// DEVICE
// ============================================================================

pub struct RecordingDevice {
    trace: Trace,
    submits: usize,
}

impl RecordingDevice {
    /// Device behind the renderer's lock, plus a handle on its trace
    pub fn shared() -> (Arc<Mutex<dyn GraphicsDevice>>, Trace) {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let device = RecordingDevice { trace: trace.clone(), submits: 0 };
        (Arc::new(Mutex::new(device)), trace)
    }
}

impl GraphicsDevice for RecordingDevice {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        let mut texture = TestTexture::new(&desc.name, desc.width, desc.height, desc.dimension);
        texture.info = TextureInfo::from(&desc);
        Ok(Arc::new(texture))
    }

    fn load_texture(
        &mut self,
        name: &str,
        _path: &str,
        dimension: TextureDimension,
        _format: TextureFormat,
    ) -> Result<Arc<dyn Texture>> {
        Ok(Arc::new(TestTexture::new(name, 1, 1, dimension)))
    }

    fn load_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>> {
        Ok(Arc::new(TestShader(desc.name)))
    }

    fn create_mesh(&mut self, primitive: Primitive) -> Result<Arc<dyn Mesh>> {
        Ok(match primitive {
            Primitive::Quad => TestMesh::new("quad"),
            Primitive::Sphere => TestMesh::bounded("sphere"),
            Primitive::Cube => TestMesh::bounded("cube"),
        })
    }

    fn create_render_target(&mut self, desc: RenderTargetDesc) -> Result<Arc<dyn RenderTarget>> {
        let colors = (0..desc.color_formats.len())
            .map(|i| {
                let texture = TestTexture::new(&format!("{}/color{}", desc.name, i), desc.width, desc.height, TextureDimension::Tex2D);
                Arc::new(texture) as Arc<dyn Texture>
            })
            .collect();
        let depth = desc.depth_format.map(|_| {
            let texture = TestTexture::new(&format!("{}/depth", desc.name), desc.width, desc.height, TextureDimension::Tex2D);
            Arc::new(texture) as Arc<dyn Texture>
        });

        Ok(Arc::new(TestTarget {
            name: desc.name,
            width: desc.width,
            height: desc.height,
            colors,
            depth,
        }))
    }

    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(TestCommandList { trace: self.trace.clone() }))
    }

    fn submit(&mut self, _commands: &dyn CommandList) -> Result<()> {
        self.submits += 1;
        self.trace.lock().unwrap().push(format!("submit #{}", self.submits));
        Ok(())
    }

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }
}

/// Drain the trace
pub fn take(trace: &Trace) -> Vec<String> {
    std::mem::take(&mut *trace.lock().unwrap())
}

pub fn groups(entries: &[String]) -> Vec<&str> {
    entries.iter().filter_map(|e| e.strip_prefix("group ")).collect()
}
