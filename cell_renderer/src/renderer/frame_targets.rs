/// Render targets owned by the renderer
///
/// - G-buffer: position+metallic, normal+roughness, albedo+AO, depth
/// - lighting: HDR accumulation target, also the forward pass target
/// - post: second half of the post-processing ping-pong
/// - shadows: one depth-only target per shadow-casting light slot
///
/// Screen-sized targets follow the render size; shadow targets keep the
/// configured shadow map size.

use std::sync::Arc;
use crate::config::RendererConfig;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, Mesh, Primitive, RenderTarget, RenderTargetDesc, TextureFormat,
};

const HDR_FORMAT: TextureFormat = TextureFormat::R16G16B16A16_SFLOAT;
const DEPTH_FORMAT: TextureFormat = TextureFormat::D24_UNORM_S8_UINT;
const GBUFFER_ATTACHMENTS: usize = 3;

pub(crate) struct FrameTargets {
    pub gbuffer: Arc<dyn RenderTarget>,
    pub lighting: Arc<dyn RenderTarget>,
    pub post: Arc<dyn RenderTarget>,
    pub shadows: Vec<Arc<dyn RenderTarget>>,
}

fn screen_target(
    device: &mut dyn GraphicsDevice,
    name: &str,
    width: u32,
    height: u32,
    color_count: usize,
) -> Result<Arc<dyn RenderTarget>> {
    let target = device.create_render_target(RenderTargetDesc {
        name: name.to_string(),
        width,
        height,
        color_formats: vec![HDR_FORMAT; color_count],
        depth_format: Some(DEPTH_FORMAT),
    })?;

    if target.color_attachment_count() != color_count || target.depth_texture().is_none() {
        return Err(Error::InvalidResource(format!(
            "Render target '{}' was created with {} color attachments (expected {}) and {} depth",
            name,
            target.color_attachment_count(),
            color_count,
            if target.depth_texture().is_some() { "a" } else { "no" },
        )));
    }
    Ok(target)
}

impl FrameTargets {
    pub fn create(device: &mut dyn GraphicsDevice, config: &RendererConfig, width: u32, height: u32) -> Result<Self> {
        let mut shadows = Vec::with_capacity(config.max_shadow_maps);
        for i in 0..config.max_shadow_maps {
            let target = device.create_render_target(RenderTargetDesc {
                name: format!("shadow {}", i),
                width: config.shadow_map_size,
                height: config.shadow_map_size,
                color_formats: Vec::new(),
                depth_format: Some(TextureFormat::D32_FLOAT),
            })?;
            if target.depth_texture().is_none() {
                return Err(Error::InvalidResource(format!("Shadow target {} has no depth attachment", i)));
            }
            shadows.push(target);
        }

        Ok(Self {
            gbuffer: screen_target(device, "gbuffer", width, height, GBUFFER_ATTACHMENTS)?,
            lighting: screen_target(device, "lighting", width, height, 1)?,
            post: screen_target(device, "post", width, height, 1)?,
            shadows,
        })
    }

    /// Recreate the screen-sized targets at a new size
    ///
    /// All three are created before any is replaced, so a failure leaves
    /// the previous set in place.
    pub fn resize(&mut self, device: &mut dyn GraphicsDevice, width: u32, height: u32) -> Result<()> {
        let gbuffer = screen_target(device, "gbuffer", width, height, GBUFFER_ATTACHMENTS)?;
        let lighting = screen_target(device, "lighting", width, height, 1)?;
        let post = screen_target(device, "post", width, height, 1)?;

        self.gbuffer = gbuffer;
        self.lighting = lighting;
        self.post = post;
        Ok(())
    }
}

/// Meshes the renderer draws on its own
pub(crate) struct Primitives {
    /// Full-screen quad
    pub quad: Arc<dyn Mesh>,
    /// Unit light volume
    pub sphere: Arc<dyn Mesh>,
    /// Unit cube for cubemap convolutions
    pub cube: Arc<dyn Mesh>,
}

impl Primitives {
    pub fn create(device: &mut dyn GraphicsDevice) -> Result<Self> {
        Ok(Self {
            quad: device.create_mesh(Primitive::Quad)?,
            sphere: device.create_mesh(Primitive::Sphere)?,
            cube: device.create_mesh(Primitive::Cube)?,
        })
    }
}
