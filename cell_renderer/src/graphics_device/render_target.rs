/// RenderTarget trait and descriptor

use std::sync::Arc;
use super::{Texture, TextureFormat};

/// Descriptor for creating an offscreen render target
#[derive(Debug, Clone)]
pub struct RenderTargetDesc {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// One entry per color attachment, in attachment order
    pub color_formats: Vec<TextureFormat>,
    /// Depth attachment format, if any
    pub depth_format: Option<TextureFormat>,
}

/// A set of attachments that can be rendered to and read back as textures
pub trait RenderTarget: Send + Sync {
    fn name(&self) -> &str;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Number of color attachments
    fn color_attachment_count(&self) -> usize;

    /// Color attachment `index` as a sampleable texture
    fn color_texture(&self, index: usize) -> Option<&Arc<dyn Texture>>;

    /// Depth attachment as a sampleable texture
    fn depth_texture(&self) -> Option<&Arc<dyn Texture>>;
}
