/// Texture trait, texture descriptor, and texture info

/// Texture pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_UNORM,
    R8G8B8A8_SRGB,
    R16G16_SFLOAT,
    R16G16B16_SFLOAT,
    R16G16B16A16_SFLOAT,
    R32G32B32A32_SFLOAT,
    D24_UNORM_S8_UINT,
    D32_FLOAT,
}

impl TextureFormat {
    /// Size of one texel in bytes
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            TextureFormat::R8G8B8A8_UNORM | TextureFormat::R8G8B8A8_SRGB => 4,
            TextureFormat::R16G16_SFLOAT => 4,
            TextureFormat::R16G16B16_SFLOAT => 6,
            TextureFormat::R16G16B16A16_SFLOAT => 8,
            TextureFormat::R32G32B32A32_SFLOAT => 16,
            TextureFormat::D24_UNORM_S8_UINT | TextureFormat::D32_FLOAT => 4,
        }
    }

    /// True for depth (and depth/stencil) formats
    pub fn is_depth(&self) -> bool {
        matches!(self, TextureFormat::D24_UNORM_S8_UINT | TextureFormat::D32_FLOAT)
    }
}

/// Texture shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureDimension {
    /// Plain 2D texture
    Tex2D,
    /// Six-face cubemap
    Cube,
}

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Debug name
    pub name: String,
    /// Width in pixels (per face for cubemaps)
    pub width: u32,
    /// Height in pixels (per face for cubemaps)
    pub height: u32,
    pub format: TextureFormat,
    pub dimension: TextureDimension,
    /// Number of mip levels (1 = no mipmaps)
    pub mip_levels: u32,
    /// Optional initial data for mip 0 (tightly packed, face-major for cubemaps)
    pub data: Option<Vec<u8>>,
}

/// Read-only properties of a created texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub dimension: TextureDimension,
    pub mip_levels: u32,
}

impl From<&TextureDesc> for TextureInfo {
    fn from(desc: &TextureDesc) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            dimension: desc.dimension,
            mip_levels: desc.mip_levels.max(1),
        }
    }
}

/// GPU texture handle
pub trait Texture: Send + Sync {
    /// Debug name
    fn name(&self) -> &str;

    /// Texture properties
    fn info(&self) -> &TextureInfo;

    /// False when the backend failed to create or load the texture
    fn is_valid(&self) -> bool {
        true
    }
}
