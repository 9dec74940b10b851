//! Renderer configuration
//!
//! A plain struct with sensible defaults. `Renderer::new` validates it
//! before creating any GPU resource.

use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;
use crate::lighting::ShadowVolume;

#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Initial render width in pixels
    pub width: u32,
    /// Initial render height in pixels
    pub height: u32,

    /// Resolution of each (square) directional shadow map
    pub shadow_map_size: u32,
    /// Maximum number of shadow-casting directional lights per frame
    pub max_shadow_maps: usize,
    /// Half-size of the orthographic shadow window
    pub shadow_extent: f32,
    pub shadow_near: f32,
    pub shadow_far: f32,

    /// Face size of the cubemap the scene is captured into when baking
    pub capture_resolution: u32,
    /// Face size of cubemaps produced from equirectangular maps
    pub environment_resolution: u32,
    /// Face size of diffuse irradiance cubemaps
    pub irradiance_resolution: u32,
    /// Face size of mip 0 of prefiltered specular cubemaps
    pub prefilter_resolution: u32,
    /// Number of roughness mips in prefiltered cubemaps
    pub prefilter_mip_levels: u32,
    /// Width and height of the BRDF lookup table
    pub brdf_lut_resolution: u32,
    /// Importance samples per BRDF lookup table texel
    pub brdf_sample_count: u32,

    /// Cull deferred draws and point lights against the camera frustum
    pub frustum_culling: bool,
    /// Draw debug meshes at point lights that request it
    pub render_lights: bool,
    /// Where the sky probe is captured from
    pub sky_probe_position: Vec3,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            shadow_map_size: 2048,
            max_shadow_maps: 4,
            shadow_extent: 20.0,
            shadow_near: -15.0,
            shadow_far: 20.0,
            capture_resolution: 128,
            environment_resolution: 512,
            irradiance_resolution: 32,
            prefilter_resolution: 128,
            prefilter_mip_levels: 5,
            brdf_lut_resolution: 128,
            brdf_sample_count: 1024,
            frustum_culling: true,
            render_lights: true,
            sky_probe_position: Vec3::ZERO,
        }
    }
}

impl RendererConfig {
    /// Check every field the renderer depends on
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            engine_bail!("cell::RendererConfig", "Render size must be non-zero (got {}x{})", self.width, self.height);
        }
        if self.shadow_map_size == 0 {
            engine_bail!("cell::RendererConfig", "Shadow map size must be non-zero");
        }
        if self.shadow_far <= self.shadow_near {
            engine_bail!("cell::RendererConfig",
                "Shadow far plane ({}) must be beyond the near plane ({})", self.shadow_far, self.shadow_near);
        }
        if self.shadow_extent <= 0.0 {
            engine_bail!("cell::RendererConfig", "Shadow extent must be positive");
        }

        let cube_sizes = [
            ("capture_resolution", self.capture_resolution),
            ("environment_resolution", self.environment_resolution),
            ("irradiance_resolution", self.irradiance_resolution),
            ("prefilter_resolution", self.prefilter_resolution),
            ("brdf_lut_resolution", self.brdf_lut_resolution),
        ];
        for (name, size) in cube_sizes {
            if size == 0 {
                engine_bail!("cell::RendererConfig", "{} must be non-zero", name);
            }
        }

        if self.prefilter_mip_levels == 0 {
            engine_bail!("cell::RendererConfig", "prefilter_mip_levels must be at least 1");
        }
        if self.prefilter_resolution >> (self.prefilter_mip_levels - 1) == 0 {
            engine_bail!("cell::RendererConfig",
                "prefilter_resolution {} is too small for {} mip levels",
                self.prefilter_resolution, self.prefilter_mip_levels);
        }
        if self.brdf_sample_count == 0 {
            engine_bail!("cell::RendererConfig", "brdf_sample_count must be non-zero");
        }

        Ok(())
    }

    /// Orthographic volume shared by all directional shadow maps
    pub fn shadow_volume(&self) -> ShadowVolume {
        ShadowVolume {
            extent: self.shadow_extent,
            near: self.shadow_near,
            far: self.shadow_far,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
