use std::sync::Arc;
use glam::Vec3;
use crate::graphics_device::Texture;

/// Image-based lighting data for one capture point
///
/// The BRDF lookup table is shared by every capture of a renderer.
#[derive(Clone)]
pub struct PbrCapture {
    /// Diffuse irradiance cubemap
    pub irradiance: Arc<dyn Texture>,
    /// Specular cubemap, one roughness level per mip
    pub prefiltered: Arc<dyn Texture>,
    pub brdf_lut: Arc<dyn Texture>,
}

/// Local irradiance probe
///
/// `capture` is `None` until the probe is baked; unbaked probes are
/// ignored by the lighting pass.
#[derive(Clone)]
pub struct IrradianceProbe {
    pub position: Vec3,
    /// Influence radius of the probe's light volume
    pub radius: f32,
    pub capture: Option<PbrCapture>,
}

impl IrradianceProbe {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self { position, radius, capture: None }
    }

    pub fn is_baked(&self) -> bool {
        self.capture.is_some()
    }
}
