/// Image-based lighting captures: sky, irradiance probes and the shared
/// BRDF lookup table
///
/// A bake captures the scene into a scratch cubemap at each capture point,
/// then convolves it into that point's irradiance and prefiltered maps.
/// Every texture is allocated on first use and written in place on later
/// bakes, so a re-bake never changes which textures the lighting pass
/// samples.

use std::sync::{Arc, Mutex};
use glam::{Mat4, Vec3};
use crate::config::RendererConfig;
use crate::error::Result;
use crate::graphics_device::{
    CommandList, GraphicsDevice, Mesh, Texture, TextureDesc, TextureDimension, TextureFormat,
};
use crate::material::InternalMaterials;
use crate::renderer::cubemap_capture::render_to_cubemap;
use crate::renderer::draw::DrawCall;
use crate::renderer::{lock_device, FrameStats};
use crate::{engine_debug, engine_info};
use super::brdf::{encode_rg16f, generate_brdf_lut};
use super::pbr_capture::{IrradianceProbe, PbrCapture};

const CUBEMAP_FORMAT: TextureFormat = TextureFormat::R16G16B16_SFLOAT;

/// Sampler name of the source cubemap in the convolution shaders
const ENVIRONMENT_SLOT: &str = "environment";

/// Roughness convolved into mip `mip` of an `mip_levels`-level
/// prefiltered cubemap: 0 at the base level, 1 at the last
pub fn prefilter_roughness(mip: u32, mip_levels: u32) -> f32 {
    if mip_levels <= 1 {
        0.0
    } else {
        mip as f32 / (mip_levels - 1) as f32
    }
}

fn cubemap_desc(name: String, size: u32, mip_levels: u32) -> TextureDesc {
    TextureDesc {
        name,
        width: size,
        height: size,
        format: CUBEMAP_FORMAT,
        dimension: TextureDimension::Cube,
        mip_levels,
        data: None,
    }
}

#[derive(Default)]
pub struct ProbeBaker {
    brdf_lut: Option<Arc<dyn Texture>>,
    /// Scene capture cubemap, reused for every capture point
    scratch: Option<Arc<dyn Texture>>,
    sky: Option<PbrCapture>,
    sky_user_set: bool,
    probes: Vec<IrradianceProbe>,
}

impl ProbeBaker {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== STATE =====

    pub fn sky_capture(&self) -> Option<&PbrCapture> {
        self.sky.as_ref()
    }

    /// Use `capture` as the sky; bakes leave a user-set sky untouched
    pub fn set_sky_capture(&mut self, capture: PbrCapture) {
        self.sky = Some(capture);
        self.sky_user_set = true;
    }

    pub fn is_sky_user_set(&self) -> bool {
        self.sky_user_set
    }

    pub fn add_probe(&mut self, position: Vec3, radius: f32) {
        self.probes.push(IrradianceProbe::new(position, radius));
    }

    pub fn clear_probes(&mut self) {
        self.probes.clear();
    }

    pub fn probes(&self) -> &[IrradianceProbe] {
        &self.probes
    }

    /// The shared lookup table, once any capture has been processed
    pub fn brdf_lut(&self) -> Option<&Arc<dyn Texture>> {
        self.brdf_lut.as_ref()
    }

    // ===== ALLOCATION =====

    fn brdf_lut_or_create(&mut self, device: &mut dyn GraphicsDevice, config: &RendererConfig) -> Result<Arc<dyn Texture>> {
        if let Some(lut) = &self.brdf_lut {
            return Ok(lut.clone());
        }

        let size = config.brdf_lut_resolution;
        let data = encode_rg16f(&generate_brdf_lut(size, config.brdf_sample_count));
        let lut = device.create_texture(TextureDesc {
            name: "brdf lut".to_string(),
            width: size,
            height: size,
            format: TextureFormat::R16G16_SFLOAT,
            dimension: TextureDimension::Tex2D,
            mip_levels: 1,
            data: Some(data),
        })?;
        engine_debug!("cell::ProbeBaker", "Computed {}x{} BRDF lookup table", size, size);

        self.brdf_lut = Some(lut.clone());
        Ok(lut)
    }

    fn scratch_or_create(&mut self, device: &mut dyn GraphicsDevice, config: &RendererConfig) -> Result<Arc<dyn Texture>> {
        if let Some(scratch) = &self.scratch {
            return Ok(scratch.clone());
        }
        let scratch = device.create_texture(cubemap_desc("probe capture".to_string(), config.capture_resolution, 1))?;
        self.scratch = Some(scratch.clone());
        Ok(scratch)
    }

    fn allocate_capture(
        device: &mut dyn GraphicsDevice,
        config: &RendererConfig,
        name: &str,
        brdf_lut: &Arc<dyn Texture>,
    ) -> Result<PbrCapture> {
        Ok(PbrCapture {
            irradiance: device.create_texture(cubemap_desc(
                format!("{} irradiance", name),
                config.irradiance_resolution,
                1,
            ))?,
            prefiltered: device.create_texture(cubemap_desc(
                format!("{} prefiltered", name),
                config.prefilter_resolution,
                config.prefilter_mip_levels,
            ))?,
            brdf_lut: brdf_lut.clone(),
        })
    }

    // ===== RECORDING =====

    /// Convolve `environment` into `capture`'s irradiance map and every
    /// mip of its prefiltered map
    fn record_convolution(
        cmd: &mut dyn CommandList,
        stats: &mut FrameStats,
        internal: &InternalMaterials,
        cube: &Arc<dyn Mesh>,
        environment: &Arc<dyn Texture>,
        capture: &PbrCapture,
    ) -> Result<()> {
        let mut irradiance = internal.irradiance_capture.clone();
        irradiance.set_texture(ENVIRONMENT_SLOT, environment.clone(), 0);
        let draws = [DrawCall::new(&irradiance, cube, Mat4::IDENTITY)];
        render_to_cubemap(cmd, stats, &draws, &capture.irradiance, Vec3::ZERO, 0)?;

        let mut prefilter = internal.prefilter_capture.clone();
        prefilter.set_texture(ENVIRONMENT_SLOT, environment.clone(), 0);
        let mip_levels = capture.prefiltered.info().mip_levels;
        for mip in 0..mip_levels {
            prefilter.set_float("roughness", prefilter_roughness(mip, mip_levels));
            let draws = [DrawCall::new(&prefilter, cube, Mat4::IDENTITY)];
            render_to_cubemap(cmd, stats, &draws, &capture.prefiltered, Vec3::ZERO, mip)?;
        }
        Ok(())
    }

    /// Capture `scene` at the sky position (unless the sky was set by the
    /// caller) and at every probe, then convolve each capture
    pub(crate) fn bake(
        &mut self,
        device: &Mutex<dyn GraphicsDevice>,
        config: &RendererConfig,
        internal: &InternalMaterials,
        cube: &Arc<dyn Mesh>,
        scene: &[DrawCall<'_>],
    ) -> Result<FrameStats> {
        let (scratch, mut cmd) = {
            let mut device = lock_device(device)?;
            let lut = self.brdf_lut_or_create(&mut *device, config)?;
            let scratch = self.scratch_or_create(&mut *device, config)?;

            if !self.sky_user_set && self.sky.is_none() {
                self.sky = Some(Self::allocate_capture(&mut *device, config, "sky", &lut)?);
            }
            for (index, probe) in self.probes.iter_mut().enumerate() {
                if probe.capture.is_none() {
                    let name = format!("probe {}", index);
                    probe.capture = Some(Self::allocate_capture(&mut *device, config, &name, &lut)?);
                }
            }
            (scratch, device.create_command_list()?)
        };

        let mut points: Vec<(Vec3, PbrCapture)> = Vec::with_capacity(self.probes.len() + 1);
        if !self.sky_user_set {
            if let Some(sky) = &self.sky {
                points.push((config.sky_probe_position, sky.clone()));
            }
        }
        points.extend(
            self.probes
                .iter()
                .filter_map(|probe| probe.capture.clone().map(|capture| (probe.position, capture))),
        );

        let mut stats = FrameStats::default();
        cmd.begin()?;
        cmd.push_debug_group("bake_probes")?;
        for (position, capture) in &points {
            render_to_cubemap(cmd.as_mut(), &mut stats, scene, &scratch, *position, 0)?;
            Self::record_convolution(cmd.as_mut(), &mut stats, internal, cube, &scratch, capture)?;
        }
        cmd.pop_debug_group()?;
        cmd.end()?;
        lock_device(device)?.submit(cmd.as_ref())?;

        engine_info!("cell::ProbeBaker", "Baked {} capture points ({} draws)", points.len(), stats.draw_calls);
        Ok(stats)
    }

    /// Convolve an existing environment cubemap into a new capture
    pub(crate) fn process_cubemap(
        &mut self,
        device: &Mutex<dyn GraphicsDevice>,
        config: &RendererConfig,
        internal: &InternalMaterials,
        cube: &Arc<dyn Mesh>,
        environment: &Arc<dyn Texture>,
    ) -> Result<PbrCapture> {
        let (capture, mut cmd) = {
            let mut device = lock_device(device)?;
            let lut = self.brdf_lut_or_create(&mut *device, config)?;
            let capture = Self::allocate_capture(&mut *device, config, environment.name(), &lut)?;
            (capture, device.create_command_list()?)
        };

        let mut stats = FrameStats::default();
        cmd.begin()?;
        cmd.push_debug_group("process_cubemap")?;
        Self::record_convolution(cmd.as_mut(), &mut stats, internal, cube, environment, &capture)?;
        cmd.pop_debug_group()?;
        cmd.end()?;
        lock_device(device)?.submit(cmd.as_ref())?;

        Ok(capture)
    }

    /// Project an equirectangular HDR map onto a new cubemap, then
    /// convolve it into a new capture
    pub(crate) fn process_environment_map(
        &mut self,
        device: &Mutex<dyn GraphicsDevice>,
        config: &RendererConfig,
        internal: &InternalMaterials,
        cube: &Arc<dyn Mesh>,
        equirectangular: &Arc<dyn Texture>,
    ) -> Result<PbrCapture> {
        let (environment, capture, mut cmd) = {
            let mut device = lock_device(device)?;
            let lut = self.brdf_lut_or_create(&mut *device, config)?;
            let environment = device.create_texture(cubemap_desc(
                format!("{} cubemap", equirectangular.name()),
                config.environment_resolution,
                1,
            ))?;
            let capture = Self::allocate_capture(&mut *device, config, equirectangular.name(), &lut)?;
            (environment, capture, device.create_command_list()?)
        };

        let mut projection = internal.hdr_to_cubemap.clone();
        projection.set_texture(ENVIRONMENT_SLOT, equirectangular.clone(), 0);

        let mut stats = FrameStats::default();
        cmd.begin()?;
        cmd.push_debug_group("process_environment_map")?;
        let draws = [DrawCall::new(&projection, cube, Mat4::IDENTITY)];
        render_to_cubemap(cmd.as_mut(), &mut stats, &draws, &environment, Vec3::ZERO, 0)?;
        Self::record_convolution(cmd.as_mut(), &mut stats, internal, cube, &environment, &capture)?;
        cmd.pop_debug_group()?;
        cmd.end()?;
        lock_device(device)?.submit(cmd.as_ref())?;

        Ok(capture)
    }
}

#[cfg(test)]
#[path = "probe_baker_tests.rs"]
mod tests;
