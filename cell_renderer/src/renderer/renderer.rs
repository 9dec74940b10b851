/// Deferred frame driver
///
/// Per frame, callers push draws, post-processors and lights, then call
/// `render_pushed_commands`. The frame is recorded in a fixed order:
///
/// 1. shadow: one depth map per shadow-casting directional light
/// 2. geometry: deferred commands into the G-buffer
/// 3. lighting: ambient/IBL, probes, directional and point lights
/// 4. forward: custom commands over the lit image, back to front
/// 5. post_process: ping-pong chain in push order
/// 6. final_blit: result into the output target
///
/// Stages without work record nothing. The command buffer and the light
/// registry are emptied after every frame, whether it succeeded or not.

use std::sync::{Arc, Mutex, MutexGuard};
use glam::{Mat4, Vec3};
use crate::camera::Camera;
use crate::command_buffer::{CommandBuffer, RenderCommand};
use crate::config::RendererConfig;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, Mesh, RenderTarget, Shader, Texture, TextureDesc, TextureDimension, TextureFormat,
    Viewport,
};
use crate::ibl::{IrradianceProbe, PbrCapture, ProbeBaker};
use crate::lighting::{Light, LightRegistry};
use crate::material::{Material, MaterialKey, MaterialKind, MaterialLibrary, PassBucket, TemplateKey};
use crate::scene::{DrawItem, RenderSource};
use crate::{engine_bail, engine_error, engine_info, engine_trace};
use super::cubemap_capture::render_to_cubemap;
use super::draw::{self, DrawCall};
use super::frame_stats::FrameStats;
use super::frame_targets::{FrameTargets, Primitives};
use super::global_uniforms::GlobalUniforms;
use super::pass_context::{Environment, PassContext};
use super::passes;

/// Vertical field of view of the default camera
const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_3;
const DEFAULT_NEAR: f32 = 0.1;
const DEFAULT_FAR: f32 = 100.0;

/// Lock the shared device, mapping a poisoned lock to a backend error
pub(crate) fn lock_device<'a>(
    device: &'a Mutex<dyn GraphicsDevice>,
) -> Result<MutexGuard<'a, dyn GraphicsDevice + 'static>> {
    device
        .lock()
        .map_err(|_| Error::BackendError("Graphics device lock poisoned".to_string()))
}

fn initialization<T>(what: &str, result: Result<T>) -> Result<T> {
    result.map_err(|e| Error::InitializationFailed(format!("{}: {}", what, e)))
}

pub struct Renderer {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    config: RendererConfig,
    render_size: (u32, u32),

    materials: MaterialLibrary,
    command_buffer: CommandBuffer,
    lights: LightRegistry,

    targets: FrameTargets,
    primitives: Primitives,
    camera: Camera,
    output: Option<Arc<dyn RenderTarget>>,

    /// 1x1 white texture bound when no ambient occlusion map is set
    white_texture: Arc<dyn Texture>,
    ambient_occlusion: Option<Arc<dyn Texture>>,

    ibl: ProbeBaker,
}

impl Renderer {
    /// Validate `config` and create every resource the pipeline needs
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, config: RendererConfig) -> Result<Self> {
        config.validate()?;

        let (materials, targets, primitives, white_texture) = {
            let mut guard = lock_device(&device)?;
            let materials = initialization("material library", MaterialLibrary::new(&mut *guard))?;
            let targets = initialization(
                "render targets",
                FrameTargets::create(&mut *guard, &config, config.width, config.height),
            )?;
            let primitives = initialization("primitive meshes", Primitives::create(&mut *guard))?;
            let white_texture = initialization("default textures", guard.create_texture(TextureDesc {
                name: "white".to_string(),
                width: 1,
                height: 1,
                format: TextureFormat::R8G8B8A8_UNORM,
                dimension: TextureDimension::Tex2D,
                mip_levels: 1,
                data: Some(vec![255; 4]),
            }))?;
            (materials, targets, primitives, white_texture)
        };

        let viewport = Viewport::from_size(config.width, config.height);
        let camera = Camera::perspective(DEFAULT_FOV_Y, DEFAULT_NEAR, DEFAULT_FAR, viewport);

        engine_info!("cell::Renderer", "Renderer initialized at {}x{} ({} shadow map slots)",
            config.width, config.height, config.max_shadow_maps);

        Ok(Self {
            device,
            render_size: (config.width, config.height),
            config,
            materials,
            command_buffer: CommandBuffer::new(),
            lights: LightRegistry::new(),
            targets,
            primitives,
            camera,
            output: None,
            white_texture,
            ambient_occlusion: None,
            ibl: ProbeBaker::new(),
        })
    }

    // ===== STATE =====

    pub fn device(&self) -> &Arc<Mutex<dyn GraphicsDevice>> {
        &self.device
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Resize the screen-sized render targets
    pub fn set_render_size(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            engine_bail!("cell::Renderer", "Render size must be non-zero (got {}x{})", width, height);
        }
        if (width, height) == self.render_size {
            return Ok(());
        }

        let mut device = lock_device(&self.device)?;
        // The old targets may still be in use by submitted frames
        device.wait_idle()?;
        self.targets.resize(&mut *device, width, height)?;
        drop(device);
        self.render_size = (width, height);
        engine_info!("cell::Renderer", "Render size set to {}x{}", width, height);
        Ok(())
    }

    pub fn render_size(&self) -> (u32, u32) {
        self.render_size
    }

    /// Where the final blit writes; `None` is the default framebuffer
    pub fn set_target(&mut self, target: Option<Arc<dyn RenderTarget>>) {
        self.output = target;
    }

    pub fn target(&self) -> Option<&Arc<dyn RenderTarget>> {
        self.output.as_ref()
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Screen-space ambient occlusion sampled by the ambient term;
    /// `None` restores full (white) visibility
    pub fn set_ambient_occlusion(&mut self, texture: Option<Arc<dyn Texture>>) {
        self.ambient_occlusion = texture;
    }

    // ===== MATERIALS =====

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut MaterialLibrary {
        &mut self.materials
    }

    /// New instance of the template `key`; `None` (and an error log) when
    /// no such template exists
    pub fn create_material(&mut self, key: impl Into<TemplateKey>) -> Option<MaterialKey> {
        self.materials.create_material(key.into())
    }

    pub fn create_custom_material(&mut self, shader: Arc<dyn Shader>) -> MaterialKey {
        self.materials.create_custom_material(shader)
    }

    pub fn create_post_processing_material(&mut self, shader: Arc<dyn Shader>) -> MaterialKey {
        self.materials.create_post_processing_material(shader)
    }

    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.material(key)
    }

    pub fn material_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.material_mut(key)
    }

    // ===== FRAME SUBMISSION =====

    /// Queue a draw for the next frame
    ///
    /// Returns `false` (and logs) when `material` is not owned by this
    /// renderer or is a post-processing material.
    pub fn push_render(&mut self, mesh: Arc<dyn Mesh>, material: MaterialKey, transform: Mat4) -> bool {
        let Some(instance) = self.materials.material(material) else {
            engine_error!("cell::Renderer", "Draw of mesh '{}' references an unknown material", mesh.name());
            return false;
        };

        let bucket = instance.pass_bucket();
        if bucket == PassBucket::PostProcess {
            engine_error!("cell::Renderer",
                "Post-processing material pushed as a draw of mesh '{}'; use push_post_processor", mesh.name());
            return false;
        }
        self.command_buffer.push(RenderCommand::new(mesh, material, transform), bucket)
    }

    /// Queue every drawable of `source`; returns the number queued
    pub fn push_render_node(&mut self, source: &dyn RenderSource) -> usize {
        let mut items = Vec::new();
        source.collect_draws(&mut items);

        items
            .into_iter()
            .filter(|item| self.push_render(item.mesh.clone(), item.material, item.transform))
            .count()
    }

    /// Append a post-processing material to the chain of the next frame
    pub fn push_post_processor(&mut self, material: MaterialKey) -> bool {
        match self.materials.material(material).map(|instance| instance.kind()) {
            Some(MaterialKind::PostProcess) => {
                self.command_buffer.push_post_processor(material);
                true
            }
            Some(kind) => {
                engine_error!("cell::Renderer", "Material of kind {:?} cannot be used for post-processing", kind);
                false
            }
            None => {
                engine_error!("cell::Renderer", "Post-processor references an unknown material");
                false
            }
        }
    }

    /// Register a light for the next frame
    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.add(light);
    }

    pub fn command_buffer(&self) -> &CommandBuffer {
        &self.command_buffer
    }

    pub fn lights(&self) -> &LightRegistry {
        &self.lights
    }

    // ===== FRAME EXECUTION =====

    /// Record and submit one frame from everything pushed since the last
    /// frame
    pub fn render_pushed_commands(&mut self) -> Result<FrameStats> {
        let result = self.record_frame();
        self.command_buffer.clear();
        self.lights.clear();

        match &result {
            Ok(stats) => engine_trace!("cell::Renderer",
                "Frame: {} draws, {} skipped, {} culled, {} shadow maps",
                stats.draw_calls, stats.skipped_draws, stats.culled_commands, stats.shadow_maps),
            Err(e) => engine_error!("cell::Renderer", "Frame failed: {}", e),
        }
        result
    }

    fn record_frame(&mut self) -> Result<FrameStats> {
        self.command_buffer.sort(&self.camera, &self.materials);
        let globals = GlobalUniforms::new(&self.camera, &self.lights);

        let mut cmd = lock_device(&self.device)?.create_command_list()?;
        let mut stats = FrameStats::default();

        cmd.begin()?;
        cmd.update_global_uniforms(globals.as_bytes())?;
        {
            let mut ctx = PassContext {
                cmd: cmd.as_mut(),
                materials: &self.materials,
                targets: &self.targets,
                primitives: &self.primitives,
                camera: &self.camera,
                config: &self.config,
                environment: Environment {
                    sky: self.ibl.sky_capture(),
                    probes: self.ibl.probes(),
                    ambient_occlusion: self.ambient_occlusion.as_ref().unwrap_or(&self.white_texture),
                },
                output: self.output.as_ref(),
                render_size: self.render_size,
                stats: &mut stats,
                shadow_maps: Vec::new(),
            };

            passes::shadow::run(&mut ctx, &self.command_buffer, &self.lights)?;
            passes::geometry::run(&mut ctx, &self.command_buffer)?;
            passes::lighting::run(&mut ctx, &self.command_buffer, &self.lights)?;
            passes::forward::run(&mut ctx, &self.command_buffer, &self.lights)?;
            let result = passes::post_process::run(&mut ctx, &self.command_buffer)?;
            passes::final_blit::run(&mut ctx, &result)?;
        }
        cmd.end()?;

        lock_device(&self.device)?.submit(cmd.as_ref())?;
        Ok(stats)
    }

    /// Copy `src` into `dst` (`None`: default framebuffer) through a
    /// full-screen quad, outside of the frame pipeline
    ///
    /// `material` defaults to the internal blit material; the source is
    /// exposed to its shader as `texture_uniform`.
    pub fn blit(
        &mut self,
        src: &Arc<dyn Texture>,
        dst: Option<&Arc<dyn RenderTarget>>,
        material: Option<MaterialKey>,
        texture_uniform: &str,
    ) -> Result<FrameStats> {
        let material = match material {
            Some(key) => match self.materials.material(key) {
                Some(material) => material,
                None => engine_bail!("cell::Renderer", "Blit references an unknown material"),
            },
            None => &self.materials.internal().blit,
        };
        let viewport = match dst {
            Some(target) => Viewport::from_size(target.width(), target.height()),
            None => Viewport::from_size(self.render_size.0, self.render_size.1),
        };

        let mut cmd = lock_device(&self.device)?.create_command_list()?;
        let mut stats = FrameStats::default();
        cmd.begin()?;
        cmd.push_debug_group("blit")?;
        draw::blit(cmd.as_mut(), &mut stats, &self.primitives.quad, material, src, dst, viewport, texture_uniform)?;
        cmd.pop_debug_group()?;
        cmd.end()?;
        lock_device(&self.device)?.submit(cmd.as_ref())?;
        Ok(stats)
    }

    // ===== IMAGE-BASED LIGHTING =====

    /// Use `capture` as the sky lighting; later bakes keep it
    pub fn set_sky_capture(&mut self, capture: PbrCapture) {
        self.ibl.set_sky_capture(capture);
    }

    pub fn sky_capture(&self) -> Option<&PbrCapture> {
        self.ibl.sky_capture()
    }

    /// Build a capture from an equirectangular HDR environment map
    pub fn process_environment_map(&mut self, equirectangular: &Arc<dyn Texture>) -> Result<PbrCapture> {
        self.ibl.process_environment_map(
            &self.device,
            &self.config,
            self.materials.internal(),
            &self.primitives.cube,
            equirectangular,
        )
    }

    /// Build a capture from an environment cubemap
    pub fn process_cubemap(&mut self, cubemap: &Arc<dyn Texture>) -> Result<PbrCapture> {
        if cubemap.info().dimension != TextureDimension::Cube {
            engine_bail!("cell::Renderer", "Texture '{}' is not a cubemap", cubemap.name());
        }
        self.ibl.process_cubemap(
            &self.device,
            &self.config,
            self.materials.internal(),
            &self.primitives.cube,
            cubemap,
        )
    }

    /// Add a local irradiance probe; it contributes once baked
    pub fn add_irradiance_probe(&mut self, position: Vec3, radius: f32) {
        self.ibl.add_probe(position, radius);
    }

    pub fn clear_irradiance_probes(&mut self) {
        self.ibl.clear_probes();
    }

    pub fn irradiance_probes(&self) -> &[IrradianceProbe] {
        self.ibl.probes()
    }

    /// Capture `scene` at the sky position and every irradiance probe
    ///
    /// Deferred materials draw through the forward-lit scene capture
    /// material; custom materials keep their own shader. Re-baking writes
    /// into the textures of the previous bake.
    pub fn bake_probes(&mut self, scene: &dyn RenderSource) -> Result<FrameStats> {
        let mut items = Vec::new();
        scene.collect_draws(&mut items);
        let captures = capture_materials(&self.materials, &items);
        let draws = resolve_draws(&self.materials, &captures, &items);

        self.ibl.bake(&self.device, &self.config, self.materials.internal(), &self.primitives.cube, &draws)
    }

    /// Render `scene` into the six faces of `target` at `mip_level`
    pub fn render_to_cubemap(
        &mut self,
        scene: &dyn RenderSource,
        target: &Arc<dyn Texture>,
        position: Vec3,
        mip_level: u32,
    ) -> Result<FrameStats> {
        let mut items = Vec::new();
        scene.collect_draws(&mut items);
        let captures = capture_materials(&self.materials, &items);
        let draws = resolve_draws(&self.materials, &captures, &items);

        let mut cmd = lock_device(&self.device)?.create_command_list()?;
        let mut stats = FrameStats::default();
        cmd.begin()?;
        cmd.push_debug_group("render_to_cubemap")?;
        render_to_cubemap(cmd.as_mut(), &mut stats, &draws, target, position, mip_level)?;
        cmd.pop_debug_group()?;
        cmd.end()?;
        lock_device(&self.device)?.submit(cmd.as_ref())?;
        Ok(stats)
    }
}

/// Forward-lit capture materials for the deferred items of a scene
///
/// One entry per item, `None` where the item keeps its own material.
fn capture_materials(materials: &MaterialLibrary, items: &[DrawItem]) -> Vec<Option<Material>> {
    items
        .iter()
        .map(|item| {
            let material = materials.material(item.material)?;
            (material.kind() == MaterialKind::Default).then(|| materials.internal().capture_material(material))
        })
        .collect()
}

/// Pair scene items with their materials, dropping unknown keys and
/// post-processing materials
fn resolve_draws<'a>(
    materials: &'a MaterialLibrary,
    captures: &'a [Option<Material>],
    items: &'a [DrawItem],
) -> Vec<DrawCall<'a>> {
    items
        .iter()
        .zip(captures)
        .filter_map(|(item, capture)| {
            let material = match capture {
                Some(capture) => capture,
                None => materials.material(item.material)?,
            };
            (material.kind() != MaterialKind::PostProcess)
                .then(|| DrawCall::new(material, &item.mesh, item.transform))
        })
        .collect()
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
