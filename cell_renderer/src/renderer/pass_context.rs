use std::sync::Arc;
use crate::camera::Camera;
use crate::config::RendererConfig;
use crate::error::Result;
use crate::graphics_device::{CommandList, RenderTarget, Texture};
use crate::ibl::{IrradianceProbe, PbrCapture};
use crate::material::MaterialLibrary;
use super::draw::ShadowMap;
use super::frame_stats::{FrameStages, FrameStats};
use super::frame_targets::{FrameTargets, Primitives};

/// Image-based lighting inputs of the lighting pass
pub(crate) struct Environment<'a> {
    pub sky: Option<&'a PbrCapture>,
    pub probes: &'a [IrradianceProbe],
    pub ambient_occlusion: &'a Arc<dyn Texture>,
}

/// Everything a pass reads or writes while a frame is recorded
///
/// Built once per frame by the renderer and handed to each pass in
/// pipeline order. `shadow_maps` is filled by the shadow pass.
pub(crate) struct PassContext<'a> {
    pub cmd: &'a mut dyn CommandList,
    pub materials: &'a MaterialLibrary,
    pub targets: &'a FrameTargets,
    pub primitives: &'a Primitives,
    pub camera: &'a Camera,
    pub config: &'a RendererConfig,
    pub environment: Environment<'a>,
    /// Final destination; `None` is the default framebuffer
    pub output: Option<&'a Arc<dyn RenderTarget>>,
    pub render_size: (u32, u32),
    pub stats: &'a mut FrameStats,
    pub shadow_maps: Vec<ShadowMap>,
}

impl PassContext<'_> {
    /// Open a named debug group and mark the stage as run
    pub fn begin_stage(&mut self, name: &str, stage: FrameStages) -> Result<()> {
        self.cmd.push_debug_group(name)?;
        self.stats.stages |= stage;
        Ok(())
    }

    pub fn end_stage(&mut self) -> Result<()> {
        self.cmd.pop_debug_group()
    }

    pub fn shadow_map_for(&self, light_index: usize) -> Option<&ShadowMap> {
        self.shadow_maps.iter().find(|shadow| shadow.light_index == light_index)
    }
}
