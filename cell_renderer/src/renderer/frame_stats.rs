use bitflags::bitflags;

bitflags! {
    /// Pipeline stages that recorded work in a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FrameStages: u32 {
        const SHADOW = 1 << 0;
        const GEOMETRY = 1 << 1;
        const LIGHTING = 1 << 2;
        const FORWARD = 1 << 3;
        const POST_PROCESS = 1 << 4;
        const FINAL_BLIT = 1 << 5;
    }
}

/// Counters collected while recording one frame (or one bake)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Meshes submitted to the command list
    pub draw_calls: u32,
    /// Draws skipped because their shader or mesh was not usable
    pub skipped_draws: u32,
    /// Deferred commands rejected by frustum culling
    pub culled_commands: u32,
    /// Point lights rejected by frustum culling
    pub culled_lights: u32,
    /// Directional shadow maps rendered
    pub shadow_maps: u32,
    pub stages: FrameStages,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            draw_calls: 0,
            skipped_draws: 0,
            culled_commands: 0,
            culled_lights: 0,
            shadow_maps: 0,
            stages: FrameStages::empty(),
        }
    }
}

impl FrameStats {
    pub fn ran(&self, stage: FrameStages) -> bool {
        self.stages.contains(stage)
    }
}
