/// Fixed-function render state applied before each draw

use bitflags::bitflags;

bitflags! {
    /// Toggleable pipeline features
    ///
    /// `SHADOW_CAST` and `SHADOW_RECEIVE` are not GPU state: they tell the
    /// renderer whether a draw takes part in the shadow pass and whether
    /// shadow maps are bound for it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderStateFlags: u32 {
        const DEPTH_TEST = 1 << 0;
        const DEPTH_WRITE = 1 << 1;
        const CULL = 1 << 2;
        const BLEND = 1 << 3;
        const SHADOW_CAST = 1 << 4;
        const SHADOW_RECEIVE = 1 << 5;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullFace {
    Front,
    Back,
    FrontAndBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthCompare {
    Never,
    Less,
    LessEqual,
    Equal,
    Greater,
    GreaterEqual,
    Always,
}

/// Complete render state for a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderState {
    pub flags: RenderStateFlags,
    pub blend_src: BlendFactor,
    pub blend_dst: BlendFactor,
    pub cull_face: CullFace,
    pub depth_compare: DepthCompare,
}

impl Default for RenderState {
    /// Depth-tested opaque geometry, back faces culled, casting and
    /// receiving shadows
    fn default() -> Self {
        Self {
            flags: RenderStateFlags::DEPTH_TEST
                | RenderStateFlags::DEPTH_WRITE
                | RenderStateFlags::CULL
                | RenderStateFlags::SHADOW_CAST
                | RenderStateFlags::SHADOW_RECEIVE,
            blend_src: BlendFactor::SrcAlpha,
            blend_dst: BlendFactor::OneMinusSrcAlpha,
            cull_face: CullFace::Back,
            depth_compare: DepthCompare::Less,
        }
    }
}

impl RenderState {
    /// Full-screen pass: no depth, no culling, no blending
    pub fn fullscreen() -> Self {
        Self {
            flags: RenderStateFlags::empty(),
            ..Self::default()
        }
    }

    /// Additive light accumulation (One, One), depth untouched
    pub fn additive() -> Self {
        Self {
            flags: RenderStateFlags::BLEND,
            blend_src: BlendFactor::One,
            blend_dst: BlendFactor::One,
            ..Self::default()
        }
    }

    /// Additive light volume: front faces culled so the volume still
    /// lights pixels when the camera is inside it
    pub fn light_volume() -> Self {
        Self {
            flags: RenderStateFlags::BLEND | RenderStateFlags::CULL,
            blend_src: BlendFactor::One,
            blend_dst: BlendFactor::One,
            cull_face: CullFace::Front,
            ..Self::default()
        }
    }

    /// Depth-only shadow rendering
    pub fn shadow_depth() -> Self {
        Self {
            flags: RenderStateFlags::DEPTH_TEST | RenderStateFlags::DEPTH_WRITE | RenderStateFlags::CULL,
            cull_face: CullFace::Front,
            ..Self::default()
        }
    }

    /// Cubemap capture of a surrounding environment (viewed from inside)
    pub fn skybox() -> Self {
        Self {
            flags: RenderStateFlags::DEPTH_TEST,
            depth_compare: DepthCompare::LessEqual,
            ..Self::default()
        }
    }

    pub fn has(&self, flag: RenderStateFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn set(&mut self, flag: RenderStateFlags, enabled: bool) {
        self.flags.set(flag, enabled);
    }
}
