/// Renderer module - the frame driver and its pipeline stages
///
/// `Renderer` owns the per-frame command buffer and light registry, the
/// material library and the render targets. `render_pushed_commands`
/// records every stage into one command list and submits it.

mod renderer;
mod frame_stats;
mod frame_targets;
mod global_uniforms;
mod pass_context;
mod passes;
pub(crate) mod draw;
pub(crate) mod cubemap_capture;

pub use renderer::Renderer;
pub use frame_stats::{FrameStages, FrameStats};
pub use global_uniforms::{GlobalUniforms, MAX_GLOBAL_DIRECTIONAL_LIGHTS, MAX_GLOBAL_POINT_LIGHTS};
pub(crate) use renderer::lock_device;
