use std::sync::Arc;
use crate::error::{Error, Result};
use crate::graphics_device::{RenderTarget, Viewport};
use crate::renderer::draw::blit;
use crate::renderer::frame_stats::FrameStages;
use crate::renderer::pass_context::PassContext;
use super::post_process::SOURCE_UNIFORM;

/// Resolve the frame's final image into the output target
///
/// The output is the target set with `Renderer::set_target`, or the
/// default framebuffer at render size.
pub(crate) fn run(ctx: &mut PassContext<'_>, source: &Arc<dyn RenderTarget>) -> Result<()> {
    let texture = source.color_texture(0).ok_or_else(|| {
        Error::InvalidResource(format!("Render target '{}' has no color attachment", source.name()))
    })?;

    let material = &ctx.materials.internal().post_processing;
    let quad = &ctx.primitives.quad;
    let output = ctx.output;
    let viewport = match output {
        Some(target) => Viewport::from_size(target.width(), target.height()),
        None => Viewport::from_size(ctx.render_size.0, ctx.render_size.1),
    };

    ctx.begin_stage("final_blit", FrameStages::FINAL_BLIT)?;
    blit(ctx.cmd, ctx.stats, quad, material, texture, output, viewport, SOURCE_UNIFORM)?;
    ctx.end_stage()
}
