use std::sync::Arc;
use crate::command_buffer::CommandBuffer;
use crate::error::{Error, Result};
use crate::graphics_device::{RenderTarget, Viewport};
use crate::material::MaterialKind;
use crate::renderer::draw::blit;
use crate::renderer::frame_stats::FrameStages;
use crate::renderer::pass_context::PassContext;
use crate::engine_error;

/// Name under which each post-processing shader samples its input
pub(crate) const SOURCE_UNIFORM: &str = "TexSrc";

/// Run the post-processing chain in push order
///
/// Each material reads the previous result and writes the other target
/// of the lighting/post pair. Returns the target holding the final
/// image; the lighting target when the chain is empty or every link was
/// skipped.
pub(crate) fn run(ctx: &mut PassContext<'_>, commands: &CommandBuffer) -> Result<Arc<dyn RenderTarget>> {
    let targets = ctx.targets;
    let mut current = targets.lighting.clone();
    if commands.post_processing().is_empty() {
        return Ok(current);
    }

    let materials = ctx.materials;
    let quad = &ctx.primitives.quad;
    let (width, height) = ctx.render_size;
    let viewport = Viewport::from_size(width, height);
    let mut spare = targets.post.clone();

    ctx.begin_stage("post_process", FrameStages::POST_PROCESS)?;
    for &key in commands.post_processing() {
        let Some(material) = materials.material(key) else {
            engine_error!("cell::Renderer", "Post-processing chain references a released material");
            ctx.stats.skipped_draws += 1;
            continue;
        };
        debug_assert_eq!(material.kind(), MaterialKind::PostProcess);

        let source = current.color_texture(0).cloned().ok_or_else(|| {
            Error::InvalidResource(format!("Render target '{}' has no color attachment", current.name()))
        })?;
        if blit(ctx.cmd, ctx.stats, quad, material, &source, Some(&spare), viewport, SOURCE_UNIFORM)? {
            std::mem::swap(&mut current, &mut spare);
        }
    }
    ctx.end_stage()?;

    Ok(current)
}
