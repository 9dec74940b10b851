use crate::command_buffer::CommandBuffer;
use crate::error::Result;
use crate::graphics_device::{UniformValue, Viewport};
use crate::material::PassBucket;
use crate::renderer::draw::{bind_material, clear_color_depth, draw_mesh, is_drawable};
use crate::renderer::frame_stats::FrameStages;
use crate::renderer::pass_context::PassContext;
use crate::engine_error;

/// Fill the G-buffer with every deferred command inside the view frustum
pub(crate) fn run(ctx: &mut PassContext<'_>, commands: &CommandBuffer) -> Result<()> {
    if commands.deferred().is_empty() {
        return Ok(());
    }

    let materials = ctx.materials;
    let targets = ctx.targets;
    let camera = ctx.camera;
    let culling = ctx.config.frustum_culling;
    let (width, height) = ctx.render_size;

    ctx.begin_stage("geometry", FrameStages::GEOMETRY)?;
    ctx.cmd.bind_render_target(Some(&targets.gbuffer))?;
    ctx.cmd.set_viewport(Viewport::from_size(width, height))?;
    ctx.cmd.clear(&clear_color_depth())?;

    for command in commands.deferred() {
        let Some(material) = materials.material(command.material) else {
            engine_error!("cell::Renderer", "Deferred command references a released material");
            ctx.stats.skipped_draws += 1;
            continue;
        };
        debug_assert_eq!(material.pass_bucket(), PassBucket::Deferred);

        if culling {
            if let Some(bounds) = &command.bounds {
                if !camera.frustum().intersects_aabb(bounds) {
                    ctx.stats.culled_commands += 1;
                    continue;
                }
            }
        }

        if !is_drawable(ctx.stats, material, &command.mesh) {
            continue;
        }
        bind_material(ctx.cmd, material, true)?;
        ctx.cmd.set_uniform("model", &UniformValue::Mat4(command.transform))?;
        draw_mesh(ctx.cmd, ctx.stats, &command.mesh)?;
    }
    ctx.end_stage()
}
