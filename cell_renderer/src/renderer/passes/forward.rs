use crate::command_buffer::CommandBuffer;
use crate::error::Result;
use crate::graphics_device::{UniformValue, Viewport};
use crate::lighting::{LightRegistry, PointLight};
use crate::renderer::draw::{
    bind_material, draw_mesh, is_drawable, placed, render_custom_command, DrawCall,
};
use crate::renderer::frame_stats::FrameStages;
use crate::renderer::pass_context::PassContext;
use crate::engine_error;

/// Scale of the debug sphere drawn at point lights
const DEBUG_LIGHT_SCALE: f32 = 0.25;

/// Draw custom (forward) commands over the lit image, back to front
///
/// The G-buffer depth is copied into the lighting target first, so
/// forward geometry is occluded by deferred surfaces. Without deferred
/// geometry the depth cleared by the lighting stage is kept.
pub(crate) fn run(ctx: &mut PassContext<'_>, commands: &CommandBuffer, lights: &LightRegistry) -> Result<()> {
    let debug_lights: Vec<&PointLight> = if ctx.config.render_lights {
        lights.point().iter().filter(|light| light.visible && light.render_mesh).collect()
    } else {
        Vec::new()
    };
    if commands.custom().is_empty() && debug_lights.is_empty() {
        return Ok(());
    }

    let materials = ctx.materials;
    let targets = ctx.targets;
    let (width, height) = ctx.render_size;

    ctx.begin_stage("forward", FrameStages::FORWARD)?;
    ctx.cmd.bind_render_target(Some(&targets.lighting))?;
    ctx.cmd.set_viewport(Viewport::from_size(width, height))?;
    if ctx.stats.ran(FrameStages::GEOMETRY) {
        ctx.cmd.copy_depth(&targets.gbuffer, &targets.lighting)?;
    }

    let shadow_maps = ctx.shadow_maps.clone();
    for command in commands.custom() {
        let Some(material) = materials.material(command.material) else {
            engine_error!("cell::Renderer", "Custom command references a released material");
            ctx.stats.skipped_draws += 1;
            continue;
        };
        let draw = DrawCall::new(material, &command.mesh, command.transform);
        render_custom_command(ctx.cmd, ctx.stats, &draw, None, &shadow_maps, true)?;
    }

    debug_light_meshes(ctx, &debug_lights)?;
    ctx.end_stage()
}

fn debug_light_meshes(ctx: &mut PassContext<'_>, lights: &[&PointLight]) -> Result<()> {
    let material = &ctx.materials.internal().debug_light;
    let sphere = &ctx.primitives.sphere;

    if lights.is_empty() || !is_drawable(ctx.stats, material, sphere) {
        return Ok(());
    }

    bind_material(ctx.cmd, material, true)?;
    for light in lights {
        ctx.cmd.set_uniform("lightColor", &UniformValue::Vec3(light.color * light.intensity))?;
        ctx.cmd.set_uniform("model", &UniformValue::Mat4(placed(light.position, DEBUG_LIGHT_SCALE)))?;
        draw_mesh(ctx.cmd, ctx.stats, sphere)?;
    }
    Ok(())
}
