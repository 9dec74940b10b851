use crate::command_buffer::{CommandBuffer, RenderCommand};
use crate::error::Result;
use crate::graphics_device::{ClearValue, UniformValue, Viewport};
use crate::lighting::LightRegistry;
use crate::renderer::draw::{bind_material, draw_mesh, is_drawable, ShadowMap};
use crate::renderer::frame_stats::FrameStages;
use crate::renderer::pass_context::PassContext;

/// Render one depth map per shadow-casting directional light
///
/// Casters are the deferred commands whose material casts shadows;
/// forward materials never write shadow maps. Lights beyond `max_shadow_maps` are lit unshadowed.
pub(crate) fn run(ctx: &mut PassContext<'_>, commands: &CommandBuffer, lights: &LightRegistry) -> Result<()> {
    let config = ctx.config;
    let materials = ctx.materials;
    let targets = ctx.targets;

    let shadowed: Vec<_> = lights.shadow_casters(config.max_shadow_maps).collect();
    if shadowed.is_empty() {
        return Ok(());
    }

    let casters: Vec<&RenderCommand> = commands
        .deferred()
        .iter()
        .filter(|command| {
            materials
                .material(command.material)
                .is_some_and(|material| material.casts_shadows())
        })
        .collect();
    if casters.is_empty() {
        return Ok(());
    }

    let material = &materials.internal().shadow_directional;
    let volume = config.shadow_volume();
    let size = config.shadow_map_size;

    ctx.begin_stage("shadow", FrameStages::SHADOW)?;
    for (slot, (light_index, light)) in shadowed.into_iter().enumerate() {
        let Some(target) = targets.shadows.get(slot) else { break };
        let Some(depth) = target.depth_texture() else { continue };
        let view_projection = light.shadow_view_projection(&volume);

        ctx.cmd.bind_render_target(Some(target))?;
        ctx.cmd.set_viewport(Viewport::from_size(size, size))?;
        ctx.cmd.clear(&[ClearValue::DepthStencil { depth: 1.0, stencil: 0 }])?;

        bind_material(ctx.cmd, material, true)?;
        ctx.cmd.set_uniform("lightSpaceMatrix", &UniformValue::Mat4(view_projection))?;

        for command in &casters {
            if !is_drawable(ctx.stats, material, &command.mesh) {
                continue;
            }
            ctx.cmd.set_uniform("model", &UniformValue::Mat4(command.transform))?;
            draw_mesh(ctx.cmd, ctx.stats, &command.mesh)?;
        }

        ctx.shadow_maps.push(ShadowMap { light_index, texture: depth.clone(), view_projection });
        ctx.stats.shadow_maps += 1;
    }
    ctx.end_stage()
}
