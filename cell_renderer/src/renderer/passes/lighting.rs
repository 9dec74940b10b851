/// Deferred lighting: accumulate every light's contribution from the
/// G-buffer into the HDR lighting target
///
/// Order: ambient (sky IBL), irradiance probe volumes, full-screen
/// directional lights, point light volumes. All but the ambient term are
/// blended additively.

use crate::command_buffer::CommandBuffer;
use crate::error::Result;
use crate::graphics_device::{CommandList, UniformValue, Viewport};
use crate::ibl::PbrCapture;
use crate::lighting::{LightRegistry, PointLight};
use crate::material::{UNIT_BRDF_LUT, UNIT_ENV_IRRADIANCE, UNIT_ENV_PREFILTER, UNIT_SHADOW_MAP, UNIT_SSAO};
use crate::renderer::draw::{
    bind_gbuffer, bind_material, clear_color_depth, draw_mesh, is_drawable, placed,
};
use crate::renderer::frame_stats::FrameStages;
use crate::renderer::pass_context::PassContext;

fn bind_capture(cmd: &mut dyn CommandList, capture: &PbrCapture) -> Result<()> {
    cmd.bind_texture(UNIT_ENV_IRRADIANCE, &capture.irradiance)?;
    cmd.bind_texture(UNIT_ENV_PREFILTER, &capture.prefiltered)?;
    cmd.bind_texture(UNIT_BRDF_LUT, &capture.brdf_lut)
}

pub(crate) fn run(ctx: &mut PassContext<'_>, commands: &CommandBuffer, lights: &LightRegistry) -> Result<()> {
    let targets = ctx.targets;
    let (width, height) = ctx.render_size;

    // Later stages composite over the lighting target even when no
    // surface was written to the G-buffer.
    if commands.deferred().is_empty() {
        ctx.cmd.bind_render_target(Some(&targets.lighting))?;
        ctx.cmd.set_viewport(Viewport::from_size(width, height))?;
        return ctx.cmd.clear(&clear_color_depth());
    }

    ctx.begin_stage("lighting", FrameStages::LIGHTING)?;
    ctx.cmd.bind_render_target(Some(&targets.lighting))?;
    ctx.cmd.set_viewport(Viewport::from_size(width, height))?;
    ctx.cmd.clear(&clear_color_depth())?;

    ambient(ctx)?;
    irradiance_probes(ctx)?;
    directional(ctx, lights)?;
    point(ctx, lights)?;

    ctx.end_stage()
}

fn ambient(ctx: &mut PassContext<'_>) -> Result<()> {
    let material = &ctx.materials.internal().deferred_ambient;
    let quad = &ctx.primitives.quad;
    let sky = ctx.environment.sky;
    let ambient_occlusion = ctx.environment.ambient_occlusion;
    let gbuffer = &ctx.targets.gbuffer;

    if !is_drawable(ctx.stats, material, quad) {
        return Ok(());
    }
    bind_material(ctx.cmd, material, true)?;
    bind_gbuffer(ctx.cmd, gbuffer)?;
    if let Some(sky) = sky {
        bind_capture(ctx.cmd, sky)?;
    }
    ctx.cmd.bind_texture(UNIT_SSAO, ambient_occlusion)?;
    draw_mesh(ctx.cmd, ctx.stats, quad)
}

fn irradiance_probes(ctx: &mut PassContext<'_>) -> Result<()> {
    let material = &ctx.materials.internal().deferred_irradiance;
    let sphere = &ctx.primitives.sphere;
    let gbuffer = &ctx.targets.gbuffer;
    let camera = ctx.camera;
    let culling = ctx.config.frustum_culling;

    let baked: Vec<_> = ctx
        .environment
        .probes
        .iter()
        .filter_map(|probe| probe.capture.as_ref().map(|capture| (probe, capture)))
        .collect();
    if baked.is_empty() || !is_drawable(ctx.stats, material, sphere) {
        return Ok(());
    }

    bind_material(ctx.cmd, material, true)?;
    bind_gbuffer(ctx.cmd, gbuffer)?;
    for (probe, capture) in baked {
        if culling && !camera.frustum().intersects_sphere(probe.position, probe.radius) {
            continue;
        }
        bind_capture(ctx.cmd, capture)?;
        ctx.cmd.set_uniform("probePos", &UniformValue::Vec3(probe.position))?;
        ctx.cmd.set_uniform("probeRadius", &UniformValue::Float(probe.radius))?;
        ctx.cmd.set_uniform("model", &UniformValue::Mat4(placed(probe.position, probe.radius)))?;
        draw_mesh(ctx.cmd, ctx.stats, sphere)?;
    }
    Ok(())
}

fn directional(ctx: &mut PassContext<'_>, lights: &LightRegistry) -> Result<()> {
    let material = &ctx.materials.internal().deferred_directional;
    let quad = &ctx.primitives.quad;
    let gbuffer = &ctx.targets.gbuffer;

    if lights.directional().is_empty() || !is_drawable(ctx.stats, material, quad) {
        return Ok(());
    }

    bind_material(ctx.cmd, material, true)?;
    bind_gbuffer(ctx.cmd, gbuffer)?;
    for (index, light) in lights.directional().iter().enumerate() {
        let direction = light.direction.normalize_or_zero();
        ctx.cmd.set_uniform("lightDir", &UniformValue::Vec3(direction))?;
        ctx.cmd.set_uniform("lightColor", &UniformValue::Vec3(light.color * light.intensity))?;

        match ctx.shadow_map_for(index).cloned() {
            Some(shadow) => {
                ctx.cmd.bind_texture(UNIT_SHADOW_MAP, &shadow.texture)?;
                ctx.cmd.set_uniform("lightShadowViewProjection", &UniformValue::Mat4(shadow.view_projection))?;
                ctx.cmd.set_uniform("ShadowsEnabled", &UniformValue::Int(1))?;
            }
            None => ctx.cmd.set_uniform("ShadowsEnabled", &UniformValue::Int(0))?,
        }
        draw_mesh(ctx.cmd, ctx.stats, quad)?;
    }
    Ok(())
}

fn point(ctx: &mut PassContext<'_>, lights: &LightRegistry) -> Result<()> {
    let material = &ctx.materials.internal().deferred_point;
    let sphere = &ctx.primitives.sphere;
    let gbuffer = &ctx.targets.gbuffer;
    let camera = ctx.camera;
    let culling = ctx.config.frustum_culling;

    let visible: Vec<&PointLight> = lights.point().iter().filter(|light| light.visible).collect();
    if visible.is_empty() || !is_drawable(ctx.stats, material, sphere) {
        return Ok(());
    }

    bind_material(ctx.cmd, material, true)?;
    bind_gbuffer(ctx.cmd, gbuffer)?;
    for light in visible {
        if culling && !camera.frustum().intersects_sphere(light.position, light.radius) {
            ctx.stats.culled_lights += 1;
            continue;
        }
        ctx.cmd.set_uniform("lightPos", &UniformValue::Vec3(light.position))?;
        ctx.cmd.set_uniform("lightRadius", &UniformValue::Float(light.radius))?;
        ctx.cmd.set_uniform("lightColor", &UniformValue::Vec3(light.color * light.intensity))?;
        ctx.cmd.set_uniform("model", &UniformValue::Mat4(light.volume_transform()))?;
        draw_mesh(ctx.cmd, ctx.stats, sphere)?;
    }
    Ok(())
}
