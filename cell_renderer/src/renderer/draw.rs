/// Draw helpers shared by the passes, the public blit and the probe baker

use std::sync::Arc;
use glam::{Mat4, Vec3};
use crate::camera::Camera;
use crate::error::Result;
use crate::graphics_device::{
    ClearValue, CommandList, Mesh, RenderState, RenderTarget, Texture, UniformValue, Viewport,
};
use crate::material::{
    Material, UNIT_FORWARD_SHADOW_MAPS, UNIT_G_ALBEDO_AO, UNIT_G_NORMAL_ROUGHNESS,
    UNIT_G_POSITION_METALLIC,
};
use crate::engine_trace;
use super::frame_stats::FrameStats;

/// Color cleared into every target at the start of its pass
pub(crate) const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

pub(crate) fn clear_color_depth() -> [ClearValue; 2] {
    [ClearValue::Color(CLEAR_COLOR), ClearValue::DepthStencil { depth: 1.0, stencil: 0 }]
}

/// A resolved draw: material and mesh with a world transform
pub(crate) struct DrawCall<'a> {
    pub material: &'a Material,
    pub mesh: &'a Arc<dyn Mesh>,
    pub transform: Mat4,
}

impl<'a> DrawCall<'a> {
    pub fn new(material: &'a Material, mesh: &'a Arc<dyn Mesh>, transform: Mat4) -> Self {
        Self { material, mesh, transform }
    }
}

/// Directional shadow map rendered this frame
#[derive(Clone)]
pub(crate) struct ShadowMap {
    /// Index of the light in the registry's directional list
    pub light_index: usize,
    pub texture: Arc<dyn Texture>,
    pub view_projection: Mat4,
}

/// Whether `material` and `mesh` can be drawn; counts a skip otherwise
pub(crate) fn is_drawable(stats: &mut FrameStats, material: &Material, mesh: &Arc<dyn Mesh>) -> bool {
    if !material.shader().is_valid() {
        engine_trace!("cell::Renderer", "Skipping draw of '{}': shader '{}' is not valid",
            mesh.name(), material.shader().name());
        stats.skipped_draws += 1;
        return false;
    }
    if !mesh.is_valid() {
        engine_trace!("cell::Renderer", "Skipping draw: mesh '{}' is not valid", mesh.name());
        stats.skipped_draws += 1;
        return false;
    }
    true
}

/// Bind the material's shader and push its uniforms and samplers
///
/// Each texture slot sets its sampler uniform to the slot's unit before
/// the texture is bound to that unit.
pub(crate) fn bind_material(cmd: &mut dyn CommandList, material: &Material, apply_state: bool) -> Result<()> {
    if apply_state {
        cmd.set_render_state(material.render_state())?;
    }
    cmd.bind_shader(material.shader())?;

    for (name, value) in material.uniforms() {
        cmd.set_uniform(name, value)?;
    }
    for slot in material.texture_slots() {
        if !slot.texture().is_valid() {
            continue;
        }
        cmd.set_uniform(slot.name(), &UniformValue::Int(slot.unit() as i32))?;
        cmd.bind_texture(slot.unit(), slot.texture())?;
    }
    Ok(())
}

/// Bind the three G-buffer color attachments to their lighting units
pub(crate) fn bind_gbuffer(cmd: &mut dyn CommandList, gbuffer: &Arc<dyn RenderTarget>) -> Result<()> {
    let units = [UNIT_G_POSITION_METALLIC, UNIT_G_NORMAL_ROUGHNESS, UNIT_G_ALBEDO_AO];
    for (index, unit) in units.into_iter().enumerate() {
        if let Some(texture) = gbuffer.color_texture(index) {
            cmd.bind_texture(unit, texture)?;
        }
    }
    Ok(())
}

/// Submit one mesh and count it
pub(crate) fn draw_mesh(cmd: &mut dyn CommandList, stats: &mut FrameStats, mesh: &Arc<dyn Mesh>) -> Result<()> {
    cmd.draw_mesh(mesh)?;
    stats.draw_calls += 1;
    Ok(())
}

/// Forward-draw one command with its own material
///
/// - `camera`: when set, its matrices are pushed as per-draw uniforms
///   (cubemap captures); otherwise the global block is used
/// - `shadow_maps`: bound when the material receives shadows
/// - `update_state`: apply the material state before the draw and
///   restore the default state after it
///
/// Returns `false` when the draw was skipped.
pub(crate) fn render_custom_command(
    cmd: &mut dyn CommandList,
    stats: &mut FrameStats,
    draw: &DrawCall<'_>,
    camera: Option<&Camera>,
    shadow_maps: &[ShadowMap],
    update_state: bool,
) -> Result<bool> {
    if !is_drawable(stats, draw.material, draw.mesh) {
        return Ok(false);
    }

    bind_material(cmd, draw.material, update_state)?;

    if let Some(camera) = camera {
        cmd.set_uniform("projection", &UniformValue::Mat4(*camera.projection_matrix()))?;
        cmd.set_uniform("view", &UniformValue::Mat4(*camera.view_matrix()))?;
        cmd.set_uniform("CamPos", &UniformValue::Vec3(camera.position()))?;
    }

    if draw.material.receives_shadows() {
        for (i, shadow) in shadow_maps.iter().enumerate() {
            let unit = UNIT_FORWARD_SHADOW_MAPS + i as u32;
            cmd.set_uniform(&format!("lightShadowMap{}", i + 1), &UniformValue::Int(unit as i32))?;
            cmd.set_uniform(&format!("lightShadowViewProjection{}", i + 1), &UniformValue::Mat4(shadow.view_projection))?;
            cmd.bind_texture(unit, &shadow.texture)?;
        }
    }

    cmd.set_uniform("model", &UniformValue::Mat4(draw.transform))?;
    draw_mesh(cmd, stats, draw.mesh)?;

    if update_state {
        cmd.set_render_state(&RenderState::default())?;
    }
    Ok(true)
}

/// Copy `src` into `dst` through a full-screen quad
///
/// `dst = None` targets the default framebuffer. The source is bound to
/// unit 0 and exposed to the shader as `texture_uniform`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn blit(
    cmd: &mut dyn CommandList,
    stats: &mut FrameStats,
    quad: &Arc<dyn Mesh>,
    material: &Material,
    src: &Arc<dyn Texture>,
    dst: Option<&Arc<dyn RenderTarget>>,
    viewport: Viewport,
    texture_uniform: &str,
) -> Result<bool> {
    if !is_drawable(stats, material, quad) {
        return Ok(false);
    }

    cmd.bind_render_target(dst)?;
    cmd.set_viewport(viewport)?;
    cmd.clear(&[ClearValue::Color(CLEAR_COLOR)])?;

    bind_material(cmd, material, true)?;
    cmd.set_uniform(texture_uniform, &UniformValue::Int(0))?;
    cmd.bind_texture(0, src)?;
    draw_mesh(cmd, stats, quad)?;
    Ok(true)
}

/// Model matrix of a uniformly scaled mesh at `position`
pub(crate) fn placed(position: Vec3, scale: f32) -> Mat4 {
    Mat4::from_translation(position) * Mat4::from_scale(Vec3::splat(scale))
}
