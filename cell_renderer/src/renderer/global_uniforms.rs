/// Per-frame uniform block shared by every shader
///
/// Uploaded once per frame with `CommandList::update_global_uniforms`,
/// before any pass records a draw. The layout is std140-compatible: only
/// 16-byte aligned members, no implicit padding.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use crate::camera::Camera;
use crate::lighting::LightRegistry;

/// Directional lights mirrored into the block
pub const MAX_GLOBAL_DIRECTIONAL_LIGHTS: usize = 4;

/// Visible point lights mirrored into the block
pub const MAX_GLOBAL_POINT_LIGHTS: usize = 8;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GlobalUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
    /// xyz: camera world position
    pub camera_position: Vec4,
    /// xyz: direction, w: unused
    pub directional_directions: [Vec4; MAX_GLOBAL_DIRECTIONAL_LIGHTS],
    /// rgb: color, a: intensity
    pub directional_colors: [Vec4; MAX_GLOBAL_DIRECTIONAL_LIGHTS],
    /// xyz: position, w: radius
    pub point_positions: [Vec4; MAX_GLOBAL_POINT_LIGHTS],
    /// rgb: color, a: intensity
    pub point_colors: [Vec4; MAX_GLOBAL_POINT_LIGHTS],
    /// x: directional count, y: point count
    pub light_counts: [u32; 4],
}

impl GlobalUniforms {
    pub fn new(camera: &Camera, lights: &LightRegistry) -> Self {
        let mut block = Self::zeroed();
        block.view = *camera.view_matrix();
        block.projection = *camera.projection_matrix();
        block.view_projection = camera.view_projection_matrix();
        block.camera_position = camera.position().extend(1.0);

        let mut directional_count = 0;
        for (i, light) in lights.directional().iter().take(MAX_GLOBAL_DIRECTIONAL_LIGHTS).enumerate() {
            block.directional_directions[i] = light.direction.normalize_or_zero().extend(0.0);
            block.directional_colors[i] = light.color.extend(light.intensity);
            directional_count += 1;
        }

        let mut point_count = 0;
        let visible = lights.point().iter().filter(|light| light.visible);
        for (i, light) in visible.take(MAX_GLOBAL_POINT_LIGHTS).enumerate() {
            block.point_positions[i] = light.position.extend(light.radius);
            block.point_colors[i] = light.color.extend(light.intensity);
            point_count += 1;
        }

        block.light_counts = [directional_count, point_count, 0, 0];
        block
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
