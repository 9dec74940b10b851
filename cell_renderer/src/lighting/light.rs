use glam::{Mat4, Vec3};

/// Distance along the light direction the shadow camera is pulled back
const SHADOW_CAMERA_DISTANCE: f32 = 10.0;

/// Orthographic volume covered by a directional shadow map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowVolume {
    /// Half-size of the square ortho window
    pub extent: f32,
    pub near: f32,
    pub far: f32,
}

/// Infinitely distant light (sun)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels in (need not be normalized)
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub cast_shadows: bool,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, -1.0, 0.0),
            color: Vec3::ONE,
            intensity: 1.0,
            cast_shadows: true,
        }
    }
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self { direction, color, intensity, cast_shadows: true }
    }

    /// Light-space view-projection used for shadow mapping
    ///
    /// The shadow camera sits `SHADOW_CAMERA_DISTANCE` units back along the
    /// light direction, looking at the origin. The up vector switches to +Z
    /// when the light is (nearly) vertical.
    pub fn shadow_view_projection(&self, volume: &ShadowVolume) -> Mat4 {
        let direction = self.direction.normalize_or(Vec3::NEG_Y);
        let up = if direction.abs().dot(Vec3::Y) > 0.95 { Vec3::Z } else { Vec3::Y };

        let view = Mat4::look_at_rh(-direction * SHADOW_CAMERA_DISTANCE, Vec3::ZERO, up);
        let projection = Mat4::orthographic_rh_gl(
            -volume.extent,
            volume.extent,
            -volume.extent,
            volume.extent,
            volume.near,
            volume.far,
        );
        projection * view
    }
}

/// Omnidirectional local light, always unshadowed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Influence radius; also the scale of the light volume
    pub radius: f32,
    /// Invisible lights are registered but contribute nothing
    pub visible: bool,
    /// Draw a small debug mesh at the light when debug light rendering is on
    pub render_mesh: bool,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Vec3::ONE,
            intensity: 1.0,
            radius: 1.0,
            visible: true,
            render_mesh: false,
        }
    }
}

impl PointLight {
    pub fn new(position: Vec3, color: Vec3, intensity: f32, radius: f32) -> Self {
        Self { position, color, intensity, radius, ..Self::default() }
    }

    /// World transform of the unit light-volume sphere
    pub fn volume_transform(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(Vec3::splat(self.radius))
    }
}

/// Any light that can be registered for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}
