/// Camera used by the renderer for the main view and for cubemap capture.
///
/// The camera stores matrices supplied by the caller. The frustum and
/// world position are derived from them whenever the view or projection
/// changes, so they are always consistent.

use glam::{Mat4, Vec3};
use crate::graphics_device::{CubeFace, Viewport};
use super::frustum::Frustum;

/// Near plane used for capture cameras
pub const CAPTURE_NEAR: f32 = 0.1;
/// Far plane used for capture cameras
pub const CAPTURE_FAR: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,
    viewport: Viewport,
    position: Vec3,
}

impl Camera {
    /// Create a camera from explicit matrices.
    pub fn new(view: Mat4, projection: Mat4, viewport: Viewport) -> Self {
        let mut camera = Self {
            view_matrix: view,
            projection_matrix: projection,
            frustum: Frustum::from_view_projection(&(projection * view)),
            viewport,
            position: Vec3::ZERO,
        };
        camera.refresh();
        camera
    }

    /// Perspective camera at the origin looking down -Z.
    ///
    /// The aspect ratio is taken from the viewport.
    pub fn perspective(fov_y: f32, near: f32, far: f32, viewport: Viewport) -> Self {
        let aspect = if viewport.height > 0.0 { viewport.width / viewport.height } else { 1.0 };
        Self::new(Mat4::IDENTITY, Mat4::perspective_rh_gl(fov_y, aspect, near, far), viewport)
    }

    /// Reposition the camera to look from `eye` at `target`.
    pub fn looking_at(mut self, eye: Vec3, target: Vec3, up: Vec3) -> Self {
        self.set_view(Mat4::look_at_rh(eye, target, up));
        self
    }

    /// 90° square camera looking down one cubemap face from `position`.
    pub fn face_camera(position: Vec3, face: CubeFace, size: u32) -> Self {
        let projection = Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_2, 1.0, CAPTURE_NEAR, CAPTURE_FAR);
        let view = Mat4::look_at_rh(position, position + face.direction(), face.up());
        Self::new(view, projection, Viewport::from_size(size, size))
    }

    fn refresh(&mut self) {
        self.frustum = Frustum::from_view_projection(&self.view_projection_matrix());
        self.position = self.view_matrix.inverse().w_axis.truncate();
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// World-space position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Distance in front of the camera along its view axis
    pub fn view_depth(&self, point: Vec3) -> f32 {
        -self.view_matrix.transform_point3(point).z
    }

    // ===== SETTERS =====

    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
        self.refresh();
    }

    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
        self.refresh();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
