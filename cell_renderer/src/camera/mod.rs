//! Camera module: view/projection state and frustum culling.

mod camera;
mod frustum;

pub use camera::{Camera, CAPTURE_FAR, CAPTURE_NEAR};
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
