//! Scene-side types the renderer consumes: bounds and the scene
//! expansion contract.

mod aabb;
mod scene_node;

pub use aabb::AABB;
pub use scene_node::{DrawItem, RenderSource, SceneNode};
