//! Light types and the per-frame light registry.

mod light;
mod light_registry;

pub use light::{DirectionalLight, Light, PointLight, ShadowVolume};
pub use light_registry::LightRegistry;

#[cfg(test)]
#[path = "lighting_tests.rs"]
mod tests;
