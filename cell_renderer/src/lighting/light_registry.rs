use super::light::{DirectionalLight, Light, PointLight};

/// Lights registered for the current frame, in registration order
#[derive(Debug, Default, Clone)]
pub struct LightRegistry {
    directional: Vec<DirectionalLight>,
    point: Vec<PointLight>,
}

impl LightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, light: impl Into<Light>) {
        match light.into() {
            Light::Directional(light) => self.directional.push(light),
            Light::Point(light) => self.point.push(light),
        }
    }

    pub fn directional(&self) -> &[DirectionalLight] {
        &self.directional
    }

    pub fn point(&self) -> &[PointLight] {
        &self.point
    }

    /// Shadow-casting directional lights with their registration index,
    /// capped at `max`
    pub fn shadow_casters(&self, max: usize) -> impl Iterator<Item = (usize, &DirectionalLight)> {
        self.directional
            .iter()
            .enumerate()
            .filter(|(_, light)| light.cast_shadows)
            .take(max)
    }

    pub fn is_empty(&self) -> bool {
        self.directional.is_empty() && self.point.is_empty()
    }

    pub fn clear(&mut self) {
        self.directional.clear();
        self.point.clear();
    }
}
