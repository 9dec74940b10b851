/// Material library: immutable templates, the instance arena and the
/// renderer's internal materials.
///
/// Templates are registered once and only ever copied from. Every
/// `create_*` call inserts a new, independent instance into a
/// `SlotMap` arena; instances are released together when the library
/// is dropped.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, RenderState, Shader, ShaderDesc, TextureDimension, TextureFormat,
};
use crate::{engine_bail, engine_debug, engine_error};
use super::material::{Material, MaterialKind};
use super::template_key::TemplateKey;

new_key_type! {
    /// Handle of a material instance owned by the library
    pub struct MaterialKey;
}

// ===== SAMPLER UNITS =====

/// Sampler units used by the surface templates
pub const UNIT_ALBEDO: u32 = 3;
pub const UNIT_NORMAL: u32 = 4;
pub const UNIT_METALLIC: u32 = 5;
pub const UNIT_ROUGHNESS: u32 = 6;
pub const UNIT_AO: u32 = 7;

/// Sampler units used by the deferred lighting materials
pub const UNIT_G_POSITION_METALLIC: u32 = 0;
pub const UNIT_G_NORMAL_ROUGHNESS: u32 = 1;
pub const UNIT_G_ALBEDO_AO: u32 = 2;
pub const UNIT_ENV_IRRADIANCE: u32 = 3;
pub const UNIT_ENV_PREFILTER: u32 = 4;
pub const UNIT_BRDF_LUT: u32 = 5;
pub const UNIT_SSAO: u32 = 6;
pub const UNIT_SHADOW_MAP: u32 = 3;

/// First sampler unit used for shadow maps bound to forward materials
pub const UNIT_FORWARD_SHADOW_MAPS: u32 = 10;

// ===== TEMPLATE =====

/// A named, immutable copy source for material instances
pub struct MaterialTemplate {
    name: String,
    material: Material,
}

impl MaterialTemplate {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

// ===== INTERNAL MATERIALS =====

/// Materials the renderer uses for its own passes
///
/// These never enter the arena and are not visible through material keys.
pub struct InternalMaterials {
    /// Plain texture copy
    pub blit: Material,
    /// Resolve of the lit HDR image for the final blit
    pub post_processing: Material,
    pub deferred_ambient: Material,
    pub deferred_irradiance: Material,
    pub deferred_directional: Material,
    pub deferred_point: Material,
    pub shadow_directional: Material,
    pub debug_light: Material,
    /// Equirectangular map to cubemap
    pub hdr_to_cubemap: Material,
    /// Diffuse irradiance convolution
    pub irradiance_capture: Material,
    /// GGX prefiltered specular convolution
    pub prefilter_capture: Material,
    /// Forward-lit stand-in for deferred materials in cubemap captures
    pub scene_capture: Material,
}

fn load_shader(
    device: &mut dyn GraphicsDevice,
    name: &str,
    vertex_path: &str,
    fragment_path: &str,
    defines: &[&str],
) -> Result<Arc<dyn Shader>> {
    let mut desc = ShaderDesc::new(name, vertex_path, fragment_path);
    for define in defines {
        desc = desc.with_define(define);
    }
    device.load_shader(desc)
}

fn set_gbuffer_samplers(material: &mut Material) {
    material.set_int("gPositionMetallic", UNIT_G_POSITION_METALLIC as i32);
    material.set_int("gNormalRoughness", UNIT_G_NORMAL_ROUGHNESS as i32);
    material.set_int("gAlbedoAO", UNIT_G_ALBEDO_AO as i32);
}

fn set_environment_samplers(material: &mut Material) {
    set_gbuffer_samplers(material);
    material.set_int("envIrradiance", UNIT_ENV_IRRADIANCE as i32);
    material.set_int("envPrefilter", UNIT_ENV_PREFILTER as i32);
    material.set_int("BRDFLUT", UNIT_BRDF_LUT as i32);
    material.set_int("SSAO", UNIT_SSAO as i32);
}

fn internal(
    device: &mut dyn GraphicsDevice,
    name: &str,
    vertex_path: &str,
    fragment_path: &str,
    state: RenderState,
) -> Result<Material> {
    let shader = load_shader(device, name, vertex_path, fragment_path, &[])?;
    let mut material = Material::new(MaterialKind::Custom, shader);
    *material.render_state_mut() = state;
    Ok(material)
}

impl InternalMaterials {
    fn load(device: &mut dyn GraphicsDevice) -> Result<Self> {
        let blit = internal(device, "blit", "shaders/screen_quad.vs", "shaders/default_blit.fs", RenderState::fullscreen())?;
        let post_processing = internal(
            device, "post processing", "shaders/screen_quad.vs", "shaders/post_processing.fs", RenderState::fullscreen(),
        )?;

        let mut deferred_ambient = internal(
            device, "deferred ambient", "shaders/deferred/screen_ambient.vs", "shaders/deferred/ambient.fs",
            RenderState::fullscreen(),
        )?;
        set_environment_samplers(&mut deferred_ambient);

        let mut deferred_irradiance = internal(
            device, "deferred irradiance", "shaders/deferred/ambient_irradience.vs", "shaders/deferred/ambient_irradience.fs",
            RenderState::light_volume(),
        )?;
        set_environment_samplers(&mut deferred_irradiance);

        let mut deferred_directional = internal(
            device, "deferred directional", "shaders/deferred/screen_directional.vs", "shaders/deferred/directional.fs",
            RenderState::additive(),
        )?;
        set_gbuffer_samplers(&mut deferred_directional);
        deferred_directional.set_int("lightShadowMap", UNIT_SHADOW_MAP as i32);

        let mut deferred_point = internal(
            device, "deferred point", "shaders/deferred/point.vs", "shaders/deferred/point.fs",
            RenderState::light_volume(),
        )?;
        set_gbuffer_samplers(&mut deferred_point);

        let shadow_directional = internal(
            device, "shadow directional", "shaders/shadow_cast.vs", "shaders/shadow_cast.fs",
            RenderState::shadow_depth(),
        )?;
        let debug_light = internal(device, "debug light", "shaders/light.vs", "shaders/light.fs", RenderState::default())?;

        let hdr_to_cubemap = internal(
            device, "hdr to cubemap", "shaders/pbr/cube_sample.vs", "shaders/pbr/spherical_to_cube.fs",
            RenderState::skybox(),
        )?;
        let irradiance_capture = internal(
            device, "irradiance capture", "shaders/pbr/cube_sample.vs", "shaders/pbr/irradiance_capture.fs",
            RenderState::skybox(),
        )?;
        let prefilter_capture = internal(
            device, "prefilter capture", "shaders/pbr/cube_sample.vs", "shaders/pbr/prefilter_capture.fs",
            RenderState::skybox(),
        )?;
        let scene_capture = internal(
            device, "scene capture", "shaders/pbr/scene_capture.vs", "shaders/pbr/scene_capture.fs",
            RenderState::default(),
        )?;

        Ok(Self {
            blit,
            post_processing,
            deferred_ambient,
            deferred_irradiance,
            deferred_directional,
            deferred_point,
            shadow_directional,
            debug_light,
            hdr_to_cubemap,
            irradiance_capture,
            prefilter_capture,
            scene_capture,
        })
    }

    /// Scene capture material carrying the texture slots of `material`
    ///
    /// Deferred shaders only write G-buffer attributes, so captures draw
    /// their meshes through this forward-lit copy instead.
    pub fn capture_material(&self, material: &Material) -> Material {
        let mut capture = self.scene_capture.clone();
        for slot in material.texture_slots() {
            capture.set_texture(slot.name(), slot.texture().clone(), slot.unit());
        }
        capture
    }
}

// ===== LIBRARY =====

pub struct MaterialLibrary {
    templates: FxHashMap<TemplateKey, MaterialTemplate>,
    materials: SlotMap<MaterialKey, Material>,
    internal: InternalMaterials,
}

impl MaterialLibrary {
    /// Load the built-in templates and internal materials through `device`
    pub fn new(device: &mut dyn GraphicsDevice) -> Result<Self> {
        let mut library = Self {
            templates: FxHashMap::default(),
            materials: SlotMap::with_key(),
            internal: InternalMaterials::load(device)?,
        };
        library.register_builtin_templates(device)?;

        engine_debug!("cell::MaterialLibrary", "Loaded {} material templates", library.templates.len());
        Ok(library)
    }

    fn register_builtin_templates(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        // Deferred PBR surface
        let shader = load_shader(device, "default", "shaders/deferred/g_buffer.vs", "shaders/deferred/g_buffer.fs", &[])?;
        let mut default = Material::new(MaterialKind::Default, shader);
        let surface = [
            ("TexAlbedo", "default albedo", "textures/checkerboard.png", TextureFormat::R8G8B8A8_SRGB, UNIT_ALBEDO),
            ("TexNormal", "default normal", "textures/norm.png", TextureFormat::R8G8B8A8_UNORM, UNIT_NORMAL),
            ("TexMetallic", "default metallic", "textures/black.png", TextureFormat::R8G8B8A8_UNORM, UNIT_METALLIC),
            ("TexRoughness", "default roughness", "textures/checkerboard.png", TextureFormat::R8G8B8A8_UNORM, UNIT_ROUGHNESS),
            ("TexAO", "default ao", "textures/white.png", TextureFormat::R8G8B8A8_UNORM, UNIT_AO),
        ];
        for (slot, name, path, format, unit) in surface {
            let texture = device.load_texture(name, path, TextureDimension::Tex2D, format)?;
            default.set_texture(slot, texture, unit);
        }
        self.register_template("default", default)?;

        // Transparent glass, sorted back to front in the forward pass
        let shader = load_shader(device, "glass", "shaders/forward_render.vs", "shaders/forward_render.fs", &["ALPHA_GLASS"])?;
        let mut glass = Material::new(MaterialKind::Custom, shader);
        let surface = [
            ("TexAlbedo", "glass albedo", "textures/glass.png", TextureFormat::R8G8B8A8_SRGB, UNIT_ALBEDO),
            ("TexNormal", "glass normal", "textures/pbr/plastic/normal.png", TextureFormat::R8G8B8A8_UNORM, UNIT_NORMAL),
            ("TexMetallic", "glass metallic", "textures/pbr/plastic/metallic.png", TextureFormat::R8G8B8A8_UNORM, UNIT_METALLIC),
            ("TexRoughness", "glass roughness", "textures/pbr/plastic/roughness.png", TextureFormat::R8G8B8A8_UNORM, UNIT_ROUGHNESS),
            ("TexAO", "glass ao", "textures/pbr/plastic/ao.png", TextureFormat::R8G8B8A8_UNORM, UNIT_AO),
        ];
        for (slot, name, path, format, unit) in surface {
            let texture = device.load_texture(name, path, TextureDimension::Tex2D, format)?;
            glass.set_texture(slot, texture, unit);
        }
        glass.set_blend(true);
        self.register_template("glass", glass)?;

        let shader = load_shader(device, "alpha blend", "shaders/forward_render.vs", "shaders/forward_render.fs", &["ALPHA_BLEND"])?;
        let mut alpha_blend = Material::new(MaterialKind::Custom, shader);
        alpha_blend.set_blend(true);
        self.register_template("alpha blend", alpha_blend)?;

        let shader = load_shader(device, "alpha discard", "shaders/forward_render.vs", "shaders/forward_render.fs", &["ALPHA_DISCARD"])?;
        let mut alpha_discard = Material::new(MaterialKind::Custom, shader);
        alpha_discard.set_cull(false);
        self.register_template("alpha discard", alpha_discard)?;

        Ok(())
    }

    // ===== TEMPLATES =====

    /// Register a template under `name`
    ///
    /// Templates are immutable once registered: a second registration
    /// under the same name is rejected.
    pub fn register_template(&mut self, name: &str, material: Material) -> Result<TemplateKey> {
        let key = TemplateKey::from_name(name);
        if let Some(existing) = self.templates.get(&key) {
            engine_bail!("cell::MaterialLibrary",
                "Template '{}' is already registered (key {}, existing name '{}')", name, key, existing.name);
        }

        self.templates.insert(key, MaterialTemplate { name: name.to_string(), material });
        Ok(key)
    }

    pub fn template(&self, key: TemplateKey) -> Option<&MaterialTemplate> {
        self.templates.get(&key)
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    // ===== INSTANCES =====

    /// Clone the template `key` into a new instance
    ///
    /// Unknown keys are logged and leave the arena untouched.
    pub fn create_material(&mut self, key: TemplateKey) -> Option<MaterialKey> {
        let Some(template) = self.templates.get(&key) else {
            engine_error!("cell::MaterialLibrary", "Material template {} does not exist", key);
            return None;
        };

        let material = template.material.clone();
        Some(self.materials.insert(material))
    }

    /// Forward-pass material around a caller shader, no texture slots
    pub fn create_custom_material(&mut self, shader: Arc<dyn Shader>) -> MaterialKey {
        self.materials.insert(Material::new(MaterialKind::Custom, shader))
    }

    /// Post-processing material around a caller shader
    pub fn create_post_processing_material(&mut self, shader: Arc<dyn Shader>) -> MaterialKey {
        self.materials.insert(Material::new(MaterialKind::PostProcess, shader))
    }

    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    pub fn material_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.get_mut(key)
    }

    pub fn contains(&self, key: MaterialKey) -> bool {
        self.materials.contains_key(key)
    }

    /// Number of live instances
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    // ===== INTERNAL =====

    pub fn internal(&self) -> &InternalMaterials {
        &self.internal
    }

    pub fn internal_mut(&mut self) -> &mut InternalMaterials {
        &mut self.internal
    }
}

#[cfg(test)]
#[path = "material_library_tests.rs"]
mod tests;
