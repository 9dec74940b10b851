//! Material instancing model: template keys, material instances and the
//! library that owns them.

mod template_key;
mod material;
mod material_library;

pub use template_key::TemplateKey;
pub use material::{Material, MaterialKind, MaterialTextureSlot, PassBucket};
pub use material_library::{
    InternalMaterials, MaterialKey, MaterialLibrary, MaterialTemplate,
    UNIT_ALBEDO, UNIT_AO, UNIT_BRDF_LUT, UNIT_ENV_IRRADIANCE, UNIT_ENV_PREFILTER,
    UNIT_FORWARD_SHADOW_MAPS, UNIT_G_ALBEDO_AO, UNIT_G_NORMAL_ROUGHNESS, UNIT_G_POSITION_METALLIC,
    UNIT_METALLIC, UNIT_NORMAL, UNIT_ROUGHNESS, UNIT_SHADOW_MAP, UNIT_SSAO,
};
