use std::fmt;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stable key of a material template, derived from its name.
///
/// Keys are 64-bit FNV-1a hashes, computable in const context so the
/// built-in templates are plain constants. The name itself is kept by
/// the library for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateKey(u64);

impl TemplateKey {
    /// Deferred PBR surface (G-buffer shader)
    pub const DEFAULT: TemplateKey = TemplateKey::from_name("default");
    /// Forward-rendered transparent glass
    pub const GLASS: TemplateKey = TemplateKey::from_name("glass");
    /// Forward-rendered alpha-blended surface
    pub const ALPHA_BLEND: TemplateKey = TemplateKey::from_name("alpha blend");
    /// Forward-rendered alpha-tested surface, no culling
    pub const ALPHA_DISCARD: TemplateKey = TemplateKey::from_name("alpha discard");

    /// Hash a template name
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
            i += 1;
        }
        TemplateKey(hash)
    }

    /// Raw hash value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<&str> for TemplateKey {
    fn from(name: &str) -> Self {
        TemplateKey::from_name(name)
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
#[path = "template_key_tests.rs"]
mod tests;
