//! Image-based lighting: BRDF integration, captures and probe baking.

pub mod brdf;
mod pbr_capture;
mod probe_baker;

pub use pbr_capture::{IrradianceProbe, PbrCapture};
pub use probe_baker::{prefilter_roughness, ProbeBaker};
