/// Split-sum BRDF integration for image-based lighting
///
/// The lookup table stores, for each (N·V, roughness) pair, the scale and
/// bias applied to F0 in the split-sum approximation of the specular
/// integral. It depends on nothing but its resolution and sample count,
/// so it is computed once on the CPU and uploaded as an RG16F texture.

use std::f32::consts::PI;
use glam::{Vec2, Vec3};
use half::f16;

/// Van der Corput radical inverse in base 2
pub fn radical_inverse_vdc(mut bits: u32) -> f32 {
    bits = bits.rotate_right(16);
    bits = ((bits & 0x5555_5555) << 1) | ((bits & 0xAAAA_AAAA) >> 1);
    bits = ((bits & 0x3333_3333) << 2) | ((bits & 0xCCCC_CCCC) >> 2);
    bits = ((bits & 0x0F0F_0F0F) << 4) | ((bits & 0xF0F0_F0F0) >> 4);
    bits = ((bits & 0x00FF_00FF) << 8) | ((bits & 0xFF00_FF00) >> 8);
    bits as f32 * 2.328_306_4e-10
}

/// Point `i` of an `n`-point Hammersley set
pub fn hammersley(i: u32, n: u32) -> Vec2 {
    Vec2::new(i as f32 / n as f32, radical_inverse_vdc(i))
}

/// GGX half vector around `n` for the sample `xi`
pub fn importance_sample_ggx(xi: Vec2, n: Vec3, roughness: f32) -> Vec3 {
    let a = roughness * roughness;

    let phi = 2.0 * PI * xi.x;
    let cos_theta = ((1.0 - xi.y) / (1.0 + (a * a - 1.0) * xi.y)).sqrt();
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    let h = Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta);

    let up = if n.z.abs() < 0.999 { Vec3::Z } else { Vec3::X };
    let tangent = up.cross(n).normalize();
    let bitangent = n.cross(tangent);

    (tangent * h.x + bitangent * h.y + n * h.z).normalize()
}

fn geometry_schlick_ggx(n_dot_v: f32, roughness: f32) -> f32 {
    // IBL remapping of k
    let k = (roughness * roughness) / 2.0;
    n_dot_v / (n_dot_v * (1.0 - k) + k)
}

/// Smith shadowing-masking term with the IBL `k = roughness² / 2`
pub fn geometry_smith_ibl(n_dot_v: f32, n_dot_l: f32, roughness: f32) -> f32 {
    geometry_schlick_ggx(n_dot_v, roughness) * geometry_schlick_ggx(n_dot_l, roughness)
}

/// Integrate the specular BRDF for one (N·V, roughness) pair
///
/// Returns `(scale, bias)` to apply to F0.
pub fn integrate_brdf(n_dot_v: f32, roughness: f32, sample_count: u32) -> Vec2 {
    let v = Vec3::new((1.0 - n_dot_v * n_dot_v).max(0.0).sqrt(), 0.0, n_dot_v);
    let n = Vec3::Z;

    let mut a = 0.0;
    let mut b = 0.0;
    for i in 0..sample_count {
        let xi = hammersley(i, sample_count);
        let h = importance_sample_ggx(xi, n, roughness);
        let v_dot_h = v.dot(h);
        let l = (2.0 * v_dot_h * h - v).normalize();

        let n_dot_l = l.z.max(0.0);
        let n_dot_h = h.z.max(0.0);
        let v_dot_h = v_dot_h.max(0.0);

        if n_dot_l > 0.0 {
            let g = geometry_smith_ibl(n_dot_v, n_dot_l, roughness);
            let g_vis = (g * v_dot_h) / (n_dot_h * n_dot_v);
            let fc = (1.0 - v_dot_h).powi(5);

            a += (1.0 - fc) * g_vis;
            b += fc * g_vis;
        }
    }

    Vec2::new(a, b) / sample_count as f32
}

/// Compute a `size` x `size` lookup table, row-major
///
/// Columns sample N·V, rows sample roughness, both at texel centers.
pub fn generate_brdf_lut(size: u32, sample_count: u32) -> Vec<Vec2> {
    let mut lut = Vec::with_capacity((size * size) as usize);
    for y in 0..size {
        let roughness = (y as f32 + 0.5) / size as f32;
        for x in 0..size {
            let n_dot_v = (x as f32 + 0.5) / size as f32;
            lut.push(integrate_brdf(n_dot_v, roughness, sample_count));
        }
    }
    lut
}

/// Pack a lookup table as RG16F texel data
pub fn encode_rg16f(lut: &[Vec2]) -> Vec<u8> {
    let halves: Vec<f16> = lut
        .iter()
        .flat_map(|texel| [f16::from_f32(texel.x), f16::from_f32(texel.y)])
        .collect();
    bytemuck::cast_slice(&halves).to_vec()
}

#[cfg(test)]
#[path = "brdf_tests.rs"]
mod tests;
