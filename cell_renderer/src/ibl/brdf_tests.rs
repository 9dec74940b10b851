use glam::{Vec2, Vec3};
use half::f16;
use super::*;

// ============================================================================
// Sampling
// ============================================================================

#[test]
fn test_radical_inverse_first_values() {
    assert_eq!(radical_inverse_vdc(0), 0.0);
    assert!((radical_inverse_vdc(1) - 0.5).abs() < 1e-6);
    assert!((radical_inverse_vdc(2) - 0.25).abs() < 1e-6);
    assert!((radical_inverse_vdc(3) - 0.75).abs() < 1e-6);
}

#[test]
fn test_hammersley_stays_in_unit_square() {
    for i in 0..64 {
        let p = hammersley(i, 64);
        assert!(p.x >= 0.0 && p.x < 1.0);
        assert!(p.y >= 0.0 && p.y < 1.0);
    }
}

#[test]
fn test_ggx_sample_is_unit_and_in_hemisphere() {
    for i in 0..32 {
        let h = importance_sample_ggx(hammersley(i, 32), Vec3::Z, 0.6);
        assert!((h.length() - 1.0).abs() < 1e-4);
        assert!(h.z >= 0.0);
    }
}

#[test]
fn test_ggx_zero_roughness_returns_normal() {
    let n = Vec3::new(0.0, 1.0, 0.0);
    let h = importance_sample_ggx(Vec2::new(0.3, 0.7), n, 0.0);
    assert!((h - n).length() < 1e-4);
}

// ============================================================================
// Integration
// ============================================================================

#[test]
fn test_smooth_head_on_integrates_to_full_scale() {
    let texel = integrate_brdf(1.0, 0.0, 256);
    assert!((texel.x - 1.0).abs() < 1e-3, "scale = {}", texel.x);
    assert!(texel.y.abs() < 1e-3, "bias = {}", texel.y);
}

#[test]
fn test_integrated_terms_are_bounded() {
    for &(n_dot_v, roughness) in &[(0.1, 0.2), (0.5, 0.5), (0.9, 0.9), (0.05, 1.0)] {
        let texel = integrate_brdf(n_dot_v, roughness, 128);
        assert!(texel.x >= 0.0 && texel.y >= 0.0);
        assert!(texel.x + texel.y <= 1.05, "{:?} at ({}, {})", texel, n_dot_v, roughness);
    }
}

#[test]
fn test_grazing_angle_raises_bias() {
    let grazing = integrate_brdf(0.1, 0.3, 256);
    let head_on = integrate_brdf(0.95, 0.3, 256);
    assert!(grazing.y > head_on.y);
}

// ============================================================================
// Lookup table
// ============================================================================

#[test]
fn test_lut_layout_and_determinism() {
    let lut = generate_brdf_lut(8, 32);
    assert_eq!(lut.len(), 64);
    assert_eq!(lut, generate_brdf_lut(8, 32));

    // Row 0 is the smoothest roughness, column 7 the most head-on view
    assert_eq!(lut[7], integrate_brdf(15.0 / 16.0, 1.0 / 16.0, 32));
}

#[test]
fn test_encode_rg16f_packs_two_halves_per_texel() {
    let bytes = encode_rg16f(&[Vec2::new(1.0, 0.0), Vec2::new(0.5, 0.25)]);
    assert_eq!(bytes.len(), 8);

    let halves: &[f16] = bytemuck::cast_slice(&bytes);
    assert_eq!(halves[0].to_f32(), 1.0);
    assert_eq!(halves[1].to_f32(), 0.0);
    assert_eq!(halves[2].to_f32(), 0.5);
    assert_eq!(halves[3].to_f32(), 0.25);
}
