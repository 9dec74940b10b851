//! Integration tests for the frame pipeline
//!
//! These tests drive a Renderer through its public API against a
//! recording backend. No GPU required.
//!
//! Run with: cargo test --test frame_pipeline_integration_tests

mod recording_device;

use cell_renderer::cell::camera::Camera;
use cell_renderer::cell::device::{TextureDimension, Viewport};
use cell_renderer::cell::lighting::{DirectionalLight, PointLight};
use cell_renderer::cell::material::TemplateKey;
use cell_renderer::cell::scene::SceneNode;
use cell_renderer::cell::{FrameStages, Renderer, RendererConfig};
use cell_renderer::glam::{Mat4, Vec3};
use recording_device::{groups, take, target, RecordingDevice, TestMesh, TestShader, TestTexture, Trace};
use std::sync::Arc;

fn config() -> RendererConfig {
    RendererConfig {
        width: 80,
        height: 60,
        shadow_map_size: 32,
        capture_resolution: 8,
        environment_resolution: 8,
        irradiance_resolution: 4,
        prefilter_resolution: 8,
        prefilter_mip_levels: 2,
        brdf_lut_resolution: 4,
        brdf_sample_count: 4,
        ..RendererConfig::default()
    }
}

fn renderer() -> (Renderer, Trace) {
    let (device, trace) = RecordingDevice::shared();
    let renderer = Renderer::new(device, config()).unwrap();
    take(&trace);
    (renderer, trace)
}

fn at(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

// ============================================================================
// FRAME TESTS
// ============================================================================

#[test]
fn test_integration_scene_frame() {
    let (mut renderer, trace) = renderer();

    let stone = renderer.create_material(TemplateKey::DEFAULT).unwrap();
    let glass = renderer.create_material("glass").unwrap();
    let tonemap = renderer.create_post_processing_material(Arc::new(TestShader("tonemap".to_string())));

    let mut room = SceneNode::new("room").with_transform(at(0.0, 0.0, -8.0));
    room.add_child(SceneNode::with_mesh("floor", TestMesh::bounded("floor"), stone));
    room.add_child(SceneNode::with_mesh("window", TestMesh::new("window"), glass).with_transform(at(0.0, 1.0, 2.0)));

    assert_eq!(renderer.push_render_node(&room), 2);
    assert!(renderer.push_post_processor(tonemap));
    renderer.add_light(DirectionalLight::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::ONE, 3.0));
    renderer.add_light(PointLight::new(Vec3::new(0.0, 1.0, -8.0), Vec3::new(1.0, 0.5, 0.2), 4.0, 3.0));

    let stats = renderer.render_pushed_commands().unwrap();
    let entries = take(&trace);

    assert_eq!(groups(&entries), vec!["shadow", "geometry", "lighting", "forward", "post_process", "final_blit"]);
    assert_eq!(stats.stages, FrameStages::all());
    assert_eq!(stats.shadow_maps, 1);
    assert_eq!(stats.skipped_draws, 0);
    assert_eq!(entries.first().map(String::as_str), Some("begin"));
    assert_eq!(entries.last().map(String::as_str), Some("submit #1"));

    // Opaque geometry draws in the shadow and geometry passes, glass only forward
    assert_eq!(entries.iter().filter(|e| *e == "draw floor").count(), 2);
    assert_eq!(entries.iter().filter(|e| *e == "draw window").count(), 1);
    assert!(entries.contains(&"copy depth gbuffer lighting".to_string()));
    assert!(entries.contains(&"target <screen>".to_string()));
}

#[test]
fn test_integration_frames_are_independent() {
    let (mut renderer, trace) = renderer();
    let stone = renderer.create_material(TemplateKey::DEFAULT).unwrap();

    renderer.push_render(TestMesh::new("crate"), stone, at(0.0, 0.0, -4.0));
    renderer.add_light(PointLight::new(Vec3::new(0.0, 0.0, -4.0), Vec3::ONE, 1.0, 2.0));
    renderer.render_pushed_commands().unwrap();
    take(&trace);

    let stats = renderer.render_pushed_commands().unwrap();
    let entries = take(&trace);

    assert_eq!(groups(&entries), vec!["final_blit"]);
    assert_eq!(stats.draw_calls, 1);
    assert!(!entries.contains(&"draw crate".to_string()));
    assert_eq!(entries.last().map(String::as_str), Some("submit #2"));
}

#[test]
fn test_integration_camera_culls_behind() {
    let (mut renderer, trace) = renderer();
    let stone = renderer.create_material(TemplateKey::DEFAULT).unwrap();

    let camera = Camera::perspective(1.0, 0.1, 50.0, Viewport::from_size(80, 60))
        .looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
    renderer.set_camera(camera);

    renderer.push_render(TestMesh::bounded("ahead"), stone, at(0.0, 0.0, 0.0));
    renderer.push_render(TestMesh::bounded("behind"), stone, at(0.0, 0.0, 30.0));

    let stats = renderer.render_pushed_commands().unwrap();
    let entries = take(&trace);

    assert_eq!(stats.culled_commands, 1);
    assert!(entries.contains(&"draw ahead".to_string()));
    assert!(!entries.contains(&"draw behind".to_string()));
}

#[test]
fn test_integration_debug_light_meshes() {
    let (mut renderer, trace) = renderer();

    let mut light = PointLight::new(Vec3::new(0.0, 0.0, -3.0), Vec3::ONE, 1.0, 1.0);
    light.render_mesh = true;
    renderer.add_light(light);

    let stats = renderer.render_pushed_commands().unwrap();
    let entries = take(&trace);

    assert_eq!(groups(&entries), vec!["forward", "final_blit"]);
    assert!(entries.contains(&"shader debug light".to_string()));
    assert_eq!(stats.draw_calls, 2);
}

#[test]
fn test_integration_render_to_offscreen_target() {
    let (mut renderer, trace) = renderer();
    let thumbnail = target("thumbnail", 32, 24);

    renderer.set_target(Some(thumbnail));
    renderer.render_pushed_commands().unwrap();
    let entries = take(&trace);

    assert!(entries.contains(&"target thumbnail".to_string()));
    assert!(entries.contains(&"viewport 32x24".to_string()));
    assert!(!entries.contains(&"target <screen>".to_string()));
}

#[test]
fn test_integration_resize() {
    let (mut renderer, trace) = renderer();
    renderer.set_render_size(160, 90).unwrap();

    renderer.render_pushed_commands().unwrap();
    assert!(take(&trace).contains(&"viewport 160x90".to_string()));
    assert!(renderer.set_render_size(160, 0).is_err());
}

// ============================================================================
// IMAGE-BASED LIGHTING TESTS
// ============================================================================

#[test]
fn test_integration_environment_lighting() {
    let (mut renderer, trace) = renderer();
    let hdr: Arc<dyn cell_renderer::cell::device::Texture> =
        Arc::new(TestTexture::new("sunset", 64, 32, TextureDimension::Tex2D));

    let capture = renderer.process_environment_map(&hdr).unwrap();
    renderer.set_sky_capture(capture);
    take(&trace);

    let stone = renderer.create_material(TemplateKey::DEFAULT).unwrap();
    renderer.push_render(TestMesh::new("statue"), stone, at(0.0, 0.0, -5.0));
    renderer.render_pushed_commands().unwrap();
    let entries = take(&trace);

    assert!(entries.contains(&"texture 3 sunset irradiance".to_string()));
    assert!(entries.contains(&"texture 4 sunset prefiltered".to_string()));
    assert!(entries.contains(&"texture 5 brdf lut".to_string()));
}

#[test]
fn test_integration_probe_bake() {
    let (mut renderer, trace) = renderer();
    let stone = renderer.create_material(TemplateKey::DEFAULT).unwrap();
    let scene = SceneNode::with_mesh("pillar", TestMesh::new("pillar"), stone);

    renderer.add_irradiance_probe(Vec3::new(0.0, 1.0, -5.0), 4.0);
    let stats = renderer.bake_probes(&scene).unwrap();
    let entries = take(&trace);

    assert_eq!(groups(&entries), vec!["bake_probes"]);
    // Sky and one probe, six faces each
    assert_eq!(entries.iter().filter(|e| *e == "draw pillar").count(), 12);
    // Deferred materials are captured with the forward-lit capture shader
    assert_eq!(entries.iter().filter(|e| *e == "shader scene capture").count(), 12);
    assert!(!entries.contains(&"shader default".to_string()));
    assert!(stats.draw_calls > 12);
    assert!(renderer.irradiance_probes()[0].is_baked());
    assert!(renderer.sky_capture().is_some());

    renderer.clear_irradiance_probes();
    assert!(renderer.irradiance_probes().is_empty());
}
