use std::sync::Arc;
use glam::Vec3;
use crate::camera::Camera;
use crate::error::Result;
use crate::graphics_device::{CommandList, CubeFace, TextureDimension, Texture, Viewport};
use crate::engine_bail;
use super::draw::{clear_color_depth, render_custom_command, DrawCall};
use super::frame_stats::FrameStats;

/// Render `draws` into all six faces of `target` at `mip_level`
///
/// Each face uses a 90° camera at `position` oriented along the face
/// axis; the viewport is the face size of the mip level. Every draw uses
/// its own material and shader.
pub(crate) fn render_to_cubemap(
    cmd: &mut dyn CommandList,
    stats: &mut FrameStats,
    draws: &[DrawCall<'_>],
    target: &Arc<dyn Texture>,
    position: Vec3,
    mip_level: u32,
) -> Result<()> {
    let info = target.info();
    if info.dimension != TextureDimension::Cube {
        engine_bail!("cell::Renderer", "Capture target '{}' is not a cubemap", target.name());
    }
    if mip_level >= info.mip_levels {
        engine_bail!("cell::Renderer",
            "Capture target '{}' has {} mip levels, mip {} requested",
            target.name(), info.mip_levels, mip_level);
    }

    let size = (info.width >> mip_level).max(1);
    for face in CubeFace::ALL {
        let camera = Camera::face_camera(position, face, size);

        cmd.bind_cubemap_face(target, face, mip_level)?;
        cmd.set_viewport(Viewport::from_size(size, size))?;
        cmd.clear(&clear_color_depth())?;

        for draw in draws {
            render_custom_command(cmd, stats, draw, Some(&camera), &[], true)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "cubemap_capture_tests.rs"]
mod tests;
