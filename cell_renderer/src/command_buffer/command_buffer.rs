//! Per-frame draw queue
//!
//! Commands are partitioned on push: deferred (G-buffer) draws, custom
//! (forward) draws, and the ordered post-processing stream. A command is
//! stored in exactly one bucket.

use std::sync::Arc;
use crate::camera::Camera;
use crate::material::{MaterialKey, MaterialLibrary, PassBucket};
use super::render_command::RenderCommand;

#[derive(Default)]
pub struct CommandBuffer {
    deferred: Vec<RenderCommand>,
    custom: Vec<RenderCommand>,
    post_processing: Vec<MaterialKey>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a draw to the bucket of its material
    ///
    /// Returns `false` for `PassBucket::PostProcess`: post-processing
    /// materials are not drawable and go through `push_post_processor`.
    pub fn push(&mut self, command: RenderCommand, bucket: PassBucket) -> bool {
        match bucket {
            PassBucket::Deferred => self.deferred.push(command),
            PassBucket::Forward => self.custom.push(command),
            PassBucket::PostProcess => return false,
        }
        true
    }

    /// Append a post-processing material; call order is chain order
    pub fn push_post_processor(&mut self, material: MaterialKey) {
        self.post_processing.push(material);
    }

    /// Order both draw buckets for execution
    ///
    /// - custom: back to front by view depth, stable on ties; NaN depths
    ///   keep a total order instead of breaking the sort
    /// - deferred: grouped by shader, stable within a group
    pub fn sort(&mut self, camera: &Camera, materials: &MaterialLibrary) {
        self.custom.sort_by(|a, b| {
            let da = camera.view_depth(a.position());
            let db = camera.view_depth(b.position());
            db.total_cmp(&da)
        });

        self.deferred.sort_by_cached_key(|command| {
            materials
                .material(command.material)
                .map(|material| Arc::as_ptr(material.shader()) as *const () as usize)
                .unwrap_or(usize::MAX)
        });
    }

    pub fn deferred(&self) -> &[RenderCommand] {
        &self.deferred
    }

    pub fn custom(&self) -> &[RenderCommand] {
        &self.custom
    }

    pub fn post_processing(&self) -> &[MaterialKey] {
        &self.post_processing
    }

    /// Number of queued draws (post-processing materials excluded)
    pub fn draw_count(&self) -> usize {
        self.deferred.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deferred.is_empty() && self.custom.is_empty() && self.post_processing.is_empty()
    }

    pub fn clear(&mut self) {
        self.deferred.clear();
        self.custom.clear();
        self.post_processing.clear();
    }
}

#[cfg(test)]
#[path = "command_buffer_tests.rs"]
mod tests;
