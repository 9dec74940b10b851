/*!
# Cell Renderer

Deferred rendering core of the Cell engine.

The renderer turns a per-frame queue of draw requests (mesh, material,
transform) plus the frame's lights into a finished image, through a fixed
pipeline: shadow maps, G-buffer, deferred lighting, forward draws,
post-processing and a final blit.

## Architecture

- **Renderer**: Owns the frame state and drives the pipeline
- **GraphicsDevice**: Backend trait that creates resources and command lists
- **CommandList**: Backend trait that records draws
- **MaterialLibrary**: Material templates and the instance arena
- **CommandBuffer**: Per-frame draw queue partitioned by pass
- **ProbeBaker**: Image-based lighting captures and irradiance probes

Backends implement the `GraphicsDevice` family of traits; the renderer
never calls a graphics API directly.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod graphics_device;
pub mod scene;
pub mod camera;
pub mod material;
pub mod lighting;
pub mod command_buffer;
pub mod ibl;
pub mod renderer;

// Main cell namespace module
pub mod cell {
    // Error types
    pub use crate::error::{Error, Result};

    // Process-wide services
    pub use crate::engine::Engine;

    // Frame driver and its configuration
    pub use crate::renderer::{FrameStages, FrameStats, Renderer};
    pub use crate::config::RendererConfig;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Backend sub-module
    pub mod device {
        pub use crate::graphics_device::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod material {
        pub use crate::material::*;
    }

    pub mod lighting {
        pub use crate::lighting::*;
    }

    pub mod ibl {
        pub use crate::ibl::*;
    }
}

// Re-export math library at crate root
pub use glam;
