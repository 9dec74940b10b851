/// Graphics device module - the backend capabilities the renderer drives
///
/// Every type here is either a trait implemented by a graphics backend
/// or a plain descriptor passed to one. The renderer never talks to a
/// graphics API directly.

pub mod graphics_device;
pub mod texture;
pub mod shader;
pub mod mesh;
pub mod render_target;
pub mod render_state;
pub mod command_list;

pub use graphics_device::*;
pub use texture::*;
pub use shader::*;
pub use mesh::*;
pub use render_target::*;
pub use render_state::*;
pub use command_list::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
