//! Per-frame render command queue.

mod render_command;
mod command_buffer;

pub use render_command::RenderCommand;
pub use command_buffer::CommandBuffer;
