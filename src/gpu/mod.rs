//! GPU rendering: atlas texture, text pipeline, and buffer helpers.

mod atlas;
pub mod pipeline;
pub mod renderer;
mod vertex_writer;

pub use atlas::WgpuAtlas;
pub use renderer::TextRenderer;
pub(crate) use vertex_writer::{create_buffer, index_bytes, vertex_bytes};
