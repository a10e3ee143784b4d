//! GPU text typesetting with a lazily filled glyph atlas.
//!
//! Load a [`Font`] from bytes or a path, typeset strings into a [`Line`],
//! and draw the line inside a wgpu render pass. Glyphs are rasterized with
//! swash the first time they are used, packed into a single square atlas,
//! and cached for the life of the font. Lines support letter spacing,
//! kerning from the font's `kern` table, justification across spaces, and a
//! per-string placement matrix.
//!
//! The GPU-free core (decoding, packing, layout) lives in `typecase_core`
//! and is re-exported here.

pub mod config;
pub mod font;
pub mod gpu;
pub mod line;
pub mod logging;

pub use font::{Font, FontError, FontSource, SwashProvider};
pub use gpu::TextRenderer;
pub use line::{Line, LineError};
pub use typecase_core::{FontId, FontOptions, Layout, LayoutError, Mat4, Vertex};
