//! Core glyph caching and typesetting for `typecase`.
//!
//! This crate owns everything between a codepoint and a textured quad:
//! UTF-8 decoding, the per-font sort table, shelf packing into a square
//! atlas, and the pen walk that turns strings into vertex arrays. It contains
//! no GPU or font-file code. Rasterization comes in through
//! [`GlyphProvider`] and pixel uploads go out through [`AtlasTexture`].

#![deny(unsafe_code)]

pub mod atlas;
pub mod fixed;
pub mod font;
pub mod matrix;
pub mod provider;
pub mod sort;
pub mod typeset;
pub mod utf8;
pub mod vertex;

#[cfg(test)]
mod test_provider;

pub use atlas::{AtlasRect, AtlasTexture, CpuAtlas, ShelfPacker, atlas_edge, min_atlas_edge};
pub use fixed::F26Dot6;
pub use font::{Font, FontCacheError, FontId, FontOptions, HEADLESS_ATLAS_LIMIT, fit_atlas_edge};
pub use matrix::Mat4;
pub use provider::{GlyphBitmap, GlyphMetrics, GlyphProvider, RasterGlyph};
pub use sort::{Sort, SortTable};
pub use typeset::{Layout, LayoutError, layout, layout_line, line_length};
pub use vertex::Vertex;
