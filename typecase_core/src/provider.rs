//! The glyph provider seam.
//!
//! A provider wraps a font rasterizer configured at one pixel size. The cache
//! asks it for the line height, the space advance, an 8-bit coverage bitmap
//! per codepoint, and pairwise kerning. All metrics are 26.6 fixed point.

use crate::fixed::F26Dot6;

/// Integer glyph metrics in 26.6 fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphMetrics {
    /// Horizontal distance from the pen to the bitmap's left edge.
    pub bearing_x: F26Dot6,
    /// Vertical distance from the baseline up to the bitmap's top edge.
    pub bearing_y: F26Dot6,
    pub width: F26Dot6,
    pub height: F26Dot6,
    pub advance: F26Dot6,
}

/// Row-major 8-bit alpha coverage, tightly packed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl GlyphBitmap {
    /// Whether `pixels` holds at least `width * height` bytes.
    pub fn is_complete(&self) -> bool {
        self.pixels.len() >= self.width as usize * self.height as usize
    }
}

/// A rasterized glyph: metrics plus coverage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RasterGlyph {
    pub metrics: GlyphMetrics,
    pub bitmap: GlyphBitmap,
}

/// Source of rasterized glyphs for one face at one pixel size.
pub trait GlyphProvider {
    /// Nominal distance between consecutive baselines.
    fn line_height(&self) -> F26Dot6;

    /// Horizontal advance of `codepoint` without rasterizing it.
    fn advance(&self, codepoint: u32) -> F26Dot6;

    /// Rasterize `codepoint`. `None` when the face has no usable glyph.
    fn rasterize(&mut self, codepoint: u32) -> Option<RasterGlyph>;

    /// Horizontal kerning between two adjacent codepoints.
    fn kerning(&self, left: u32, right: u32) -> F26Dot6;
}

impl<P: GlyphProvider + ?Sized> GlyphProvider for Box<P> {
    fn line_height(&self) -> F26Dot6 {
        (**self).line_height()
    }

    fn advance(&self, codepoint: u32) -> F26Dot6 {
        (**self).advance(codepoint)
    }

    fn rasterize(&mut self, codepoint: u32) -> Option<RasterGlyph> {
        (**self).rasterize(codepoint)
    }

    fn kerning(&self, left: u32, right: u32) -> F26Dot6 {
        (**self).kerning(left, right)
    }
}
