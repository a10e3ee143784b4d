//! Deterministic glyph provider for tests.
//!
//! Every codepoint maps to a filled box whose size is derived from the
//! codepoint, so placements are reproducible without a font file.

use std::collections::{HashMap, HashSet};

use crate::fixed::F26Dot6;
use crate::provider::{GlyphBitmap, GlyphMetrics, GlyphProvider, RasterGlyph};

pub(crate) struct BoxProvider {
    pub height: i32,
    pub space: i32,
    /// Kerning pairs in 26.6.
    pub kerns: HashMap<(u32, u32), F26Dot6>,
    pub missing: HashSet<u32>,
    /// Fixed glyph size override; `None` derives size from the codepoint.
    pub fixed_size: Option<(u32, u32)>,
    pub rasterized: Vec<u32>,
}

impl BoxProvider {
    pub fn new(height: i32, space: i32) -> Self {
        Self {
            height,
            space,
            kerns: HashMap::new(),
            missing: HashSet::new(),
            fixed_size: None,
            rasterized: Vec::new(),
        }
    }

    pub fn with_kern(mut self, left: char, right: char, px64: i32) -> Self {
        self.kerns.insert((left as u32, right as u32), F26Dot6(px64));
        self
    }

    pub fn with_missing(mut self, c: char) -> Self {
        self.missing.insert(c as u32);
        self
    }

    pub fn with_fixed_size(mut self, w: u32, h: u32) -> Self {
        self.fixed_size = Some((w, h));
        self
    }

    /// Bitmap size for `c`.
    pub fn size_of(&self, c: u32) -> (u32, u32) {
        self.fixed_size.unwrap_or((4 + c % 5, 8 + c % 3))
    }

    /// Whole-pixel advance for `c`.
    pub fn advance_of(&self, c: u32) -> i32 {
        self.size_of(c).0 as i32 + 2
    }
}

impl GlyphProvider for BoxProvider {
    fn line_height(&self) -> F26Dot6 {
        F26Dot6::from_pixels(self.height)
    }

    fn advance(&self, codepoint: u32) -> F26Dot6 {
        if codepoint == 0x20 {
            F26Dot6::from_pixels(self.space)
        } else {
            F26Dot6::from_pixels(self.advance_of(codepoint))
        }
    }

    fn rasterize(&mut self, codepoint: u32) -> Option<RasterGlyph> {
        self.rasterized.push(codepoint);
        if self.missing.contains(&codepoint) {
            return None;
        }
        let (w, h) = self.size_of(codepoint);
        let fill = (codepoint % 255) as u8 | 1;
        Some(RasterGlyph {
            metrics: GlyphMetrics {
                bearing_x: F26Dot6::from_pixels(1),
                bearing_y: F26Dot6::from_pixels(h as i32 - 2),
                width: F26Dot6::from_pixels(w as i32),
                height: F26Dot6::from_pixels(h as i32),
                advance: F26Dot6::from_pixels(self.advance_of(codepoint)),
            },
            bitmap: GlyphBitmap {
                width: w,
                height: h,
                pixels: vec![fill; (w * h) as usize],
            },
        })
    }

    fn kerning(&self, left: u32, right: u32) -> F26Dot6 {
        self.kerns.get(&(left, right)).copied().unwrap_or(F26Dot6::ZERO)
    }
}
