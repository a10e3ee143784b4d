//! Glyph provider backed by swash (outlines, metrics) and the `kern` table.
//!
//! Raw font bytes are owned here; swash `FontRef`s are created transiently
//! from the stored offset and cache key, so the scale context can be reused
//! across glyphs. Kerning reads the legacy `kern` table through rustybuzz's
//! `ttf_parser`; GPOS pair adjustment needs shaping and is not consulted.
//! Each glyph pair is looked up in the table once and remembered.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use rustybuzz::ttf_parser::GlyphId;
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;
use swash::{CacheKey, FontRef};

use typecase_core::{F26Dot6, GlyphBitmap, GlyphMetrics, GlyphProvider, RasterGlyph};

use super::{FontError, FontSource};

/// A single face at a single pixel size.
pub struct SwashProvider {
    /// Raw font file bytes.
    data: Vec<u8>,
    /// Index within a `.ttc` collection (0 for single-font files).
    face_index: u32,
    /// Byte offset to the table directory (from `FontRef::from_index`).
    offset: u32,
    key: CacheKey,
    size: f32,
    /// Whether the face has a horizontal, non-variable `kern` subtable.
    has_kern: bool,
    units_per_em: f32,
    /// Scaled kerning by glyph id pair.
    kern_pairs: RefCell<HashMap<(u16, u16), F26Dot6>>,
    context: ScaleContext,
}

impl SwashProvider {
    /// Load the first face of `source` at `pixel_size` pixels.
    pub fn open(source: &FontSource, pixel_size: u32) -> Result<Self, FontError> {
        match source {
            FontSource::Bytes(bytes) => Self::from_bytes(bytes.clone(), pixel_size)
                .ok_or(FontError::Load { path: None }),
            FontSource::Path(path) => Self::from_path(path, pixel_size),
        }
    }

    fn from_path(path: &Path, pixel_size: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, pixel_size).ok_or_else(|| FontError::Load {
            path: Some(path.to_path_buf()),
        })
    }

    fn from_bytes(data: Vec<u8>, pixel_size: u32) -> Option<Self> {
        let face_index = 0;
        let (offset, key) = validate_font(&data, face_index)?;
        let (units_per_em, has_kern) = match rustybuzz::Face::from_slice(&data, face_index) {
            Some(face) => {
                let upem = face.units_per_em() as f32;
                let kern = face.tables().kern.is_some_and(|kern| {
                    kern.subtables
                        .into_iter()
                        .any(|s| s.horizontal && !s.variable)
                });
                (upem, upem > 0.0 && kern)
            }
            None => (0.0, false),
        };
        Some(Self {
            data,
            face_index,
            offset,
            key,
            size: pixel_size as f32,
            has_kern,
            units_per_em,
            kern_pairs: RefCell::new(HashMap::new()),
            context: ScaleContext::new(),
        })
    }

    pub fn pixel_size(&self) -> f32 {
        self.size
    }

    pub fn has_kerning(&self) -> bool {
        self.has_kern
    }

    fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    /// Glyph id for `codepoint`; 0 is `.notdef`.
    fn glyph_id(&self, codepoint: u32) -> u16 {
        self.font_ref().charmap().map(codepoint)
    }

    /// Sum of horizontal `kern` subtable values for a glyph pair, in pixels.
    fn pair_kerning(&self, left: u16, right: u16) -> F26Dot6 {
        let Some(kern) = rustybuzz::Face::from_slice(&self.data, self.face_index)
            .and_then(|face| face.tables().kern)
        else {
            return F26Dot6::ZERO;
        };
        let units: i32 = kern
            .subtables
            .into_iter()
            .filter(|s| s.horizontal && !s.variable)
            .filter_map(|s| s.glyphs_kerning(GlyphId(left), GlyphId(right)))
            .map(i32::from)
            .sum();
        F26Dot6::from_f32(units as f32 * self.size / self.units_per_em)
    }
}

/// Validate font bytes and extract swash metadata.
///
/// Returns `(offset, cache_key)` on success.
fn validate_font(data: &[u8], face_index: u32) -> Option<(u32, CacheKey)> {
    let fr = FontRef::from_index(data, face_index as usize)?;
    Some((fr.offset, fr.key))
}

/// Whether `data` parses as a font.
pub(super) fn is_font(data: &[u8]) -> bool {
    validate_font(data, 0).is_some()
}

impl GlyphProvider for SwashProvider {
    fn line_height(&self) -> F26Dot6 {
        let m = self.font_ref().metrics(&[]).scale(self.size);
        F26Dot6::from_f32(m.ascent + m.descent.abs() + m.leading)
    }

    fn advance(&self, codepoint: u32) -> F26Dot6 {
        let gid = self.glyph_id(codepoint);
        let fr = self.font_ref();
        F26Dot6::from_f32(fr.glyph_metrics(&[]).scale(self.size).advance_width(gid))
    }

    fn rasterize(&mut self, codepoint: u32) -> Option<RasterGlyph> {
        let gid = self.glyph_id(codepoint);
        if gid == 0 {
            return None;
        }

        let fr = FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        };
        let advance = fr.glyph_metrics(&[]).scale(self.size).advance_width(gid);
        let mut scaler = self.context.builder(fr).size(self.size).hint(true).build();
        let image = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, gid)?;

        let p = image.placement;
        Some(RasterGlyph {
            metrics: GlyphMetrics {
                bearing_x: F26Dot6::from_pixels(p.left),
                bearing_y: F26Dot6::from_pixels(p.top),
                width: F26Dot6::from_pixels(p.width as i32),
                height: F26Dot6::from_pixels(p.height as i32),
                advance: F26Dot6::from_f32(advance),
            },
            bitmap: GlyphBitmap {
                width: p.width,
                height: p.height,
                pixels: image.data,
            },
        })
    }

    fn kerning(&self, left: u32, right: u32) -> F26Dot6 {
        if !self.has_kern {
            return F26Dot6::ZERO;
        }
        let (l, r) = (self.glyph_id(left), self.glyph_id(right));
        if l == 0 || r == 0 {
            return F26Dot6::ZERO;
        }
        if let Some(&cached) = self.kern_pairs.borrow().get(&(l, r)) {
            return cached;
        }
        let kern = self.pair_kerning(l, r);
        self.kern_pairs.borrow_mut().insert((l, r), kern);
        kern
    }
}
