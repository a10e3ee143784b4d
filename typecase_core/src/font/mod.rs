//! Per-font glyph cache: provider, atlas texture, shelf cursor, sort table.
//!
//! A `Font` materializes glyphs lazily. The first lookup of a codepoint
//! rasterizes it, reserves an atlas slot, uploads the coverage once, and
//! records a [`Sort`]. Later lookups are a binary search. Sorts are never
//! evicted; a glyph that does not fit is dropped and remembered as missing so
//! it is not rasterized again.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::atlas::{AtlasTexture, CpuAtlas, ShelfPacker, atlas_edge, min_atlas_edge};
use crate::provider::GlyphProvider;
use crate::sort::{Sort, SortTable};

/// The space character. Its advance is handled by the typesetter and it is
/// never interned as a sort.
pub const SPACE: u32 = 0x20;

/// Largest atlas edge a host-memory font will allocate (64 MiB of coverage).
pub const HEADLESS_ATLAS_LIMIT: u32 = 8192;

static NEXT_FONT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique font identity, used to tie lines to the font they were set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(u64);

impl FontId {
    fn next() -> Self {
        Self(NEXT_FONT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font#{}", self.0)
    }
}

/// Construction parameters shared by every font backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontOptions {
    /// Nominal pixel size handed to the glyph provider.
    pub pixel_size: u32,
    /// Multiplier applied to every glyph and space advance.
    pub letter_spacing: f32,
    /// Explicit atlas edge. `None` derives it from the line height.
    pub atlas_size: Option<u32>,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            pixel_size: 16,
            letter_spacing: 1.0,
            atlas_size: None,
        }
    }
}

/// Failure to set up a font cache over an initialized provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontCacheError {
    /// The provider reported a line height below one pixel.
    LineHeight(i32),
    /// The atlas edge is over `max`. `size` is the unrounded edge when
    /// rounding up to a power of two overflows.
    AtlasTooLarge { size: u32, max: u32 },
}

impl fmt::Display for FontCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineHeight(h) => write!(f, "font reports a line height of {h}px"),
            Self::AtlasTooLarge { size, max } => {
                write!(f, "atlas of {size}x{size} exceeds the limit of {max}")
            }
        }
    }
}

impl std::error::Error for FontCacheError {}

/// Power-of-two atlas edge for `line_height`, rejected when above `max`.
pub fn fit_atlas_edge(
    line_height: i32,
    requested: Option<u32>,
    max: u32,
) -> Result<u32, FontCacheError> {
    match atlas_edge(line_height, requested) {
        Some(edge) if edge <= max => Ok(edge),
        edge => Err(FontCacheError::AtlasTooLarge {
            size: edge.unwrap_or_else(|| min_atlas_edge(line_height, requested)),
            max,
        }),
    }
}

/// Glyph cache for one face at one size, backed by one atlas texture.
pub struct Font<P, T> {
    id: FontId,
    provider: P,
    height: i32,
    space_advance: i32,
    letter_spacing: f32,
    texture: T,
    packer: ShelfPacker,
    sorts: SortTable,
    /// Codepoints the provider could not produce or the atlas could not hold.
    missing: BTreeSet<u32>,
}

impl<P: GlyphProvider, T: AtlasTexture> Font<P, T> {
    /// Wrap an initialized provider and an empty atlas texture.
    ///
    /// Use [`fit_atlas_edge`] with [`Font::line_height_of`] to size the texture.
    pub fn new(provider: P, texture: T, letter_spacing: f32) -> Result<Self, FontCacheError> {
        let height = Self::line_height_of(&provider);
        if height < 1 {
            return Err(FontCacheError::LineHeight(height));
        }
        let space_advance = provider.advance(SPACE).to_pixels();
        let packer = ShelfPacker::new(texture.size());

        let font = Self {
            id: FontId::next(),
            provider,
            height,
            space_advance,
            letter_spacing,
            texture,
            packer,
            sorts: SortTable::new(),
            missing: BTreeSet::new(),
        };
        log::debug!(
            "{}: line height {}px, space {}px, atlas {}x{}",
            font.id,
            font.height,
            font.space_advance,
            font.atlas_size(),
            font.atlas_size(),
        );
        Ok(font)
    }

    /// Whole-pixel line height a provider reports.
    pub fn line_height_of(provider: &P) -> i32 {
        provider.line_height().to_pixels()
    }

    pub fn id(&self) -> FontId {
        self.id
    }

    /// Nominal line height in pixels.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Unscaled space advance in pixels.
    pub fn space_advance(&self) -> i32 {
        self.space_advance
    }

    pub fn letter_spacing(&self) -> f32 {
        self.letter_spacing
    }

    pub fn atlas_size(&self) -> u32 {
        self.packer.size()
    }

    pub fn texture(&self) -> &T {
        &self.texture
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn sorts(&self) -> &SortTable {
        &self.sorts
    }

    pub fn packer(&self) -> &ShelfPacker {
        &self.packer
    }

    /// Resolve `codepoint` to its sort, materializing it on first use.
    ///
    /// Returns `None` for the space character, for codepoints the provider
    /// cannot rasterize, and once the atlas is full.
    pub fn sort_lookup(&mut self, codepoint: u32) -> Option<Sort> {
        if let Some(sort) = self.sorts.get(codepoint) {
            return Some(*sort);
        }
        if codepoint == SPACE || self.missing.contains(&codepoint) {
            return None;
        }

        match self.materialize(codepoint) {
            Some(sort) => {
                self.sorts.insert(sort);
                log::trace!("{}: cached U+{codepoint:04X} at {:?}", self.id, sort.atlas);
                Some(sort)
            }
            None => {
                self.missing.insert(codepoint);
                None
            }
        }
    }

    /// Kerning between the previous glyph (if any) and `codepoint`, in pixels.
    pub fn kerning(&self, prev: Option<u32>, codepoint: u32) -> i32 {
        prev.map_or(0, |left| self.provider.kerning(left, codepoint).to_pixels())
    }

    /// Pen advance for one space before justification.
    pub fn space_step(&self) -> i32 {
        (self.space_advance as f32 * self.letter_spacing).floor() as i32
    }

    /// Pen advance for one glyph.
    pub fn glyph_step(&self, sort: &Sort) -> i32 {
        (sort.advance as f32 * self.letter_spacing).floor() as i32
    }

    /// Rasterize, place, and upload one glyph. Nothing is mutated on failure.
    fn materialize(&mut self, codepoint: u32) -> Option<Sort> {
        let Some(glyph) = self.provider.rasterize(codepoint) else {
            log::debug!("{}: no glyph for U+{codepoint:04X}", self.id);
            return None;
        };

        let bitmap = &glyph.bitmap;
        if !bitmap.is_complete() {
            log::debug!(
                "{}: short bitmap for U+{codepoint:04X} ({} bytes for {}x{})",
                self.id,
                bitmap.pixels.len(),
                bitmap.width,
                bitmap.height,
            );
            return None;
        }

        let Some(rect) = self.packer.place(bitmap.width, bitmap.height) else {
            log::warn!(
                "{}: atlas full ({}x{}), dropping U+{codepoint:04X}",
                self.id,
                self.atlas_size(),
                self.atlas_size(),
            );
            return None;
        };

        if !rect.is_empty() {
            self.texture.write(rect, &bitmap.pixels);
        }

        let m = glyph.metrics;
        Some(Sort {
            codepoint,
            bearing_x: m.bearing_x.to_pixels(),
            bearing_y: m.bearing_y.to_pixels(),
            width: m.width.to_pixels(),
            height: m.height.to_pixels(),
            advance: m.advance.to_pixels(),
            atlas: rect,
        })
    }
}

impl<P: GlyphProvider> Font<P, CpuAtlas> {
    /// Build a font whose atlas lives in host memory.
    ///
    /// The atlas edge is capped at [`HEADLESS_ATLAS_LIMIT`].
    pub fn headless(provider: P, options: &FontOptions) -> Result<Self, FontCacheError> {
        let height = Self::line_height_of(&provider);
        if height < 1 {
            return Err(FontCacheError::LineHeight(height));
        }
        let edge = fit_atlas_edge(height, options.atlas_size, HEADLESS_ATLAS_LIMIT)?;
        Self::new(provider, CpuAtlas::new(edge), options.letter_spacing)
    }
}

impl<P, T> fmt::Debug for Font<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("id", &self.id)
            .field("height", &self.height)
            .field("space_advance", &self.space_advance)
            .field("letter_spacing", &self.letter_spacing)
            .field("atlas_size", &self.packer.size())
            .field("sorts", &self.sorts.len())
            .finish_non_exhaustive()
    }
}
