//! GPU fonts: a swash glyph provider feeding a wgpu atlas.
//!
//! [`Font`] pairs the core glyph cache with the atlas texture's bind group.
//! Glyphs are rasterized and uploaded lazily the first time a line uses
//! them; the atlas never grows or evicts.

mod provider;

pub use provider::SwashProvider;

use std::fmt;
use std::path::PathBuf;

use typecase_core::{FontCacheError, FontId, FontOptions, fit_atlas_edge};

use crate::gpu::{TextRenderer, WgpuAtlas};

pub(crate) type GlyphCache = typecase_core::Font<SwashProvider, WgpuAtlas>;

/// Where font data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// An in-memory font file.
    Bytes(Vec<u8>),
    /// A font file on disk.
    Path(PathBuf),
}

impl FontSource {
    /// Classify raw input that is either font data or a path to a font.
    ///
    /// Input that parses as a font is taken as bytes. Otherwise input that is
    /// valid UTF-8 without NULs is taken as a path. Anything else stays bytes
    /// and fails to load.
    pub fn guess(input: &[u8]) -> Self {
        if provider::is_font(input) {
            return Self::Bytes(input.to_vec());
        }
        match std::str::from_utf8(input) {
            Ok(s) if !s.is_empty() && !s.contains('\0') => Self::Path(PathBuf::from(s)),
            _ => Self::Bytes(input.to_vec()),
        }
    }
}

impl From<PathBuf> for FontSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for FontSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Failure to create a font.
#[derive(Debug)]
pub enum FontError {
    /// The data is not a font the glyph provider can read.
    Load { path: Option<PathBuf> },
    /// The font file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A pixel size of zero was requested.
    InvalidSize,
    /// The font reports a line height below one pixel.
    NoLineHeight(i32),
    /// The atlas edge exceeds the device's 2D texture limit.
    AtlasTooLarge { size: u32, max: u32 },
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { path: Some(path) } => {
                write!(f, "{}: not a supported font file", path.display())
            }
            Self::Load { path: None } => write!(f, "font data is not a supported font"),
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::InvalidSize => write!(f, "font pixel size must be at least 1"),
            Self::NoLineHeight(h) => write!(f, "font reports a line height of {h}px"),
            Self::AtlasTooLarge { size, max } => {
                write!(f, "atlas of {size}x{size} exceeds the limit of {max}")
            }
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<FontCacheError> for FontError {
    fn from(e: FontCacheError) -> Self {
        match e {
            FontCacheError::LineHeight(h) => Self::NoLineHeight(h),
            FontCacheError::AtlasTooLarge { size, max } => Self::AtlasTooLarge { size, max },
        }
    }
}

/// Load a glyph provider, rejecting a zero pixel size first.
pub fn open_provider(
    source: &FontSource,
    options: &FontOptions,
) -> Result<SwashProvider, FontError> {
    if options.pixel_size == 0 {
        return Err(FontError::InvalidSize);
    }
    SwashProvider::open(source, options.pixel_size)
}

/// One face at one size with its own atlas texture.
pub struct Font {
    cache: GlyphCache,
    bind_group: wgpu::BindGroup,
}

impl Font {
    /// Load a font and allocate its atlas on `renderer`'s device.
    ///
    /// Failures are logged and returned; nothing is allocated on error.
    pub fn create(
        renderer: &TextRenderer,
        source: &FontSource,
        options: &FontOptions,
    ) -> Result<Self, FontError> {
        Self::try_create(renderer, source, options).inspect_err(|e| {
            log::warn!("font: {e}");
        })
    }

    fn try_create(
        renderer: &TextRenderer,
        source: &FontSource,
        options: &FontOptions,
    ) -> Result<Self, FontError> {
        let provider = open_provider(source, options)?;
        let height = GlyphCache::line_height_of(&provider);
        if height < 1 {
            return Err(FontError::NoLineHeight(height));
        }

        let size = fit_atlas_edge(height, options.atlas_size, renderer.max_texture_size())?;

        let atlas = WgpuAtlas::new(renderer.device(), renderer.queue(), size);
        let bind_group = renderer.atlas_bind_group(atlas.view());
        let cache = GlyphCache::new(provider, atlas, options.letter_spacing)?;
        Ok(Self { cache, bind_group })
    }

    pub fn id(&self) -> FontId {
        self.cache.id()
    }

    /// Line height in whole pixels.
    pub fn height(&self) -> i32 {
        self.cache.height()
    }

    pub fn atlas_size(&self) -> u32 {
        self.cache.atlas_size()
    }

    /// Number of glyphs cached so far.
    pub fn glyph_count(&self) -> usize {
        self.cache.sorts().len()
    }

    /// Unexpanded pixel width of `text`. May rasterize and upload glyphs.
    pub fn line_length(&mut self, text: &str) -> i32 {
        typecase_core::line_length(&mut self.cache, text)
    }

    pub(crate) fn cache_mut(&mut self) -> &mut GlyphCache {
        &mut self.cache
    }

    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font").field("cache", &self.cache).finish_non_exhaustive()
    }
}
