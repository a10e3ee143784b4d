//! Square glyph atlas: shelf packing and the texture upload seam.
//!
//! Glyphs are laid left to right along a shelf. When the next glyph would
//! reach the right edge, a new shelf opens one pixel below the tallest glyph
//! of the current one. A one-pixel gutter separates neighbours on both axes
//! so linear filtering never samples an adjacent glyph. Nothing is evicted:
//! once a glyph no longer fits, placement fails and the caller drops it.

/// Axis-aligned rectangle within the atlas, in texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl AtlasRect {
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// Whether the two rectangles share at least one texel.
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Smallest edge the atlas may have: `requested`, or four line heights.
pub fn min_atlas_edge(line_height: i32, requested: Option<u32>) -> u32 {
    requested
        .unwrap_or_else(|| u32::try_from(line_height.max(0)).unwrap_or(0).saturating_mul(4))
        .max(1)
}

/// Atlas edge for a font: [`min_atlas_edge`] rounded up to a power of two.
///
/// `None` when the rounded edge does not fit in a `u32`.
pub fn atlas_edge(line_height: i32, requested: Option<u32>) -> Option<u32> {
    min_atlas_edge(line_height, requested).checked_next_power_of_two()
}

/// Destination for glyph coverage: a square single-channel texture.
pub trait AtlasTexture {
    /// Edge length in texels.
    fn size(&self) -> u32;

    /// Copy tightly packed `rect.w * rect.h` alpha bytes into `rect`.
    fn write(&mut self, rect: AtlasRect, pixels: &[u8]);
}

/// Atlas held in host memory, for headless measurement and inspection.
#[derive(Debug, Clone)]
pub struct CpuAtlas {
    size: u32,
    pixels: Vec<u8>,
    writes: usize,
}

impl CpuAtlas {
    /// Zero-filled `size × size` atlas.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            pixels: vec![0; size as usize * size as usize],
            writes: 0,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Coverage at `(x, y)`, or 0 outside the atlas.
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        if x >= self.size || y >= self.size {
            return 0;
        }
        self.pixels[(y * self.size + x) as usize]
    }

    /// Number of sub-rectangle uploads received so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl AtlasTexture for CpuAtlas {
    fn size(&self) -> u32 {
        self.size
    }

    fn write(&mut self, rect: AtlasRect, pixels: &[u8]) {
        self.writes += 1;
        let w = rect.w.min(self.size.saturating_sub(rect.x)) as usize;
        let rows = rect.h.min(self.size.saturating_sub(rect.y));
        for row in 0..rows {
            let src = (row * rect.w) as usize;
            let dst = ((rect.y + row) * self.size + rect.x) as usize;
            let Some(line) = pixels.get(src..src + w) else {
                return;
            };
            self.pixels[dst..dst + w].copy_from_slice(line);
        }
    }
}

/// Shelf-packing cursor over a square atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfPacker {
    size: u32,
    x: u32,
    y: u32,
    row_max: u32,
}

impl ShelfPacker {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            x: 0,
            y: 0,
            row_max: 0,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Current `(x, y, row_max)`.
    pub fn cursor(&self) -> (u32, u32, u32) {
        (self.x, self.y, self.row_max)
    }

    /// Reserve a `w × h` slot.
    ///
    /// Empty glyphs get a zero-sized rectangle on the current shelf and leave
    /// the cursor alone. Returns `None` without moving the cursor when the
    /// glyph does not fit.
    pub fn place(&mut self, w: u32, h: u32) -> Option<AtlasRect> {
        if w == 0 || h == 0 {
            return Some(AtlasRect {
                x: 0,
                y: self.y,
                w: 0,
                h: 0,
            });
        }

        let (mut x, mut y, mut row_max) = (self.x, self.y, self.row_max);
        if x + w >= self.size {
            y += row_max + 1;
            x = 0;
            row_max = 0;
        }
        if x + w >= self.size || y + h >= self.size {
            return None;
        }

        self.x = x + w + 1;
        self.y = y;
        self.row_max = row_max.max(h);
        Some(AtlasRect { x, y, w, h })
    }
}

#[cfg(test)]
mod tests;
