//! Typesetting: strings to textured quads.
//!
//! Each string is walked twice. The first pass counts spaces and glyphs so
//! justification can be distributed. The second pass moves an integer pen
//! across the string. A space advances by the scaled space width plus its
//! share of the expansion. A glyph adds kerning against its predecessor,
//! emits a quad at the pen, and advances by its scaled advance. Quads are
//! transformed by the string's matrix and written as four vertices in the
//! order bottom-left, bottom-right, top-right, top-left.

use std::fmt;

use crate::atlas::AtlasTexture;
use crate::font::{Font, SPACE};
use crate::matrix::Mat4;
use crate::provider::GlyphProvider;
use crate::sort::Sort;
use crate::utf8::codepoints;
use crate::vertex::{VERTICES_PER_QUAD, Vertex};

/// Vertex array for a stack of typeset strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// Four vertices per non-space codepoint, in input order.
    pub vertices: Vec<Vertex>,
    /// Number of non-space codepoints across all strings.
    pub glyphs: usize,
    /// Final pen position of each string, in pixels.
    pub advances: Vec<i32>,
}

/// Parallel argument lists that do not match the string count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    ExpansionCount { expected: usize, got: usize },
    MatrixCount { expected: usize, got: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpansionCount { expected, got } => {
                write!(f, "expected {expected} expansions, got {got}")
            }
            Self::MatrixCount { expected, got } => {
                write!(f, "expected {expected} matrices, got {got}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Count `(spaces, glyphs)` in `text`.
pub fn count(text: &str) -> (usize, usize) {
    codepoints(text).fold((0, 0), |(spaces, glyphs), c| {
        if c == SPACE {
            (spaces + 1, glyphs)
        } else {
            (spaces, glyphs + 1)
        }
    })
}

/// Extra pixels given to the `index`-th of `spaces` spaces.
///
/// Shares are computed as the difference of two truncated prefix sums, so
/// they always add up to exactly `expand`.
pub fn expansion_share(expand: i32, index: usize, spaces: usize) -> i32 {
    if spaces == 0 {
        return 0;
    }
    let (i, n) = (index as i64, spaces as i64);
    let e = i64::from(expand);
    (e * (i + 1) / n - e * i / n) as i32
}

/// Walk `text`, calling `place` with each resolved sort and the pen at which
/// it is set. Returns the final pen position.
fn walk<P, T>(
    font: &mut Font<P, T>,
    text: &str,
    expand: i32,
    mut place: impl FnMut(&Sort, i32),
) -> i32
where
    P: GlyphProvider,
    T: AtlasTexture,
{
    let (spaces, _) = count(text);
    let mut pen: i32 = 0;
    let mut space_index = 0;
    let mut prev = None;

    for c in codepoints(text) {
        if c == SPACE {
            pen = pen
                .saturating_add(font.space_step())
                .saturating_add(expansion_share(expand, space_index, spaces));
            space_index += 1;
        } else if let Some(sort) = font.sort_lookup(c) {
            pen = pen.saturating_add(font.kerning(prev, c));
            place(&sort, pen);
            pen = pen.saturating_add(font.glyph_step(&sort));
            prev = Some(c);
        }
    }
    pen
}

/// Append the quad for `sort` set at `pen` to `out`.
fn emit_quad(out: &mut Vec<Vertex>, sort: &Sort, pen: i32, matrix: &Mat4, atlas_size: u32) {
    let s = atlas_size as f32;
    let r = &sort.atlas;

    let tl = r.x as f32 / s;
    let tr = (r.x + r.w) as f32 / s;
    let tt = r.y as f32 / s;
    let tb = (r.y + r.h) as f32 / s;

    let vl = f64::from(sort.bearing_x) + f64::from(pen);
    let vr = vl + f64::from(r.w);
    let vt = f64::from(sort.bearing_y);
    let vb = vt - f64::from(r.h);

    out.extend_from_slice(&[
        Vertex {
            position: matrix.transform_point(vl, vb),
            tex_coords: [tl, tb],
        },
        Vertex {
            position: matrix.transform_point(vr, vb),
            tex_coords: [tr, tb],
        },
        Vertex {
            position: matrix.transform_point(vr, vt),
            tex_coords: [tr, tt],
        },
        Vertex {
            position: matrix.transform_point(vl, vt),
            tex_coords: [tl, tt],
        },
    ]);
}

/// Typeset one string into `out`, returning the final pen position.
///
/// Appends exactly four vertices per non-space codepoint. Codepoints that
/// resolve to no sort take no advance and are padded with degenerate quads.
pub fn layout_line<P, T>(
    font: &mut Font<P, T>,
    out: &mut Vec<Vertex>,
    text: &str,
    expand: i32,
    matrix: &Mat4,
) -> i32
where
    P: GlyphProvider,
    T: AtlasTexture,
{
    let start = out.len();
    let atlas_size = font.atlas_size();
    let pen = walk(font, text, expand, |sort, pen| {
        emit_quad(out, sort, pen, matrix, atlas_size);
    });

    let (_, glyphs) = count(text);
    out.resize(start + glyphs * VERTICES_PER_QUAD, Vertex::ZERO);
    pen
}

/// Typeset a stack of strings into one vertex array.
///
/// `expansions` and `matrices`, when given, must hold one entry per string.
/// Without matrices, string `i` is placed `i` line heights below the first.
pub fn layout<P, T, S>(
    font: &mut Font<P, T>,
    strings: &[S],
    expansions: Option<&[i32]>,
    matrices: Option<&[Mat4]>,
) -> Result<Layout, LayoutError>
where
    P: GlyphProvider,
    T: AtlasTexture,
    S: AsRef<str>,
{
    let expected = strings.len();
    if let Some(e) = expansions.filter(|e| e.len() != expected) {
        return Err(LayoutError::ExpansionCount {
            expected,
            got: e.len(),
        });
    }
    if let Some(m) = matrices.filter(|m| m.len() != expected) {
        return Err(LayoutError::MatrixCount {
            expected,
            got: m.len(),
        });
    }

    let glyphs: usize = strings.iter().map(|s| count(s.as_ref()).1).sum();
    let mut vertices = Vec::with_capacity(glyphs * VERTICES_PER_QUAD);
    let mut advances = Vec::with_capacity(expected);

    for (i, text) in strings.iter().enumerate() {
        let expand = expansions.map_or(0, |e| e[i]);
        let matrix = matrices.map_or_else(|| Mat4::line_offset(i, font.height()), |m| m[i]);
        advances.push(layout_line(font, &mut vertices, text.as_ref(), expand, &matrix));
    }

    Ok(Layout {
        vertices,
        glyphs,
        advances,
    })
}

/// Unexpanded width of `text` in pixels: the pen position after the walk.
pub fn line_length<P, T>(font: &mut Font<P, T>, text: &str) -> i32
where
    P: GlyphProvider,
    T: AtlasTexture,
{
    walk(font, text, 0, |_, _| {})
}
