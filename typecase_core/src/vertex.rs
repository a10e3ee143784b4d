//! Vertex record emitted by the typesetter.

/// Number of vertices per glyph quad.
pub const VERTICES_PER_QUAD: usize = 4;

/// One quad corner: model-space position and normalized atlas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Byte stride of a packed vertex: 3 position floats then 2 texcoord floats.
    pub const STRIDE: u64 = 20;

    /// Degenerate vertex used to pad quads for glyphs that could not be placed.
    pub const ZERO: Self = Self {
        position: [0.0; 3],
        tex_coords: [0.0; 2],
    };
}
