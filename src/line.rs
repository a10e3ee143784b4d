//! Typeset lines: immutable GPU vertex and index buffers of glyph quads.

use std::fmt;

use typecase_core::{FontId, LayoutError, Mat4, Vertex};

use crate::font::Font;
use crate::gpu::{TextRenderer, create_buffer, index_bytes, vertex_bytes};

/// Failure to build or draw a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    Layout(LayoutError),
    /// The line was drawn with a font other than the one that set it.
    FontMismatch { line: FontId, font: FontId },
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(e) => write!(f, "layout failed: {e}"),
            Self::FontMismatch { line, font } => {
                write!(f, "line was set in {line} but drawn with {font}")
            }
        }
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::FontMismatch { .. } => None,
        }
    }
}

impl From<LayoutError> for LineError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

/// One string or a stack of strings, ready to draw.
///
/// A line references its font by id only. The font must outlive the line;
/// [`Line::render`] checks that it is given the same font.
pub struct Line {
    font: FontId,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    /// Retained copy of the uploaded vertices.
    vertices: Vec<Vertex>,
    glyphs: u32,
    advances: Vec<i32>,
}

impl Line {
    /// Typeset a single string at the origin.
    pub fn create(font: &mut Font, renderer: &TextRenderer, text: &str) -> Result<Self, LineError> {
        Self::layout(font, renderer, &[text], None, None)
    }

    /// Typeset a stack of strings.
    ///
    /// `expansions` adds extra pixels across each string's spaces for
    /// justification. `matrices` places each string; without them string `i`
    /// sits `i` line heights below the first.
    pub fn layout<S: AsRef<str>>(
        font: &mut Font,
        renderer: &TextRenderer,
        strings: &[S],
        expansions: Option<&[i32]>,
        matrices: Option<&[Mat4]>,
    ) -> Result<Self, LineError> {
        let layout = typecase_core::layout(font.cache_mut(), strings, expansions, matrices)?;
        let glyphs = layout.glyphs as u32;

        let device = renderer.device();
        let queue = renderer.queue();
        let vertex_buffer = create_buffer(
            device,
            queue,
            &vertex_bytes(&layout.vertices),
            wgpu::BufferUsages::VERTEX,
            "line_vertices",
        );
        let index_buffer = create_buffer(
            device,
            queue,
            &index_bytes(layout.glyphs),
            wgpu::BufferUsages::INDEX,
            "line_indices",
        );

        log::debug!(
            "line: {} strings, {glyphs} glyphs in {}",
            strings.len(),
            font.id()
        );
        Ok(Self {
            font: font.id(),
            vertex_buffer,
            index_buffer,
            vertices: layout.vertices,
            glyphs,
            advances: layout.advances,
        })
    }

    /// Record the draw into `pass` with the font's atlas bound.
    ///
    /// Every binding the draw needs is set here, so earlier pass state does
    /// not affect it.
    pub fn render(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        font: &Font,
        renderer: &TextRenderer,
    ) -> Result<(), LineError> {
        if font.id() != self.font {
            return Err(LineError::FontMismatch {
                line: self.font,
                font: font.id(),
            });
        }
        if self.glyphs == 0 {
            return Ok(());
        }
        pass.set_pipeline(renderer.pipeline());
        pass.set_bind_group(0, renderer.uniform_bind_group(), &[]);
        pass.set_bind_group(1, font.bind_group(), &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count(), 0, 0..1);
        Ok(())
    }

    pub fn font_id(&self) -> FontId {
        self.font
    }

    /// Number of non-space codepoints; the line holds four vertices per glyph.
    pub fn glyphs(&self) -> u32 {
        self.glyphs
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Final pen position of each string, in pixels.
    pub fn advances(&self) -> &[i32] {
        &self.advances
    }

    fn index_count(&self) -> u32 {
        self.glyphs * 6
    }
}

impl Drop for Line {
    fn drop(&mut self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("font", &self.font)
            .field("glyphs", &self.glyphs)
            .field("advances", &self.advances)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use typecase_core::LayoutError;

    use super::LineError;

    #[test]
    fn layout_errors_wrap_with_source() {
        let e: LineError = LayoutError::MatrixCount { expected: 2, got: 1 }.into();
        assert_eq!(e.to_string(), "layout failed: expected 2 matrices, got 1");
        assert!(e.source().is_some());
    }
}
