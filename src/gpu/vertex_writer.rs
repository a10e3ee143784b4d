//! Vertex and index byte writers for line buffers.

use typecase_core::Vertex;
use typecase_core::vertex::VERTICES_PER_QUAD;

/// Indices per quad: two triangles over the bottom-left, bottom-right,
/// top-right, top-left corners.
pub(crate) const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Serialize vertices as `[x, y, z, u, v]` native-endian `f32`s.
pub(crate) fn vertex_bytes(vertices: &[Vertex]) -> Vec<u8> {
    let mut data = Vec::with_capacity(vertices.len() * Vertex::STRIDE as usize);
    for v in vertices {
        for &f in v.position.iter().chain(&v.tex_coords) {
            data.extend_from_slice(&f.to_ne_bytes());
        }
    }
    data
}

/// Index bytes for `quads` consecutive quads.
pub(crate) fn index_bytes(quads: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(quads * QUAD_INDICES.len() * 4);
    for q in 0..quads {
        let base = (q * VERTICES_PER_QUAD) as u32;
        for i in QUAD_INDICES {
            data.extend_from_slice(&(base + i).to_ne_bytes());
        }
    }
    data
}

/// Create a static buffer holding `data`.
///
/// The buffer is at least `Vertex::STRIDE` bytes so empty lines still own a
/// valid binding.
pub(crate) fn create_buffer(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    data: &[u8],
    usage: wgpu::BufferUsages,
    label: &str,
) -> wgpu::Buffer {
    let buf = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (data.len() as u64).max(Vertex::STRIDE),
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    if !data.is_empty() {
        queue.write_buffer(&buf, 0, data);
    }
    buf
}
