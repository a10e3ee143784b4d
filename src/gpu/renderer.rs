//! Shared text render state: pipeline, sampler, uniforms, and layouts.
//!
//! One `TextRenderer` serves every font and line on a device. Fonts build
//! their atlas bind group against its layout; lines bind everything they
//! need inside the caller's render pass on each draw.

use typecase_core::Mat4;

use super::pipeline::{self, UNIFORM_SIZE};

pub struct TextRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    atlas_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl TextRenderer {
    /// Build the pipeline for render targets of `format`.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let uniform_layout = pipeline::create_uniform_bind_group_layout(device);
        let atlas_layout = pipeline::create_atlas_bind_group_layout(device);
        let pipeline =
            pipeline::create_text_pipeline(device, format, &uniform_layout, &atlas_layout);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniform_buffer"),
            size: UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("atlas_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let renderer = Self {
            device: device.clone(),
            queue: queue.clone(),
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            atlas_layout,
            sampler,
        };
        renderer.prepare(&Mat4::IDENTITY, [1.0, 1.0, 1.0, 1.0]);
        renderer
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Largest atlas edge the device accepts.
    pub fn max_texture_size(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Set the projection and text color for subsequent draws.
    ///
    /// `color` is straight (non-premultiplied) RGBA in the target's space.
    pub fn prepare(&self, projection: &Mat4, color: [f32; 4]) {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, &uniform_bytes(projection, color));
    }

    /// Bind group pairing an atlas view with the shared sampler.
    pub(crate) fn atlas_bind_group(&self, view: &wgpu::TextureView) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atlas_bind_group"),
            layout: &self.atlas_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    pub(crate) fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub(crate) fn uniform_bind_group(&self) -> &wgpu::BindGroup {
        &self.uniform_bind_group
    }
}

impl Drop for TextRenderer {
    fn drop(&mut self) {
        self.uniform_buffer.destroy();
    }
}

/// Pack the uniform block: column-major projection, then color.
fn uniform_bytes(projection: &Mat4, color: [f32; 4]) -> [u8; 80] {
    let mut bytes = [0u8; 80];
    let cols = projection.to_cols_f32();
    let values = cols.iter().flatten().chain(&color);
    for (i, &v) in values.enumerate() {
        bytes[i * 4..i * 4 + 4].copy_from_slice(&v.to_ne_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use typecase_core::Mat4;

    use super::uniform_bytes;

    fn float_at(bytes: &[u8], i: usize) -> f32 {
        f32::from_ne_bytes([bytes[i * 4], bytes[i * 4 + 1], bytes[i * 4 + 2], bytes[i * 4 + 3]])
    }

    #[test]
    fn uniform_block_is_projection_then_color() {
        let proj = Mat4::orthographic(0.0, 800.0, 0.0, 600.0, -1.0, 1.0);
        let bytes = uniform_bytes(&proj, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(float_at(&bytes, 0), (2.0f64 / 800.0) as f32);
        assert_eq!(float_at(&bytes, 5), (2.0f64 / 600.0) as f32);
        // Translation sits in the fourth column.
        assert_eq!(float_at(&bytes, 12), -1.0);
        assert_eq!(float_at(&bytes, 13), -1.0);
        assert_eq!(float_at(&bytes, 15), 1.0);
        assert_eq!(
            [16, 17, 18, 19].map(|i| float_at(&bytes, i)),
            [0.1, 0.2, 0.3, 0.4]
        );
    }
}
