//! Single-page glyph atlas texture.
//!
//! A square `R8Unorm` texture, zero-initialized by wgpu. Placement is decided
//! by the core shelf packer; this type only receives sub-rectangle uploads.

use typecase_core::{AtlasRect, AtlasTexture};

pub struct WgpuAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    /// Upload queue, shared with the renderer.
    queue: wgpu::Queue,
    size: u32,
}

impl WgpuAtlas {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, size: u32) -> Self {
        let texture = create_texture(device, size);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        log::debug!("atlas: created {size}x{size} R8 texture");
        Self {
            texture,
            view,
            queue: queue.clone(),
            size,
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

impl AtlasTexture for WgpuAtlas {
    fn size(&self) -> u32 {
        self.size
    }

    fn write(&mut self, rect: AtlasRect, pixels: &[u8]) {
        if rect.is_empty() {
            return;
        }
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: rect.x,
                    y: rect.y,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(rect.w),
                rows_per_image: Some(rect.h),
            },
            wgpu::Extent3d {
                width: rect.w,
                height: rect.h,
                depth_or_array_layers: 1,
            },
        );
    }
}

impl Drop for WgpuAtlas {
    fn drop(&mut self) {
        self.texture.destroy();
    }
}

fn create_texture(device: &wgpu::Device, size: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("glyph_atlas"),
        size: wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::R8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}
