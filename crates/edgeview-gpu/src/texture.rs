//! GPU texture holding a preview frame.

use edgeview_core::{EdgeViewError, FrameDimensions, PixelFormat, Result};

/// A 2D RGBA texture plus its default view.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub dims: FrameDimensions,
    pub format: wgpu::TextureFormat,
}

impl GpuTexture {
    pub fn new(
        device: &wgpu::Device,
        dims: FrameDimensions,
        format: wgpu::TextureFormat,
        usage: wgpu::TextureUsages,
        label: Option<&str>,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size: extent(dims),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            dims,
            format,
        }
    }

    /// Texture sampled by the preview renderer and written by frame uploads.
    ///
    /// Frames arrive display-encoded, so the format is plain `Rgba8Unorm`.
    pub fn for_preview(device: &wgpu::Device, dims: FrameDimensions) -> Self {
        Self::new(
            device,
            dims,
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            Some("Camera Preview Texture"),
        )
    }

    /// Write a tightly packed RGBA frame over the whole texture.
    pub fn write_rgba(&self, queue: &wgpu::Queue, rgba: &[u8]) -> Result<()> {
        let expected = PixelFormat::Rgba8.frame_size(self.dims);
        if rgba.len() != expected {
            return Err(EdgeViewError::Gpu(format!(
                "Frame of {} bytes doesn't fill {} texture ({} bytes)",
                rgba.len(),
                self.dims,
                expected
            )));
        }

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(PixelFormat::Rgba8.row_bytes(self.dims) as u32),
                rows_per_image: Some(self.dims.height),
            },
            extent(self.dims),
        );

        Ok(())
    }

    /// Memory usage estimate in bytes.
    pub fn memory_size(&self) -> usize {
        let bytes_per_pixel = self.format.block_copy_size(None).unwrap_or(4) as usize;
        self.dims.pixel_count() * bytes_per_pixel
    }
}

fn extent(dims: FrameDimensions) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: dims.width,
        height: dims.height,
        depth_or_array_layers: 1,
    }
}
