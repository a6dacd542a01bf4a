//! Texture backend over wgpu.

use crate::context::GpuContext;
use crate::texture::GpuTexture;
use crate::uploader::{TextureBackend, TextureHandle};
use edgeview_core::{EdgeViewError, FrameDimensions, Result};
use std::collections::HashMap;
use tracing::debug;

/// Owns the preview textures and resolves handles to them.
///
/// wgpu has no "currently bound" texture, so binding only checks the
/// handle exists.
pub struct WgpuBackend {
    context: GpuContext,
    textures: HashMap<TextureHandle, GpuTexture>,
    next_handle: u32,
}

impl WgpuBackend {
    pub fn new(context: GpuContext) -> Self {
        Self {
            context,
            textures: HashMap::new(),
            next_handle: 1,
        }
    }

    /// Create a texture holding one black pixel until the first upload.
    pub fn create_texture(&mut self) -> Result<TextureHandle> {
        let handle = TextureHandle(self.next_handle);
        self.next_handle = self
            .next_handle
            .checked_add(1)
            .ok_or_else(|| EdgeViewError::Gpu("texture handles exhausted".to_string()))?;

        let placeholder = FrameDimensions {
            width: 1,
            height: 1,
        };
        let texture = GpuTexture::for_preview(&self.context.device, placeholder);
        texture.write_rgba(&self.context.queue, &[0, 0, 0, 255])?;
        self.textures.insert(handle, texture);

        debug!(%handle, "Created preview texture");
        Ok(handle)
    }

    fn lookup(&self, handle: TextureHandle) -> Result<&GpuTexture> {
        self.textures
            .get(&handle)
            .ok_or(EdgeViewError::UnknownTexture(handle.raw()))
    }

    fn check_size(&self, dims: FrameDimensions) -> Result<()> {
        let max = self.context.max_texture_side();
        if dims.width > max || dims.height > max {
            return Err(EdgeViewError::Gpu(format!(
                "{} exceeds the device texture limit of {}",
                dims, max
            )));
        }
        Ok(())
    }
}

impl TextureBackend for WgpuBackend {
    fn bind_texture_2d(&mut self, handle: TextureHandle) -> Result<()> {
        self.lookup(handle).map(|_| ())
    }

    fn allocate_and_upload(
        &mut self,
        handle: TextureHandle,
        dims: FrameDimensions,
        rgba: &[u8],
    ) -> Result<()> {
        self.lookup(handle)?;
        self.check_size(dims)?;

        let texture = GpuTexture::for_preview(&self.context.device, dims);
        texture.write_rgba(&self.context.queue, rgba)?;
        debug!(
            %handle,
            bytes = texture.memory_size(),
            "Reallocated preview texture"
        );
        self.textures.insert(handle, texture);
        Ok(())
    }

    fn update_region(
        &mut self,
        handle: TextureHandle,
        dims: FrameDimensions,
        rgba: &[u8],
    ) -> Result<()> {
        let texture = self.lookup(handle)?;
        if texture.dims != dims {
            return Err(EdgeViewError::Gpu(format!(
                "update of {} exceeds texture {} storage {}",
                dims, handle, texture.dims
            )));
        }
        texture.write_rgba(&self.context.queue, rgba)
    }
}
