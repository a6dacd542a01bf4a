//! CPU-side texture backend.
//!
//! Holds texture contents in plain memory and records each call, so the
//! upload path can be observed without a GPU.

use crate::uploader::{TextureBackend, TextureHandle};
use edgeview_core::{EdgeViewError, FrameDimensions, Result};
use std::collections::HashMap;

/// One graphics call as seen by [`HeadlessBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureCall {
    Bind(TextureHandle),
    Allocate {
        handle: TextureHandle,
        dims: FrameDimensions,
    },
    Update {
        handle: TextureHandle,
        dims: FrameDimensions,
    },
}

#[derive(Debug)]
struct Storage {
    dims: FrameDimensions,
    pixels: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    textures: HashMap<TextureHandle, Storage>,
    calls: Vec<TextureCall>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> &[TextureCall] {
        &self.calls
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<TextureCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn allocation_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, TextureCall::Allocate { .. }))
            .count()
    }

    /// Current contents of `handle`, if it has storage.
    pub fn pixels(&self, handle: TextureHandle) -> Option<&[u8]> {
        self.textures.get(&handle).map(|s| s.pixels.as_slice())
    }

    pub fn dimensions(&self, handle: TextureHandle) -> Option<FrameDimensions> {
        self.textures.get(&handle).map(|s| s.dims)
    }
}

impl TextureBackend for HeadlessBackend {
    fn bind_texture_2d(&mut self, handle: TextureHandle) -> Result<()> {
        self.calls.push(TextureCall::Bind(handle));
        Ok(())
    }

    fn allocate_and_upload(
        &mut self,
        handle: TextureHandle,
        dims: FrameDimensions,
        rgba: &[u8],
    ) -> Result<()> {
        self.calls.push(TextureCall::Allocate { handle, dims });
        self.textures.insert(
            handle,
            Storage {
                dims,
                pixels: rgba.to_vec(),
            },
        );
        Ok(())
    }

    fn update_region(
        &mut self,
        handle: TextureHandle,
        dims: FrameDimensions,
        rgba: &[u8],
    ) -> Result<()> {
        self.calls.push(TextureCall::Update { handle, dims });
        let storage = self
            .textures
            .get_mut(&handle)
            .ok_or_else(|| EdgeViewError::Gpu(format!("texture {} has no storage", handle)))?;
        if storage.dims != dims {
            return Err(EdgeViewError::Gpu(format!(
                "update of {} exceeds texture {} storage {}",
                dims, handle, storage.dims
            )));
        }
        storage.pixels.copy_from_slice(rgba);
        Ok(())
    }
}
