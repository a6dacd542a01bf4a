//! Scratch buffers sized to the current frame.

use edgeview_core::{FrameDimensions, PixelFormat};
use edgeview_effects::EdgeScratch;
use tracing::debug;

/// Owns the canonical NV21 buffer, the RGBA output and the edge scratch.
///
/// All buffers share one size. They are replaced with fresh zeroed ones
/// when the size changes and left alone otherwise.
#[derive(Debug, Default)]
pub struct FrameBufferCache {
    dims: Option<FrameDimensions>,
    nv21: Vec<u8>,
    rgba: Vec<u8>,
    scratch: EdgeScratch,
    generation: u64,
}

/// Disjoint mutable borrows of the cached buffers for one frame.
pub(crate) struct FrameBuffers<'a> {
    pub nv21: &'a mut [u8],
    pub rgba: &'a mut [u8],
    pub scratch: &'a mut EdgeScratch,
}

impl FrameBufferCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size every buffer for `dims`. Returns `true` if anything was
    /// reallocated; a call with the cached size is a no-op.
    pub fn ensure_capacity(&mut self, dims: FrameDimensions) -> bool {
        if self.dims == Some(dims) {
            return false;
        }

        self.nv21 = vec![0; PixelFormat::Nv21.frame_size(dims)];
        self.rgba = vec![0; PixelFormat::Rgba8.frame_size(dims)];
        self.scratch.reallocate(dims);
        self.generation += 1;

        debug!(
            width = dims.width,
            height = dims.height,
            previous = ?self.dims,
            generation = self.generation,
            "Reallocated frame buffers"
        );
        self.dims = Some(dims);
        true
    }

    /// Drop every buffer. The next [`ensure_capacity`](Self::ensure_capacity)
    /// allocates again.
    pub fn release(&mut self) {
        if self.dims.take().is_some() {
            debug!("Released frame buffers");
        }
        self.nv21 = Vec::new();
        self.rgba = Vec::new();
        self.scratch = EdgeScratch::new();
    }

    pub fn dimensions(&self) -> Option<FrameDimensions> {
        self.dims
    }

    /// Incremented on every reallocation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The RGBA output; empty before the first allocation.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    #[cfg(test)]
    pub(crate) fn nv21(&self) -> &[u8] {
        &self.nv21
    }

    pub(crate) fn buffers(&mut self) -> FrameBuffers<'_> {
        FrameBuffers {
            nv21: &mut self.nv21,
            rgba: &mut self.rgba,
            scratch: &mut self.scratch,
        }
    }
}
