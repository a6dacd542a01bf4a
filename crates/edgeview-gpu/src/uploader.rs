//! Texture upload state machine.

use edgeview_core::{EdgeViewError, FrameDimensions, PixelFormat, Result};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Opaque identifier of a display texture owned by the render side.
///
/// Handle 0 means "no texture bound".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    pub const UNBOUND: Self = Self(0);

    #[inline]
    pub fn is_bound(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for TextureHandle {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The graphics calls an upload is made of.
///
/// Implementations can assume `rgba` is exactly `dims` worth of RGBA8
/// pixels; the uploader checks that before calling in.
pub trait TextureBackend {
    /// Make `handle` the active 2D texture.
    fn bind_texture_2d(&mut self, handle: TextureHandle) -> Result<()>;

    /// Give `handle` fresh storage of `dims` and fill it with `rgba`.
    fn allocate_and_upload(
        &mut self,
        handle: TextureHandle,
        dims: FrameDimensions,
        rgba: &[u8],
    ) -> Result<()>;

    /// Overwrite the full extent of the existing storage of `handle`.
    fn update_region(
        &mut self,
        handle: TextureHandle,
        dims: FrameDimensions,
        rgba: &[u8],
    ) -> Result<()>;
}

/// Which path an upload took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// No texture bound; nothing was touched.
    Skipped,
    /// Storage was (re)allocated at the frame size.
    Allocated,
    /// Existing storage was overwritten in place.
    Updated,
}

/// Tracks the bound texture and the size last uploaded to each texture
/// through this uploader.
///
/// Storage is reallocated only when the frame size differs from the
/// previous upload to the same texture; same-size frames take the cheaper
/// update path. Binding never forgets a recorded size.
#[derive(Debug, Default)]
pub struct TextureUploader {
    bound: TextureHandle,
    uploaded: HashMap<TextureHandle, FrameDimensions>,
}

impl TextureUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the texture later uploads go to. Touches no GPU state.
    pub fn bind(&mut self, handle: TextureHandle) {
        if handle != self.bound {
            trace!(%handle, previous = %self.bound, "Texture bound");
        }
        self.bound = handle;
    }

    pub fn bound(&self) -> TextureHandle {
        self.bound
    }

    /// Size of the last upload to the bound texture.
    pub fn last_uploaded(&self) -> Option<FrameDimensions> {
        self.uploaded.get(&self.bound).copied()
    }

    /// Push `rgba` into the bound texture.
    pub fn upload<B: TextureBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        rgba: &[u8],
        dims: FrameDimensions,
    ) -> Result<UploadOutcome> {
        if !self.bound.is_bound() {
            return Ok(UploadOutcome::Skipped);
        }

        let expected = PixelFormat::Rgba8.frame_size(dims);
        if rgba.len() != expected {
            return Err(EdgeViewError::DimensionMismatch {
                expected: format!("{} RGBA bytes for {}", expected, dims),
                actual: format!("{} bytes", rgba.len()),
            });
        }

        let handle = self.bound;
        backend.bind_texture_2d(handle)?;

        let previous = self.uploaded.get(&handle).copied();
        if previous == Some(dims) {
            backend.update_region(handle, dims, rgba)?;
            trace!(%handle, %dims, "Texture updated in place");
            Ok(UploadOutcome::Updated)
        } else {
            backend.allocate_and_upload(handle, dims, rgba)?;
            debug!(
                %handle,
                width = dims.width,
                height = dims.height,
                ?previous,
                "Texture storage allocated"
            );
            self.uploaded.insert(handle, dims);
            Ok(UploadOutcome::Allocated)
        }
    }
}
