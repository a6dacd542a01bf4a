//! Frame geometry and pixel formats of the pipeline's intermediate buffers.
//!
//! Every scratch buffer is sized from a single [`FrameDimensions`], so all of
//! the size math lives here.

use crate::channels;
use crate::error::{EdgeViewError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of a camera frame in pixels.
///
/// Construction rejects zero-sized frames and sizes whose RGBA byte count
/// would overflow `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    /// Create validated dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::from_signed(i64::from(width), i64::from(height))
    }

    /// Create validated dimensions from signed values as received across a
    /// call boundary. Zero or negative sides are rejected.
    pub fn from_signed(width: i64, height: i64) -> Result<Self> {
        let invalid = || EdgeViewError::InvalidDimensions { width, height };
        if width <= 0 || height <= 0 {
            return Err(invalid());
        }
        let w = u32::try_from(width).map_err(|_| invalid())?;
        let h = u32::try_from(height).map_err(|_| invalid())?;
        (w as usize)
            .checked_mul(h as usize)
            .and_then(|n| n.checked_mul(channels::RGBA))
            .ok_or_else(invalid)?;
        Ok(Self {
            width: w,
            height: h,
        })
    }

    #[inline]
    pub fn width_usize(self) -> usize {
        self.width as usize
    }

    #[inline]
    pub fn height_usize(self) -> usize {
        self.height as usize
    }

    /// Number of pixels in the frame.
    #[inline]
    pub fn pixel_count(self) -> usize {
        self.width_usize() * self.height_usize()
    }

    /// Rows of chroma pairs in a 4:2:0 frame (truncating).
    #[inline]
    pub fn chroma_rows(self) -> usize {
        self.height_usize() / 2
    }

    /// Chroma pairs per chroma row in a 4:2:0 frame (truncating).
    #[inline]
    pub fn chroma_cols(self) -> usize {
        self.width_usize() / 2
    }

}

impl fmt::Display for FrameDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixel format enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit RGBA (32 bits per pixel)
    #[default]
    Rgba8,
    /// 8-bit grayscale
    Gray8,
    /// Semi-planar YUV 4:2:0, luma plane then interleaved V/U pairs
    Nv21,
}

impl PixelFormat {
    /// Bytes per pixel for packed formats, or 0 for semi-planar.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 => channels::RGBA,
            Self::Gray8 => channels::GRAY,
            Self::Nv21 => 0,
        }
    }

    /// Number of rows in the buffer for a frame of the given size.
    ///
    /// NV21 is stored as a single-channel image of `height + height / 2`
    /// rows, each `width` bytes long.
    pub fn buffer_rows(self, dims: FrameDimensions) -> usize {
        match self {
            Self::Rgba8 | Self::Gray8 => dims.height_usize(),
            Self::Nv21 => dims.height_usize() + dims.chroma_rows(),
        }
    }

    /// Bytes per buffer row for a frame of the given width.
    pub fn row_bytes(self, dims: FrameDimensions) -> usize {
        match self {
            Self::Rgba8 | Self::Gray8 => dims.width_usize() * self.bytes_per_pixel(),
            Self::Nv21 => dims.width_usize(),
        }
    }

    /// Total bytes needed for a frame of this format.
    pub fn frame_size(self, dims: FrameDimensions) -> usize {
        self.row_bytes(dims) * self.buffer_rows(dims)
    }
}
