//! EdgeView Core - Foundation types for the camera preview pipeline
//!
//! This crate provides the fundamental types shared by every stage:
//! - Frame dimensions and buffer size math
//! - Pixel formats of the intermediate buffers
//! - Processing timestamps for latency measurement
//! - The error taxonomy

pub mod error;
pub mod frame;
pub mod time;

pub use error::{EdgeViewError, Plane, Result};
pub use frame::{FrameDimensions, PixelFormat};
pub use time::{ProcessingTimestamp, TimestampSource};

/// Channel counts of the buffers flowing through the pipeline.
pub mod channels {
    /// Interleaved R, G, B, A.
    pub const RGBA: usize = 4;

    /// Single-channel luma / grayscale / edge map.
    pub const GRAY: usize = 1;

    /// Fully opaque alpha written by every producer of RGBA output.
    pub const OPAQUE: u8 = 255;
}
