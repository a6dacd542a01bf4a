//! EdgeView Pipeline - one camera frame in, one display frame out
//!
//! [`EdgePipeline`] owns every buffer a frame passes through and exposes the
//! operations the camera and render threads call: initialise, process a
//! frame, bind a texture, upload. [`boundary`] wraps those operations for
//! callers on the far side of a foreign call boundary, and
//! [`FrameProcessor`] coordinates the two threads over a [`SharedPipeline`].

pub mod boundary;
pub mod cache;
pub mod config;
pub mod pipeline;
pub mod processor;

pub use cache::FrameBufferCache;
pub use config::PipelineConfig;
pub use pipeline::{EdgePipeline, SharedPipeline};
pub use processor::FrameProcessor;
