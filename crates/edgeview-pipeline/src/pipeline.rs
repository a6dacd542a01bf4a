//! The frame pipeline object.

use crate::cache::FrameBufferCache;
use crate::config::PipelineConfig;
use edgeview_color::{nv21_to_rgba, YuvToRgb};
use edgeview_core::{FrameDimensions, ProcessingTimestamp, Result, TimestampSource};
use edgeview_effects::{EdgeDetector, EdgeParams};
use edgeview_gpu::{TextureBackend, TextureHandle, TextureUploader, UploadOutcome};
use edgeview_media::{assemble_nv21, CameraFrame};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::trace;

/// A pipeline shared between the camera thread and the render thread.
pub type SharedPipeline = Arc<Mutex<EdgePipeline>>;

/// Converts camera frames to RGBA, optionally replaces them with an edge
/// map, and uploads the result to a display texture.
///
/// Every call runs to completion on the calling thread. The pipeline holds
/// no lock of its own; wrap it in a [`SharedPipeline`] to use it from more
/// than one thread.
#[derive(Debug)]
pub struct EdgePipeline {
    cache: FrameBufferCache,
    matrix: YuvToRgb,
    detector: EdgeDetector,
    uploader: TextureUploader,
    clock: TimestampSource,
}

impl EdgePipeline {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let config = config.validate()?;
        let mut pipeline = Self {
            cache: FrameBufferCache::new(),
            matrix: YuvToRgb::BT601_FULL,
            detector: EdgeDetector::new(config.edge)?,
            uploader: TextureUploader::new(),
            clock: TimestampSource::new(),
        };
        if let Some(dims) = config.initial_size {
            pipeline.init(dims);
        }
        Ok(pipeline)
    }

    pub fn into_shared(self) -> SharedPipeline {
        Arc::new(Mutex::new(self))
    }

    /// Size the buffers for `dims`. Returns `true` if they were reallocated.
    pub fn init(&mut self, dims: FrameDimensions) -> bool {
        self.cache.ensure_capacity(dims)
    }

    /// Free every frame buffer. Texture binding is kept.
    pub fn release(&mut self) {
        self.cache.release();
    }

    /// Assemble, convert and (in edge mode) edge-filter one frame into the
    /// RGBA buffer.
    ///
    /// The buffers follow the frame's size. On error nothing has been
    /// written and the previous RGBA frame is still in place.
    pub fn process_frame(
        &mut self,
        frame: &CameraFrame<'_>,
        edge_mode: bool,
    ) -> Result<ProcessingTimestamp> {
        let dims = frame.dimensions();
        self.cache.ensure_capacity(dims);

        let buffers = self.cache.buffers();
        assemble_nv21(frame, buffers.nv21)?;
        nv21_to_rgba(&self.matrix, buffers.nv21, buffers.rgba, dims)?;
        if edge_mode {
            self.detector.apply(buffers.rgba, dims, buffers.scratch)?;
        }

        let timestamp = self.clock.next();
        trace!(%dims, edge_mode, %timestamp, "Processed frame");
        Ok(timestamp)
    }

    /// Select the texture later uploads go to. 0 disables uploading.
    pub fn bind_texture(&mut self, handle: TextureHandle) {
        self.uploader.bind(handle);
    }

    /// Upload the current RGBA buffer to the bound texture.
    ///
    /// Skipped when no texture is bound or no buffers are allocated.
    pub fn upload_texture<B: TextureBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<UploadOutcome> {
        match self.cache.dimensions() {
            Some(dims) => self.uploader.upload(backend, self.cache.rgba(), dims),
            None => Ok(UploadOutcome::Skipped),
        }
    }

    /// The most recently produced RGBA frame.
    pub fn rgba(&self) -> &[u8] {
        self.cache.rgba()
    }

    pub fn dimensions(&self) -> Option<FrameDimensions> {
        self.cache.dimensions()
    }

    /// Number of buffer reallocations so far.
    pub fn generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Completion time of the last processed frame, or the failure sentinel.
    pub fn last_timestamp(&self) -> ProcessingTimestamp {
        self.clock.last()
    }

    pub fn edge_params(&self) -> &EdgeParams {
        self.detector.params()
    }

    pub fn bound_texture(&self) -> TextureHandle {
        self.uploader.bound()
    }
}

impl Default for EdgePipeline {
    fn default() -> Self {
        Self {
            cache: FrameBufferCache::new(),
            matrix: YuvToRgb::BT601_FULL,
            detector: EdgeDetector::default(),
            uploader: TextureUploader::new(),
            clock: TimestampSource::new(),
        }
    }
}
