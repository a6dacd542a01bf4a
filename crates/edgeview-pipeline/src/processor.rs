//! Camera-thread / render-thread coordination.
//!
//! The camera thread calls [`FrameProcessor::process`] for every delivered
//! frame; the render thread calls [`FrameProcessor::drain_to_texture`] once
//! per draw. Both go through the same [`SharedPipeline`] lock.

use crate::boundary::report_dropped;
use crate::pipeline::SharedPipeline;
use edgeview_core::{FrameDimensions, ProcessingTimestamp};
use edgeview_gpu::{TextureBackend, TextureHandle};
use edgeview_media::{CameraFrame, YuvPlanes};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use tracing::{info, warn};

pub struct FrameProcessor {
    pipeline: SharedPipeline,
    running: AtomicBool,
    frame_size: Mutex<Option<FrameDimensions>>,
    last_frame: AtomicI64,
    last_fps_bits: AtomicU64,
}

impl FrameProcessor {
    pub fn new(pipeline: SharedPipeline) -> Self {
        Self {
            pipeline,
            running: AtomicBool::new(false),
            frame_size: Mutex::new(None),
            last_frame: AtomicI64::new(ProcessingTimestamp::FAILURE.as_nanos()),
            last_fps_bits: AtomicU64::new(0f64.to_bits()),
        }
    }

    /// Begin accepting frames of `dims`. Does nothing if already running.
    pub fn start(&self, dims: FrameDimensions) {
        if self.running.swap(true, Ordering::AcqRel) {
            return;
        }
        self.pipeline.lock().init(dims);
        *self.frame_size.lock() = Some(dims);
        info!(%dims, "Frame processor started");
    }

    /// Stop accepting frames and free the pipeline's buffers.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
        self.pipeline.lock().release();
        info!("Frame processor stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run one camera frame through the pipeline at the current frame size.
    ///
    /// Ignored (returns the failure sentinel) while stopped. Dropped frames
    /// do not replace the last recorded timestamp.
    pub fn process(
        &self,
        planes: YuvPlanes<'_>,
        pixel_stride: usize,
        row_stride: usize,
        edge_mode: bool,
    ) -> ProcessingTimestamp {
        if !self.is_running() {
            return ProcessingTimestamp::FAILURE;
        }
        let Some(dims) = self.frame_size() else {
            return ProcessingTimestamp::FAILURE;
        };

        let result = CameraFrame::new(planes, pixel_stride, row_stride, dims)
            .and_then(|frame| self.pipeline.lock().process_frame(&frame, edge_mode));
        match result {
            Ok(ts) => {
                self.last_frame.store(ts.as_nanos(), Ordering::Release);
                ts
            }
            Err(e) => report_dropped(&e),
        }
    }

    /// Upload the latest frame to `handle` and return the display rate
    /// implied by the time since that frame finished, or 0.0 while stopped
    /// or before the first frame.
    pub fn drain_to_texture<B: TextureBackend + ?Sized>(
        &self,
        backend: &mut B,
        handle: TextureHandle,
    ) -> f64 {
        if !self.is_running() {
            return 0.0;
        }

        {
            let mut pipeline = self.pipeline.lock();
            pipeline.bind_texture(handle);
            if let Err(e) = pipeline.upload_texture(backend) {
                warn!(%handle, error = %e, "Texture upload failed");
            }
        }

        let last = ProcessingTimestamp::from_nanos(self.last_frame.load(Ordering::Acquire));
        let fps = if last.is_failure() {
            0.0
        } else {
            ProcessingTimestamp::now().rate_since(last)
        };
        self.last_fps_bits.store(fps.to_bits(), Ordering::Release);
        fps
    }

    pub fn last_fps(&self) -> f64 {
        f64::from_bits(self.last_fps_bits.load(Ordering::Acquire))
    }

    /// Whether any frame has been processed successfully.
    pub fn has_frame(&self) -> bool {
        !ProcessingTimestamp::from_nanos(self.last_frame.load(Ordering::Acquire)).is_failure()
    }

    pub fn frame_size(&self) -> Option<FrameDimensions> {
        *self.frame_size.lock()
    }

    /// Change the size later frames are processed at. Buffers follow on the
    /// next frame.
    pub fn update_frame_size(&self, dims: FrameDimensions) {
        *self.frame_size.lock() = Some(dims);
    }

    pub fn pipeline(&self) -> &SharedPipeline {
        &self.pipeline
    }
}
