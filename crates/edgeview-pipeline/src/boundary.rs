//! Entry points for callers across a foreign call boundary.
//!
//! These take the signed integers and raw plane addresses a camera layer
//! hands over and report failure the way such callers expect: a dropped
//! frame returns the `0` timestamp sentinel instead of an error, after
//! logging why.

use crate::pipeline::EdgePipeline;
use edgeview_core::{EdgeViewError, FrameDimensions, ProcessingTimestamp, Result};
use edgeview_gpu::{TextureBackend, TextureHandle, UploadOutcome};
use edgeview_media::{CameraFrame, YuvPlanes};
use tracing::{error, warn};

/// One plane as received: start address and readable length.
pub type RawPlane = (*const u8, usize);

/// Size the pipeline's buffers for a `width`×`height` frame.
///
/// Zero or negative sizes are rejected without touching any buffer.
pub fn init_pipeline(pipeline: &mut EdgePipeline, width: i32, height: i32) -> Result<()> {
    let dims = FrameDimensions::from_signed(i64::from(width), i64::from(height))?;
    pipeline.init(dims);
    Ok(())
}

/// Process one frame from raw plane addresses.
///
/// Returns the completion timestamp in nanoseconds, or `0` if the frame was
/// dropped. A dropped frame leaves the previous RGBA output in place.
///
/// # Safety
///
/// Each non-null plane address must be valid for reads of its length and
/// must not be written to until this call returns.
#[allow(unsafe_code)]
#[allow(clippy::too_many_arguments)]
pub unsafe fn process_frame(
    pipeline: &mut EdgePipeline,
    y: RawPlane,
    u: RawPlane,
    v: RawPlane,
    pixel_stride: i32,
    row_stride: i32,
    width: i32,
    height: i32,
    edge_mode: bool,
) -> i64 {
    // SAFETY: forwarded from this function's contract.
    let planes = match unsafe { YuvPlanes::from_raw_parts(y, u, v) } {
        Ok(planes) => planes,
        Err(e) => return report_dropped(&e).as_nanos(),
    };
    process_planes(
        pipeline,
        planes,
        pixel_stride,
        row_stride,
        width,
        height,
        edge_mode,
    )
}

/// [`process_frame`] for planes already held as slices.
pub fn process_planes(
    pipeline: &mut EdgePipeline,
    planes: YuvPlanes<'_>,
    pixel_stride: i32,
    row_stride: i32,
    width: i32,
    height: i32,
    edge_mode: bool,
) -> i64 {
    let result = CameraFrame::from_boundary(planes, pixel_stride, row_stride, width, height)
        .and_then(|frame| pipeline.process_frame(&frame, edge_mode));
    match result {
        Ok(ts) => ts.as_nanos(),
        Err(e) => report_dropped(&e).as_nanos(),
    }
}

/// Select the texture later uploads go to. `0` unbinds.
pub fn bind_texture(pipeline: &mut EdgePipeline, handle: u32) {
    pipeline.bind_texture(TextureHandle(handle));
}

/// Bind `handle` and upload the most recent frame to it.
///
/// Upload failures are logged and reported as [`UploadOutcome::Skipped`].
pub fn upload_to_texture<B: TextureBackend + ?Sized>(
    pipeline: &mut EdgePipeline,
    backend: &mut B,
    handle: u32,
) -> UploadOutcome {
    pipeline.bind_texture(TextureHandle(handle));
    pipeline.upload_texture(backend).unwrap_or_else(|e| {
        error!(handle, error = %e, "Texture upload failed");
        UploadOutcome::Skipped
    })
}

/// Log why a frame was dropped and return the failure sentinel.
pub(crate) fn report_dropped(e: &EdgeViewError) -> ProcessingTimestamp {
    match e {
        EdgeViewError::UnavailableBuffer(plane) => {
            warn!(%plane, "Direct buffer address unavailable, dropping frame");
        }
        other => warn!(error = %other, "Rejected camera frame"),
    }
    ProcessingTimestamp::FAILURE
}
