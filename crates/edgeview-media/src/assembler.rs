//! Strided YUV 4:2:0 planes to canonical NV21.
//!
//! The canonical buffer is `height` luma rows of `width` bytes followed by
//! `height / 2` chroma rows of `width` bytes holding `[V, U]` pairs. Only
//! `width / 2` pairs per row are written, so for an odd width the last byte
//! of every chroma row keeps whatever it held before.

use crate::planes::CameraFrame;
use edgeview_core::{EdgeViewError, PixelFormat, Result};
use rayon::prelude::*;
use tracing::trace;

/// Copy luma rows and interleave the chroma planes of `frame` into `dst`.
///
/// `dst` must be exactly `PixelFormat::Nv21.frame_size(frame.dimensions())`
/// bytes. Source row padding past `width` is skipped.
pub fn assemble_nv21(frame: &CameraFrame<'_>, dst: &mut [u8]) -> Result<()> {
    let dims = frame.dimensions();
    let expected = PixelFormat::Nv21.frame_size(dims);
    if dst.len() != expected {
        return Err(EdgeViewError::DimensionMismatch {
            expected: format!("{} NV21 bytes", expected),
            actual: format!("{} bytes", dst.len()),
        });
    }

    let width = dims.width_usize();
    let row_stride = frame.row_stride();
    let pixel_stride = frame.pixel_stride();
    let planes = frame.planes();

    let (luma, chroma) = dst.split_at_mut(dims.pixel_count());

    luma.par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, dst_row)| {
            let start = row * row_stride;
            dst_row.copy_from_slice(&planes.y[start..start + width]);
        });

    let chroma_cols = dims.chroma_cols();
    chroma
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, dst_row)| {
            let base = row * row_stride;
            for (col, pair) in dst_row.chunks_exact_mut(2).take(chroma_cols).enumerate() {
                let idx = base + col * pixel_stride;
                pair[0] = planes.v[idx];
                pair[1] = planes.u[idx];
            }
        });

    trace!(%dims, row_stride, pixel_stride, "Assembled NV21 frame");
    Ok(())
}
