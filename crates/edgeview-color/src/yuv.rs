//! YUV → RGB transforms and the NV21 → RGBA converter.
//!
//! Coefficients are stored in 16.16 fixed point and applied with
//! round-half-up, so output is bit-identical on every platform.

use edgeview_core::{channels, EdgeViewError, FrameDimensions, PixelFormat, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

const SHIFT: u32 = 16;
const HALF: i32 = 1 << (SHIFT - 1);

/// Chroma value meaning "no color difference".
pub const NEUTRAL_CHROMA: u8 = 128;

/// Fixed-point YUV → RGB matrix.
///
/// ```text
/// R = Y + rv * (V - 128)
/// G = Y - gu * (U - 128) - gv * (V - 128)
/// B = Y + bu * (U - 128)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YuvToRgb {
    pub rv: i32,
    pub gu: i32,
    pub gv: i32,
    pub bu: i32,
}

impl YuvToRgb {
    /// Full-range BT.601 (JFIF): 1.402, 0.344136, 0.714136, 1.772.
    pub const BT601_FULL: Self = Self {
        rv: 91_881,
        gu: 22_554,
        gv: 46_802,
        bu: 116_130,
    };

    /// Convert one sample to `[R, G, B]`, clamped to 0..=255.
    #[inline]
    pub fn to_rgb(&self, y: u8, u: u8, v: u8) -> [u8; 3] {
        let y = i32::from(y);
        let du = i32::from(u) - i32::from(NEUTRAL_CHROMA);
        let dv = i32::from(v) - i32::from(NEUTRAL_CHROMA);

        let r = y + ((self.rv * dv + HALF) >> SHIFT);
        let g = y + ((-self.gu * du - self.gv * dv + HALF) >> SHIFT);
        let b = y + ((self.bu * du + HALF) >> SHIFT);

        [clamp_u8(r), clamp_u8(g), clamp_u8(b)]
    }
}

impl Default for YuvToRgb {
    fn default() -> Self {
        Self::BT601_FULL
    }
}

#[inline]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Convert a canonical NV21 buffer into interleaved RGBA with opaque alpha.
///
/// Each 2×2 luma block shares one `[V, U]` pair. For odd sizes the trailing
/// column/row reuses the nearest assembled pair; a frame with no pairs at
/// all (width or height of 1) converts with neutral chroma.
pub fn nv21_to_rgba(
    matrix: &YuvToRgb,
    nv21: &[u8],
    rgba: &mut [u8],
    dims: FrameDimensions,
) -> Result<()> {
    check_len(nv21.len(), PixelFormat::Nv21.frame_size(dims), "NV21")?;
    check_len(rgba.len(), PixelFormat::Rgba8.frame_size(dims), "RGBA")?;

    let width = dims.width_usize();
    let (luma, chroma) = nv21.split_at(dims.pixel_count());
    let chroma_rows = dims.chroma_rows();
    let chroma_cols = dims.chroma_cols();
    let has_chroma = chroma_rows > 0 && chroma_cols > 0;

    let pixels: &mut [[u8; channels::RGBA]] = bytemuck::cast_slice_mut(rgba);
    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out)| {
            let luma_row = &luma[row * width..(row + 1) * width];
            let chroma_row = has_chroma.then(|| {
                let start = (row / 2).min(chroma_rows - 1) * width;
                &chroma[start..start + width]
            });

            for (col, (px, &y)) in out.iter_mut().zip(luma_row).enumerate() {
                let (v, u) = match chroma_row {
                    Some(pairs) => {
                        let p = (col / 2).min(chroma_cols - 1) * 2;
                        (pairs[p], pairs[p + 1])
                    }
                    None => (NEUTRAL_CHROMA, NEUTRAL_CHROMA),
                };
                let [r, g, b] = matrix.to_rgb(y, u, v);
                *px = [r, g, b, channels::OPAQUE];
            }
        });

    trace!(%dims, "Converted NV21 to RGBA");
    Ok(())
}

fn check_len(actual: usize, expected: usize, what: &str) -> Result<()> {
    if actual != expected {
        return Err(EdgeViewError::DimensionMismatch {
            expected: format!("{} {} bytes", expected, what),
            actual: format!("{} bytes", actual),
        });
    }
    Ok(())
}
