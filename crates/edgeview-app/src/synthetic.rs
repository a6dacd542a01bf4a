//! Synthetic camera source.
//!
//! Produces frames laid out the way Android's YUV_420_888 usually arrives:
//! padded rows, and U/V as two views one byte apart into a single
//! interleaved VU allocation (pixel stride 2).

use edgeview_core::FrameDimensions;
use edgeview_media::YuvPlanes;

/// Value written into row padding. The pipeline must never read it.
const PADDING: u8 = 0xEE;

const PIXEL_STRIDE: usize = 2;

pub struct SyntheticCamera {
    dims: FrameDimensions,
    row_stride: usize,
    y: Vec<u8>,
    vu: Vec<u8>,
}

impl SyntheticCamera {
    pub fn new(dims: FrameDimensions, row_padding: usize) -> Self {
        let row_stride = dims.width_usize() + row_padding;
        Self {
            dims,
            row_stride,
            y: vec![PADDING; row_stride * dims.height_usize()],
            vu: vec![PADDING; row_stride * dims.chroma_rows().max(1)],
        }
    }

    /// Render frame number `index`: diagonal bars scrolling across a
    /// slowly rotating hue.
    pub fn capture(&mut self, index: u32) {
        let width = self.dims.width_usize();
        let shift = (index as usize % 48) * 4;

        for (row, line) in self.y.chunks_exact_mut(self.row_stride).enumerate() {
            for (col, px) in line[..width].iter_mut().enumerate() {
                let band = (col + row + shift) / 24;
                *px = if band % 2 == 0 { 40 } else { 210 };
            }
        }

        let hue = (index % 256) as u8;
        let cols = self.dims.chroma_cols();
        for (row, line) in self
            .vu
            .chunks_exact_mut(self.row_stride)
            .take(self.dims.chroma_rows())
            .enumerate()
        {
            for (col, pair) in line[..cols * PIXEL_STRIDE].chunks_exact_mut(2).enumerate() {
                pair[0] = hue.wrapping_add(row as u8);
                pair[1] = hue.wrapping_add(col as u8).wrapping_add(128);
            }
        }
    }

    pub fn planes(&self) -> YuvPlanes<'_> {
        YuvPlanes::new(&self.y, &self.vu[1..], &self.vu)
    }

    pub fn pixel_stride(&self) -> usize {
        PIXEL_STRIDE
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }
}
