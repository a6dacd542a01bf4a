//! Camera-frame builders shared by the integration tests.

use edgeview_core::FrameDimensions;
use edgeview_media::{CameraFrame, YuvPlanes};

/// Filler for row padding; never valid image content.
pub const PADDING: u8 = 0xEE;

/// Frame stored as a phone camera delivers it: padded rows, and U/V as two
/// views one byte apart into an interleaved VU allocation.
pub struct InterleavedFrame {
    pub dims: FrameDimensions,
    pub row_stride: usize,
    pub y: Vec<u8>,
    pub vu: Vec<u8>,
}

impl InterleavedFrame {
    pub fn from_fn(
        dims: FrameDimensions,
        padding: usize,
        luma: impl Fn(usize, usize) -> u8,
        chroma: impl Fn(usize, usize) -> (u8, u8),
    ) -> Self {
        let row_stride = dims.width_usize() + padding;
        let mut y = vec![PADDING; row_stride * dims.height_usize()];
        let mut vu = vec![PADDING; row_stride * dims.chroma_rows().max(1)];

        for row in 0..dims.height_usize() {
            for col in 0..dims.width_usize() {
                y[row * row_stride + col] = luma(col, row);
            }
        }
        for row in 0..dims.chroma_rows() {
            for col in 0..dims.chroma_cols() {
                let (u, v) = chroma(col, row);
                let i = row * row_stride + col * 2;
                vu[i] = v;
                vu[i + 1] = u;
            }
        }
        Self {
            dims,
            row_stride,
            y,
            vu,
        }
    }

    pub fn solid(dims: FrameDimensions, padding: usize, y: u8, u: u8, v: u8) -> Self {
        Self::from_fn(dims, padding, |_, _| y, |_, _| (u, v))
    }

    pub fn planes(&self) -> YuvPlanes<'_> {
        YuvPlanes::new(&self.y, &self.vu[1..], &self.vu)
    }

    pub fn frame(&self) -> CameraFrame<'_> {
        CameraFrame::new(self.planes(), 2, self.row_stride, self.dims).unwrap()
    }

    /// The same image as three separate, tightly packed planes.
    pub fn to_planar(&self) -> PlanarFrame {
        let (w, h) = (self.dims.width_usize(), self.dims.height_usize());
        let mut y = Vec::with_capacity(w * h);
        for row in 0..h {
            y.extend_from_slice(&self.y[row * self.row_stride..row * self.row_stride + w]);
        }
        let (cols, rows) = (self.dims.chroma_cols(), self.dims.chroma_rows());
        let mut u = vec![0u8; w * rows.max(1)];
        let mut v = vec![0u8; w * rows.max(1)];
        for row in 0..rows {
            for col in 0..cols {
                let i = row * self.row_stride + col * 2;
                v[row * w + col] = self.vu[i];
                u[row * w + col] = self.vu[i + 1];
            }
        }
        PlanarFrame {
            dims: self.dims,
            y,
            u,
            v,
        }
    }
}

/// Three separate planes with pixel stride 1 and no padding.
pub struct PlanarFrame {
    pub dims: FrameDimensions,
    pub y: Vec<u8>,
    pub u: Vec<u8>,
    pub v: Vec<u8>,
}

impl PlanarFrame {
    pub fn frame(&self) -> CameraFrame<'_> {
        let planes = YuvPlanes::new(&self.y, &self.u, &self.v);
        CameraFrame::new(planes, 1, self.dims.width_usize(), self.dims).unwrap()
    }
}

/// Full-range BT.601 in floating point.
pub fn reference_rgb(y: u8, u: u8, v: u8) -> [f64; 3] {
    let (y, du, dv) = (f64::from(y), f64::from(u) - 128.0, f64::from(v) - 128.0);
    [
        (y + 1.402 * dv).clamp(0.0, 255.0),
        (y - 0.344_136 * du - 0.714_136 * dv).clamp(0.0, 255.0),
        (y + 1.772 * du).clamp(0.0, 255.0),
    ]
}

pub fn dims(w: u32, h: u32) -> FrameDimensions {
    FrameDimensions::new(w, h).unwrap()
}
