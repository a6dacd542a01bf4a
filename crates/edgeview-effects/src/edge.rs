//! The edge-mode transform: RGBA in, RGBA edge visualization out.

use crate::canny;
use crate::gaussian::GaussianKernel;
use crate::params::EdgeParams;
use edgeview_core::{channels, EdgeViewError, FrameDimensions, PixelFormat, Result};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Q14 luma weights: 0.299, 0.587, 0.114.
const GRAY_R: u32 = 4_899;
const GRAY_G: u32 = 9_617;
const GRAY_B: u32 = 1_868;
const GRAY_SHIFT: u32 = 14;

/// Per-frame working memory for the edge transform.
///
/// Sized once per frame size and reused for every frame of that size.
#[derive(Debug, Default)]
pub struct EdgeScratch {
    dims: Option<FrameDimensions>,
    gray: Vec<u8>,
    edges: Vec<u8>,
    blur: Vec<f32>,
    magnitude: Vec<i32>,
    stack: Vec<usize>,
}

impl EdgeScratch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimensions(dims: FrameDimensions) -> Self {
        let mut scratch = Self::new();
        scratch.reallocate(dims);
        scratch
    }

    /// Replace every buffer with a zeroed one sized for `dims`.
    pub fn reallocate(&mut self, dims: FrameDimensions) {
        let n = PixelFormat::Gray8.frame_size(dims);
        self.gray = vec![0; n];
        self.edges = vec![0; n];
        self.blur = vec![0.0; n];
        self.magnitude = vec![0; n];
        self.stack = Vec::new();
        self.dims = Some(dims);
    }

    pub fn dimensions(&self) -> Option<FrameDimensions> {
        self.dims
    }

    /// Smoothed grayscale of the last processed frame.
    pub fn gray(&self) -> &[u8] {
        &self.gray
    }

    /// Binary edge map of the last processed frame.
    pub fn edges(&self) -> &[u8] {
        &self.edges
    }
}

/// Replaces an RGBA frame with a white-on-black map of its edges.
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    params: EdgeParams,
    kernel: GaussianKernel,
}

impl EdgeDetector {
    pub fn new(params: EdgeParams) -> Result<Self> {
        let params = params.validated()?;
        debug!(
            low = params.low_threshold,
            high = params.high_threshold,
            sigma = params.blur_sigma,
            "Edge detector configured"
        );
        Ok(Self {
            kernel: GaussianKernel::new(params.blur_sigma),
            params,
        })
    }

    pub fn params(&self) -> &EdgeParams {
        &self.params
    }

    /// Run grayscale → blur → edge detection → RGBA expansion in place.
    pub fn apply(
        &self,
        rgba: &mut [u8],
        dims: FrameDimensions,
        scratch: &mut EdgeScratch,
    ) -> Result<()> {
        if scratch.dims != Some(dims) {
            return Err(EdgeViewError::DimensionMismatch {
                expected: dims.to_string(),
                actual: scratch
                    .dims
                    .map_or_else(|| "unallocated scratch".to_string(), |d| d.to_string()),
            });
        }
        let expected = PixelFormat::Rgba8.frame_size(dims);
        if rgba.len() != expected {
            return Err(EdgeViewError::DimensionMismatch {
                expected: format!("{} RGBA bytes", expected),
                actual: format!("{} bytes", rgba.len()),
            });
        }

        let EdgeScratch {
            gray,
            edges,
            blur,
            magnitude,
            stack,
            ..
        } = scratch;

        rgba_to_gray(rgba, gray);
        self.kernel.blur(gray, blur, dims);
        canny::detect(
            gray,
            magnitude,
            edges,
            stack,
            dims,
            self.params.low_threshold,
            self.params.high_threshold,
        );
        gray_to_rgba(edges, rgba);

        trace!(%dims, "Applied edge transform");
        Ok(())
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        let params = EdgeParams::default();
        Self {
            kernel: GaussianKernel::new(params.blur_sigma),
            params,
        }
    }
}

/// Luma-weighted grayscale of an RGBA buffer. Alpha is ignored.
pub fn rgba_to_gray(rgba: &[u8], gray: &mut [u8]) {
    let pixels: &[[u8; channels::RGBA]] = bytemuck::cast_slice(rgba);
    gray.par_iter_mut()
        .zip(pixels.par_iter())
        .for_each(|(g, &[r, gr, b, _])| {
            let sum = u32::from(r) * GRAY_R
                + u32::from(gr) * GRAY_G
                + u32::from(b) * GRAY_B
                + (1 << (GRAY_SHIFT - 1));
            *g = (sum >> GRAY_SHIFT) as u8;
        });
}

/// Replicate a single-channel image into R, G and B with opaque alpha.
pub fn gray_to_rgba(gray: &[u8], rgba: &mut [u8]) {
    let pixels: &mut [[u8; channels::RGBA]] = bytemuck::cast_slice_mut(rgba);
    pixels
        .par_iter_mut()
        .zip(gray.par_iter())
        .for_each(|(px, &v)| *px = [v, v, v, channels::OPAQUE]);
}
