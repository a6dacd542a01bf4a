//! Separable 5×5 Gaussian smoothing of 8-bit single-channel images.
//!
//! Borders reflect without repeating the edge pixel (`dcb|abcd|cba`).

use crate::params::GAUSSIAN_KERNEL_SIZE;
use edgeview_core::FrameDimensions;
use rayon::prelude::*;

const RADIUS: usize = GAUSSIAN_KERNEL_SIZE / 2;

/// Normalised 1-D Gaussian weights; applied once per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    weights: [f32; GAUSSIAN_KERNEL_SIZE],
}

impl GaussianKernel {
    pub fn new(sigma: f32) -> Self {
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut weights = [0.0f32; GAUSSIAN_KERNEL_SIZE];
        for (i, w) in weights.iter_mut().enumerate() {
            let d = i as f32 - RADIUS as f32;
            *w = (-d * d / two_sigma_sq).exp();
        }
        let sum: f32 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }
        Self { weights }
    }

    pub fn weights(&self) -> &[f32; GAUSSIAN_KERNEL_SIZE] {
        &self.weights
    }

    /// Smooth `image` in place. `tmp` holds the horizontal pass and must be
    /// the same length as `image`.
    pub fn blur(&self, image: &mut [u8], tmp: &mut [f32], dims: FrameDimensions) {
        let width = dims.width_usize();
        let height = dims.height_usize();
        debug_assert_eq!(image.len(), dims.pixel_count());
        debug_assert_eq!(tmp.len(), dims.pixel_count());

        tmp.par_chunks_mut(width)
            .zip(image.par_chunks(width))
            .for_each(|(out, src)| {
                for (x, o) in out.iter_mut().enumerate() {
                    *o = if x >= RADIUS && x + RADIUS < width {
                        self.dot(&src[x - RADIUS..=x + RADIUS], |v| f32::from(*v))
                    } else {
                        self.weights
                            .iter()
                            .enumerate()
                            .map(|(k, w)| w * f32::from(src[reflect_101(x + k, width)]))
                            .sum()
                    };
                }
            });

        let tmp = &*tmp;
        image
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, out)| {
                let mut rows = [0usize; GAUSSIAN_KERNEL_SIZE];
                for (k, r) in rows.iter_mut().enumerate() {
                    *r = reflect_101(y + k, height) * width;
                }
                for (x, o) in out.iter_mut().enumerate() {
                    let acc: f32 = rows
                        .iter()
                        .zip(&self.weights)
                        .map(|(row, w)| w * tmp[row + x])
                        .sum();
                    *o = acc.round().clamp(0.0, 255.0) as u8;
                }
            });
    }

    #[inline]
    fn dot<T>(&self, window: &[T], value: impl Fn(&T) -> f32) -> f32 {
        window
            .iter()
            .zip(&self.weights)
            .map(|(v, w)| w * value(v))
            .sum()
    }
}

impl Default for GaussianKernel {
    fn default() -> Self {
        Self::new(crate::params::GAUSSIAN_SIGMA)
    }
}

/// Map `shifted - RADIUS` into `0..n` by reflection about the border pixels.
///
/// Takes the index already shifted by `RADIUS` so callers stay unsigned.
fn reflect_101(shifted: usize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let last = n as isize - 1;
    let mut i = shifted as isize - RADIUS as isize;
    loop {
        if i < 0 {
            i = -i;
        } else if i > last {
            i = 2 * last - i;
        } else {
            return i as usize;
        }
    }
}
