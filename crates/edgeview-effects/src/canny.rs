//! Gradient edge detection with hysteresis linking.
//!
//! 3×3 Sobel gradients with replicated borders, L1 magnitude, non-maximum
//! suppression along the quantised gradient direction, then two-threshold
//! hysteresis over the 8-neighbourhood.

use edgeview_core::FrameDimensions;
use rayon::prelude::*;

/// Output value of an edge pixel.
pub const EDGE: u8 = 255;

/// Marks a local maximum above the low threshold awaiting linking. Never
/// present in the final map.
pub(crate) const CANDIDATE: u8 = 1;

/// tan(22.5°) in Q15.
const TAN_22_5_Q15: i64 = 13_573;

#[inline]
fn sample(gray: &[u8], width: usize, height: usize, x: isize, y: isize) -> i32 {
    let x = x.clamp(0, width as isize - 1) as usize;
    let y = y.clamp(0, height as isize - 1) as usize;
    i32::from(gray[y * width + x])
}

/// Sobel derivatives at `(x, y)`.
#[inline]
fn sobel(gray: &[u8], width: usize, height: usize, x: usize, y: usize) -> (i32, i32) {
    let (x, y) = (x as isize, y as isize);
    let p = |dx: isize, dy: isize| sample(gray, width, height, x + dx, y + dy);

    let gx = (p(1, -1) + 2 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2 * p(-1, 0) + p(-1, 1));
    let gy = (p(-1, 1) + 2 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2 * p(0, -1) + p(1, -1));
    (gx, gy)
}

/// Fill `magnitude` with `|gx| + |gy|` for every pixel.
pub fn gradient_magnitude(gray: &[u8], magnitude: &mut [i32], dims: FrameDimensions) {
    let width = dims.width_usize();
    let height = dims.height_usize();
    magnitude
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, m) in row.iter_mut().enumerate() {
                let (gx, gy) = sobel(gray, width, height, x, y);
                *m = gx.abs() + gy.abs();
            }
        });
}

/// Keep local maxima along the gradient direction, classifying them as
/// [`EDGE`] (above `high`) or [`CANDIDATE`] (above `low`). Everything else
/// becomes 0.
fn suppress_non_maxima(
    gray: &[u8],
    magnitude: &[i32],
    edges: &mut [u8],
    dims: FrameDimensions,
    low: i32,
    high: i32,
) {
    let width = dims.width_usize();
    let height = dims.height_usize();
    let mag = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            magnitude[y as usize * width + x as usize]
        }
    };

    edges
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let m = magnitude[y * width + x];
                *out = 0;
                if m <= low {
                    continue;
                }

                let (gx, gy) = sobel(gray, width, height, x, y);
                let ax = i64::from(gx.abs());
                let ay = i64::from(gy.abs()) << 15;
                let tg22x = ax * TAN_22_5_Q15;
                let (xi, yi) = (x as isize, y as isize);

                let is_max = if ay < tg22x {
                    m > mag(xi - 1, yi) && m >= mag(xi + 1, yi)
                } else if ay > tg22x + (ax << 16) {
                    m > mag(xi, yi - 1) && m >= mag(xi, yi + 1)
                } else {
                    let s: isize = if (gx ^ gy) < 0 { -1 } else { 1 };
                    m > mag(xi - s, yi - 1) && m > mag(xi + s, yi + 1)
                };

                if is_max {
                    *out = if m > high { EDGE } else { CANDIDATE };
                }
            }
        });
}

/// Promote every [`CANDIDATE`] 8-connected to an [`EDGE`], then clear the
/// rest. `stack` is scratch space.
pub(crate) fn link_edges(edges: &mut [u8], stack: &mut Vec<usize>, dims: FrameDimensions) {
    let width = dims.width_usize();
    let height = dims.height_usize();

    stack.clear();
    stack.extend(
        edges
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == EDGE)
            .map(|(i, _)| i),
    );

    while let Some(i) = stack.pop() {
        let (x, y) = (i % width, i / width);
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                let j = ny * width + nx;
                if edges[j] == CANDIDATE {
                    edges[j] = EDGE;
                    stack.push(j);
                }
            }
        }
    }

    edges.par_iter_mut().for_each(|v| {
        if *v == CANDIDATE {
            *v = 0;
        }
    });
}

/// Detect edges in `gray`, writing a binary 0/255 map into `edges`.
///
/// `low` must not exceed `high`.
pub fn detect(
    gray: &[u8],
    magnitude: &mut [i32],
    edges: &mut [u8],
    stack: &mut Vec<usize>,
    dims: FrameDimensions,
    low: i32,
    high: i32,
) {
    debug_assert!(low <= high);
    gradient_magnitude(gray, magnitude, dims);
    suppress_non_maxima(gray, magnitude, edges, dims, low, high);
    link_edges(edges, stack, dims);
}
