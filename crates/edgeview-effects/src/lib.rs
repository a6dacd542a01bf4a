//! EdgeView Effects - CPU image processing on RGBA frames
//!
//! Provides the edge visualization applied in edge mode:
//! grayscale → 5×5 Gaussian smoothing → gradient edge detection with
//! hysteresis → edge map expanded back to RGBA.

pub mod canny;
pub mod edge;
pub mod gaussian;
pub mod params;

pub use edge::{gray_to_rgba, rgba_to_gray, EdgeDetector, EdgeScratch};
pub use gaussian::GaussianKernel;
pub use params::{
    EdgeParams, EDGE_HIGH_THRESHOLD, EDGE_LOW_THRESHOLD, GAUSSIAN_KERNEL_SIZE, GAUSSIAN_SIGMA,
    MAX_GRADIENT,
};
