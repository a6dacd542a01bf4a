//! Edge detection parameters.

use edgeview_core::{EdgeViewError, Result};
use serde::{Deserialize, Serialize};

/// Gradient magnitude below or at which a pixel is never an edge.
pub const EDGE_LOW_THRESHOLD: i32 = 50;

/// Gradient magnitude above which a pixel is always an edge.
pub const EDGE_HIGH_THRESHOLD: i32 = 150;

/// Side of the square smoothing kernel.
pub const GAUSSIAN_KERNEL_SIZE: usize = 5;

/// Standard deviation of the smoothing kernel.
pub const GAUSSIAN_SIGMA: f32 = 1.4;

/// Largest L1 Sobel magnitude (`|gx| + |gy|`) an 8-bit image can produce.
pub const MAX_GRADIENT: i32 = 2 * 4 * 255;

/// Parameters for the edge transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Weak-edge threshold on the 0–255 intensity scale.
    pub low_threshold: i32,
    /// Strong-edge threshold on the 0–255 intensity scale.
    pub high_threshold: i32,
    /// Gaussian smoothing sigma.
    pub blur_sigma: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            low_threshold: EDGE_LOW_THRESHOLD,
            high_threshold: EDGE_HIGH_THRESHOLD,
            blur_sigma: GAUSSIAN_SIGMA,
        }
    }
}

impl EdgeParams {
    /// Check ranges and return the params with thresholds in ascending
    /// order.
    pub fn validated(self) -> Result<Self> {
        let (low, high) = if self.low_threshold > self.high_threshold {
            (self.high_threshold, self.low_threshold)
        } else {
            (self.low_threshold, self.high_threshold)
        };
        if low < 0 || high > MAX_GRADIENT {
            return Err(EdgeViewError::Config(format!(
                "edge thresholds {}..{} outside 0..={}",
                low, high, MAX_GRADIENT
            )));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma <= 0.0 {
            return Err(EdgeViewError::Config(format!(
                "blur sigma must be positive, got {}",
                self.blur_sigma
            )));
        }
        Ok(Self {
            low_threshold: low,
            high_threshold: high,
            blur_sigma: self.blur_sigma,
        })
    }
}
