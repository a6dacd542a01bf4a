//! Error types for EdgeView.

use std::fmt;
use thiserror::Error;

/// Identifies one of the three camera planes in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Y,
    U,
    V,
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Y => "Y",
            Self::U => "U",
            Self::V => "V",
        };
        f.write_str(name)
    }
}

/// Main error type for EdgeView operations.
#[derive(Error, Debug)]
pub enum EdgeViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Invalid stride: {0}")]
    InvalidStride(String),

    #[error("{plane} plane too small: need {required} bytes, got {actual}")]
    BufferTooSmall {
        plane: Plane,
        required: usize,
        actual: usize,
    },

    #[error("{0} plane buffer address unavailable")]
    UnavailableBuffer(Plane),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Unknown texture handle: {0}")]
    UnknownTexture(u32),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for EdgeView operations.
pub type Result<T> = std::result::Result<T, EdgeViewError>;
