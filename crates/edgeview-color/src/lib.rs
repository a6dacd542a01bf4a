//! EdgeView Color - semi-planar YUV to RGBA conversion

pub mod yuv;

pub use yuv::{nv21_to_rgba, YuvToRgb, NEUTRAL_CHROMA};
