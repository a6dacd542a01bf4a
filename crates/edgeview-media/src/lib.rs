//! EdgeView Media - camera frame ingest
//!
//! This crate handles:
//! - Borrowed, bounds-checked views over caller-owned camera planes
//! - Construction of those views from raw addresses at the call boundary
//! - Assembly of the three strided planes into one canonical NV21 buffer

pub mod assembler;
pub mod planes;

pub use assembler::assemble_nv21;
pub use planes::{CameraFrame, YuvPlanes};
