//! Integration test crate for EdgeView.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It drives the pipeline end to end the way a camera layer and a render
//! loop would.

#[cfg(test)]
mod support;

#[cfg(test)]
mod conversion;

#[cfg(test)]
mod edge;


#[cfg(test)]
mod upload;
