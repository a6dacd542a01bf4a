//! Pipeline configuration.
//!
//! Read from JSON; every field is optional and falls back to the built-in
//! edge constants.

use edgeview_core::{EdgeViewError, FrameDimensions, Result};
use edgeview_effects::EdgeParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Edge-mode thresholds and smoothing.
    pub edge: EdgeParams,
    /// Buffers are allocated for this size up front when set.
    pub initial_size: Option<FrameDimensions>,
}

impl PipelineConfig {
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(data)
            .map_err(|e| EdgeViewError::Config(format!("Invalid pipeline config: {}", e)))?;
        config.validate()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| EdgeViewError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every field, returning the config with edge thresholds in
    /// ascending order.
    pub fn validate(self) -> Result<Self> {
        let edge = self.edge.validated()?;
        // Deserialized sizes bypass `FrameDimensions::new`.
        let initial_size = self
            .initial_size
            .map(|d| FrameDimensions::new(d.width, d.height))
            .transpose()?;
        Ok(Self { edge, initial_size })
    }
}
