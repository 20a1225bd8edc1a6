/// Engine configuration — startup options read from RON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Makes the debug overlay available to the presentation layer.
    pub debug_mode: bool,
    pub initial_volume: f32,
    /// Chapter the visitor starts in. Out-of-range values start at 0.
    pub start_chapter: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            initial_volume: 0.8,
            start_chapter: 0,
        }
    }
}

impl EngineConfig {
    pub fn load_from_ron(path: &Path) -> Result<EngineConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<EngineConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}
