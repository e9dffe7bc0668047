//! Renderer core configuration
//!
//! Settings the application driver feeds into bootstrap and the frame loop.
//! Loadable from TOML with every field defaulted, so an empty file is a
//! valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame::DEFAULT_FRAMES_IN_FLIGHT;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed values are out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for the lifecycle core and frame loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Application name passed to instance creation
    pub app_name: String,
    /// Number of frames in flight
    pub frames_in_flight: usize,
    /// Whether to request validation layers
    pub enable_validation: bool,
    /// Timeout for per-frame fence waits, in nanoseconds
    pub fence_timeout_ns: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            app_name: "vulkan_core application".to_string(),
            frames_in_flight: DEFAULT_FRAMES_IN_FLIGHT,
            enable_validation: false,
            fence_timeout_ns: 1_000_000_000,
        }
    }
}

impl CoreConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames_in_flight == 0 {
            return Err(ConfigError::Invalid(
                "frames_in_flight must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
