//! Configuration module for handwriting-replay
//!
//! Settings are read from a TOML file. Every key is optional and falls back to
//! the built-in default:
//!
//! ```toml
//! [recorder]
//! anchor_interval_ms = 10
//! segment_threshold_ms = 100
//!
//! [playback]
//! speed = 1.0
//! ```
//!
//! # Example
//!
//! ```ignore
//! use handwriting_replay::config::ReplayConfig;
//!
//! let config = ReplayConfig::load_or_default("replay.toml");
//! let recorder = SegmentRecorder::with_config(config.recorder);
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{RecordingError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration filename
pub const CONFIG_FILE: &str = "replay.toml";

/// Complete crate configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Capture timing policy
    #[serde(default)]
    pub recorder: RecorderConfig,

    /// Replay options
    #[serde(default)]
    pub playback: PlaybackSettings,
}

impl ReplayConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| RecordingError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RecordingError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RecordingError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Load a config file, returning defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config to disk as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;

        std::fs::write(path, content).map_err(|e| {
            RecordingError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.recorder.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ReplayConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReplayConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = ReplayConfig::from_toml_str(
            r#"
            [recorder]
            segment_threshold_ms = 250

            [playback]
            speed = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.recorder.anchor_interval_ms, 10);
        assert_eq!(config.recorder.segment_threshold_ms, 250);
        assert_eq!(config.playback.speed, 2.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ReplayConfig::from_toml_str("[recorder]\nanchor_interval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("anchor_interval_ms"));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = ReplayConfig::from_toml_str("[recorder").unwrap_err();
        assert!(matches!(err, RecordingError::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = ReplayConfig::default();
        config.playback.speed = 0.5;
        config.save(&path).unwrap();

        assert_eq!(ReplayConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReplayConfig::load_or_default(dir.path().join("nope.toml"));
        assert_eq!(config, ReplayConfig::default());
    }
}
