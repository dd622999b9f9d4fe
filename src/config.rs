//! TOML configuration file support.
//!
//! Everything here can also be set on the command line; the file is a
//! convenience for stable setups. CLI flags take precedence.

use crate::control::Parameters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(String),
    #[error("failed to parse config file: {0}")]
    Parse(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub parameters: ParameterConfig,
}

/// Video source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Raw source descriptor string, resolved at startup.
    #[serde(default = "default_descriptor")]
    pub descriptor: String,
    /// Optional cap on synthetic stream length.
    #[serde(default)]
    pub frame_limit: Option<u64>,
}

fn default_descriptor() -> String {
    "0".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            descriptor: "0".to_string(),
            frame_limit: None,
        }
    }
}

/// Initial processing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterConfig {
    /// Frame delay before the comparison reference.
    #[serde(default = "default_delay")]
    pub delay: usize,
    /// Difference gain multiplier.
    #[serde(default = "default_gain")]
    pub gain: f32,
}

fn default_delay() -> usize {
    Parameters::default().delay
}

fn default_gain() -> f32 {
    Parameters::default().gain
}

impl Default for ParameterConfig {
    fn default() -> Self {
        let defaults = Parameters::default();
        Self {
            delay: defaults.delay,
            gain: defaults.gain,
        }
    }
}

impl ParameterConfig {
    /// Converts to runtime parameters, clamping out-of-range values.
    pub fn to_parameters(&self) -> Parameters {
        Parameters::new(self.delay, self.gain)
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Out-of-range parameter values are not an error here; they are
    /// clamped like any other live parameter input.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileRead(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.source.descriptor, "0");
        assert_eq!(config.parameters.delay, 5);
        assert_eq!(config.parameters.gain, 10.0);
    }

    #[test]
    fn test_parse_full_file() {
        let config: FileConfig = toml::from_str(
            r#"
            [source]
            descriptor = "clips/mountains"

            [parameters]
            delay = 12
            gain = 3.5
            "#,
        )
        .unwrap();

        assert_eq!(config.source.descriptor, "clips/mountains");
        assert_eq!(config.parameters.delay, 12);
        assert_eq!(config.parameters.gain, 3.5);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [parameters]
            gain = 7.0
            "#,
        )
        .unwrap();

        assert_eq!(config.source.descriptor, "0");
        assert_eq!(config.parameters.gain, 7.0);
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let config = ParameterConfig {
            delay: 9_000,
            gain: -2.0,
        };
        let parameters = config.to_parameters();
        assert_eq!(parameters.delay, crate::control::MAX_DELAY);
        assert_eq!(parameters.gain, 0.0);
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(matches!(
            FileConfig::from_file("/nonexistent/motion.toml"),
            Err(ConfigError::FileRead(_))
        ));
    }
}
