//! CLI configuration
//!
//! Loaded from an optional TOML file. Every field has a default, so a
//! missing file and an empty file behave the same.

use okr_progress::ProgressConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidValue {
                field: "log_format",
                value: other.to_string(),
            }),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Progress engine settings
    pub progress: ProgressConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            progress: ProgressConfig::default(),
        }
    }
}

impl CliConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With log format
    #[inline]
    #[must_use]
    pub fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` on malformed TOML or unknown values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from `path`, or defaults when no path is given
    ///
    /// # Errors
    /// Returns `ConfigError::Read` if the file can't be read, or
    /// `ConfigError::Parse` if it isn't valid configuration
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns `ConfigError::Render` if serialization fails
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File contents are not valid configuration
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be rendered
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    /// A single value is out of range
    #[error("invalid {field}: {value:?}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Rejected value
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use okr_progress::AggregationPolicy;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(CliConfig::from_toml_str("").unwrap(), CliConfig::default());
        assert_eq!(CliConfig::load(None).unwrap(), CliConfig::default());
    }

    #[test]
    fn parses_all_fields() {
        let config = CliConfig::from_toml_str(
            r#"
            log_level = "debug"
            log_format = "json"

            [progress]
            aggregation = "exclude_thresholds"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.progress.aggregation, AggregationPolicy::ExcludeThresholds);
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = CliConfig::from_toml_str("[progress]\naggregation = \"median\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn renders_back_to_toml() {
        let config = CliConfig::new().with_log_format(LogFormat::Json);
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("log_format = \"json\""));
        assert!(text.contains("aggregation = \"all_key_results\""));
        assert_eq!(CliConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/okr.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
