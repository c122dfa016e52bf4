//! # Hive Core Configuration
//!
//! [`RegistryConfig`] carries the tunables of a registry: the per-component
//! dispatch deadline, the worker pool size used by hosts that build their own
//! runtime, and the default log filter. Configuration can be parsed from JSON,
//! and from TOML or YAML when the matching crate feature is enabled.
pub mod error;

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::kernel::constants;
pub use error::ConfigError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }

    fn label(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "JSON",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "YAML",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "TOML",
        }
    }
}

/// Registry tunables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Deadline for a single component handler, in milliseconds
    pub dispatch_timeout_ms: u64,
    /// Worker threads for a host-built runtime; `None` lets tokio decide
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_threads: Option<usize>,
    /// Default log filter for hosts that install a subscriber
    pub log_level: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            dispatch_timeout_ms: constants::DEFAULT_DISPATCH_TIMEOUT_MS,
            worker_threads: None,
            log_level: constants::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Per-component dispatch deadline
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_millis(self.dispatch_timeout_ms)
    }

    /// Override the dispatch deadline, rounded up to whole milliseconds
    pub fn with_dispatch_timeout(mut self, timeout: Duration) -> Self {
        self.dispatch_timeout_ms = u64::try_from(timeout.as_micros().div_ceil(1000)).unwrap_or(u64::MAX);
        self
    }

    /// Reject values the registry cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatch_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "dispatch_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.worker_threads == Some(0) {
            return Err(ConfigError::Invalid {
                field: "worker_threads",
                reason: "must be greater than zero when set".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate configuration text in the given format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: RegistryConfig = match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
        .map_err(|message| ConfigError::Deserialize { format: format.label(), message })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat { path: path.to_path_buf() })?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loading registry configuration from {}", path.display());
        Self::parse(&content, format)
    }

    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
        }
        .map_err(|message| ConfigError::Serialize { format: format.label(), message })
    }
}
