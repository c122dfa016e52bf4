//! # Hive Core Configuration Errors
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error while reading configuration '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported configuration format for path: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to deserialize configuration from {format}: {message}")]
    Deserialize { format: &'static str, message: String },

    #[error("Failed to serialize configuration to {format}: {message}")]
    Serialize { format: &'static str, message: String },

    #[error("Invalid configuration value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
