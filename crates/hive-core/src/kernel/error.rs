//! # Hive Core Kernel Errors
//!
//! [`Error`] is the crate-level error. Each subsystem keeps its own typed
//! error enum and converts into this one with `?`.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::component::error::ComponentError;
use crate::config::error::ConfigError;
use crate::dispatch::error::DispatchError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Typed component error
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    /// Typed dispatch error (missing runtime, invalid timeout)
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Typed configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
