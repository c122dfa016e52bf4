//! # Hive Core Component Errors
//!
//! Errors a component handler may return. They are recorded by the dispatcher
//! and never surface as failures of a registry entry point.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("Component '{component}' failed: {reason}")]
    Failed { component: String, reason: String },

    #[error("Component error: {0}")]
    Other(String),
}

impl ComponentError {
    pub fn failed(component: impl Into<String>, reason: impl Into<String>) -> Self {
        ComponentError::Failed { component: component.into(), reason: reason.into() }
    }
}

impl From<&str> for ComponentError {
    fn from(msg: &str) -> Self {
        ComponentError::Other(msg.to_string())
    }
}

impl From<String> for ComponentError {
    fn from(msg: String) -> Self {
        ComponentError::Other(msg)
    }
}

/// Return type of every component handler
pub type ComponentResult = Result<(), ComponentError>;
