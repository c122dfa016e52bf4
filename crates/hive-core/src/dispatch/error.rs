//! # Hive Core Dispatch Errors
//!
//! Dispatch only fails when the registry itself is misconfigured. Component
//! misbehaviour is reported through [`DispatchReport`](crate::DispatchReport)
//! instead.
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No tokio runtime is available to run component tasks")]
    NoRuntime,

    #[error("Dispatch timeout must be greater than zero, got {0:?}")]
    InvalidTimeout(Duration),
}
