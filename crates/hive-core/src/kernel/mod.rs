//! # Hive Core Kernel
//!
//! Crate-wide constants and the top-level [`Error`](error::Error) type that
//! every subsystem error rolls up into.
pub mod constants;
pub mod error;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
