//! # Hive Core
//!
//! A concurrent component registry for game-playing bots. Components are
//! pluggable handler objects; the [`ComponentRegistry`] fans every game
//! notification out to all registered components at once, waits for them
//! under a bounded per-task timeout and keeps one misbehaving component from
//! stalling or breaking the rest.
pub mod component;
pub mod config;
pub mod dispatch;
pub mod event;
pub mod kernel;
pub mod registry;

// Re-export key public types/traits for easier use by the binary and by
// downstream component crates.
pub use component::{Component, ComponentError, ComponentId, ComponentResult, SharedComponent};
pub use config::{ConfigFormat, RegistryConfig};
pub use dispatch::{DispatchReport, Dispatcher, Executor, TaskOutcome};
pub use event::{Alert, ClientError, GameEvent, UnitRef, Upgrade};
pub use kernel::error::Error as KernelError;
pub use registry::{ComponentRegistry, RegistryBuilder};

#[cfg(test)]
mod tests;
