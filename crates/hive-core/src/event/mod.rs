//! # Hive Core Events
//!
//! The notification vocabulary shared by the game driver, the registry and
//! components. [`GameEvent`] names every lifecycle notification; the payload
//! types in [`types`] travel through dispatch untouched.
pub mod game;
pub mod types;

pub use game::GameEvent;
pub use types::{Alert, Alliance, ClientError, UnitRef, UnitTag, Upgrade};

/// Dispatch name of the membership broadcast sent after a component joins
pub const COMPONENT_ADDED: &str = "component.added";

/// Dispatch name of the membership broadcast sent after a component leaves
pub const COMPONENT_REMOVED: &str = "component.removed";
