//! # Hive Core Components
//!
//! A [`Component`] is a piece of bot logic plugged into a
//! [`ComponentRegistry`]. Every handler is optional: the defaults do nothing
//! and succeed. Components run concurrently with each other, so a handler
//! that talks to another component must go through that component's own
//! synchronisation.
pub mod error;
pub mod id;

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::event::{Alert, ClientError, UnitRef, Upgrade};
use crate::registry::ComponentRegistry;

pub use error::{ComponentError, ComponentResult};
pub use id::ComponentId;

/// Shared handle to a registered component
pub type SharedComponent = Arc<dyn Component>;

/// Capability surface of a registered component
#[async_trait]
pub trait Component: Any + Send + Sync + Debug {
    /// Name used in logs and dispatch reports
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Capability tags, captured once when the component is registered
    fn tags(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Called once, right after this component joined the registry.
    ///
    /// Other components may already be registered or may arrive later, so a
    /// component that depends on another should look it up from
    /// [`on_component_added`](Component::on_component_added) or a game start
    /// handler rather than here.
    async fn on_initialized(&self, _registry: &ComponentRegistry) -> ComponentResult {
        Ok(())
    }

    /// A component joined the registry. Also called for every member present
    /// when this component joined, itself included.
    async fn on_component_added(
        &self,
        _registry: &ComponentRegistry,
        _component: &SharedComponent,
    ) -> ComponentResult {
        Ok(())
    }

    /// A component left the registry. When `component` is this component, no
    /// further handler will be dispatched to it and it should clean up.
    async fn on_component_removed(
        &self,
        _registry: &ComponentRegistry,
        _component: &SharedComponent,
    ) -> ComponentResult {
        Ok(())
    }

    /// Game started after a load. Fast restarts do not trigger this.
    async fn on_game_full_start(&self, _registry: &ComponentRegistry) -> ComponentResult {
        Ok(())
    }

    /// Game started or restarted.
    async fn on_game_start(&self, _registry: &ComponentRegistry) -> ComponentResult {
        Ok(())
    }

    async fn on_game_end(&self, _registry: &ComponentRegistry) -> ComponentResult {
        Ok(())
    }

    /// One simulation step has been observed.
    async fn on_step(&self, _registry: &ComponentRegistry) -> ComponentResult {
        Ok(())
    }

    /// An enemy unit came out of the fog of war.
    async fn on_unit_enter_vision(&self, _registry: &ComponentRegistry, _unit: &UnitRef) -> ComponentResult {
        Ok(())
    }

    async fn on_unit_created(&self, _registry: &ComponentRegistry, _unit: &UnitRef) -> ComponentResult {
        Ok(())
    }

    async fn on_unit_destroyed(&self, _registry: &ComponentRegistry, _unit: &UnitRef) -> ComponentResult {
        Ok(())
    }

    /// A unit went from having orders to having none, or appeared without any.
    async fn on_unit_idle(&self, _registry: &ComponentRegistry, _unit: &UnitRef) -> ComponentResult {
        Ok(())
    }

    async fn on_building_construction_complete(
        &self,
        _registry: &ComponentRegistry,
        _unit: &UnitRef,
    ) -> ComponentResult {
        Ok(())
    }

    async fn on_upgrade_completed(&self, _registry: &ComponentRegistry, _upgrade: &Upgrade) -> ComponentResult {
        Ok(())
    }

    async fn on_nydus_detected(&self, _registry: &ComponentRegistry) -> ComponentResult {
        Ok(())
    }

    async fn on_nuclear_launch_detected(&self, _registry: &ComponentRegistry) -> ComponentResult {
        Ok(())
    }

    /// Client-level and protocol-level errors reported by the game client.
    async fn on_error(
        &self,
        _registry: &ComponentRegistry,
        _client_errors: &[ClientError],
        _protocol_errors: &[String],
    ) -> ComponentResult {
        Ok(())
    }

    /// Announcer-style alert. Nydus and nuclear launch alerts also have
    /// dedicated handlers.
    async fn on_alert(&self, _registry: &ComponentRegistry, _alert: &Alert) -> ComponentResult {
        Ok(())
    }
}
