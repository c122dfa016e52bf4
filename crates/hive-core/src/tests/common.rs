#![cfg(test)]

//! Scriptable components shared by the registry, dispatch and integration tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::component::{Component, ComponentError, ComponentId, ComponentResult, SharedComponent};
use crate::event::{Alert, ClientError, UnitRef, Upgrade};
use crate::registry::ComponentRegistry;

/// What a probe does when it handles a step
#[derive(Debug, Default, Clone, Copy)]
pub enum Behavior {
    #[default]
    Succeed,
    Fail,
    Panic,
    Hang,
    Sleep(Duration),
}

/// Records every handler call it receives
#[derive(Debug, Default)]
pub struct Probe {
    label: &'static str,
    tags: Vec<&'static str>,
    behavior: Behavior,
    calls: Mutex<HashMap<&'static str, usize>>,
    added: Mutex<Vec<ComponentId>>,
    removed: Mutex<Vec<ComponentId>>,
    payloads: Mutex<Vec<String>>,
}

impl Probe {
    pub fn new(label: &'static str) -> Self {
        Self { label, ..Self::default() }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_tags(mut self, tags: Vec<&'static str>) -> Self {
        self.tags = tags;
        self
    }

    pub fn count(&self, handler: &str) -> usize {
        self.calls.lock().unwrap().get(handler).copied().unwrap_or(0)
    }

    pub fn added(&self) -> Vec<ComponentId> {
        self.added.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<ComponentId> {
        self.removed.lock().unwrap().clone()
    }

    pub fn payloads(&self) -> Vec<String> {
        self.payloads.lock().unwrap().clone()
    }

    fn hit(&self, handler: &'static str) {
        *self.calls.lock().unwrap().entry(handler).or_insert(0) += 1;
    }

    fn push(&self, payload: String) {
        self.payloads.lock().unwrap().push(payload);
    }

    async fn behave(&self) -> ComponentResult {
        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(ComponentError::failed(self.label, "scripted failure")),
            Behavior::Panic => panic!("scripted panic in {}", self.label),
            Behavior::Hang => std::future::pending::<ComponentResult>().await,
            Behavior::Sleep(duration) => {
                tokio::time::sleep(duration).await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl Component for Probe {
    fn name(&self) -> &str {
        self.label
    }

    fn tags(&self) -> Vec<&'static str> {
        self.tags.clone()
    }

    async fn on_initialized(&self, _registry: &ComponentRegistry) -> ComponentResult {
        self.hit("initialized");
        Ok(())
    }

    async fn on_component_added(&self, _registry: &ComponentRegistry, component: &SharedComponent) -> ComponentResult {
        self.hit("component_added");
        self.added.lock().unwrap().push(ComponentId::of(component));
        Ok(())
    }

    async fn on_component_removed(&self, _registry: &ComponentRegistry, component: &SharedComponent) -> ComponentResult {
        self.hit("component_removed");
        self.removed.lock().unwrap().push(ComponentId::of(component));
        Ok(())
    }

    async fn on_game_full_start(&self, _registry: &ComponentRegistry) -> ComponentResult {
        self.hit("game_full_start");
        Ok(())
    }

    async fn on_game_start(&self, _registry: &ComponentRegistry) -> ComponentResult {
        self.hit("game_start");
        Ok(())
    }

    async fn on_game_end(&self, _registry: &ComponentRegistry) -> ComponentResult {
        self.hit("game_end");
        Ok(())
    }

    async fn on_step(&self, _registry: &ComponentRegistry) -> ComponentResult {
        self.hit("step");
        self.behave().await
    }

    async fn on_unit_enter_vision(&self, _registry: &ComponentRegistry, unit: &UnitRef) -> ComponentResult {
        self.push(format!("enter_vision:{}", unit.tag));
        Ok(())
    }

    async fn on_unit_created(&self, _registry: &ComponentRegistry, unit: &UnitRef) -> ComponentResult {
        self.push(format!("created:{}", unit.tag));
        Ok(())
    }

    async fn on_unit_destroyed(&self, _registry: &ComponentRegistry, unit: &UnitRef) -> ComponentResult {
        self.push(format!("destroyed:{}", unit.tag));
        Ok(())
    }

    async fn on_unit_idle(&self, _registry: &ComponentRegistry, unit: &UnitRef) -> ComponentResult {
        self.push(format!("idle:{}", unit.tag));
        Ok(())
    }

    async fn on_building_construction_complete(&self, _registry: &ComponentRegistry, unit: &UnitRef) -> ComponentResult {
        self.push(format!("building:{}", unit.tag));
        Ok(())
    }

    async fn on_upgrade_completed(&self, _registry: &ComponentRegistry, upgrade: &Upgrade) -> ComponentResult {
        self.push(format!("upgrade:{}", upgrade.0));
        Ok(())
    }

    async fn on_nydus_detected(&self, _registry: &ComponentRegistry) -> ComponentResult {
        self.push("nydus".to_string());
        Ok(())
    }

    async fn on_nuclear_launch_detected(&self, _registry: &ComponentRegistry) -> ComponentResult {
        self.push("nuke".to_string());
        Ok(())
    }

    async fn on_error(
        &self,
        _registry: &ComponentRegistry,
        client_errors: &[ClientError],
        protocol_errors: &[String],
    ) -> ComponentResult {
        self.push(format!("error:{:?}:{}", client_errors, protocol_errors.join("|")));
        Ok(())
    }

    async fn on_alert(&self, _registry: &ComponentRegistry, alert: &Alert) -> ComponentResult {
        self.push(format!("alert:{:?}", alert));
        Ok(())
    }
}

/// A component type distinct from [`Probe`] for typed lookups
#[derive(Debug, Default)]
pub struct Bystander;

impl Component for Bystander {
    fn tags(&self) -> Vec<&'static str> {
        vec!["bystander"]
    }
}

/// Poll `cond` until it holds or two seconds pass. Returns whether it held.
pub async fn wait_until<F: Fn() -> bool>(cond: F) -> bool {
    for _ in 0..400 {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    cond()
}

pub fn occurrences(ids: &[ComponentId], id: ComponentId) -> usize {
    ids.iter().filter(|i| **i == id).count()
}
