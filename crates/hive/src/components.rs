//! Sample components the demo host registers.
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use hive_core::event::{Alliance, UnitTag};
use hive_core::{Alert, Component, ComponentError, ComponentRegistry, ComponentResult, UnitRef};
use log::{info, warn};

/// Counts game steps
#[derive(Debug, Default)]
pub struct StepCounter {
    steps: AtomicU64,
}

impl StepCounter {
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Component for StepCounter {
    fn name(&self) -> &str {
        "step-counter"
    }

    async fn on_step(&self, _registry: &ComponentRegistry) -> ComponentResult {
        self.steps.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn on_game_end(&self, _registry: &ComponentRegistry) -> ComponentResult {
        info!("Game ended after {} step(s)", self.steps());
        Ok(())
    }
}

/// Keeps the set of enemy units currently known to be alive
#[derive(Debug, Default)]
pub struct Scout {
    enemies: Mutex<HashSet<UnitTag>>,
}

impl Scout {
    pub fn known_enemies(&self) -> usize {
        self.enemies.lock().map(|set| set.len()).unwrap_or(0)
    }

    fn track(&self, unit: &UnitRef, alive: bool) -> ComponentResult {
        let mut enemies = self
            .enemies
            .lock()
            .map_err(|_| ComponentError::failed("scout", "enemy set poisoned"))?;
        if alive {
            enemies.insert(unit.tag);
        } else {
            enemies.remove(&unit.tag);
        }
        Ok(())
    }
}

#[async_trait]
impl Component for Scout {
    fn name(&self) -> &str {
        "scout"
    }

    fn tags(&self) -> Vec<&'static str> {
        vec!["intel"]
    }

    async fn on_unit_enter_vision(&self, _registry: &ComponentRegistry, unit: &UnitRef) -> ComponentResult {
        if unit.alliance == Alliance::Enemy {
            info!("Spotted enemy unit {} (type {})", unit.tag, unit.unit_type);
            self.track(unit, true)?;
        }
        Ok(())
    }

    async fn on_unit_destroyed(&self, _registry: &ComponentRegistry, unit: &UnitRef) -> ComponentResult {
        self.track(unit, false)
    }
}

/// Brings the scout along when it joins
#[derive(Debug, Default)]
pub struct Commander;

#[async_trait]
impl Component for Commander {
    fn name(&self) -> &str {
        "commander"
    }

    async fn on_initialized(&self, registry: &ComponentRegistry) -> ComponentResult {
        if registry.find_components::<Scout>().await.is_empty() {
            registry.add_component(Arc::new(Scout::default())).await;
        }
        Ok(())
    }

    async fn on_alert(&self, _registry: &ComponentRegistry, alert: &Alert) -> ComponentResult {
        warn!("Alert received: {:?}", alert);
        Ok(())
    }

    async fn on_nuclear_launch_detected(&self, _registry: &ComponentRegistry) -> ComponentResult {
        warn!("Nuclear launch detected");
        Ok(())
    }
}

/// Fails every step; registered with `--faulty`
#[derive(Debug, Default)]
pub struct Faulty;

#[async_trait]
impl Component for Faulty {
    fn name(&self) -> &str {
        "faulty"
    }

    async fn on_step(&self, _registry: &ComponentRegistry) -> ComponentResult {
        Err(ComponentError::failed(self.name(), "refusing to step"))
    }
}
