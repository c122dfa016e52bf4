#![cfg(test)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::component::{Component, ComponentResult, SharedComponent};
use crate::registry::ComponentRegistry;
use crate::tests::common::{wait_until, Probe};

/// Registers a helper from its own initialization
#[derive(Debug)]
struct Spawner;

#[async_trait]
impl Component for Spawner {
    async fn on_initialized(&self, registry: &ComponentRegistry) -> ComponentResult {
        registry.add_component(Arc::new(Worker)).await;
        Ok(())
    }
}

/// Removes itself on its first step
#[derive(Debug)]
struct Worker;

#[async_trait]
impl Component for Worker {
    fn tags(&self) -> Vec<&'static str> {
        vec!["worker"]
    }

    async fn on_step(&self, registry: &ComponentRegistry) -> ComponentResult {
        for me in registry.find_components::<Worker>().await {
            registry.remove_component(&me).await;
        }
        Ok(())
    }
}

/// Looks up its peers every time membership changes
#[derive(Debug, Default)]
struct Directory {
    seen: std::sync::Mutex<usize>,
}

#[async_trait]
impl Component for Directory {
    async fn on_component_added(&self, registry: &ComponentRegistry, _component: &SharedComponent) -> ComponentResult {
        let peers = registry.components().await.len();
        let mut seen = self.seen.lock().unwrap();
        *seen = (*seen).max(peers);
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_components_manage_membership_from_handlers() {
    let result = tokio::time::timeout(Duration::from_secs(10), async {
        let registry = ComponentRegistry::builder()
            .dispatch_timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        registry.add_component(Arc::new(Spawner)).await;
        assert_eq!(registry.find_components::<Worker>().await.len(), 1);
        assert_eq!(registry.find_tagged("worker").await.len(), 1);

        let report = registry.on_step().await;
        assert_eq!(report.dispatched(), 2);
        assert!(report.is_clean());
        assert!(registry.find_components::<Worker>().await.is_empty());
        assert_eq!(registry.component_count().await, 1);
    })
    .await;
    assert!(result.is_ok(), "Reentrant registration must not deadlock");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_handlers_can_query_during_broadcast() {
    let registry = ComponentRegistry::new().unwrap();
    let directory = Arc::new(Directory::default());
    registry.add_component(directory.clone()).await;
    registry.add_component(Arc::new(Probe::new("a"))).await;
    registry.add_component(Arc::new(Probe::new("b"))).await;

    assert!(wait_until(|| *directory.seen.lock().unwrap() == 3).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_clear_from_inside_a_dispatch() {
    #[derive(Debug)]
    struct Resetter;

    #[async_trait]
    impl Component for Resetter {
        async fn on_game_end(&self, registry: &ComponentRegistry) -> ComponentResult {
            registry.clear_component_set().await;
            Ok(())
        }
    }

    let registry = ComponentRegistry::new().unwrap();
    let probe = Arc::new(Probe::new("p"));
    registry.add_component(Arc::new(Resetter)).await;
    registry.add_component(probe.clone()).await;

    let report = registry.on_game_end().await;
    assert!(report.is_clean());
    assert_eq!(registry.component_count().await, 0);
    assert_eq!(probe.count("game_end"), 1);
    assert_eq!(probe.count("component_removed"), 1);
}
