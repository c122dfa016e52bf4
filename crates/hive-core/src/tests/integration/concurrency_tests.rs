#![cfg(test)]

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::registry::ComponentRegistry;
use crate::tests::common::Probe;

const MUTATORS: usize = 4;
const DISPATCHERS: usize = 4;
const ROUNDS: usize = 40;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_membership_churn_during_dispatch() {
    let registry = ComponentRegistry::builder()
        .dispatch_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let mut mutators = Vec::new();
    for _ in 0..MUTATORS {
        let registry = registry.clone();
        mutators.push(tokio::spawn(async move {
            let mut kept = Vec::new();
            for round in 0..ROUNDS {
                let probe = Arc::new(Probe::new("churn"));
                assert!(registry.add_component(probe.clone()).await);
                if round % 2 == 0 {
                    assert!(registry.remove_component(&probe).await);
                } else {
                    kept.push(probe);
                }
            }
            kept
        }));
    }

    let mut dispatchers = Vec::new();
    for _ in 0..DISPATCHERS {
        let registry = registry.clone();
        dispatchers.push(tokio::spawn(async move {
            for _ in 0..ROUNDS {
                let report = registry.on_step().await;
                // One coherent snapshot: every task accounted for, no member twice
                assert_eq!(report.records().len(), report.dispatched());
                let ids: HashSet<_> = report.records().iter().map(|r| r.component_id).collect();
                assert_eq!(ids.len(), report.dispatched());
                assert!(report.is_clean());

                let found = registry.find_components::<Probe>().await;
                let unique: HashSet<_> = found.iter().map(|p| Arc::as_ptr(p) as usize).collect();
                assert_eq!(unique.len(), found.len());
            }
        }));
    }

    let mut kept = Vec::new();
    for handle in mutators {
        kept.extend(handle.await.expect("mutator panicked"));
    }
    for handle in dispatchers {
        handle.await.expect("dispatcher panicked");
    }

    assert_eq!(registry.component_count().await, MUTATORS * ROUNDS / 2);
    for probe in &kept {
        assert!(registry.contains(probe).await);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clear_and_add_leave_no_stale_members() {
    let registry = ComponentRegistry::new().unwrap();

    let adder = {
        let registry = registry.clone();
        tokio::spawn(async move {
            let mut probes = Vec::new();
            for _ in 0..50 {
                let probe = Arc::new(Probe::new("late"));
                registry.add_component(probe.clone()).await;
                probes.push(probe);
            }
            probes
        })
    };
    let clearer = {
        let registry = registry.clone();
        tokio::spawn(async move {
            for _ in 0..10 {
                registry.clear_component_set().await;
                tokio::task::yield_now().await;
            }
        })
    };

    let probes = adder.await.unwrap();
    clearer.await.unwrap();

    // Whatever a clear dropped was told about its own removal exactly once
    for probe in &probes {
        let own = probe.removed().iter().filter(|id| **id == crate::ComponentId::of(probe)).count();
        if registry.contains(probe).await {
            assert_eq!(own, 0);
        } else {
            assert_eq!(own, 1);
        }
    }

    registry.clear_component_set().await;
    assert_eq!(registry.component_count().await, 0);
}
