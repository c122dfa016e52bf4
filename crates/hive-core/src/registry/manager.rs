use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::component::{Component, ComponentError, ComponentId, ComponentResult, SharedComponent};
use crate::dispatch::dispatcher::panic_message;
use crate::dispatch::{DispatchFuture, DispatchReport, Dispatcher, Executor};
use crate::event::game::names;
use crate::event::{self, Alert, ClientError, GameEvent, UnitRef, Upgrade};
use crate::kernel::error::Result;
use crate::registry::builder::RegistryBuilder;
use crate::registry::membership::{Member, MembershipStore};

struct RegistryInner {
    store: MembershipStore,
    dispatcher: Dispatcher,
    // Replaced with a fresh token each time it fires
    interrupt: Mutex<CancellationToken>,
}

/// Thread-safe handle to a component registry.
///
/// Clones share the same membership and worker pool. Every lifecycle entry
/// point waits until each registered component has handled the notification
/// or passed its deadline, and reports per-component outcomes instead of
/// failing. Components receive this handle in every handler and may add,
/// remove or look up components from inside it.
#[derive(Clone)]
pub struct ComponentRegistry {
    inner: Arc<RegistryInner>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("dispatcher", &self.inner.dispatcher)
            .finish_non_exhaustive()
    }
}

impl ComponentRegistry {
    pub(crate) fn from_parts(executor: Executor, timeout: Duration) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(RegistryInner {
                store: MembershipStore::new(),
                dispatcher: Dispatcher::new(executor, timeout)?,
                interrupt: Mutex::new(CancellationToken::new()),
            }),
        })
    }

    /// Registry on the current tokio runtime with the default settings
    pub fn new() -> Result<Self> {
        RegistryBuilder::new().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn executor(&self) -> Executor {
        self.inner.dispatcher.executor()
    }

    /// Swap the worker pool. Only safe while no dispatch is in flight.
    pub fn set_executor(&self, executor: Executor) {
        self.inner.dispatcher.set_executor(executor);
    }

    pub fn dispatch_timeout(&self) -> Duration {
        self.inner.dispatcher.timeout()
    }

    /// Abort the wait of every dispatch currently in flight.
    ///
    /// Interrupted entry points return early with an interrupted report.
    /// Component tasks they submitted keep running detached. Dispatches
    /// started afterwards are unaffected.
    pub fn interrupt(&self) {
        let mut token = self.inner.interrupt.lock().unwrap_or_else(PoisonError::into_inner);
        token.cancel();
        *token = CancellationToken::new();
    }

    fn interrupt_token(&self) -> CancellationToken {
        self.inner.interrupt.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    // --- Membership ---

    /// Register `component`.
    ///
    /// Runs its `on_initialized` handler, then its `on_component_added`
    /// handler once for each current member (itself included), both on the
    /// calling task. Afterwards every member is told about the newcomer by a
    /// detached broadcast that this call does not wait for.
    ///
    /// Returns `false` without side effects if the same reference is already
    /// registered.
    pub async fn add_component<C: Component>(&self, component: Arc<C>) -> bool {
        let member = Member::new(component);
        let id = member.id();
        let added = member.component().clone();
        if !self.inner.store.insert(member).await {
            log::debug!("Component '{}' ({}) is already registered", added.name(), id);
            return false;
        }
        log::info!("Registered component '{}' ({})", added.name(), id);

        if let Err(e) = inline(added.on_initialized(self)).await {
            log::warn!("Component '{}' failed to initialize: {}", added.name(), e);
        }

        for existing in self.inner.store.snapshot().await {
            if let Err(e) = inline(added.on_component_added(self, existing.component())).await {
                log::warn!(
                    "Component '{}' failed observing '{}': {}",
                    added.name(),
                    existing.component().name(),
                    e
                );
            }
        }

        // The broadcast runs detached so that handlers which register or
        // remove components never wait on the dispatch that called them.
        let registry = self.clone();
        self.executor().spawn(async move {
            registry.broadcast_component_added(added).await;
        });
        true
    }

    /// Unregister `component` and tell the remaining members with a detached
    /// broadcast. Returns `false`, broadcasting nothing, if it was not
    /// registered.
    pub async fn remove_component<C: Component + ?Sized>(&self, component: &Arc<C>) -> bool {
        let id = ComponentId::of(component);
        let Some(member) = self.inner.store.remove(id).await else {
            log::debug!("Component {} is not registered; nothing to remove", id);
            return false;
        };
        let removed = member.component().clone();
        log::info!("Removed component '{}' ({})", removed.name(), id);

        let registry = self.clone();
        self.executor().spawn(async move {
            registry.broadcast_component_removed(removed).await;
        });
        true
    }

    /// Remove every component, telling each one on the calling task that it
    /// itself was removed. No broadcast follows.
    pub async fn clear_component_set(&self) {
        let notified = self.inner.store.snapshot().await;
        for member in &notified {
            self.notify_self_removed(member).await;
        }

        let drained = self.inner.store.clear().await;
        // Members that arrived while the others were being notified
        for member in drained.iter().filter(|m| !notified.iter().any(|n| n.id() == m.id())) {
            self.notify_self_removed(member).await;
        }
        log::info!("Cleared component set ({} component(s))", drained.len());
    }

    async fn notify_self_removed(&self, member: &Member) {
        let component = member.component();
        if let Err(e) = inline(component.on_component_removed(self, component)).await {
            log::warn!("Component '{}' failed handling its own removal: {}", component.name(), e);
        }
    }

    /// Registered components whose concrete type is `C`
    pub async fn find_components<C: Component>(&self) -> Vec<Arc<C>> {
        self.inner.store.query_type::<C>().await
    }

    /// Registered components carrying capability tag `tag`
    pub async fn find_tagged(&self, tag: &str) -> Vec<SharedComponent> {
        self.inner.store.query_tag(tag).await
    }

    /// Registered components accepted by `predicate`. The predicate runs under
    /// the shared guard and must not call back into the registry.
    pub async fn find_where<P>(&self, predicate: P) -> Vec<SharedComponent>
    where
        P: Fn(&dyn Component) -> bool,
    {
        self.inner.store.query(|member| predicate(member.component().as_ref())).await
    }

    pub async fn contains<C: Component + ?Sized>(&self, component: &Arc<C>) -> bool {
        self.inner.store.contains(ComponentId::of(component)).await
    }

    pub async fn component_count(&self) -> usize {
        self.inner.store.len().await
    }

    /// Point-in-time copy of all registered components
    pub async fn components(&self) -> Vec<SharedComponent> {
        self.inner
            .store
            .snapshot()
            .await
            .into_iter()
            .map(|member| member.component().clone())
            .collect()
    }

    // --- Dispatch ---

    /// Invoke `selector(component, registry)` on every registered component
    /// concurrently and wait for all of them, each bounded by the dispatch
    /// timeout.
    pub async fn run_component_parallel<F>(&self, event: &'static str, selector: F) -> DispatchReport
    where
        F: Fn(SharedComponent, ComponentRegistry) -> DispatchFuture + Send + Sync,
    {
        let interrupt = self.interrupt_token();
        let report = self
            .inner
            .dispatcher
            .run_parallel(event, &self.inner.store, &interrupt, |component| {
                selector(component, self.clone())
            })
            .await;
        if !report.is_clean() {
            log::debug!(
                "'{}': {} completed, {} failed, {} timed out, {} cancelled, {} unfinished",
                event,
                report.completed(),
                report.failed(),
                report.timed_out(),
                report.cancelled(),
                report.unfinished()
            );
        }
        report
    }

    /// Tell every member, the newcomer included, that `added` joined
    pub async fn broadcast_component_added(&self, added: SharedComponent) -> DispatchReport {
        self.run_component_parallel(event::COMPONENT_ADDED, move |c, r| {
            let added = added.clone();
            Box::pin(async move { c.on_component_added(&r, &added).await })
        })
        .await
    }

    /// Tell every remaining member that `removed` left
    pub async fn broadcast_component_removed(&self, removed: SharedComponent) -> DispatchReport {
        self.run_component_parallel(event::COMPONENT_REMOVED, move |c, r| {
            let removed = removed.clone();
            Box::pin(async move { c.on_component_removed(&r, &removed).await })
        })
        .await
    }

    // --- Lifecycle entry points ---

    /// Route a driver notification to its entry point
    pub async fn dispatch_event(&self, event: GameEvent) -> DispatchReport {
        match event {
            GameEvent::GameFullStart => self.on_game_full_start().await,
            GameEvent::GameStart => self.on_game_start().await,
            GameEvent::GameEnd => self.on_game_end().await,
            GameEvent::Step => self.on_step().await,
            GameEvent::UnitEnterVision(unit) => self.on_unit_enter_vision(unit).await,
            GameEvent::UnitCreated(unit) => self.on_unit_created(unit).await,
            GameEvent::UnitDestroyed(unit) => self.on_unit_destroyed(unit).await,
            GameEvent::UnitIdle(unit) => self.on_unit_idle(unit).await,
            GameEvent::BuildingConstructionComplete(unit) => self.on_building_construction_complete(unit).await,
            GameEvent::UpgradeCompleted(upgrade) => self.on_upgrade_completed(upgrade).await,
            GameEvent::NydusDetected => self.on_nydus_detected().await,
            GameEvent::NuclearLaunchDetected => self.on_nuclear_launch_detected().await,
            GameEvent::Error { client_errors, protocol_errors } => self.on_error(client_errors, protocol_errors).await,
            GameEvent::Alert(alert) => self.on_alert(alert).await,
        }
    }

    pub async fn on_game_full_start(&self) -> DispatchReport {
        self.run_component_parallel(names::GAME_FULL_START, |c, r| {
            Box::pin(async move { c.on_game_full_start(&r).await })
        })
        .await
    }

    pub async fn on_game_start(&self) -> DispatchReport {
        self.run_component_parallel(names::GAME_START, |c, r| {
            Box::pin(async move { c.on_game_start(&r).await })
        })
        .await
    }

    pub async fn on_game_end(&self) -> DispatchReport {
        self.run_component_parallel(names::GAME_END, |c, r| {
            Box::pin(async move { c.on_game_end(&r).await })
        })
        .await
    }

    pub async fn on_step(&self) -> DispatchReport {
        self.run_component_parallel(names::STEP, |c, r| {
            Box::pin(async move { c.on_step(&r).await })
        })
        .await
    }

    pub async fn on_unit_enter_vision(&self, unit: UnitRef) -> DispatchReport {
        self.run_component_parallel(names::UNIT_ENTER_VISION, move |c, r| {
            let unit = unit.clone();
            Box::pin(async move { c.on_unit_enter_vision(&r, &unit).await })
        })
        .await
    }

    pub async fn on_unit_created(&self, unit: UnitRef) -> DispatchReport {
        self.run_component_parallel(names::UNIT_CREATED, move |c, r| {
            let unit = unit.clone();
            Box::pin(async move { c.on_unit_created(&r, &unit).await })
        })
        .await
    }

    pub async fn on_unit_destroyed(&self, unit: UnitRef) -> DispatchReport {
        self.run_component_parallel(names::UNIT_DESTROYED, move |c, r| {
            let unit = unit.clone();
            Box::pin(async move { c.on_unit_destroyed(&r, &unit).await })
        })
        .await
    }

    pub async fn on_unit_idle(&self, unit: UnitRef) -> DispatchReport {
        self.run_component_parallel(names::UNIT_IDLE, move |c, r| {
            let unit = unit.clone();
            Box::pin(async move { c.on_unit_idle(&r, &unit).await })
        })
        .await
    }

    pub async fn on_building_construction_complete(&self, unit: UnitRef) -> DispatchReport {
        self.run_component_parallel(names::BUILDING_CONSTRUCTION_COMPLETE, move |c, r| {
            let unit = unit.clone();
            Box::pin(async move { c.on_building_construction_complete(&r, &unit).await })
        })
        .await
    }

    pub async fn on_upgrade_completed(&self, upgrade: Upgrade) -> DispatchReport {
        self.run_component_parallel(names::UPGRADE_COMPLETED, move |c, r| {
            Box::pin(async move { c.on_upgrade_completed(&r, &upgrade).await })
        })
        .await
    }

    pub async fn on_nydus_detected(&self) -> DispatchReport {
        self.run_component_parallel(names::NYDUS_DETECTED, |c, r| {
            Box::pin(async move { c.on_nydus_detected(&r).await })
        })
        .await
    }

    pub async fn on_nuclear_launch_detected(&self) -> DispatchReport {
        self.run_component_parallel(names::NUCLEAR_LAUNCH_DETECTED, |c, r| {
            Box::pin(async move { c.on_nuclear_launch_detected(&r).await })
        })
        .await
    }

    pub async fn on_error(&self, client_errors: Vec<ClientError>, protocol_errors: Vec<String>) -> DispatchReport {
        let client_errors: Arc<[ClientError]> = client_errors.into();
        let protocol_errors: Arc<[String]> = protocol_errors.into();
        self.run_component_parallel(names::CLIENT_ERROR, move |c, r| {
            let client_errors = client_errors.clone();
            let protocol_errors = protocol_errors.clone();
            Box::pin(async move { c.on_error(&r, &client_errors, &protocol_errors).await })
        })
        .await
    }

    pub async fn on_alert(&self, alert: Alert) -> DispatchReport {
        self.run_component_parallel(names::ALERT, move |c, r| {
            Box::pin(async move { c.on_alert(&r, &alert).await })
        })
        .await
    }
}

/// Await a handler on the calling task, turning a panic into a failure so
/// the surrounding membership protocol still runs to completion.
async fn inline<F>(handler: F) -> ComponentResult
where
    F: Future<Output = ComponentResult>,
{
    match AssertUnwindSafe(handler).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(ComponentError::Other(format!("panicked: {}", panic_message(payload)))),
    }
}
