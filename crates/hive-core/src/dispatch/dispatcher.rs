use std::any::Any;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::component::{ComponentResult, SharedComponent};
use crate::dispatch::error::DispatchError;
use crate::dispatch::executor::Executor;
use crate::dispatch::report::{DispatchReport, TaskOutcome, TaskRecord};
use crate::registry::membership::MembershipStore;

/// Owned handler invocation produced by a dispatch selector
pub type DispatchFuture = BoxFuture<'static, ComponentResult>;

/// Fans one handler call out to every member and joins under a deadline.
pub struct Dispatcher {
    executor: RwLock<Executor>,
    timeout: Duration,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(executor: Executor, timeout: Duration) -> Result<Self, DispatchError> {
        if timeout.is_zero() {
            return Err(DispatchError::InvalidTimeout(timeout));
        }
        Ok(Self {
            executor: RwLock::new(executor),
            timeout,
        })
    }

    /// Per-task deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn executor(&self) -> Executor {
        self.executor.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Swap the worker pool. Dispatches already in flight keep the pool they
    /// started with, so swap during setup only.
    pub fn set_executor(&self, executor: Executor) {
        *self.executor.write().unwrap_or_else(PoisonError::into_inner) = executor;
    }

    /// Run `selector(component)` for every member of a fresh snapshot of
    /// `store`, one task each, and wait until every task has completed,
    /// failed or passed its own deadline.
    ///
    /// Never fails. Every abnormal outcome is logged and recorded in the
    /// returned report. When `interrupt` fires the wait ends early and the
    /// report is marked interrupted; tasks already submitted keep running.
    pub async fn run_parallel<F>(
        &self,
        event: &'static str,
        store: &MembershipStore,
        interrupt: &CancellationToken,
        selector: F,
    ) -> DispatchReport
    where
        F: Fn(SharedComponent) -> DispatchFuture + Send,
    {
        let started = Instant::now();
        let members = store.snapshot().await;
        let mut report = DispatchReport::new(event, members.len());
        if members.is_empty() {
            log::trace!("No components registered for '{}'", event);
            return report.finish(started.elapsed());
        }

        let executor = self.executor();
        let timeout = self.timeout;
        log::debug!("Dispatching '{}' to {} component(s)", event, members.len());

        let mut pending: FuturesUnordered<_> = members
            .into_iter()
            .map(|member| {
                let component = member.component().clone();
                let component_id = member.id();
                let name = component.name().to_string();
                let submitted = Instant::now();
                let deadline = submitted + timeout;
                let task = executor.spawn(selector(component));

                async move {
                    let outcome = match tokio::time::timeout_at(deadline, task).await {
                        Ok(Ok(Ok(()))) => TaskOutcome::Completed,
                        Ok(Ok(Err(err))) => {
                            log::warn!("Component '{}' failed handling '{}': {}", name, event, err);
                            TaskOutcome::Failed(err.to_string())
                        }
                        Ok(Err(join_err)) if join_err.is_cancelled() => {
                            log::warn!("Task for component '{}' handling '{}' was cancelled", name, event);
                            TaskOutcome::Cancelled
                        }
                        Ok(Err(join_err)) => {
                            let message = panic_message(join_err.into_panic());
                            log::warn!("Component '{}' panicked handling '{}': {}", name, event, message);
                            TaskOutcome::Panicked(message)
                        }
                        Err(_) => {
                            log::warn!(
                                "Component '{}' did not finish '{}' within {:?}; leaving it detached",
                                name,
                                event,
                                timeout
                            );
                            TaskOutcome::TimedOut
                        }
                    };
                    TaskRecord {
                        component_id,
                        component: name,
                        outcome,
                        elapsed: submitted.elapsed(),
                    }
                }
            })
            .collect();

        loop {
            tokio::select! {
                biased;
                _ = interrupt.cancelled() => {
                    log::warn!(
                        "Dispatch of '{}' interrupted with {} of {} task(s) still pending",
                        event,
                        pending.len(),
                        report.dispatched()
                    );
                    report.mark_interrupted();
                    break;
                }
                next = pending.next() => match next {
                    Some(record) => report.record(record),
                    None => break,
                },
            }
        }

        report.finish(started.elapsed())
    }
}

/// Text of a caught panic payload
pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}
