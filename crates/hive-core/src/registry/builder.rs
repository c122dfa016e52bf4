use std::time::Duration;

use crate::config::RegistryConfig;
use crate::dispatch::Executor;
use crate::kernel::error::Result;
use crate::registry::manager::ComponentRegistry;

/// Assembles a [`ComponentRegistry`] from configuration and an optional
/// explicitly injected executor.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
    executor: Option<Executor>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn dispatch_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_dispatch_timeout(timeout);
        self
    }

    /// Run component tasks on `executor` instead of the current runtime
    pub fn executor(mut self, executor: Executor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Fails when the configuration is invalid, or when no executor was
    /// injected and the caller is not on a tokio runtime.
    pub fn build(self) -> Result<ComponentRegistry> {
        self.config.validate()?;
        let executor = match self.executor {
            Some(executor) => executor,
            None => Executor::current()?,
        };
        log::debug!(
            "Building component registry (dispatch timeout {:?})",
            self.config.dispatch_timeout()
        );
        ComponentRegistry::from_parts(executor, self.config.dispatch_timeout())
    }
}
