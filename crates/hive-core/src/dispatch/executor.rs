use std::future::Future;

use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::JoinHandle;

use crate::dispatch::error::DispatchError;

/// Worker pool that runs dispatch tasks and membership broadcasts.
///
/// A thin handle onto a tokio runtime. Cloning is cheap and every clone
/// submits to the same runtime.
#[derive(Debug, Clone)]
pub struct Executor {
    handle: Handle,
}

impl Executor {
    /// Use the runtime the caller is running on.
    pub fn current() -> Result<Self, DispatchError> {
        Handle::try_current()
            .map(Self::from_handle)
            .map_err(|_| DispatchError::NoRuntime)
    }

    /// Use an explicitly provided runtime.
    pub fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn flavor(&self) -> RuntimeFlavor {
        self.handle.runtime_flavor()
    }

    /// Submit a detached task. Dropping the returned handle does not stop it.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }
}
