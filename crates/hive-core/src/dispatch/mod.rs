//! # Hive Core Dispatch
//!
//! Fan-out and fan-in of component handlers.
//!
//! ```text
//! run_parallel(event, selector)
//!     │ snapshot()                       (shared guard, released at once)
//!     ├──► spawn selector(A) ──► timeout_at(deadline_A) ─┐
//!     ├──► spawn selector(B) ──► timeout_at(deadline_B) ─┼──► DispatchReport
//!     └──► spawn selector(N) ──► timeout_at(deadline_N) ─┘
//! ```
//!
//! Each task has its own deadline measured from its submission, and all waits
//! proceed together, so one dispatch takes at most about one timeout however
//! many components are registered.
pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod report;

pub use dispatcher::{DispatchFuture, Dispatcher};
pub use error::DispatchError;
pub use executor::Executor;
pub use report::{DispatchReport, TaskOutcome, TaskRecord};
