//! # Hive Core Registry
//!
//! The [`ComponentRegistry`] couples the [`MembershipStore`] with the
//! [`Dispatcher`](crate::dispatch::Dispatcher): it owns the set of registered
//! components, runs the membership notification protocol and exposes one
//! entry point per game notification.
//!
//! ## Membership protocol
//! ```text
//! add_component(C)
//!     ├─► insert C                          (exclusive guard)
//!     ├─► C.on_initialized                  (calling task)
//!     ├─► C.on_component_added(M) ∀ M       (calling task, snapshot incl. C)
//!     └─► spawn: M.on_component_added(C) ∀ M   (detached, not awaited)
//!
//! remove_component(C)
//!     ├─► remove C                          (exclusive guard)
//!     └─► spawn: M.on_component_removed(C) ∀ remaining M
//!
//! clear_component_set()
//!     ├─► M.on_component_removed(M) ∀ M     (calling task)
//!     └─► clear                             (exclusive guard)
//! ```
pub mod builder;
pub mod manager;
pub mod membership;

pub use builder::RegistryBuilder;
pub use manager::ComponentRegistry;
pub use membership::{Member, MembershipStore, Snapshot};
