//! Reference host for `menu-core`.
//!
//! A real game server provides inventories, an event bus and a tick
//! scheduler. This crate provides in-memory versions of all three and wires
//! them to [`MenuApi`](menu_core::MenuApi) and
//! [`EventRouter`](menu_core::EventRouter) so menus can be driven end to end
//! by tests, tools and the demo binary.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the wiring and builder
//! - [`events`] provides the priority-ordered, cancellation-aware bus
//! - [`host`] keeps inventories, viewers and open views in memory
//! - [`scheduler`] queues deferred tasks until the next tick
pub mod events;
pub mod host;
pub mod runtime;
pub mod scheduler;

pub use events::ListenerBus;
pub use host::{MemoryHost, OpenView};
pub use runtime::{Runtime, RuntimeBuilder};
pub use scheduler::TickQueue;
