//! Priority-ordered event bus for host UI events.
//!
//! Mirrors the dispatch rules a game server applies to plugin listeners:
//! observers run from lowest to monitor priority, in registration order within
//! a priority, and may opt out of events someone already cancelled.

mod bus;

pub use bus::{ListenerBus, ListenerInfo};
