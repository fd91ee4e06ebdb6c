//! Outbound interface to the host platform.
//!
//! Menus never talk to a game server directly. The host is reached through
//! three traits, injected once through [`MenuApi`](crate::MenuApi):
//!
//! - [`InventoryHost`]: inventories, slots, viewers, opening and closing UIs
//! - [`TickScheduler`]: run a task on the next iteration of the main loop
//! - [`EventBus`]: subscribe to raw grid click and close events
//!
//! Implementations must call back into the core only from the main loop and
//! must not hold internal borrows while invoking registered handlers, since
//! handlers re-enter the host (closing a menu fires a close event).

mod events;
mod inventory;
mod scheduler;

pub use events::{
    Cancellable, ClickEvent, ClickHandler, CloseEvent, CloseHandler, EventBus, EventPriority,
    SlotType,
};
pub use inventory::InventoryHost;
pub use scheduler::{TickScheduler, TickTask};
