//! Grid-based pop-up menus shown through a host's inventory UI.
//!
//! `menu-core` owns the menu model and the glue that routes raw host UI events
//! back to it. Everything the host provides (inventories, viewers, the tick
//! scheduler, the event bus) is reached through the traits in [`host`], so the
//! same menus run against a real game server or the in-memory host shipped by
//! `menu-runtime`.
//!
//! Modules are organized by responsibility:
//! - [`item`] defines [`MenuItem`] and the [`SelectAction`] capability
//! - [`menu`] holds [`PopupMenu`], the slot→item mapping backed by a host inventory
//! - [`api`] is the [`MenuApi`] context: create, clone, destroy and switch menus
//! - [`router`] redispatches host click/close events to menus
//! - [`host`] declares the outbound host interface and its event types
//!
//! The model is single-threaded: every call happens on the host's main loop,
//! so shared state uses `Rc`/`RefCell` and never blocks.
pub mod api;
pub mod config;
pub mod error;
pub mod host;
pub mod item;
pub mod menu;
pub mod router;
pub mod slot;
pub mod stack;

pub use api::MenuApi;
pub use config::{MenuConfig, OwnInventoryClick};
pub use error::{MenuError, Result};
pub use host::{
    Cancellable, ClickEvent, ClickHandler, CloseEvent, CloseHandler, EventBus, EventPriority,
    InventoryHost, SlotType, TickScheduler, TickTask,
};
pub use item::{MenuItem, SelectAction, SelectContext};
pub use menu::{CloseBehaviour, CloseContext, PopupMenu};
pub use router::EventRouter;
pub use slot::{EntityId, GridPosition, InventoryId, MenuId, PlayerId, SlotIndex, Viewer};
pub use stack::{Icon, ItemStack, Material};
