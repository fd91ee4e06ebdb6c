//! Wiring of the in-memory host services to the menu core.
//!
//! [`Runtime`] owns the bus, host and scheduler, registers the
//! [`EventRouter`] on the bus, and exposes helpers that play the part of the
//! game server's input pipeline: clicks, closes and ticks.

use std::rc::Rc;

use menu_core::{
    ClickEvent, EventRouter, InventoryHost, MenuApi, MenuConfig, SlotType, TickScheduler, Viewer,
};
use tracing::trace;

use crate::events::ListenerBus;
use crate::host::{MemoryHost, OpenView};
use crate::scheduler::TickQueue;

/// Slots of a player's own storage shown below an open container; the
/// hotbar follows them.
const PLAYER_STORAGE_SLOTS: usize = 27;

/// In-memory game server hosting menus.
///
/// Design: Runtime owns the host services; [`MenuApi`] is the cloneable
/// façade handed to menu code.
pub struct Runtime {
    bus: Rc<ListenerBus>,
    host: Rc<MemoryHost>,
    scheduler: Rc<TickQueue>,
    api: MenuApi,
    router: Rc<EventRouter>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Runtime with the default [`MenuConfig`].
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn api(&self) -> &MenuApi {
        &self.api
    }

    pub fn host(&self) -> &Rc<MemoryHost> {
        &self.host
    }

    pub fn bus(&self) -> &Rc<ListenerBus> {
        &self.bus
    }

    pub fn scheduler(&self) -> &Rc<TickQueue> {
        &self.scheduler
    }

    pub fn router(&self) -> &Rc<EventRouter> {
        &self.router
    }

    pub fn current_tick(&self) -> u64 {
        self.scheduler.current_tick()
    }

    /// Simulates `viewer` clicking raw slot `raw_slot` of their open view.
    ///
    /// Returns the dispatched event, or `None` if the viewer has no
    /// inventory open.
    pub fn click(&self, viewer: impl Into<Viewer>, raw_slot: usize) -> Option<ClickEvent> {
        let viewer = viewer.into();
        let inventory = self.open_inventory(viewer)?;
        let size = self.host.inventory_size(inventory).unwrap_or(0);
        let slot_type = if raw_slot >= size + PLAYER_STORAGE_SLOTS {
            SlotType::Quickbar
        } else {
            SlotType::Container
        };

        let mut event = ClickEvent::new(inventory, viewer, slot_type, raw_slot);
        self.bus.dispatch_click(&mut event);
        Some(event)
    }

    /// Simulates `viewer` clicking outside the window of their open view.
    pub fn click_outside(&self, viewer: impl Into<Viewer>) -> Option<ClickEvent> {
        let viewer = viewer.into();
        let inventory = self.open_inventory(viewer)?;

        let mut event = ClickEvent::outside(inventory, viewer);
        self.bus.dispatch_click(&mut event);
        Some(event)
    }

    /// Simulates `viewer` dismissing their UI themselves.
    pub fn close(&self, viewer: impl Into<Viewer>) {
        self.host.close_inventory(viewer.into());
    }

    /// Runs one tick of the main loop. Returns how many deferred tasks ran.
    pub fn tick(&self) -> usize {
        self.host.begin_tick();
        self.scheduler.run_tick()
    }

    fn open_inventory(&self, viewer: Viewer) -> Option<menu_core::InventoryId> {
        match self.host.open_view(viewer) {
            Some(OpenView::Inventory(inventory)) => Some(inventory),
            _ => {
                trace!(target: "runtime", %viewer, "no inventory open");
                None
            }
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: MenuConfig,
    bus: Option<Rc<ListenerBus>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: MenuConfig::default(),
            bus: None,
        }
    }

    /// Override menu configuration
    pub fn config(mut self, config: MenuConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an existing bus, e.g. one other observers already registered on.
    pub fn bus(mut self, bus: Rc<ListenerBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Build the runtime
    pub fn build(self) -> Runtime {
        let bus = self.bus.unwrap_or_default();
        let host = Rc::new(MemoryHost::new(Rc::clone(&bus)));
        let scheduler = Rc::new(TickQueue::new());

        let api = MenuApi::new(
            Rc::clone(&host) as Rc<dyn InventoryHost>,
            Rc::clone(&scheduler) as Rc<dyn TickScheduler>,
            self.config,
        );
        let router = Rc::new(EventRouter::new(api.clone()));
        router.register(&*bus);

        Runtime {
            bus,
            host,
            scheduler,
            api,
            router,
        }
    }
}
