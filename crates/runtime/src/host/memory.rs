//! In-memory [`InventoryHost`] for tests, tools and local runs.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use menu_core::{
    CloseEvent, InventoryHost, InventoryId, ItemStack, PlayerId, PopupMenu, SlotIndex, Viewer,
};
use tracing::{debug, warn};

use crate::events::ListenerBus;

/// What a viewer currently has on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenView {
    Inventory(InventoryId),
    /// The player's own inventory screen.
    PlayerInventory,
}

struct InventoryRecord {
    holder: Weak<PopupMenu>,
    title: String,
    slots: Vec<ItemStack>,
    viewers: Vec<Viewer>,
}

/// Host that keeps every inventory and view in memory.
///
/// Closing a view raises a [`CloseEvent`] on the bus, as a game server does.
/// The host also tracks the UI glitch real servers exhibit: a player whose
/// view was explicitly closed and who is shown another inventory within the
/// same tick is recorded in [`glitches`](Self::glitches).
pub struct MemoryHost {
    bus: Rc<ListenerBus>,
    inventories: RefCell<Vec<InventoryRecord>>,
    next_inventory: Cell<u64>,
    open_views: RefCell<HashMap<Viewer, OpenView>>,
    closed_this_tick: RefCell<HashSet<Viewer>>,
    close_requests: RefCell<Vec<Viewer>>,
    refresh_requests: RefCell<Vec<PlayerId>>,
    glitches: RefCell<Vec<PlayerId>>,
}

impl MemoryHost {
    pub fn new(bus: Rc<ListenerBus>) -> Self {
        Self {
            bus,
            inventories: RefCell::new(Vec::new()),
            next_inventory: Cell::new(0),
            open_views: RefCell::new(HashMap::new()),
            closed_this_tick: RefCell::new(HashSet::new()),
            close_requests: RefCell::new(Vec::new()),
            refresh_requests: RefCell::new(Vec::new()),
            glitches: RefCell::new(Vec::new()),
        }
    }

    /// Creates an inventory no menu holds, like a chest.
    pub fn create_plain_inventory(&self, size: usize, title: &str) -> InventoryId {
        self.create_inventory(Weak::new(), size, title)
    }

    /// Starts a new tick; closes from earlier ticks no longer count as recent.
    pub fn begin_tick(&self) {
        self.closed_this_tick.borrow_mut().clear();
    }

    pub fn open_view(&self, viewer: impl Into<Viewer>) -> Option<OpenView> {
        self.open_views.borrow().get(&viewer.into()).copied()
    }

    /// Puts `viewer` in front of `inventory` without going through a player
    /// open. Used for non-player viewers.
    pub fn attach_viewer(&self, viewer: Viewer, inventory: InventoryId) {
        let known = self
            .with_record_mut(inventory, |record| {
                if !record.viewers.contains(&viewer) {
                    record.viewers.push(viewer);
                }
            })
            .is_some();
        if known {
            self.open_views
                .borrow_mut()
                .insert(viewer, OpenView::Inventory(inventory));
        }
    }

    pub fn inventory_size(&self, inventory: InventoryId) -> Option<usize> {
        self.with_record(inventory, |record| record.slots.len())
    }

    pub fn title(&self, inventory: InventoryId) -> Option<String> {
        self.with_record(inventory, |record| record.title.clone())
    }

    pub fn inventory_count(&self) -> usize {
        self.inventories.borrow().len()
    }

    /// Every viewer a close was requested for, in order.
    pub fn close_requests(&self) -> Vec<Viewer> {
        self.close_requests.borrow().clone()
    }

    /// Every player whose view was re-sent, in order.
    pub fn refresh_requests(&self) -> Vec<PlayerId> {
        self.refresh_requests.borrow().clone()
    }

    /// Players who were shown an inventory in the same tick their view was closed.
    pub fn glitches(&self) -> Vec<PlayerId> {
        self.glitches.borrow().clone()
    }

    fn with_record<R>(&self, inventory: InventoryId, f: impl FnOnce(&InventoryRecord) -> R) -> Option<R> {
        let index = usize::try_from(inventory.0).ok()?;
        self.inventories.borrow().get(index).map(f)
    }

    fn with_record_mut<R>(
        &self,
        inventory: InventoryId,
        f: impl FnOnce(&mut InventoryRecord) -> R,
    ) -> Option<R> {
        let index = usize::try_from(inventory.0).ok()?;
        self.inventories.borrow_mut().get_mut(index).map(f)
    }

    /// Takes `viewer` out of their current view and raises the close event.
    fn close_view(&self, viewer: Viewer, explicit: bool) {
        let Some(view) = self.open_views.borrow_mut().remove(&viewer) else {
            return;
        };
        if explicit {
            self.closed_this_tick.borrow_mut().insert(viewer);
        }

        if let OpenView::Inventory(inventory) = view {
            self.with_record_mut(inventory, |record| record.viewers.retain(|v| *v != viewer));
            debug!(target: "runtime::host", %viewer, %inventory, "view closed");
            let mut event = CloseEvent::new(inventory, viewer);
            self.bus.dispatch_close(&mut event);
        }
    }
}

impl InventoryHost for MemoryHost {
    fn create_inventory(&self, holder: Weak<PopupMenu>, size: usize, title: &str) -> InventoryId {
        let id = InventoryId(self.next_inventory.get());
        self.next_inventory.set(id.0 + 1);
        self.inventories.borrow_mut().push(InventoryRecord {
            holder,
            title: title.to_string(),
            slots: vec![ItemStack::empty(); size],
            viewers: Vec::new(),
        });
        id
    }

    fn holder(&self, inventory: InventoryId) -> Option<Rc<PopupMenu>> {
        self.with_record(inventory, |record| record.holder.upgrade())
            .flatten()
    }

    fn item(&self, inventory: InventoryId, slot: SlotIndex) -> Option<ItemStack> {
        self.with_record(inventory, |record| record.slots.get(slot.get()).cloned())
            .flatten()
    }

    fn set_item(&self, inventory: InventoryId, slot: SlotIndex, stack: ItemStack) {
        let stored = self
            .with_record_mut(inventory, |record| match record.slots.get_mut(slot.get()) {
                Some(current) => {
                    *current = stack;
                    true
                }
                None => false,
            })
            .unwrap_or(false);
        if !stored {
            warn!(target: "runtime::host", %inventory, %slot, "write to missing slot ignored");
        }
    }

    fn clear_slot(&self, inventory: InventoryId, slot: SlotIndex) {
        self.set_item(inventory, slot, ItemStack::empty());
    }

    fn viewers(&self, inventory: InventoryId) -> Vec<Viewer> {
        self.with_record(inventory, |record| record.viewers.clone())
            .unwrap_or_default()
    }

    fn remove_viewer(&self, inventory: InventoryId, viewer: Viewer) {
        self.with_record_mut(inventory, |record| record.viewers.retain(|v| *v != viewer));
    }

    fn open_inventory(&self, player: PlayerId, inventory: InventoryId) {
        let viewer = Viewer::Player(player);
        if self.inventory_size(inventory).is_none() {
            warn!(target: "runtime::host", %player, %inventory, "open of unknown inventory ignored");
            return;
        }

        // Showing a new inventory replaces whatever was open.
        self.close_view(viewer, false);
        if let Some(current) = self.open_view(viewer) {
            // A close listener already put the player somewhere else.
            debug!(
                target: "runtime::host",
                %player,
                %inventory,
                ?current,
                "open superseded by close listener"
            );
            return;
        }
        if self.closed_this_tick.borrow().contains(&viewer) {
            warn!(
                target: "runtime::host",
                %player,
                %inventory,
                "inventory opened in the same tick as a close; client view may desync"
            );
            self.glitches.borrow_mut().push(player);
        }

        self.with_record_mut(inventory, |record| {
            if !record.viewers.contains(&viewer) {
                record.viewers.push(viewer);
            }
        });
        self.open_views
            .borrow_mut()
            .insert(viewer, OpenView::Inventory(inventory));
        debug!(target: "runtime::host", %player, %inventory, "view opened");
    }

    fn open_player_inventory(&self, player: PlayerId) {
        let viewer = Viewer::Player(player);
        self.close_view(viewer, false);
        self.open_views
            .borrow_mut()
            .insert(viewer, OpenView::PlayerInventory);
    }

    fn close_inventory(&self, viewer: Viewer) {
        self.close_requests.borrow_mut().push(viewer);
        self.close_view(viewer, true);
    }

    fn update_inventory(&self, player: PlayerId) {
        self.refresh_requests.borrow_mut().push(player);
    }
}
