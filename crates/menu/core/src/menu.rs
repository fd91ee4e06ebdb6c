//! Pop-up menus: a slot→item mapping mirrored into a host inventory.

use std::cell::{Cell, OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::api::MenuApi;
use crate::config::MenuConfig;
use crate::error::{MenuError, Result};
use crate::host::InventoryHost;
use crate::item::{MenuItem, SelectContext};
use crate::slot::{InventoryId, MenuId, PlayerId, SlotIndex, Viewer};

/// Context handed to a [`CloseBehaviour`].
pub struct CloseContext<'a> {
    pub api: &'a MenuApi,
    pub menu: &'a Rc<PopupMenu>,
    pub player: PlayerId,
}

/// What to do when a player closes a menu, by any path.
///
/// Useful for menus that must be answered before they go away.
pub trait CloseBehaviour {
    fn on_close(&self, ctx: &CloseContext<'_>);
}

impl<F> CloseBehaviour for F
where
    F: Fn(&CloseContext<'_>),
{
    fn on_close(&self, ctx: &CloseContext<'_>) {
        self(ctx)
    }
}

/// A grid menu of `rows × 9` slots.
///
/// # Invariant
///
/// A slot is in the item mapping if and only if the host inventory holds a
/// non-empty stack there. Every add and remove updates both sides.
///
/// # Views
///
/// Mutating a menu changes it for every viewer, but the host only redraws
/// after [`update`](Self::update). Use [`MenuApi::clone_menu`] for a copy
/// that can be changed per player.
pub struct PopupMenu {
    id: MenuId,
    title: String,
    rows: usize,
    host: Rc<dyn InventoryHost>,
    items: RefCell<HashMap<SlotIndex, Rc<MenuItem>>>,
    // Created on first use, then fixed for the menu's lifetime.
    inventory: OnceCell<InventoryId>,
    exit_on_click_outside: Cell<bool>,
    close_behaviour: RefCell<Option<Rc<dyn CloseBehaviour>>>,
    destroyed: Cell<bool>,
    this: Weak<PopupMenu>,
}

impl PopupMenu {
    pub(crate) fn new(
        id: MenuId,
        title: String,
        rows: usize,
        host: Rc<dyn InventoryHost>,
        exit_on_click_outside: bool,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            id,
            title,
            rows,
            host,
            items: RefCell::new(HashMap::new()),
            inventory: OnceCell::new(),
            exit_on_click_outside: Cell::new(exit_on_click_outside),
            close_behaviour: RefCell::new(None),
            destroyed: Cell::new(false),
            this: this.clone(),
        })
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of slots, always `rows × 9`.
    pub fn size(&self) -> usize {
        self.rows * MenuConfig::COLUMNS
    }

    /// The host inventory backing this menu, created on first access.
    ///
    /// Prefer the menu operations over editing the inventory directly; direct
    /// edits break the item mapping.
    pub fn inventory(&self) -> InventoryId {
        *self.inventory.get_or_init(|| {
            let inventory = self
                .host
                .create_inventory(self.this.clone(), self.size(), &self.title);
            debug!(
                target: "menu::menu",
                menu = %self.id,
                %inventory,
                size = self.size(),
                "created backing inventory"
            );
            inventory
        })
    }

    /// Adds `item` at `slot` (an index or a [`GridPosition`](crate::GridPosition)).
    ///
    /// Returns `Ok(false)` without touching anything if the slot already
    /// holds a stack.
    ///
    /// # Errors
    ///
    /// [`MenuError::SlotOutOfRange`] if `slot` is not inside the grid.
    pub fn add_item(&self, item: Rc<MenuItem>, slot: impl Into<SlotIndex>) -> Result<bool> {
        let slot = self.check_slot(slot.into())?;
        Ok(self.place(item, slot))
    }

    /// Removes the item at `slot`.
    ///
    /// Returns `Ok(false)` if the slot is empty.
    ///
    /// # Errors
    ///
    /// [`MenuError::SlotOutOfRange`] if `slot` is not inside the grid.
    pub fn remove_item(&self, slot: impl Into<SlotIndex>) -> Result<bool> {
        let slot = self.check_slot(slot.into())?;
        let inventory = self.inventory();
        if !self.is_occupied(inventory, slot) {
            return Ok(false);
        }

        self.host.clear_slot(inventory, slot);
        let removed = self.items.borrow_mut().remove(&slot);
        if let Some(item) = removed {
            item.detach(&self.this);
        }
        Ok(true)
    }

    /// The item mapped at `slot`, if any.
    pub fn item(&self, slot: impl Into<SlotIndex>) -> Option<Rc<MenuItem>> {
        self.items.borrow().get(&slot.into()).cloned()
    }

    /// All mapped items, ordered by slot.
    pub fn items(&self) -> Vec<(SlotIndex, Rc<MenuItem>)> {
        let mut items: Vec<_> = self
            .items
            .borrow()
            .iter()
            .map(|(slot, item)| (*slot, Rc::clone(item)))
            .collect();
        items.sort_by_key(|(slot, _)| *slot);
        items
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Shows the menu to `player`.
    ///
    /// Do not use this to move a player from one menu to another within a
    /// single tick; the host UI glitches. Use [`MenuApi::switch_menu`].
    ///
    /// # Errors
    ///
    /// [`MenuError::AlreadyViewing`] if `player` already has this menu open.
    pub fn open(&self, player: PlayerId) -> Result<()> {
        if self.is_viewing(player) {
            return Err(MenuError::AlreadyViewing {
                player,
                title: self.title.clone(),
            });
        }
        debug!(target: "menu::menu", menu = %self.id, %player, "opening");
        self.host.open_inventory(player, self.inventory());
        Ok(())
    }

    /// Closes the menu for `player` if they are viewing it.
    pub fn close(&self, player: PlayerId) {
        let inventory = self.inventory();
        let viewer = Viewer::Player(player);
        if !self.host.viewers(inventory).contains(&viewer) {
            trace!(target: "menu::menu", menu = %self.id, %player, "close skipped, not a viewer");
            return;
        }
        debug!(target: "menu::menu", menu = %self.id, %player, "closing");
        self.host.remove_viewer(inventory, viewer);
        self.host.close_inventory(viewer);
    }

    /// Moves `player` from this menu to `to`; see [`MenuApi::switch_menu`].
    pub fn switch_to(self: &Rc<Self>, api: &MenuApi, player: PlayerId, to: &Rc<PopupMenu>) {
        api.switch_menu(player, self, to);
    }

    /// Runs the action of the item at `slot` on behalf of `player`.
    ///
    /// Empty or out-of-range slots are ignored.
    pub fn select_item(self: &Rc<Self>, api: &MenuApi, player: PlayerId, slot: impl Into<SlotIndex>) {
        let slot = slot.into();
        // Release the map before running the action; actions may edit this menu.
        let item = self.items.borrow().get(&slot).cloned();
        match item {
            Some(item) => {
                debug!(target: "menu::menu", menu = %self.id, %player, %slot, item = item.text(), "selected");
                item.on_select(&SelectContext {
                    api,
                    menu: self,
                    player,
                    slot,
                });
            }
            None => trace!(target: "menu::menu", menu = %self.id, %player, %slot, "no item at slot"),
        }
    }

    /// Redraws the menu for every player currently viewing it.
    pub fn update(&self) {
        for viewer in self.viewers() {
            if let Viewer::Player(player) = viewer {
                self.host.update_inventory(player);
            }
        }
    }

    pub fn viewers(&self) -> Vec<Viewer> {
        self.host.viewers(self.inventory())
    }

    pub fn is_viewing(&self, player: PlayerId) -> bool {
        self.viewers().contains(&Viewer::Player(player))
    }

    pub fn exit_on_click_outside(&self) -> bool {
        self.exit_on_click_outside.get()
    }

    /// Sets whether a click outside the menu grid closes the menu.
    pub fn set_exit_on_click_outside(&self, exit: bool) {
        self.exit_on_click_outside.set(exit);
    }

    pub fn close_behaviour(&self) -> Option<Rc<dyn CloseBehaviour>> {
        self.close_behaviour.borrow().clone()
    }

    /// Sets what happens when a player closes the menu. Nothing by default.
    pub fn set_close_behaviour(&self, behaviour: impl CloseBehaviour + 'static) {
        *self.close_behaviour.borrow_mut() = Some(Rc::new(behaviour));
    }

    /// Closure form of [`set_close_behaviour`](Self::set_close_behaviour).
    pub fn on_close(&self, behaviour: impl Fn(&CloseContext<'_>) + 'static) {
        self.set_close_behaviour(behaviour);
    }

    pub fn clear_close_behaviour(&self) {
        self.close_behaviour.borrow_mut().take();
    }

    /// True once the menu went through [`MenuApi::destroy_menu`].
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub(crate) fn mark_destroyed(&self) {
        self.destroyed.set(true);
    }

    /// Copies this menu into a fresh inventory under `id`.
    ///
    /// Items are shared, not copied. Viewers of `self` are unaffected.
    pub(crate) fn duplicate(&self, id: MenuId) -> Rc<PopupMenu> {
        let copy = PopupMenu::new(
            id,
            self.title.clone(),
            self.rows,
            Rc::clone(&self.host),
            self.exit_on_click_outside(),
        );
        *copy.close_behaviour.borrow_mut() = self.close_behaviour();
        for (slot, item) in self.items() {
            copy.place(item, slot);
        }
        copy
    }

    fn place(&self, item: Rc<MenuItem>, slot: SlotIndex) -> bool {
        let inventory = self.inventory();
        if self.is_occupied(inventory, slot) {
            trace!(target: "menu::menu", menu = %self.id, %slot, "slot occupied");
            return false;
        }

        self.host.set_item(inventory, slot, item.to_stack());
        item.attach(&self.this);
        self.items.borrow_mut().insert(slot, item);
        true
    }

    fn is_occupied(&self, inventory: InventoryId, slot: SlotIndex) -> bool {
        self.host
            .item(inventory, slot)
            .is_some_and(|stack| !stack.is_empty())
    }

    fn check_slot(&self, slot: SlotIndex) -> Result<SlotIndex> {
        if slot.get() < self.size() {
            Ok(slot)
        } else {
            Err(MenuError::SlotOutOfRange {
                slot,
                size: self.size(),
            })
        }
    }
}

impl fmt::Debug for PopupMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupMenu")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("rows", &self.rows)
            .field("items", &self.items.borrow().len())
            .field("inventory", &self.inventory.get())
            .field("exit_on_click_outside", &self.exit_on_click_outside.get())
            .field("destroyed", &self.destroyed.get())
            .finish_non_exhaustive()
    }
}
