//! Host inventory operations used by menus.

use std::rc::{Rc, Weak};

use crate::menu::PopupMenu;
use crate::slot::{InventoryId, PlayerId, SlotIndex, Viewer};
use crate::stack::ItemStack;

/// Inventory-UI primitive provided by the host.
///
/// The host owns inventories and the viewer relation; menus only hold an
/// [`InventoryId`] and query viewers when they need them.
pub trait InventoryHost {
    /// Creates an inventory of `size` slots whose holder is `holder`.
    ///
    /// The holder reference is how raw UI events find their way back to the
    /// menu, see [`holder`](Self::holder).
    fn create_inventory(&self, holder: Weak<PopupMenu>, size: usize, title: &str) -> InventoryId;

    /// Returns the menu backing `inventory`, or `None` for any other inventory
    /// (chests, player inventories, dropped menus).
    fn holder(&self, inventory: InventoryId) -> Option<Rc<PopupMenu>>;

    /// Returns the stack at `slot`; `None` or an empty stack both mean "free".
    fn item(&self, inventory: InventoryId, slot: SlotIndex) -> Option<ItemStack>;

    fn set_item(&self, inventory: InventoryId, slot: SlotIndex, stack: ItemStack);

    fn clear_slot(&self, inventory: InventoryId, slot: SlotIndex);

    /// Everyone currently looking at `inventory`.
    fn viewers(&self, inventory: InventoryId) -> Vec<Viewer>;

    /// Drops `viewer` from the viewer list without touching their UI.
    fn remove_viewer(&self, inventory: InventoryId, viewer: Viewer);

    /// Shows `inventory` to `player`.
    fn open_inventory(&self, player: PlayerId, inventory: InventoryId);

    /// Shows the player's own inventory screen.
    fn open_player_inventory(&self, player: PlayerId);

    /// Closes whatever UI `viewer` has open. The host raises a close event for it.
    fn close_inventory(&self, viewer: Viewer);

    /// Re-sends the open view's contents to `player`.
    fn update_inventory(&self, player: PlayerId);
}
