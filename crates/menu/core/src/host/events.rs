//! Raw UI events raised by the host and the bus they arrive on.

use crate::slot::{InventoryId, Viewer};

/// Dispatch order among competing observers of the same event.
///
/// Observers run from `Lowest` to `Monitor`. `Monitor` observers see the final
/// outcome and are expected not to change it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum EventPriority {
    Lowest,
    Low,
    #[default]
    Normal,
    High,
    Highest,
    Monitor,
}

/// Host classification of the clicked slot.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum SlotType {
    /// A slot of the open container (or the viewer's storage below it).
    #[default]
    Container,
    /// The viewer's hotbar.
    Quickbar,
    Armor,
    Crafting,
    Result,
    Fuel,
    /// Outside the window entirely.
    Outside,
}

/// Events whose default host handling can be suppressed.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;
    fn set_cancelled(&mut self, cancelled: bool);
}

/// A viewer clicked somewhere while an inventory view was open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    /// Top inventory of the view that was clicked.
    pub inventory: InventoryId,
    pub who_clicked: Viewer,
    pub slot_type: SlotType,
    /// Raw view slot: indices below the top inventory's size belong to it, the
    /// rest to the viewer's own inventory. `None` for clicks outside the window.
    pub raw_slot: Option<usize>,
    pub cancelled: bool,
}

impl ClickEvent {
    pub fn new(inventory: InventoryId, who_clicked: Viewer, slot_type: SlotType, raw_slot: usize) -> Self {
        Self {
            inventory,
            who_clicked,
            slot_type,
            raw_slot: Some(raw_slot),
            cancelled: false,
        }
    }

    pub fn outside(inventory: InventoryId, who_clicked: Viewer) -> Self {
        Self {
            inventory,
            who_clicked,
            slot_type: SlotType::Outside,
            raw_slot: None,
            cancelled: false,
        }
    }
}

impl Cancellable for ClickEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// A viewer's inventory view was closed, by them or by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseEvent {
    pub inventory: InventoryId,
    pub viewer: Viewer,
    pub cancelled: bool,
}

impl CloseEvent {
    pub fn new(inventory: InventoryId, viewer: Viewer) -> Self {
        Self {
            inventory,
            viewer,
            cancelled: false,
        }
    }
}

impl Cancellable for CloseEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

pub type ClickHandler = Box<dyn Fn(&mut ClickEvent)>;
pub type CloseHandler = Box<dyn Fn(&mut CloseEvent)>;

/// Host event bus.
///
/// Handlers with `ignore_cancelled` set are skipped for events an earlier
/// observer already cancelled.
pub trait EventBus {
    fn register_click(&self, priority: EventPriority, ignore_cancelled: bool, handler: ClickHandler);

    fn register_close(&self, priority: EventPriority, ignore_cancelled: bool, handler: CloseHandler);
}
