//! Slot addressing and host identifiers.

use core::fmt;

use crate::config::MenuConfig;

/// Row-major position of a slot in a host grid, 9 slots per row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotIndex(pub usize);

impl SlotIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Slot at column `x`, row `y`.
    pub const fn at(x: usize, y: usize) -> Self {
        Self(y * MenuConfig::COLUMNS + x)
    }

    pub const fn get(self) -> usize {
        self.0
    }

    pub const fn position(self) -> GridPosition {
        GridPosition {
            x: self.0 % MenuConfig::COLUMNS,
            y: self.0 / MenuConfig::COLUMNS,
        }
    }
}

impl From<usize> for SlotIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<GridPosition> for SlotIndex {
    fn from(position: GridPosition) -> Self {
        Self::at(position.x, position.y)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column/row coordinates, both starting from 0 at the top left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    pub x: usize,
    pub y: usize,
}

impl GridPosition {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Host identifier of a connected player session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Host identifier of a non-player entity that can hold an inventory view open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Opaque handle to an inventory owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InventoryId(pub u64);

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inventory#{}", self.0)
    }
}

/// Process-unique id handed out by [`MenuApi`](crate::MenuApi); used in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(pub u64);

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu#{}", self.0)
    }
}

/// Anything the host reports as looking at an inventory.
///
/// Only players get menu behaviour; other viewer kinds are closed generically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Viewer {
    Player(PlayerId),
    Entity(EntityId),
}

impl Viewer {
    pub const fn player(self) -> Option<PlayerId> {
        match self {
            Viewer::Player(player) => Some(player),
            Viewer::Entity(_) => None,
        }
    }
}

impl From<PlayerId> for Viewer {
    fn from(player: PlayerId) -> Self {
        Viewer::Player(player)
    }
}

impl fmt::Display for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Viewer::Player(player) => player.fmt(f),
            Viewer::Entity(entity) => entity.fmt(f),
        }
    }
}
