//! Serializable menu layouts.
//!
//! ```ron
//! (
//!     menus: [
//!         (
//!             name: "shop",
//!             title: "Shop",
//!             rows: 3,
//!             items: [
//!                 (
//!                     at: Grid(x: 4, y: 1),
//!                     text: "Emerald",
//!                     icon: (material: "emerald"),
//!                     descriptions: ["Costs 5 gold"],
//!                     action: Some("switch:confirm"),
//!                 ),
//!             ],
//!         ),
//!     ],
//! )
//! ```

use menu_core::{GridPosition, Icon, SlotIndex};
use serde::{Deserialize, Serialize};

/// Where an item sits in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutPosition {
    /// Row-major slot number.
    Slot(usize),
    /// Column `x`, row `y`.
    Grid { x: usize, y: usize },
}

impl From<LayoutPosition> for SlotIndex {
    fn from(position: LayoutPosition) -> Self {
        match position {
            LayoutPosition::Slot(slot) => SlotIndex(slot),
            LayoutPosition::Grid { x, y } => GridPosition::new(x, y).into(),
        }
    }
}

/// One item of a [`MenuLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLayout {
    pub at: LayoutPosition,
    pub text: String,
    #[serde(default)]
    pub icon: Icon,
    #[serde(default = "default_count")]
    pub count: u8,
    #[serde(default)]
    pub descriptions: Vec<String>,
    /// Action name; `None` makes a decorative item.
    ///
    /// Besides names registered in an [`ActionRegistry`](crate::ActionRegistry),
    /// `"close"` closes the menu and `"switch:<menu>"` switches to another
    /// layout's menu.
    #[serde(default)]
    pub action: Option<String>,
}

fn default_count() -> u8 {
    1
}

/// A menu described as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLayout {
    /// Key other layouts use to refer to this menu.
    pub name: String,
    pub title: String,
    pub rows: usize,
    /// Overrides the configured default when set.
    #[serde(default)]
    pub exit_on_click_outside: Option<bool>,
    #[serde(default)]
    pub items: Vec<ItemLayout>,
}

/// Layout catalog structure for RON files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCatalog {
    pub menus: Vec<MenuLayout>,
}
