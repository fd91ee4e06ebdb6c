/// Menu configuration constants and tunable defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MenuConfig {
    /// Initial value of [`PopupMenu::exit_on_click_outside`](crate::PopupMenu::exit_on_click_outside)
    /// for menus created through [`MenuApi`](crate::MenuApi).
    pub exit_on_click_outside: bool,

    /// What happens when a viewer clicks their own inventory while a menu is open
    /// and the menu exits on outside clicks.
    pub own_inventory_click: OwnInventoryClick,
}

impl MenuConfig {
    // ===== compile-time constants =====
    /// Slots per row of every host grid.
    pub const COLUMNS: usize = 9;
    /// Largest grid the host can display.
    pub const MAX_ROWS: usize = 6;
    pub const MAX_SLOTS: usize = Self::COLUMNS * Self::MAX_ROWS;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_EXIT_ON_CLICK_OUTSIDE: bool = true;

    pub fn new() -> Self {
        Self {
            exit_on_click_outside: Self::DEFAULT_EXIT_ON_CLICK_OUTSIDE,
            own_inventory_click: OwnInventoryClick::default(),
        }
    }

    #[must_use]
    pub fn with_exit_on_click_outside(mut self, exit: bool) -> Self {
        self.exit_on_click_outside = exit;
        self
    }

    #[must_use]
    pub fn with_own_inventory_click(mut self, policy: OwnInventoryClick) -> Self {
        self.own_inventory_click = policy;
        self
    }

    /// Returns true if a menu with this many rows can be displayed.
    pub const fn is_valid_rows(rows: usize) -> bool {
        rows >= 1 && rows <= Self::MAX_ROWS
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Policy for a click that lands in the viewer's own inventory below the menu grid.
///
/// Only consulted when the menu exits on outside clicks; otherwise such clicks
/// are swallowed.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OwnInventoryClick {
    /// Close the menu and leave the player with no UI open.
    #[default]
    CloseMenu,
    /// Close the menu, then show the player's own inventory.
    CloseAndShowInventory,
}
