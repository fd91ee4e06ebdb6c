//! Menu items: a slot's look plus what happens when it is clicked.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::api::MenuApi;
use crate::menu::PopupMenu;
use crate::slot::{PlayerId, SlotIndex};
use crate::stack::{Icon, ItemStack};

/// Context handed to a [`SelectAction`] when its item is clicked.
///
/// Carries the [`MenuApi`] so actions can switch or destroy menus without any
/// global state.
pub struct SelectContext<'a> {
    pub api: &'a MenuApi,
    /// Menu the click happened in.
    pub menu: &'a Rc<PopupMenu>,
    pub player: PlayerId,
    pub slot: SlotIndex,
}

/// Behaviour of a menu item when a player selects it.
///
/// Each kind of item is its own implementation; plain closures work too.
pub trait SelectAction {
    fn on_select(&self, ctx: &SelectContext<'_>);
}

impl<F> SelectAction for F
where
    F: Fn(&SelectContext<'_>),
{
    fn on_select(&self, ctx: &SelectContext<'_>) {
        self(ctx)
    }
}

/// An item in a menu.
///
/// Items are shared by reference: the same item can sit in a menu and in all
/// of its clones. Description edits are visible the next time a menu renders
/// the item.
pub struct MenuItem {
    text: String,
    icon: Icon,
    count: u8,
    descriptions: RefCell<Vec<String>>,
    // Last menu the item was added to. Never owning.
    menu: RefCell<Weak<PopupMenu>>,
    action: Rc<dyn SelectAction>,
}

impl MenuItem {
    /// Creates an item with the given mouse-over title.
    ///
    /// The icon defaults to paper and no number is displayed.
    pub fn new(text: impl Into<String>, action: impl SelectAction + 'static) -> Self {
        Self::from_shared(text, Rc::new(action))
    }

    /// Closure form of [`new`](Self::new) that lets the compiler infer the
    /// closure's argument type.
    pub fn from_fn(text: impl Into<String>, action: impl Fn(&SelectContext<'_>) + 'static) -> Self {
        Self::from_shared(text, Rc::new(action))
    }

    /// Creates an item whose action is shared with other items.
    pub fn from_shared(text: impl Into<String>, action: Rc<dyn SelectAction>) -> Self {
        Self {
            text: text.into(),
            icon: Icon::default(),
            count: 1,
            descriptions: RefCell::new(Vec::new()),
            menu: RefCell::new(Weak::new()),
            action,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<Icon>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Sets the number displayed on the item. 1 displays no number; 0 is raised to 1.
    #[must_use]
    pub fn with_count(mut self, count: u8) -> Self {
        self.count = count.max(1);
        self
    }

    #[must_use]
    pub fn with_descriptions<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_descriptions(lines);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.descriptions.borrow().clone()
    }

    /// Replaces the description lines. Lines are not wrapped.
    pub fn set_descriptions<I, S>(&self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.descriptions.borrow_mut() = lines.into_iter().map(Into::into).collect();
    }

    /// Appends one description line. Lines are not wrapped.
    pub fn add_description(&self, line: impl Into<String>) {
        self.descriptions.borrow_mut().push(line.into());
    }

    /// The menu this item was last added to, if it is still attached and alive.
    pub fn menu(&self) -> Option<Rc<PopupMenu>> {
        self.menu.borrow().upgrade()
    }

    /// Runs the item's action.
    pub fn on_select(&self, ctx: &SelectContext<'_>) {
        self.action.on_select(ctx);
    }

    /// Projects the item's current fields into a stack the host can draw.
    pub fn to_stack(&self) -> ItemStack {
        ItemStack {
            icon: self.icon.clone(),
            amount: self.count,
            display_name: Some(self.text.clone()),
            lore: self.descriptions(),
        }
    }

    pub(crate) fn attach(&self, menu: &Weak<PopupMenu>) {
        *self.menu.borrow_mut() = menu.clone();
    }

    /// Clears the back-reference, but only if `menu` is the recorded owner.
    pub(crate) fn detach(&self, menu: &Weak<PopupMenu>) {
        let mut owner = self.menu.borrow_mut();
        if Weak::ptr_eq(&owner, menu) {
            *owner = Weak::new();
        }
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("text", &self.text)
            .field("icon", &self.icon)
            .field("count", &self.count)
            .field("descriptions", &self.descriptions.borrow())
            .field("attached", &(self.menu.borrow().strong_count() > 0))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Material;

    fn noop(_: &SelectContext<'_>) {}

    #[test]
    fn defaults_to_single_paper() {
        let item = MenuItem::new("Info", noop);
        assert_eq!(item.text(), "Info");
        assert_eq!(item.icon().material, Material::PAPER);
        assert_eq!(item.count(), 1);
        assert!(item.descriptions().is_empty());
        assert!(item.menu().is_none());
    }

    #[test]
    fn zero_count_is_raised_to_one() {
        let item = MenuItem::new("Info", noop).with_count(0);
        assert_eq!(item.count(), 1);
    }

    #[test]
    fn stack_reflects_latest_descriptions() {
        let item = MenuItem::new("Sword", noop)
            .with_icon(Material::new("iron_sword"))
            .with_count(3)
            .with_descriptions(["Sharp"]);

        let before = item.to_stack();
        assert_eq!(before.lore, vec!["Sharp".to_string()]);

        item.add_description("Heavy");
        let after = item.to_stack();
        assert_eq!(after.icon.material, Material::new("iron_sword"));
        assert_eq!(after.amount, 3);
        assert_eq!(after.display_name.as_deref(), Some("Sword"));
        assert_eq!(after.lore, vec!["Sharp".to_string(), "Heavy".to_string()]);
    }
}
