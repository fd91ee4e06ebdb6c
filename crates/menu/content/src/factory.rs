//! Menu factory for building live menus from layouts.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::{Rc, Weak};

use menu_core::{MenuApi, MenuItem, PopupMenu, SelectAction, SelectContext, SlotIndex};
use tracing::{debug, warn};

use crate::actions::ActionRegistry;
use crate::layout::{ItemLayout, MenuLayout};
use crate::loaders::LoadResult;

const CLOSE_ACTION: &str = "close";
const SWITCH_PREFIX: &str = "switch:";

type Directory = Rc<RefCell<HashMap<String, Weak<PopupMenu>>>>;

/// Builds menus from [`MenuLayout`]s.
///
/// Menus built by one factory can switch to each other by layout name. The
/// factory only keeps weak references; callers own the returned menus.
pub struct MenuFactory {
    api: MenuApi,
    actions: ActionRegistry,
    directory: Directory,
}

impl MenuFactory {
    pub fn new(api: MenuApi, actions: ActionRegistry) -> Self {
        Self {
            api,
            actions,
            directory: Rc::default(),
        }
    }

    /// Builds one menu and registers it under the layout's name.
    ///
    /// Unknown action names, slots outside the grid and two items on the same
    /// slot are load errors. `switch:` targets are looked up when the item is
    /// clicked.
    pub fn build(&self, layout: &MenuLayout) -> LoadResult<Rc<PopupMenu>> {
        let menu = self
            .api
            .create_menu(layout.title.clone(), layout.rows)
            .map_err(|e| anyhow::anyhow!("Failed to create menu `{}`: {}", layout.name, e))?;
        if let Some(exit) = layout.exit_on_click_outside {
            menu.set_exit_on_click_outside(exit);
        }

        for item in &layout.items {
            let action = self.resolve(&layout.name, item)?;
            let menu_item = MenuItem::from_shared(item.text.clone(), action)
                .with_icon(item.icon.clone())
                .with_count(item.count)
                .with_descriptions(item.descriptions.iter().cloned());

            let slot = SlotIndex::from(item.at);
            let added = menu
                .add_item(Rc::new(menu_item), slot)
                .map_err(|e| anyhow::anyhow!("Menu `{}`, item `{}`: {}", layout.name, item.text, e))?;
            if !added {
                anyhow::bail!(
                    "Menu `{}`, item `{}`: slot {} is already occupied",
                    layout.name,
                    item.text,
                    slot
                );
            }
        }

        self.directory
            .borrow_mut()
            .insert(layout.name.clone(), Rc::downgrade(&menu));
        debug!(
            target: "menu::content",
            name = %layout.name,
            menu = %menu.id(),
            items = menu.len(),
            "menu built"
        );
        Ok(menu)
    }

    /// Builds every layout, keyed by name.
    ///
    /// Every `switch:` target must name one of `layouts` or a menu this
    /// factory built earlier.
    pub fn build_all(&self, layouts: &[MenuLayout]) -> LoadResult<BTreeMap<String, Rc<PopupMenu>>> {
        let known: HashSet<&str> = layouts.iter().map(|layout| layout.name.as_str()).collect();
        for layout in layouts {
            for item in &layout.items {
                let Some(target) = item.action.as_deref().and_then(|a| a.strip_prefix(SWITCH_PREFIX))
                else {
                    continue;
                };
                if !known.contains(target) && self.menu(target).is_none() {
                    anyhow::bail!(
                        "Menu `{}`, item `{}`: unknown switch target `{}`",
                        layout.name,
                        item.text,
                        target
                    );
                }
            }
        }

        let mut menus = BTreeMap::new();
        for layout in layouts {
            menus.insert(layout.name.clone(), self.build(layout)?);
        }
        Ok(menus)
    }

    /// Live menu built from the layout called `name`.
    pub fn menu(&self, name: &str) -> Option<Rc<PopupMenu>> {
        self.directory.borrow().get(name).and_then(Weak::upgrade)
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    fn resolve(&self, menu: &str, item: &ItemLayout) -> LoadResult<Rc<dyn SelectAction>> {
        let Some(name) = item.action.as_deref() else {
            return Ok(Rc::new(Decorative));
        };
        if name == CLOSE_ACTION {
            return Ok(Rc::new(CloseMenu));
        }
        if let Some(target) = name.strip_prefix(SWITCH_PREFIX) {
            return Ok(Rc::new(SwitchTo {
                target: target.to_string(),
                directory: Rc::clone(&self.directory),
            }));
        }

        self.actions.get(name).ok_or_else(|| {
            anyhow::anyhow!("Menu `{}`, item `{}`: unknown action `{}`", menu, item.text, name)
        })
    }
}

struct Decorative;

impl SelectAction for Decorative {
    fn on_select(&self, _ctx: &SelectContext<'_>) {}
}

struct CloseMenu;

impl SelectAction for CloseMenu {
    fn on_select(&self, ctx: &SelectContext<'_>) {
        ctx.menu.close(ctx.player);
    }
}

struct SwitchTo {
    target: String,
    directory: Directory,
}

impl SelectAction for SwitchTo {
    fn on_select(&self, ctx: &SelectContext<'_>) {
        let target = self.directory.borrow().get(&self.target).and_then(Weak::upgrade);
        match target {
            Some(target) => ctx.api.switch_menu(ctx.player, ctx.menu, &target),
            None => warn!(
                target: "menu::content",
                player = %ctx.player,
                to = %self.target,
                "switch target is gone"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use menu_core::{InventoryHost, Material, PlayerId};
    use menu_runtime::Runtime;

    use super::*;
    use crate::loaders::LayoutLoader;

    const LAYOUTS: &str = r#"(menus: [
        (
            name: "shop",
            title: "Shop",
            rows: 2,
            items: [
                (at: Slot(0), text: "Bread", action: Some("buy")),
                (at: Grid(x: 8, y: 1), text: "Checkout", icon: (material: "emerald"), action: Some("switch:confirm")),
                (at: Slot(4), text: "Sign", descriptions: ["Welcome"]),
            ],
        ),
        (
            name: "confirm",
            title: "Confirm",
            rows: 1,
            exit_on_click_outside: Some(false),
            items: [
                (at: Slot(8), text: "Cancel", icon: (material: "barrier"), action: Some("close")),
            ],
        ),
    ])"#;

    fn factory(runtime: &Runtime, bought: &Rc<Cell<u32>>) -> MenuFactory {
        let mut actions = ActionRegistry::new();
        let counter = Rc::clone(bought);
        actions.register_fn("buy", move |_| counter.set(counter.get() + 1));
        MenuFactory::new(runtime.api().clone(), actions)
    }

    #[test]
    fn test_build_all_places_items() {
        let runtime = Runtime::new();
        let bought = Rc::new(Cell::new(0));
        let factory = factory(&runtime, &bought);
        let layouts = LayoutLoader::from_str(LAYOUTS).unwrap();

        let menus = factory.build_all(&layouts).unwrap();

        let shop = &menus["shop"];
        assert_eq!(shop.size(), 18);
        assert_eq!(shop.len(), 3);
        assert!(shop.exit_on_click_outside());
        let checkout = shop.item(SlotIndex(17)).unwrap();
        assert_eq!(checkout.icon().material, Material::new("emerald"));
        let sign = runtime.host().item(shop.inventory(), SlotIndex(4)).unwrap();
        assert_eq!(sign.lore, vec!["Welcome".to_string()]);

        let confirm = &menus["confirm"];
        assert!(!confirm.exit_on_click_outside());
        assert!(Rc::ptr_eq(&factory.menu("confirm").unwrap(), confirm));
    }

    #[test]
    fn test_built_actions_run() {
        let runtime = Runtime::new();
        let bought = Rc::new(Cell::new(0));
        let factory = factory(&runtime, &bought);
        let menus = factory
            .build_all(&LayoutLoader::from_str(LAYOUTS).unwrap())
            .unwrap();
        let (shop, confirm) = (&menus["shop"], &menus["confirm"]);
        let player = PlayerId(1);
        shop.open(player).unwrap();

        runtime.click(player, 0);
        runtime.click(player, 4);
        assert_eq!(bought.get(), 1);
        assert!(shop.is_viewing(player));

        runtime.click(player, 17);
        runtime.tick();
        assert!(confirm.is_viewing(player));

        runtime.click(player, 8);
        assert!(!confirm.is_viewing(player));
    }

    #[test]
    fn test_unknown_action_rejected() {
        let runtime = Runtime::new();
        let factory = MenuFactory::new(runtime.api().clone(), ActionRegistry::new());
        let layouts = LayoutLoader::from_str(
            r#"(menus: [(name: "a", title: "A", rows: 1, items: [(at: Slot(0), text: "X", action: Some("steal"))])])"#,
        )
        .unwrap();

        let err = factory.build_all(&layouts).unwrap_err();
        assert!(err.to_string().contains("unknown action `steal`"));
    }

    #[test]
    fn test_unknown_switch_target_rejected() {
        let runtime = Runtime::new();
        let factory = MenuFactory::new(runtime.api().clone(), ActionRegistry::new());
        let layouts = LayoutLoader::from_str(
            r#"(menus: [(name: "a", title: "A", rows: 1, items: [(at: Slot(0), text: "X", action: Some("switch:b"))])])"#,
        )
        .unwrap();

        let err = factory.build_all(&layouts).unwrap_err();
        assert!(err.to_string().contains("unknown switch target `b`"));
        assert!(factory.menu("a").is_none());
    }

    #[test]
    fn test_occupied_slot_rejected() {
        let runtime = Runtime::new();
        let factory = MenuFactory::new(runtime.api().clone(), ActionRegistry::new());
        let layouts = LayoutLoader::from_str(
            r#"(menus: [(name: "a", title: "A", rows: 1, items: [
                (at: Slot(3), text: "X"),
                (at: Grid(x: 3, y: 0), text: "Y"),
            ])])"#,
        )
        .unwrap();

        let err = factory.build(&layouts[0]).unwrap_err();
        assert!(err.to_string().contains("slot 3 is already occupied"));
    }

    #[test]
    fn test_out_of_grid_slot_rejected() {
        let runtime = Runtime::new();
        let factory = MenuFactory::new(runtime.api().clone(), ActionRegistry::new());
        let layouts = LayoutLoader::from_str(
            r#"(menus: [(name: "a", title: "A", rows: 1, items: [(at: Grid(x: 0, y: 1), text: "X")])])"#,
        )
        .unwrap();

        assert!(factory.build(&layouts[0]).is_err());
    }

    #[test]
    fn test_bad_rows_rejected() {
        let runtime = Runtime::new();
        let factory = MenuFactory::new(runtime.api().clone(), ActionRegistry::new());
        let layouts =
            LayoutLoader::from_str(r#"(menus: [(name: "huge", title: "Huge", rows: 7)])"#).unwrap();

        let err = factory.build(&layouts[0]).unwrap_err();
        assert!(err.to_string().contains("Failed to create menu `huge`"));
    }
}
