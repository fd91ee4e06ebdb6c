//! Routes raw host UI events to the menus that own them.
//!
//! The router is stateless. It finds the menu through the clicked inventory's
//! holder, then hands the event to [`PopupMenu`] operations.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::api::MenuApi;
use crate::config::OwnInventoryClick;
use crate::host::{ClickEvent, CloseEvent, EventBus, EventPriority, SlotType};
use crate::menu::{CloseContext, PopupMenu};
use crate::slot::{PlayerId, Viewer};

/// Bridges host click/close events to menus.
#[derive(Debug, Clone)]
pub struct EventRouter {
    api: MenuApi,
}

impl EventRouter {
    /// Clicks are handled before any other observer can act on them.
    pub const CLICK_PRIORITY: EventPriority = EventPriority::Lowest;
    /// Closes are handled after every other observer had a chance to cancel them.
    pub const CLOSE_PRIORITY: EventPriority = EventPriority::Monitor;

    pub fn new(api: MenuApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &MenuApi {
        &self.api
    }

    /// Subscribes the router to `bus`.
    ///
    /// The bus only keeps weak references; once the last `Rc` to the router
    /// is dropped its handlers do nothing.
    pub fn register(self: &Rc<Self>, bus: &dyn EventBus) {
        let router = Rc::downgrade(self);
        bus.register_click(
            Self::CLICK_PRIORITY,
            false,
            Box::new(move |event: &mut ClickEvent| {
                if let Some(router) = router.upgrade() {
                    router.on_click(event);
                }
            }),
        );
        let router = Rc::downgrade(self);
        bus.register_close(
            Self::CLOSE_PRIORITY,
            true,
            Box::new(move |event: &mut CloseEvent| {
                if let Some(router) = router.upgrade() {
                    router.on_close(event);
                }
            }),
        );
    }

    /// Handles a raw click.
    ///
    /// Clicks on non-menu inventories pass through untouched. Clicks on menus
    /// are always cancelled so the host never moves menu stacks around, even
    /// when the clicker is not a player.
    pub fn on_click(&self, event: &mut ClickEvent) {
        let Some(menu) = self.api.host().holder(event.inventory) else {
            return;
        };

        match event.who_clicked {
            Viewer::Player(player) => self.route_click(&menu, player, event),
            other => trace!(target: "menu::router", menu = %menu.id(), viewer = %other, "click by non-player"),
        }

        event.cancelled = true;
    }

    /// Handles a raw close by running the menu's close behaviour.
    pub fn on_close(&self, event: &mut CloseEvent) {
        if event.cancelled {
            return;
        }
        let Viewer::Player(player) = event.viewer else {
            return;
        };
        let Some(menu) = self.api.host().holder(event.inventory) else {
            return;
        };

        if let Some(behaviour) = menu.close_behaviour() {
            debug!(target: "menu::router", menu = %menu.id(), %player, "running close behaviour");
            behaviour.on_close(&CloseContext {
                api: &self.api,
                menu: &menu,
                player,
            });
        }
    }

    fn route_click(&self, menu: &Rc<PopupMenu>, player: PlayerId, event: &ClickEvent) {
        let raw_slot = event
            .raw_slot
            .filter(|_| event.slot_type != SlotType::Outside);

        match raw_slot {
            None => {
                if menu.exit_on_click_outside() {
                    debug!(target: "menu::router", menu = %menu.id(), %player, "outside click, closing");
                    menu.close(player);
                }
            }
            Some(slot) if slot < menu.size() => menu.select_item(&self.api, player, slot),
            Some(slot) => {
                // Players have no business editing their own inventory behind a menu.
                if menu.exit_on_click_outside() {
                    debug!(target: "menu::router", menu = %menu.id(), %player, slot, "own inventory click, closing");
                    menu.close(player);
                    if self.api.config().own_inventory_click == OwnInventoryClick::CloseAndShowInventory {
                        self.api.host().open_player_inventory(player);
                    }
                }
            }
        }
    }
}
