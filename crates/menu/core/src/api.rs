//! Menu lifecycle entry points.
//!
//! [`MenuApi`] is the explicit context that replaces a process-wide plugin
//! singleton: it is built once at startup from the host services, cloned into
//! whatever needs to create or switch menus, and dropped at shutdown.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::MenuConfig;
use crate::error::{MenuError, Result};
use crate::host::{InventoryHost, TickScheduler};
use crate::menu::PopupMenu;
use crate::slot::{MenuId, PlayerId, Viewer};

/// Factory and lifecycle façade for pop-up menus.
///
/// Cheap to clone; clones share the same host services and id sequence.
#[derive(Clone)]
pub struct MenuApi {
    inner: Rc<ApiInner>,
}

struct ApiInner {
    host: Rc<dyn InventoryHost>,
    scheduler: Rc<dyn TickScheduler>,
    config: MenuConfig,
    next_id: Cell<u64>,
}

impl MenuApi {
    pub fn new(
        host: Rc<dyn InventoryHost>,
        scheduler: Rc<dyn TickScheduler>,
        config: MenuConfig,
    ) -> Self {
        Self {
            inner: Rc::new(ApiInner {
                host,
                scheduler,
                config,
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.inner.config
    }

    pub fn host(&self) -> &Rc<dyn InventoryHost> {
        &self.inner.host
    }

    /// Creates an empty menu with `rows` rows of 9 slots.
    ///
    /// # Errors
    ///
    /// [`MenuError::InvalidRows`] unless `1 <= rows <= MenuConfig::MAX_ROWS`.
    pub fn create_menu(&self, title: impl Into<String>, rows: usize) -> Result<Rc<PopupMenu>> {
        if !MenuConfig::is_valid_rows(rows) {
            return Err(MenuError::InvalidRows {
                rows,
                max: MenuConfig::MAX_ROWS,
            });
        }

        let menu = PopupMenu::new(
            self.next_id(),
            title.into(),
            rows,
            Rc::clone(&self.inner.host),
            self.inner.config.exit_on_click_outside,
        );
        debug!(target: "menu::api", menu = %menu.id(), title = menu.title(), rows, "created menu");
        Ok(menu)
    }

    /// Creates an independent copy of `menu`.
    ///
    /// Intended for per-player dynamic menus: the copy has its own inventory,
    /// so editing it never affects viewers of the original. Items are shared.
    /// Destroy copies that are no longer needed.
    pub fn clone_menu(&self, menu: &PopupMenu) -> Rc<PopupMenu> {
        let copy = menu.duplicate(self.next_id());
        debug!(target: "menu::api", source = %menu.id(), menu = %copy.id(), "cloned menu");
        copy
    }

    /// Closes `menu` for every viewer and marks it destroyed.
    ///
    /// Callers must drop their references afterwards; a destroyed menu keeps
    /// working but pending switches to it are abandoned.
    pub fn destroy_menu(&self, menu: &PopupMenu) {
        menu.mark_destroyed();
        let viewers = menu.viewers();
        debug!(target: "menu::api", menu = %menu.id(), viewers = viewers.len(), "destroying menu");

        for viewer in viewers {
            match viewer {
                Viewer::Player(player) => menu.close(player),
                other => self.inner.host.close_inventory(other),
            }
        }
    }

    /// Moves `player` from `from` to `to`.
    ///
    /// Closing one inventory and opening another in the same tick corrupts the
    /// host UI, so `from` closes now and `to` opens on the next tick. The
    /// pending open is dropped if either menu is destroyed first.
    pub fn switch_menu(&self, player: PlayerId, from: &Rc<PopupMenu>, to: &Rc<PopupMenu>) {
        from.close(player);

        let from_ref = Rc::downgrade(from);
        let to_ref = Rc::downgrade(to);
        debug!(target: "menu::api", %player, from = %from.id(), to = %to.id(), "switch scheduled");

        self.inner.scheduler.run_next_tick(Box::new(move || {
            let Some(to) = to_ref.upgrade() else {
                debug!(target: "menu::api", %player, "switch abandoned, target menu dropped");
                return;
            };
            let from_destroyed = from_ref.upgrade().is_some_and(|from| from.is_destroyed());
            if to.is_destroyed() || from_destroyed {
                debug!(target: "menu::api", %player, to = %to.id(), "switch abandoned, menu destroyed");
                return;
            }
            if let Err(err) = to.open(player) {
                warn!(
                    target: "menu::api",
                    %player,
                    to = %to.id(),
                    error = %err,
                    code = err.error_code(),
                    "switch could not open target menu"
                );
            }
        }));
    }

    fn next_id(&self) -> MenuId {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        MenuId(id)
    }
}

impl fmt::Debug for MenuApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuApi")
            .field("config", &self.inner.config)
            .field("menus_created", &self.inner.next_id.get())
            .finish_non_exhaustive()
    }
}
