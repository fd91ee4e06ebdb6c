//! Scripted menu session against the in-memory host.
//!
//! Set `MENU_CONFIG` to a TOML file to override the menu configuration and
//! `MENU_LAYOUTS` to a RON file to replace the built-in layouts. Set
//! `RUST_LOG=debug` to follow routing decisions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use menu_content::{ActionRegistry, ConfigLoader, LayoutLoader, MenuFactory, MenuLayout};
use menu_core::{MenuConfig, PlayerId};
use menu_runtime::Runtime;
use tracing::info;

const DEMO_LAYOUTS: &str = include_str!("../menus/demo.ron");

type Baskets = Rc<RefCell<HashMap<PlayerId, Vec<String>>>>;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    let layouts = load_layouts()?;
    let runtime = Runtime::builder().config(config).build();

    let baskets = Baskets::default();
    let factory = MenuFactory::new(runtime.api().clone(), actions(&baskets));
    let menus = factory.build_all(&layouts)?;
    let shop = menus.get("shop").context("layouts define no `shop` menu")?;
    let confirm = menus.get("confirm").context("layouts define no `confirm` menu")?;

    let dismissed = Rc::clone(&baskets);
    confirm.on_close(move |ctx| {
        let items = dismissed.borrow().get(&ctx.player).map_or(0, Vec::len);
        info!(player = %ctx.player, items, "confirmation closed");
    });

    let alice = PlayerId(1);
    let bob = PlayerId(2);

    info!(%alice, "opens the shop");
    shop.open(alice)?;
    runtime.click(alice, 10);
    runtime.click(alice, 12);
    runtime.click(alice, 16);
    info!(tick = runtime.current_tick(), pending = runtime.scheduler().pending(), "switch queued");
    runtime.tick();
    info!(%alice, viewing_confirm = confirm.is_viewing(alice), "after tick");

    runtime.click_outside(alice);
    runtime.click(alice, 2);

    info!(%bob, "opens a seasonal copy of the shop");
    let seasonal = runtime.api().clone_menu(shop);
    seasonal.open(bob)?;
    runtime.click(bob, 10);
    runtime.click_outside(bob);
    info!(%bob, still_viewing = seasonal.is_viewing(bob), "clicked outside");

    runtime.tick();
    shop.open(bob)?;
    runtime.api().destroy_menu(&seasonal);
    runtime.api().destroy_menu(shop);
    runtime.tick();

    info!(
        closes = runtime.host().close_requests().len(),
        glitches = runtime.host().glitches().len(),
        "session finished"
    );
    Ok(())
}

fn actions(baskets: &Baskets) -> ActionRegistry {
    let mut actions = ActionRegistry::new();

    let basket = Rc::clone(baskets);
    actions.register_fn("buy", move |ctx| {
        let Some(item) = ctx.menu.item(ctx.slot) else {
            return;
        };
        info!(player = %ctx.player, item = item.text(), "added to basket");
        basket
            .borrow_mut()
            .entry(ctx.player)
            .or_default()
            .push(item.text().to_string());
    });

    let basket = Rc::clone(baskets);
    actions.register_fn("pay", move |ctx| {
        let items = basket.borrow_mut().remove(&ctx.player).unwrap_or_default();
        info!(player = %ctx.player, ?items, "paid");
        ctx.menu.close(ctx.player);
    });

    actions
}

fn load_config() -> Result<MenuConfig> {
    match std::env::var_os("MENU_CONFIG") {
        Some(path) => ConfigLoader::load(&PathBuf::from(path)),
        None => Ok(MenuConfig::default()),
    }
}

fn load_layouts() -> Result<Vec<MenuLayout>> {
    match std::env::var_os("MENU_LAYOUTS") {
        Some(path) => LayoutLoader::load(&PathBuf::from(path)),
        None => LayoutLoader::from_str(DEMO_LAYOUTS),
    }
}
