use std::rc::Rc;

use menu_core::{
    EntityId, GridPosition, InventoryHost, Material, MenuConfig, MenuError, MenuItem, PlayerId,
    SlotIndex, Viewer,
};
use menu_runtime::{OpenView, Runtime};

fn item(text: &str) -> Rc<MenuItem> {
    Rc::new(MenuItem::from_fn(text, |_| {}))
}

#[test]
fn slot_count_is_rows_times_nine() {
    let runtime = Runtime::new();

    for rows in 1..=MenuConfig::MAX_ROWS {
        let menu = runtime.api().create_menu("Menu", rows).expect("valid rows");
        assert_eq!(menu.size(), rows * 9);
        assert_eq!(
            runtime.host().inventory_size(menu.inventory()),
            Some(rows * 9)
        );
    }
}

#[test]
fn invalid_rows_are_rejected() {
    let runtime = Runtime::new();

    for rows in [0, MenuConfig::MAX_ROWS + 1] {
        let err = runtime.api().create_menu("Menu", rows).unwrap_err();
        assert_eq!(
            err,
            MenuError::InvalidRows {
                rows,
                max: MenuConfig::MAX_ROWS
            }
        );
    }
}

#[test]
fn inventory_is_created_lazily_once() {
    let runtime = Runtime::new();
    let menu = runtime.api().create_menu("Lazy", 1).unwrap();
    assert_eq!(runtime.host().inventory_count(), 0);

    let inventory = menu.inventory();
    assert_eq!(menu.inventory(), inventory);
    assert_eq!(runtime.host().inventory_count(), 1);
    assert_eq!(runtime.host().title(inventory).as_deref(), Some("Lazy"));

    let holder = runtime.host().holder(inventory).expect("menu holds its inventory");
    assert!(Rc::ptr_eq(&holder, &menu));
}

#[test]
fn added_item_is_mapped_and_rendered() {
    let runtime = Runtime::new();
    let menu = runtime.api().create_menu("Shop", 3).unwrap();
    let sword = Rc::new(
        MenuItem::from_fn("Sword", |_| {})
            .with_icon(Material::new("iron_sword"))
            .with_descriptions(["Sharp"]),
    );

    assert!(menu.add_item(Rc::clone(&sword), SlotIndex(4)).unwrap());

    let mapped = menu.item(SlotIndex(4)).expect("item mapped");
    assert!(Rc::ptr_eq(&mapped, &sword));
    let stack = runtime
        .host()
        .item(menu.inventory(), SlotIndex(4))
        .expect("slot exists");
    assert_eq!(stack, sword.to_stack());
    assert!(Rc::ptr_eq(&sword.menu().expect("attached"), &menu));
    assert_eq!(menu.len(), 1);
}

#[test]
fn occupied_slot_rejects_second_item() {
    let runtime = Runtime::new();
    let menu = runtime.api().create_menu("Shop", 1).unwrap();
    let first = item("First");
    let second = item("Second");

    assert!(menu.add_item(Rc::clone(&first), SlotIndex(0)).unwrap());
    assert!(!menu.add_item(Rc::clone(&second), SlotIndex(0)).unwrap());

    assert!(Rc::ptr_eq(&menu.item(SlotIndex(0)).unwrap(), &first));
    assert!(second.menu().is_none());
    let stack = runtime.host().item(menu.inventory(), SlotIndex(0)).unwrap();
    assert_eq!(stack.display_name.as_deref(), Some("First"));
}

#[test]
fn remove_frees_the_slot() {
    let runtime = Runtime::new();
    let menu = runtime.api().create_menu("Shop", 1).unwrap();
    let apple = item("Apple");

    assert!(!menu.remove_item(SlotIndex(3)).unwrap());

    assert!(menu.add_item(Rc::clone(&apple), SlotIndex(3)).unwrap());
    assert!(menu.remove_item(SlotIndex(3)).unwrap());
    assert!(menu.item(SlotIndex(3)).is_none());
    assert!(apple.menu().is_none());
    assert!(
        runtime
            .host()
            .item(menu.inventory(), SlotIndex(3))
            .is_some_and(|stack| stack.is_empty())
    );

    assert!(menu.add_item(apple, SlotIndex(3)).unwrap());
}

#[test]
fn mapping_and_host_slots_agree() {
    let runtime = Runtime::new();
    let menu = runtime.api().create_menu("Shop", 2).unwrap();

    for slot in [0, 4, 9, 17] {
        menu.add_item(item("Thing"), SlotIndex(slot)).unwrap();
    }
    menu.remove_item(SlotIndex(4)).unwrap();

    for slot in 0..menu.size() {
        let occupied = runtime
            .host()
            .item(menu.inventory(), SlotIndex(slot))
            .is_some_and(|stack| !stack.is_empty());
        assert_eq!(occupied, menu.item(SlotIndex(slot)).is_some(), "slot {slot}");
    }
}

#[test]
fn grid_positions_address_row_major_slots() {
    let runtime = Runtime::new();
    let menu = runtime.api().create_menu("Grid", 3).unwrap();
    let gem = item("Gem");

    assert!(menu.add_item(Rc::clone(&gem), GridPosition::new(2, 1)).unwrap());
    assert!(Rc::ptr_eq(&menu.item(SlotIndex(11)).unwrap(), &gem));
    assert!(menu.remove_item(GridPosition::new(2, 1)).unwrap());
    assert!(menu.is_empty());
}

#[test]
fn out_of_range_slots_are_usage_errors() {
    let runtime = Runtime::new();
    let menu = runtime.api().create_menu("Small", 1).unwrap();

    assert_eq!(
        menu.add_item(item("Far"), SlotIndex(9)).unwrap_err(),
        MenuError::SlotOutOfRange {
            slot: SlotIndex(9),
            size: 9
        }
    );
    assert_eq!(
        menu.remove_item(GridPosition::new(0, 1))
            .unwrap_err()
            .error_code(),
        "slot_out_of_range"
    );
}

#[test]
fn clone_shares_items_but_not_inventory() {
    let runtime = Runtime::new();
    let original = runtime.api().create_menu("Shop", 2).unwrap();
    original.add_item(item("A"), SlotIndex(0)).unwrap();
    original.add_item(item("B"), SlotIndex(5)).unwrap();
    original.set_exit_on_click_outside(false);

    let copy = runtime.api().clone_menu(&original);

    assert_ne!(copy.id(), original.id());
    assert_ne!(copy.inventory(), original.inventory());
    assert_eq!(copy.title(), original.title());
    assert_eq!(copy.rows(), original.rows());
    assert!(!copy.exit_on_click_outside());
    for (slot, source) in original.items() {
        let cloned = copy.item(slot).expect("slot copied");
        assert!(Rc::ptr_eq(&cloned, &source));
        assert!(
            runtime
                .host()
                .item(copy.inventory(), slot)
                .is_some_and(|stack| !stack.is_empty())
        );
    }

    assert!(copy.remove_item(SlotIndex(0)).unwrap());
    assert!(copy.add_item(item("C"), SlotIndex(1)).unwrap());

    assert!(original.item(SlotIndex(0)).is_some());
    assert!(original.item(SlotIndex(1)).is_none());
    assert!(
        runtime
            .host()
            .item(original.inventory(), SlotIndex(0))
            .is_some_and(|stack| !stack.is_empty())
    );
}

#[test]
fn clone_keeps_close_behaviour() {
    let runtime = Runtime::new();
    let original = runtime.api().create_menu("Quiz", 1).unwrap();
    original.on_close(|_| {});

    let copy = runtime.api().clone_menu(&original);
    assert!(copy.close_behaviour().is_some());
}

#[test]
fn item_back_reference_follows_latest_menu() {
    let runtime = Runtime::new();
    let original = runtime.api().create_menu("Shop", 1).unwrap();
    let shared = item("Shared");
    original.add_item(Rc::clone(&shared), SlotIndex(0)).unwrap();

    let copy = runtime.api().clone_menu(&original);
    assert!(Rc::ptr_eq(&shared.menu().unwrap(), &copy));

    // The original is no longer the recorded owner, so this leaves the link alone.
    assert!(original.remove_item(SlotIndex(0)).unwrap());
    assert!(Rc::ptr_eq(&shared.menu().unwrap(), &copy));

    assert!(copy.remove_item(SlotIndex(0)).unwrap());
    assert!(shared.menu().is_none());
}

#[test]
fn clone_leaves_viewers_of_the_original_alone() {
    let runtime = Runtime::new();
    let player = PlayerId(1);
    let original = runtime.api().create_menu("Shop", 1).unwrap();
    original.open(player).unwrap();

    let copy = runtime.api().clone_menu(&original);

    assert!(original.is_viewing(player));
    assert!(copy.viewers().is_empty());
}

#[test]
fn open_twice_is_a_usage_error() {
    let runtime = Runtime::new();
    let player = PlayerId(1);
    let menu = runtime.api().create_menu("Shop", 1).unwrap();

    menu.open(player).unwrap();
    let err = menu.open(player).unwrap_err();

    assert_eq!(
        err,
        MenuError::AlreadyViewing {
            player,
            title: "Shop".to_string()
        }
    );
    assert_eq!(
        runtime.host().open_view(player),
        Some(OpenView::Inventory(menu.inventory()))
    );
}

#[test]
fn close_only_affects_viewers() {
    let runtime = Runtime::new();
    let player = PlayerId(1);
    let menu = runtime.api().create_menu("Shop", 1).unwrap();

    menu.close(player);
    assert!(runtime.host().close_requests().is_empty());

    menu.open(player).unwrap();
    menu.close(player);

    assert!(!menu.is_viewing(player));
    assert_eq!(runtime.host().close_requests(), vec![Viewer::Player(player)]);
    assert_eq!(runtime.host().open_view(player), None);
}

#[test]
fn destroy_closes_every_viewer() {
    let runtime = Runtime::new();
    let menu = runtime.api().create_menu("Doomed", 1).unwrap();
    let alice = PlayerId(1);
    let bob = PlayerId(2);
    let golem = Viewer::Entity(EntityId(9));

    menu.open(alice).unwrap();
    menu.open(bob).unwrap();
    runtime.host().attach_viewer(golem, menu.inventory());
    assert_eq!(menu.viewers().len(), 3);

    runtime.api().destroy_menu(&menu);

    assert!(menu.is_destroyed());
    assert!(menu.viewers().is_empty());
    let requests = runtime.host().close_requests();
    assert_eq!(requests.len(), 3);
    for viewer in [Viewer::Player(alice), Viewer::Player(bob), golem] {
        assert!(requests.contains(&viewer), "{viewer} was not closed");
        assert_eq!(runtime.host().open_view(viewer), None);
    }
}

#[test]
fn update_refreshes_player_viewers_only() {
    let runtime = Runtime::new();
    let menu = runtime.api().create_menu("Live", 1).unwrap();
    let alice = PlayerId(1);
    let bob = PlayerId(2);

    menu.open(alice).unwrap();
    menu.open(bob).unwrap();
    runtime
        .host()
        .attach_viewer(Viewer::Entity(EntityId(3)), menu.inventory());

    menu.add_item(item("Late"), SlotIndex(2)).unwrap();
    menu.update();

    let mut refreshed = runtime.host().refresh_requests();
    refreshed.sort();
    assert_eq!(refreshed, vec![alice, bob]);
}
