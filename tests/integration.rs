//! Integration tests for material-controls.
//!
//! These exercise the public API from outside the crate: pages with mounted
//! lists, menus and radios driven through the headless pilot.

use material_controls::components::{DefaultFocus, Menu};
use material_controls::dom::{Direction, NodeData, NodeId};
use material_controls::event::{Change, Key};
use material_controls::testing::{selection_to_string, tab_indices_to_string, Pilot};
use material_controls::PageConfig;
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A mounted `md-list` under the body with one item per entry of `disabled`.
fn list(pilot: &mut Pilot, disabled: &[bool]) -> (NodeId, Vec<NodeId>) {
    let body = pilot.page().body();
    let page = pilot.page_mut();
    let list = page.insert(body, NodeData::new("md-list")).unwrap();
    let items = disabled
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let item = NodeData::new("md-list-item")
                .with_id(format!("item-{i}"))
                .disabled(d);
            page.insert(list, item).unwrap()
        })
        .collect();
    page.mount_list(list).unwrap();
    (list, items)
}

/// Mounted radios named `name` under `parent`; `checked` marks the initially
/// checked ones.
fn radios(pilot: &mut Pilot, parent: NodeId, name: &str, checked: &[bool]) -> Vec<NodeId> {
    let page = pilot.page_mut();
    checked
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let data = NodeData::new("md-radio")
                .with_id(format!("{name}-{i}"))
                .with_name(name)
                .checked(c);
            let id = page.insert(parent, data).unwrap();
            page.mount_radio(id).unwrap();
            id
        })
        .collect()
}

// ---------------------------------------------------------------------------
// List navigation
// ---------------------------------------------------------------------------

#[test]
fn test_slotchange_leaves_one_tab_stop() {
    let mut pilot = Pilot::new();
    let (_, items) = list(&mut pilot, &[false; 5]);
    assert_eq!(pilot.tab_indices(&items), vec![0, -1, -1, -1, -1]);
}

#[test]
fn test_forward_navigation_skips_disabled() {
    let mut pilot = Pilot::new();
    let (_, items) = list(&mut pilot, &[false, true, false]);
    pilot.focus(items[0]);
    assert!(pilot.press(Key::Down));
    assert_eq!(pilot.focused(), Some(items[2]));
    assert_eq!(pilot.tab_indices(&items), vec![-1, -1, 0]);
}

#[test]
fn test_always_focusable_menu_item_is_reachable() {
    let mut pilot = Pilot::new();
    let body = pilot.page().body();
    let page = pilot.page_mut();
    let menu = page.insert(body, NodeData::new("md-menu")).unwrap();
    let a = page.insert(menu, NodeData::new("md-menu-item")).unwrap();
    let b = page
        .insert(
            menu,
            NodeData::new("md-menu-item")
                .disabled(true)
                .always_focusable(true),
        )
        .unwrap();
    page.insert(menu, NodeData::new("md-menu-item")).unwrap();
    page.mount_menu(menu).unwrap();
    page.with_component::<Menu, _>(menu, |m, doc| m.open(doc));

    assert_eq!(pilot.focused(), Some(a));
    pilot.press(Key::Down);
    assert_eq!(pilot.focused(), Some(b));
}

#[test]
fn test_wraparound_depends_on_config() {
    let mut pilot = Pilot::new();
    let (_, items) = list(&mut pilot, &[false, false, false]);
    pilot.focus(items[0]);
    pilot.press(Key::End);
    pilot.press(Key::Down);
    assert_eq!(pilot.focused(), Some(items[0]));

    let mut pilot = Pilot::with_config(PageConfig::new().with_wrap_navigation(false));
    let (_, items) = list(&mut pilot, &[false, false, false]);
    pilot.focus(items[0]);
    pilot.press(Key::End);
    assert!(pilot.press(Key::Down));
    assert_eq!(pilot.focused(), Some(items[2]));
    assert_eq!(pilot.tab_indices(&items), vec![-1, -1, 0]);
}

#[test]
fn test_rtl_swaps_inline_arrows() {
    let mut pilot = Pilot::with_config(PageConfig::new().with_direction(Direction::Rtl));
    let (_, items) = list(&mut pilot, &[false, false, false]);
    pilot.focus(items[0]);
    pilot.press(Key::Left);
    assert_eq!(pilot.focused(), Some(items[1]));
    pilot.press(Key::Right);
    assert_eq!(pilot.focused(), Some(items[0]));

    // Flipping the direction is picked up on the next keydown.
    let body = pilot.page().body();
    pilot.page_mut().set_attribute(body, "dir", "ltr").unwrap();
    pilot.press(Key::Right);
    assert_eq!(pilot.focused(), Some(items[1]));
}

#[test]
fn test_end_key_moves_tab_stop() {
    let mut pilot = Pilot::new();
    let (_, items) = list(&mut pilot, &[false, false, false]);
    let [x, y, z] = [items[0], items[1], items[2]];
    pilot.click(y).unwrap();
    assert_eq!(pilot.tab_indices(&items), vec![-1, 0, -1]);

    pilot.press_named("End").unwrap();
    assert_eq!(pilot.tab_indices(&[x, y, z]), vec![-1, -1, 0]);
    insta::assert_snapshot!(tab_indices_to_string(pilot.page().dom(), &items), @r"
    item-0: -1
    item-1: -1
    item-2: 0 focused
    ");
}

#[test]
fn test_items_added_later_join_navigation() {
    let mut pilot = Pilot::new();
    let (list, items) = list(&mut pilot, &[false]);
    let extra = pilot
        .page_mut()
        .insert(list, NodeData::new("md-list-item"))
        .unwrap();
    pilot.focus(items[0]);
    pilot.press(Key::Down);
    assert_eq!(pilot.focused(), Some(extra));
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

#[test]
fn test_menu_open_focus_and_escape() {
    let mut pilot = Pilot::with_config(
        PageConfig::new().with_menu_default_focus(DefaultFocus::FirstItem),
    );
    let body = pilot.page().body();
    let page = pilot.page_mut();
    let button = page.insert(body, NodeData::new("button")).unwrap();
    let menu = page.insert(body, NodeData::new("md-menu")).unwrap();
    let first = page
        .insert(menu, NodeData::new("md-menu-item").disabled(true))
        .unwrap();
    let second = page.insert(menu, NodeData::new("md-menu-item")).unwrap();
    page.mount(Menu::new(menu).with_anchor(button)).unwrap();
    page.focus(button);

    page.set_attribute(menu, "open", "").unwrap();
    assert_eq!(pilot.focused(), Some(second));
    assert_ne!(pilot.focused(), Some(first));

    assert!(pilot.press(Key::Escape));
    assert_eq!(pilot.focused(), Some(button));
    assert!(!pilot.page().component::<Menu>(menu).unwrap().is_open());
    assert_eq!(pilot.take_message_names(), vec!["opened", "closed"]);
}

// ---------------------------------------------------------------------------
// Single selection
// ---------------------------------------------------------------------------

#[test]
fn test_checking_keeps_group_exclusive() {
    let mut pilot = Pilot::new();
    let body = pilot.page().body();
    let group = radios(&mut pilot, body, "size", &[false, false, false]);
    for &id in group.iter().chain(group.iter().rev()) {
        pilot.page_mut().set_checked(id, true).unwrap();
        assert_eq!(pilot.checked(&group).iter().filter(|&&c| c).count(), 1);
    }
    assert_eq!(pilot.checked(&group), vec![true, false, false]);
    // Programmatic checks emit nothing.
    assert!(pilot.take_message_names().is_empty());
}

#[test]
fn test_groups_are_scoped_by_root() {
    let mut pilot = Pilot::new();
    let body = pilot.page().body();
    let host = pilot
        .page_mut()
        .insert(body, NodeData::new("x-card").shadow_root(true))
        .unwrap();
    let outer = radios(&mut pilot, body, "size", &[true]);
    let inner = radios(&mut pilot, host, "size", &[true]);
    assert_eq!(pilot.checked(&[outer[0], inner[0]]), vec![true, true]);

    pilot.page_mut().set_checked(inner[0], true).unwrap();
    assert_eq!(pilot.checked(&[outer[0], inner[0]]), vec![true, true]);
}

#[test]
fn test_arrow_down_selects_next_and_emits_change() {
    let mut pilot = Pilot::new();
    let body = pilot.page().body();
    let group = radios(&mut pilot, body, "size", &[true, false, false]);
    pilot.focus(group[0]);
    pilot.take_message_names();

    assert!(pilot.press(Key::Down));
    assert_eq!(pilot.checked(&group), vec![false, true, false]);
    assert_eq!(pilot.focused(), Some(group[1]));

    let messages = pilot.page_mut().take_messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].is::<Change>());
    assert_eq!(messages[0].sender, group[1]);

    insta::assert_snapshot!(selection_to_string(pilot.page().dom(), &group), @r"
    ( ) size-0 -1
    (x) size-1 0
    ( ) size-2 -1
    ");
}

#[test]
fn test_reconnected_checked_radio_wins() {
    let mut pilot = Pilot::new();
    let body = pilot.page().body();
    let group = radios(&mut pilot, body, "size", &[true, false, false]);

    pilot.page_mut().detach(group[0]).unwrap();
    pilot.page_mut().set_checked(group[1], true).unwrap();
    assert_eq!(pilot.checked(&group), vec![true, true, false]);

    pilot.page_mut().append(body, group[0]).unwrap();
    assert_eq!(pilot.checked(&group), vec![true, false, false]);
}

#[test]
fn test_radio_click_checks_and_emits_one_change() {
    let mut pilot = Pilot::new();
    let body = pilot.page().body();
    let group = radios(&mut pilot, body, "size", &[true, false]);
    pilot.click(group[1]).unwrap();
    assert_eq!(pilot.checked(&group), vec![false, true]);
    assert_eq!(pilot.take_message_names(), vec!["change"]);

    pilot.press(Key::Char(' '));
    assert!(pilot.take_message_names().is_empty());
}

#[test]
fn test_renaming_moves_radio_between_groups() {
    let mut pilot = Pilot::new();
    let body = pilot.page().body();
    let group = radios(&mut pilot, body, "size", &[false, true, false]);
    pilot.page_mut().set_attribute(group[0], "name", "color").unwrap();
    pilot.page_mut().set_checked(group[0], true).unwrap();
    assert_eq!(pilot.checked(&group), vec![true, true, false]);

    pilot.focus(group[1]);
    pilot.press(Key::Down);
    assert_eq!(pilot.checked(&group), vec![true, false, true]);
}
