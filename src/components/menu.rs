//! `md-menu`: a popup list whose active item is also its selected item.
//!
//! Opening the menu seeds focus according to [`DefaultFocus`]. Escape closes
//! it, as does clicking an item that is not marked `keep-open`. While closed
//! the menu ignores keyboard input entirely.

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use crate::component::Component;
use crate::document::Document;
use crate::dom::{Dom, NodeData, NodeId};
use crate::event::input::{Key, KeyEvent};
use crate::event::message::{Custom, Envelope};
use crate::nav::{ListNavigationConfig, ListNavigationController};

pub const MENU_ITEM_TAG: &str = "md-menu-item";

/// What takes focus when a menu opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultFocus {
    /// Leave focus where it is.
    None,
    /// Focus the menu element itself.
    ListRoot,
    /// Activate and focus the first activatable item.
    #[default]
    FirstItem,
    /// Activate and focus the last activatable item.
    LastItem,
}

fn select_item(dom: &mut Dom, id: NodeId) {
    if let Some(item) = dom.get_mut(id) {
        item.selected = true;
        item.tab_index = 0;
    }
}

fn deselect_item(dom: &mut Dom, id: NodeId) {
    if let Some(item) = dom.get_mut(id) {
        item.selected = false;
        item.tab_index = -1;
    }
}

pub struct Menu {
    host: NodeId,
    nav: ListNavigationController<Dom>,
    open: bool,
    default_focus: DefaultFocus,
    wrap: Rc<Cell<bool>>,
    /// Element focus returns to on close.
    anchor: Option<NodeId>,
}

impl Menu {
    pub fn new(host: NodeId) -> Self {
        let wrap = Rc::new(Cell::new(true));
        let wrap_flag = Rc::clone(&wrap);
        let config = ListNavigationConfig::new(
            |el: &NodeData| el.tag == MENU_ITEM_TAG,
            move |dom: &Dom| dom.children(host).to_vec(),
        )
        .rtl(move |dom: &Dom| dom.direction(host).is_rtl())
        .on_activate(select_item)
        .on_deactivate(deselect_item)
        .activatable(|el: &NodeData| !el.disabled || el.always_focusable)
        .wrap_navigation(move || wrap_flag.get());
        Self {
            host,
            nav: ListNavigationController::new(config),
            open: false,
            default_focus: DefaultFocus::default(),
            wrap,
            anchor: None,
        }
    }

    /// Set what gets focus on open (builder).
    pub fn with_default_focus(mut self, default_focus: DefaultFocus) -> Self {
        self.default_focus = default_focus;
        self
    }

    /// Set whether arrow navigation wraps (builder).
    pub fn with_wrap(self, wrap: bool) -> Self {
        self.wrap.set(wrap);
        self
    }

    /// Return focus to `anchor` when the menu closes (builder).
    pub fn with_anchor(mut self, anchor: NodeId) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn set_wrap_navigation(&self, wrap: bool) {
        self.wrap.set(wrap);
    }

    pub fn set_default_focus(&mut self, default_focus: DefaultFocus) {
        self.default_focus = default_focus;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn items(&self, doc: &Document) -> Vec<NodeId> {
        self.nav.items(&doc.dom)
    }

    /// Open the menu and seed focus. Returns the element that took focus.
    pub fn open(&mut self, doc: &mut Document) -> Option<NodeId> {
        if self.open {
            return None;
        }
        self.open = true;
        if let Some(host) = doc.dom.get_mut(self.host) {
            host.set_attribute("open", "");
        }
        let focused = match self.default_focus {
            DefaultFocus::None => None,
            DefaultFocus::ListRoot => doc.dom.focus(self.host).then_some(self.host),
            DefaultFocus::FirstItem => self.nav.activate_first_item(&mut doc.dom),
            DefaultFocus::LastItem => self.nav.activate_last_item(&mut doc.dom),
        };
        doc.dispatcher.push(Envelope::new(Custom::new("opened"), self.host));
        cdebug!(host = ?self.host, default_focus = ?self.default_focus, focused = ?focused, "menu opened");
        focused
    }

    /// Close the menu. Focus inside it moves to the anchor, if any.
    pub fn close(&mut self, doc: &mut Document) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Some(host) = doc.dom.get_mut(self.host) {
            host.remove_attribute("open");
        }
        let focus_inside = doc
            .dom
            .focused()
            .is_some_and(|focused| doc.dom.is_inclusive_ancestor(self.host, focused));
        if focus_inside {
            match self.anchor {
                Some(anchor) => {
                    doc.dom.focus(anchor);
                }
                None => {
                    if let Some(focused) = doc.dom.focused() {
                        doc.dom.blur(focused);
                    }
                }
            }
        }
        doc.dispatcher.push(Envelope::new(Custom::new("closed"), self.host));
        cdebug!(host = ?self.host, "menu closed");
    }
}

impl Component for Menu {
    fn host(&self) -> NodeId {
        self.host
    }

    fn component_type(&self) -> &str {
        "Menu"
    }

    fn on_connect(&mut self, doc: &mut Document) {
        self.nav.on_slotchange(&mut doc.dom);
    }

    fn on_disconnect(&mut self, _doc: &mut Document) {
        self.open = false;
    }

    fn on_key(&mut self, doc: &mut Document, event: &mut KeyEvent) {
        if !self.open || event.default_prevented() {
            return;
        }
        if event.code == Key::Escape {
            event.prevent_default();
            self.close(doc);
            return;
        }
        self.nav.handle_keydown(&mut doc.dom, event);
    }

    fn on_click(&mut self, doc: &mut Document, target: NodeId) {
        let Some(item) = super::owning_item(&self.nav, doc, target) else {
            return;
        };
        let keeps_open = doc
            .dom
            .get(item)
            .is_some_and(|data| data.disabled || data.has_attribute("keep-open"));
        if !keeps_open {
            self.close(doc);
        }
    }

    fn on_focus_in(&mut self, doc: &mut Document, target: NodeId) {
        super::request_activation_on_focus(&self.nav, doc, target);
    }

    fn on_message(&mut self, doc: &mut Document, envelope: &Envelope) -> bool {
        super::route_list_message(&self.nav, doc, envelope)
    }

    fn on_slotchange(&mut self, doc: &mut Document) {
        self.nav.on_slotchange(&mut doc.dom);
    }

    fn on_property_changed(&mut self, doc: &mut Document, name: &str) {
        if name != "open" {
            return;
        }
        let wants_open = doc.dom.get(self.host).is_some_and(|h| h.has_attribute("open"));
        match (self.open, wants_open) {
            (false, true) => {
                self.open(doc);
            }
            (true, false) => self.close(doc),
            _ => {}
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(n: usize) -> (Document, NodeId, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let body = doc.dom.insert(NodeData::new("body"));
        let anchor = doc.dom.insert_child(body, NodeData::new("button")).unwrap();
        let host = doc.dom.insert_child(body, NodeData::new("md-menu")).unwrap();
        let items = (0..n)
            .map(|_| doc.dom.insert_child(host, NodeData::new(MENU_ITEM_TAG)).unwrap())
            .collect();
        (doc, anchor, host, items)
    }

    fn tab_indices(doc: &Document, items: &[NodeId]) -> Vec<i32> {
        items.iter().map(|&id| doc.dom.get(id).unwrap().tab_index).collect()
    }

    fn selected(doc: &Document, items: &[NodeId]) -> Vec<bool> {
        items.iter().map(|&id| doc.dom.get(id).unwrap().selected).collect()
    }

    #[test]
    fn open_focuses_first_item_by_default() {
        let (mut doc, _, host, items) = build(3);
        let mut menu = Menu::new(host);
        menu.on_connect(&mut doc);
        assert_eq!(menu.open(&mut doc), Some(items[0]));
        assert!(menu.is_open());
        assert_eq!(doc.dom.focused(), Some(items[0]));
        assert!(doc.dom.get(host).unwrap().has_attribute("open"));
    }

    #[test]
    fn open_with_each_default_focus() {
        let (mut doc, _, host, items) = build(3);
        let mut menu = Menu::new(host).with_default_focus(DefaultFocus::LastItem);
        assert_eq!(menu.open(&mut doc), Some(items[2]));
        assert_eq!(tab_indices(&doc, &items), vec![-1, -1, 0]);
        menu.close(&mut doc);

        menu.set_default_focus(DefaultFocus::ListRoot);
        assert_eq!(menu.open(&mut doc), Some(host));
        menu.close(&mut doc);

        menu.set_default_focus(DefaultFocus::None);
        assert_eq!(menu.open(&mut doc), None);
        assert_eq!(doc.dom.focused(), None);
    }

    #[test]
    fn arrows_move_selection_with_tab_stop() {
        let (mut doc, _, host, items) = build(3);
        let mut menu = Menu::new(host);
        menu.on_connect(&mut doc);
        menu.open(&mut doc);

        menu.on_key(&mut doc, &mut KeyEvent::key(Key::Down));
        assert_eq!(doc.dom.focused(), Some(items[1]));
        assert_eq!(doc.dom.get(items[1]).unwrap().tab_index, 0);
        assert_eq!(doc.dom.get(items[0]).unwrap().tab_index, -1);
    }

    #[test]
    fn always_focusable_disabled_item_is_reachable() {
        let (mut doc, _, host, items) = build(3);
        {
            let item = doc.dom.get_mut(items[1]).unwrap();
            item.disabled = true;
            item.always_focusable = true;
        }
        doc.dom.get_mut(items[2]).unwrap().disabled = true;
        let mut menu = Menu::new(host).with_wrap(false);
        menu.open(&mut doc);
        menu.on_key(&mut doc, &mut KeyEvent::key(Key::Down));
        assert_eq!(doc.dom.focused(), Some(items[1]));

        // Last activatable item, no wrap: nothing moves.
        menu.on_key(&mut doc, &mut KeyEvent::key(Key::Down));
        assert_eq!(doc.dom.focused(), Some(items[1]));
    }

    #[test]
    fn request_activation_selects_single_item() {
        let (mut doc, _, host, items) = build(3);
        let mut menu = Menu::new(host);
        menu.on_connect(&mut doc);
        menu.open(&mut doc);

        menu.on_focus_in(&mut doc, items[2]);
        let pending = doc.dispatcher.drain();
        let request = pending
            .iter()
            .find(|env| env.is::<crate::event::RequestActivation>())
            .unwrap();
        assert!(menu.on_message(&mut doc, request));
        assert_eq!(selected(&doc, &items), vec![false, false, true]);
        assert_eq!(tab_indices(&doc, &items), vec![-1, -1, 0]);
        assert_eq!(doc.dom.focused(), Some(items[2]));
    }

    #[test]
    fn escape_closes_and_restores_focus() {
        let (mut doc, anchor, host, _) = build(2);
        let mut menu = Menu::new(host).with_anchor(anchor);
        menu.open(&mut doc);
        doc.dispatcher.drain();

        let mut escape = KeyEvent::key(Key::Escape);
        menu.on_key(&mut doc, &mut escape);
        assert!(escape.default_prevented());
        assert!(!menu.is_open());
        assert_eq!(doc.dom.focused(), Some(anchor));
        let closed = doc.dispatcher.drain();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].message.message_name(), "closed");
    }

    #[test]
    fn closed_menu_ignores_keys() {
        let (mut doc, _, host, _) = build(2);
        let mut menu = Menu::new(host);
        let mut down = KeyEvent::key(Key::Down);
        menu.on_key(&mut doc, &mut down);
        assert!(!down.default_prevented());
    }

    #[test]
    fn item_click_closes_unless_keep_open() {
        let (mut doc, _, host, items) = build(2);
        doc.dom.get_mut(items[1]).unwrap().set_attribute("keep-open", "");
        let mut menu = Menu::new(host);
        menu.open(&mut doc);

        menu.on_click(&mut doc, items[1]);
        assert!(menu.is_open());
        menu.on_click(&mut doc, items[0]);
        assert!(!menu.is_open());
    }

    #[test]
    fn open_attribute_drives_state() {
        let (mut doc, _, host, _) = build(1);
        let mut menu = Menu::new(host);
        doc.dom.get_mut(host).unwrap().set_attribute("open", "");
        menu.on_property_changed(&mut doc, "open");
        assert!(menu.is_open());
        doc.dom.get_mut(host).unwrap().remove_attribute("open");
        menu.on_property_changed(&mut doc, "open");
        assert!(!menu.is_open());
    }
}
