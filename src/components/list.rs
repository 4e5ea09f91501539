//! `md-list`: a keyboard-navigable list with a roving tab stop.

use std::any::Any;

use crate::component::Component;
use crate::document::Document;
use crate::dom::{Dom, NodeData, NodeId};
use crate::event::input::KeyEvent;
use crate::event::message::Envelope;
use crate::nav::{is_navigable_key, ListNavigationConfig, ListNavigationController};

pub const LIST_ITEM_TAG: &str = "md-list-item";

/// Items with `type="text"` are display-only and never take the tab stop.
fn is_interactive(item: &NodeData) -> bool {
    !item.disabled && item.attribute("type") != Some("text")
}

pub struct List {
    host: NodeId,
    nav: ListNavigationController<Dom>,
}

impl List {
    /// A wrapping list over the host's `md-list-item` children.
    pub fn new(host: NodeId) -> Self {
        Self::with_wrap(host, true)
    }

    pub fn with_wrap(host: NodeId, wrap: bool) -> Self {
        let config = ListNavigationConfig::new(
            |el: &NodeData| el.tag == LIST_ITEM_TAG,
            move |dom: &Dom| dom.children(host).to_vec(),
        )
        .rtl(move |dom: &Dom| dom.direction(host).is_rtl())
        .navigable_keys(is_navigable_key)
        .activatable(is_interactive)
        .wrap_navigation(move || wrap);
        Self {
            host,
            nav: ListNavigationController::new(config),
        }
    }

    /// Current items in order.
    pub fn items(&self, doc: &Document) -> Vec<NodeId> {
        self.nav.items(&doc.dom)
    }

    pub fn activate_next_item(&self, doc: &mut Document) -> Option<NodeId> {
        self.nav.activate_next_item(&mut doc.dom)
    }

    pub fn activate_previous_item(&self, doc: &mut Document) -> Option<NodeId> {
        self.nav.activate_previous_item(&mut doc.dom)
    }
}

impl Component for List {
    fn host(&self) -> NodeId {
        self.host
    }

    fn component_type(&self) -> &str {
        "List"
    }

    fn on_connect(&mut self, doc: &mut Document) {
        self.nav.on_slotchange(&mut doc.dom);
    }

    fn on_key(&mut self, doc: &mut Document, event: &mut KeyEvent) {
        self.nav.handle_keydown(&mut doc.dom, event);
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
    use crate::event::input::Key;

    fn build(n: usize) -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let body = doc.dom.insert(NodeData::new("body"));
        let host = doc.dom.insert_child(body, NodeData::new("md-list")).unwrap();
        let items = (0..n)
            .map(|_| doc.dom.insert_child(host, NodeData::new(LIST_ITEM_TAG)).unwrap())
            .collect();
        (doc, host, items)
    }

    #[test]
    fn connect_seeds_tab_stop() {
        let (mut doc, host, items) = build(3);
        let mut list = List::new(host);
        list.on_connect(&mut doc);
        assert_eq!(doc.dom.get(items[0]).unwrap().tab_index, 0);
        assert_eq!(list.items(&doc), items);
    }

    #[test]
    fn text_items_are_skipped() {
        let (mut doc, host, items) = build(3);
        doc.dom.get_mut(items[1]).unwrap().set_attribute("type", "text");
        let mut list = List::new(host);
        list.on_connect(&mut doc);

        let mut event = KeyEvent::key(Key::Down);
        list.on_key(&mut doc, &mut event);
        assert!(event.default_prevented());
        assert_eq!(doc.dom.focused(), Some(items[2]));
    }

    #[test]
    fn focusing_inactive_item_requests_activation() {
        let (mut doc, host, items) = build(2);
        let mut list = List::new(host);
        list.on_connect(&mut doc);

        list.on_focus_in(&mut doc, items[0]);
        assert!(doc.dispatcher.is_empty());

        list.on_focus_in(&mut doc, items[1]);
        let pending = doc.dispatcher.drain();
        assert_eq!(pending.len(), 1);
        assert!(list.on_message(&mut doc, &pending[0]));
        assert_eq!(doc.dom.get(items[0]).unwrap().tab_index, -1);
        assert_eq!(doc.dom.get(items[1]).unwrap().tab_index, 0);
    }

    #[test]
    fn non_wrapping_list_stops_at_end() {
        let (mut doc, host, items) = build(2);
        let mut list = List::with_wrap(host, false);
        list.on_connect(&mut doc);
        assert_eq!(list.activate_next_item(&mut doc), Some(items[1]));
        assert_eq!(list.activate_next_item(&mut doc), None);
        assert_eq!(list.activate_previous_item(&mut doc), Some(items[0]));
    }
}
