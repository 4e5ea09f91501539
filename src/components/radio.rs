//! `md-radio`: a checkable control in a named single-selection group.

use std::any::Any;

use crate::component::Component;
use crate::document::Document;
use crate::dom::NodeId;
use crate::event::input::{Key, KeyEvent};
use crate::event::message::{Change, Envelope};
use crate::selection::SingleSelectionController;

pub const RADIO_TAG: &str = "md-radio";

pub struct Radio {
    host: NodeId,
    selection: SingleSelectionController,
}

impl Radio {
    pub fn new(host: NodeId) -> Self {
        Self {
            host,
            selection: SingleSelectionController::new(host),
        }
    }

    pub fn controller(&self) -> &SingleSelectionController {
        &self.selection
    }

    /// Every radio in this radio's group, itself included.
    pub fn group(&self, doc: &Document) -> Vec<NodeId> {
        self.selection.controls(&doc.dom, &doc.groups)
    }

    /// Check the radio as the user would: unchecks the group and emits
    /// `Change`. Disabled or already-checked radios are left alone.
    pub fn select(&mut self, doc: &mut Document) -> bool {
        let Some(host) = doc.dom.get_mut(self.host) else {
            return false;
        };
        if host.disabled || host.checked {
            return false;
        }
        host.checked = true;
        self.selection.handle_checked_change(&mut doc.selection());
        doc.dispatcher.push(Envelope::new(Change, self.host).composed());
        true
    }
}

impl Component for Radio {
    fn host(&self) -> NodeId {
        self.host
    }

    fn component_type(&self) -> &str {
        "Radio"
    }

    fn on_connect(&mut self, doc: &mut Document) {
        self.selection.host_connected(&mut doc.selection());
    }

    fn on_disconnect(&mut self, doc: &mut Document) {
        self.selection.host_disconnected(&mut doc.selection());
    }

    fn on_key(&mut self, doc: &mut Document, event: &mut KeyEvent) {
        if event.code == Key::Char(' ') {
            event.prevent_default();
            self.select(doc);
            return;
        }
        self.selection.handle_keydown(&mut doc.selection(), event);
    }

    fn on_click(&mut self, doc: &mut Document, _target: NodeId) {
        self.select(doc);
    }

    fn on_focus_in(&mut self, doc: &mut Document, _target: NodeId) {
        self.selection.handle_focus_in(&mut doc.selection());
    }

    fn on_focus_out(&mut self, doc: &mut Document, _target: NodeId) {
        self.selection.handle_focus_out(&mut doc.selection());
    }

    fn on_property_changed(&mut self, doc: &mut Document, name: &str) {
        match name {
            "checked" => self.selection.handle_checked_change(&mut doc.selection()),
            "name" => self.selection.handle_name_change(&mut doc.selection()),
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
    use crate::dom::NodeData;

    fn build(n: usize) -> (Document, Vec<Radio>) {
        let mut doc = Document::new();
        let body = doc.dom.insert(NodeData::new("body"));
        let mut radios: Vec<Radio> = (0..n)
            .map(|_| {
                let id = doc
                    .dom
                    .insert_child(body, NodeData::new(RADIO_TAG).with_name("size"))
                    .unwrap();
                Radio::new(id)
            })
            .collect();
        for radio in &mut radios {
            radio.on_connect(&mut doc);
        }
        (doc, radios)
    }

    fn checked(doc: &Document, radios: &[Radio]) -> Vec<bool> {
        radios
            .iter()
            .map(|r| doc.dom.get(r.host()).unwrap().checked)
            .collect()
    }

    #[test]
    fn click_checks_and_emits_one_change() {
        let (mut doc, mut radios) = build(3);
        let target = radios[1].host();
        radios[1].on_click(&mut doc, target);
        assert_eq!(checked(&doc, &radios), vec![false, true, false]);

        let events = doc.dispatcher.drain();
        assert_eq!(events.len(), 1);
        assert!(events[0].is::<Change>());
        assert!(events[0].composed);

        // Clicking the checked radio again changes nothing.
        radios[1].on_click(&mut doc, target);
        assert!(doc.dispatcher.is_empty());
    }

    #[test]
    fn space_checks_focused_radio() {
        let (mut doc, mut radios) = build(2);
        let first = radios[0].host();
        radios[0].on_click(&mut doc, first);
        let mut space = KeyEvent::key(Key::Char(' '));
        radios[1].on_key(&mut doc, &mut space);
        assert!(space.default_prevented());
        assert_eq!(checked(&doc, &radios), vec![false, true]);
    }

    #[test]
    fn disabled_radio_ignores_click() {
        let (mut doc, mut radios) = build(2);
        doc.dom.get_mut(radios[0].host()).unwrap().disabled = true;
        assert!(!radios[0].select(&mut doc));
        assert_eq!(checked(&doc, &radios), vec![false, false]);
    }

    #[test]
    fn group_lists_named_siblings() {
        let (doc, radios) = build(3);
        let ids: Vec<NodeId> = radios.iter().map(Radio::host).collect();
        assert_eq!(radios[2].group(&doc), ids);
        assert!(radios[0].controller().is_listening());
    }
}
