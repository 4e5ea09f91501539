//! Component trait: per-host behavior attached to an element.
//!
//! A component owns no elements. It is mounted on a host node and reacts to
//! what the page tells it: lifecycle transitions, keydowns bubbling through
//! its host, clicks, focus moving in or out, messages and child-list changes.
//! Every hook has a no-op default so components implement only what they use.

use std::any::Any;

use crate::document::Document;
use crate::dom::NodeId;
use crate::event::input::KeyEvent;
use crate::event::message::Envelope;

/// Behavior mounted on a host element.
///
/// Object-safe: the page stores components as `Box<dyn Component>` and uses
/// [`as_any`](Component::as_any) to hand out typed references.
pub trait Component {
    /// The element this component is mounted on.
    fn host(&self) -> NodeId;

    /// Short type name used in logs (e.g. `"List"`).
    fn component_type(&self) -> &str;

    /// The host became connected to the document.
    fn on_connect(&mut self, _doc: &mut Document) {}

    /// The host was disconnected from the document.
    fn on_disconnect(&mut self, _doc: &mut Document) {}

    /// A keydown is bubbling through the host.
    fn on_key(&mut self, _doc: &mut Document, _event: &mut KeyEvent) {}

    /// A click on `target`, which is the host or one of its descendants.
    fn on_click(&mut self, _doc: &mut Document, _target: NodeId) {}

    /// Focus moved onto `target`, the host or one of its descendants.
    fn on_focus_in(&mut self, _doc: &mut Document, _target: NodeId) {}

    /// Focus left `target`, the host or one of its descendants.
    fn on_focus_out(&mut self, _doc: &mut Document, _target: NodeId) {}

    /// A bubbling or targeted message reached the host.
    ///
    /// Returns `true` if the message was consumed and should stop bubbling.
    fn on_message(&mut self, _doc: &mut Document, _envelope: &Envelope) -> bool {
        false
    }

    /// The host's children changed.
    fn on_slotchange(&mut self, _doc: &mut Document) {}

    /// An attribute or property of the host changed.
    fn on_property_changed(&mut self, _doc: &mut Document, _name: &str) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
