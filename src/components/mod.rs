//! Components built on the controllers: [`List`], [`Menu`] and [`Radio`].

pub mod list;
pub mod menu;
pub mod radio;

pub use list::List;
pub use menu::{DefaultFocus, Menu};
pub use radio::Radio;

use crate::document::Document;
use crate::dom::{Dom, NodeId};
use crate::event::message::{DeactivateItems, Envelope, RequestActivation};
use crate::nav::ListNavigationController;

/// The item of `nav` that is `target` or contains it.
fn owning_item(
    nav: &ListNavigationController<Dom>,
    doc: &Document,
    target: NodeId,
) -> Option<NodeId> {
    nav.items(&doc.dom)
        .into_iter()
        .find(|&item| doc.dom.is_inclusive_ancestor(item, target))
}

/// Activation requests shared by list-like components.
///
/// `RequestActivation` from one of the list's items makes it the single active
/// item; `DeactivateItems` clears every tab stop. Both are consumed.
fn route_list_message(
    nav: &ListNavigationController<Dom>,
    doc: &mut Document,
    envelope: &Envelope,
) -> bool {
    if envelope.is::<RequestActivation>() {
        let Some(item) = owning_item(nav, doc, envelope.sender) else {
            return false;
        };
        nav.on_request_activation(&mut doc.dom, item);
        return true;
    }
    if envelope.is::<DeactivateItems>() {
        nav.on_deactivate_items(&mut doc.dom);
        return true;
    }
    false
}

/// An item taking focus without holding the tab stop asks its list to
/// activate it.
fn request_activation_on_focus(
    nav: &ListNavigationController<Dom>,
    doc: &mut Document,
    target: NodeId,
) {
    let is_inactive_item = nav.items(&doc.dom).contains(&target)
        && doc.dom.get(target).is_some_and(|item| item.tab_index == -1);
    if is_inactive_item {
        doc.dispatcher.push(Envelope::new(RequestActivation, target));
    }
}
