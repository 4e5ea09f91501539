//! Element arena: slotmap-backed tree with encapsulation boundaries and focus.

use std::cmp::Ordering;

pub mod node;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use tree::{Direction, Dom};

/// Keyboard-focus capability shared by list items and selection controls.
pub trait Focusable {
    fn is_disabled(&self) -> bool;

    fn tab_index(&self) -> i32;

    fn set_tab_index(&mut self, tab_index: i32);
}

impl Focusable for NodeData {
    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn tab_index(&self) -> i32 {
        self.tab_index
    }

    fn set_tab_index(&mut self, tab_index: i32) {
        self.tab_index = tab_index;
    }
}

/// The tree surface the controllers are written against.
///
/// [`Dom`] is the crate's implementation; hosts with their own element store
/// can implement this instead and reuse the controllers unchanged.
pub trait ElementTree {
    /// Per-element data. Controllers add capability bounds such as
    /// [`ListItem`](crate::nav::ListItem) on top.
    type Element;

    fn get(&self, id: NodeId) -> Option<&Self::Element>;

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Self::Element>;

    /// Move focus to `id`. Returns `true` if focus changed.
    fn focus(&mut self, id: NodeId) -> bool;

    /// Drop focus from `id` if it holds it. Returns `true` if focus changed.
    fn blur(&mut self, id: NodeId) -> bool;

    fn focused(&self) -> Option<NodeId>;

    /// The root node scoping `id` (nearest encapsulation boundary or the top
    /// of its tree).
    fn root_node(&self, id: NodeId) -> Option<NodeId>;

    fn is_connected(&self, id: NodeId) -> bool;

    fn direction(&self, id: NodeId) -> Direction;

    /// Total order of two nodes in the same tree.
    fn compare_document_position(&self, a: NodeId, b: NodeId) -> Ordering;
}

impl ElementTree for Dom {
    type Element = NodeData;

    fn get(&self, id: NodeId) -> Option<&NodeData> {
        Dom::get(self, id)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        Dom::get_mut(self, id)
    }

    fn focus(&mut self, id: NodeId) -> bool {
        Dom::focus(self, id)
    }

    fn blur(&mut self, id: NodeId) -> bool {
        Dom::blur(self, id)
    }

    fn focused(&self) -> Option<NodeId> {
        Dom::focused(self)
    }

    fn root_node(&self, id: NodeId) -> Option<NodeId> {
        Dom::root_node(self, id)
    }

    fn is_connected(&self, id: NodeId) -> bool {
        Dom::is_connected(self, id)
    }

    fn direction(&self, id: NodeId) -> Direction {
        Dom::direction(self, id)
    }

    fn compare_document_position(&self, a: NodeId, b: NodeId) -> Ordering {
        Dom::compare_document_position(self, a, b)
    }
}
