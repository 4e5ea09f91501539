//! The capability an element needs to join a selection group.

use crate::dom::{Focusable, NodeData};

/// A radio-like control: checkable and grouped by `name`.
pub trait SelectionControl: Focusable {
    fn is_checked(&self) -> bool;

    fn set_checked(&mut self, checked: bool);

    /// The group name, if the control has one.
    fn name(&self) -> Option<&str>;
}

impl SelectionControl for NodeData {
    fn is_checked(&self) -> bool {
        self.checked
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    fn name(&self) -> Option<&str> {
        self.attribute("name").filter(|name| !name.is_empty())
    }
}
