//! The state every component acts on: element tree, selection groups and the
//! outgoing message queue.

use crate::dom::Dom;
use crate::event::handler::EventDispatcher;
use crate::selection::{SelectionContext, SelectionGroups};

/// Element tree plus the shared registries living next to it.
#[derive(Default)]
pub struct Document {
    pub dom: Dom,
    pub groups: SelectionGroups,
    pub dispatcher: EventDispatcher,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the pieces a selection controller needs for one call.
    pub fn selection(&mut self) -> SelectionContext<'_, Dom> {
        SelectionContext::new(&mut self.dom, &mut self.groups, &mut self.dispatcher)
    }
}
