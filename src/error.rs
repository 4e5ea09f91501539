//! Crate-level error type for tree and page operations.
//!
//! The controllers themselves never fail; these errors surface only from
//! structural misuse of the element tree or the page.

use crate::dom::node::NodeId;

/// Errors returned by [`Dom`](crate::dom::Dom) and [`Page`](crate::page::Page)
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("node {0:?} does not exist")]
    NodeNotFound(NodeId),
    #[error("appending {node:?} under {parent:?} would create a cycle")]
    WouldCycle { node: NodeId, parent: NodeId },
    #[error("a component is already mounted on {0:?}")]
    ComponentExists(NodeId),
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn display_messages() {
        let mut sm: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = sm.insert(());
        let b = sm.insert(());
        assert!(Error::NodeNotFound(a).to_string().contains("does not exist"));
        assert!(Error::WouldCycle { node: a, parent: b }
            .to_string()
            .contains("cycle"));
        assert!(Error::ComponentExists(a)
            .to_string()
            .contains("already mounted"));
    }
}
