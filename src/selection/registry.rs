//! Explicit selection-group membership keyed by `(root node, name)`.
//!
//! Controls register when their host connects and unregister when it
//! disconnects, so looking up a group never walks the tree. Members are kept
//! in document order, matching what a root-scoped query would return.

use std::collections::HashMap;

use crate::dom::{ElementTree, NodeId};

/// Identity of a selection group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub root: NodeId,
    pub name: String,
}

impl GroupKey {
    pub fn new(root: NodeId, name: impl Into<String>) -> Self {
        Self {
            root,
            name: name.into(),
        }
    }
}

/// Registry of selection groups and their members.
#[derive(Debug, Default)]
pub struct SelectionGroups {
    groups: HashMap<GroupKey, Vec<NodeId>>,
}

impl SelectionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` to the group, keeping members in document order.
    ///
    /// Registering an existing member re-sorts the group, which picks up
    /// moves within the root.
    pub fn register<T: ElementTree>(&mut self, tree: &T, key: GroupKey, id: NodeId) {
        let members = self.groups.entry(key).or_default();
        if !members.contains(&id) {
            members.push(id);
        }
        members.sort_by(|&a, &b| tree.compare_document_position(a, b));
    }

    /// Remove `id` from the group. Empty groups are dropped.
    ///
    /// Returns `true` if `id` was a member.
    pub fn unregister(&mut self, key: &GroupKey, id: NodeId) -> bool {
        let Some(members) = self.groups.get_mut(key) else {
            return false;
        };
        let before = members.len();
        members.retain(|&m| m != id);
        let removed = members.len() != before;
        if members.is_empty() {
            self.groups.remove(key);
        }
        removed
    }

    /// Members of a group in document order. Empty for unknown groups.
    pub fn members(&self, key: &GroupKey) -> &[NodeId] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of non-empty groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
