//! Tree operations: insert, attach, detach, walk, focus, root resolution.

use std::cmp::Ordering;
use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};
use crate::error::{Error, Result};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// Resolved text direction of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// Parse a `dir` attribute value. Unknown values resolve to `None`.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ltr" => Some(Direction::Ltr),
            "rtl" => Some(Direction::Rtl),
            _ => None,
        }
    }

    /// The attribute spelling of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Direction::Rtl
    }
}

/// The element tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that removal is O(subtree size) and lookup is O(1).
///
/// The first node inserted with [`Dom::insert`] becomes the document root.
/// Later calls to `insert` create detached nodes that are not connected until
/// they are appended somewhere under the document root.
pub struct Dom {
    nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
    focused: Option<NodeId>,
}

impl Dom {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
            focused: None,
        }
    }

    /// Insert a parentless node.
    ///
    /// If no document root has been set yet, this node becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert a node as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        Ok(id)
    }

    /// Move `node` (with its subtree) to become the last child of `parent`.
    ///
    /// Fails if either node is missing or if `parent` lies inside `node`'s
    /// subtree.
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        if !self.nodes.contains_key(node) {
            return Err(Error::NodeNotFound(node));
        }
        if self.is_inclusive_ancestor(node, parent) {
            return Err(Error::WouldCycle { node, parent });
        }

        self.unlink(node);
        self.parent.insert(node, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(node);
        }
        Ok(())
    }

    /// Detach `node` from its parent, keeping its subtree intact.
    ///
    /// Focus inside the detached subtree is dropped.
    pub fn detach(&mut self, node: NodeId) -> Result<()> {
        if !self.nodes.contains_key(node) {
            return Err(Error::NodeNotFound(node));
        }
        self.unlink(node);
        if self
            .focused
            .is_some_and(|focused| self.is_inclusive_ancestor(node, focused))
        {
            self.focused = None;
        }
        Ok(())
    }

    /// Remove a node and all its descendants recursively.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        self.unlink(id);

        if self.root == Some(id) {
            self.root = None;
        }

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            if self.focused == Some(current) {
                self.focused = None;
            }
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    fn unlink(&mut self, node: NodeId) {
        if let Some(old_parent) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != node);
            }
        }
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the top of its tree, collecting ancestor ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor == node || self.ancestors(node).contains(&ancestor)
    }

    /// The topmost ancestor of `id`, crossing encapsulation boundaries.
    pub fn topmost(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().copied().unwrap_or(id)
    }

    /// The root node used to scope queries for `id`.
    ///
    /// That is the nearest ancestor marked as a shadow root, or the topmost
    /// ancestor when there is none. A shadow root's own root node is resolved
    /// from its ancestors, never itself.
    pub fn root_node(&self, id: NodeId) -> Option<NodeId> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        for ancestor in self.ancestors(id) {
            if self.nodes.get(ancestor).is_some_and(|d| d.shadow_root) {
                return Some(ancestor);
            }
        }
        Some(self.topmost(id))
    }

    /// Whether `id` is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id) && self.root.is_some_and(|root| self.topmost(id) == root)
    }

    /// Resolve the text direction of `id` from the nearest `dir` attribute on
    /// it or its ancestors. Defaults to left-to-right.
    pub fn direction(&self, id: NodeId) -> Direction {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|n| self.nodes.get(n))
            .find_map(|data| data.attribute("dir").and_then(Direction::from_attribute))
            .unwrap_or_default()
    }

    /// Compare two nodes by pre-order position.
    ///
    /// Nodes in different trees compare by their tops' arena order.
    pub fn compare_document_position(&self, a: NodeId, b: NodeId) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let top_a = self.topmost(a);
        let top_b = self.topmost(b);
        if top_a != top_b {
            return top_a.cmp(&top_b);
        }
        self.tree_path(a).cmp(&self.tree_path(b))
    }

    /// Child indices from the top of the tree down to `id`.
    fn tree_path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            let index = self
                .children(p)
                .iter()
                .position(|&c| c == current)
                .unwrap_or(0);
            path.push(index);
            current = p;
        }
        path.reverse();
        path
    }

    /// Move focus to `id`. Returns `true` if focus changed.
    ///
    /// Only connected nodes can take focus.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_connected(id) || self.focused == Some(id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    /// Drop focus from `id` if it holds it. Returns `true` if focus changed.
    pub fn blur(&mut self, id: NodeId) -> bool {
        if self.focused == Some(id) {
            self.focused = None;
            true
        } else {
            false
        }
    }

    /// The currently focused node, if any.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// The document root, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Explicitly set the document root.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the arena contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
