//! Node types: NodeId, NodeData.

use std::collections::BTreeMap;

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for an element. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single element.
///
/// Besides identity (`tag`, `id`, attributes) an element carries the handful of
/// transient properties the navigation and selection controllers read and
/// write. Everything else about a component lives in the component itself.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Element tag (e.g. "md-list-item", "md-radio").
    pub tag: String,
    /// Optional unique id (`#id` lookup).
    pub id: Option<String>,
    /// String attributes such as `name` or `dir`.
    pub attributes: BTreeMap<String, String>,
    /// Keyboard focusability: `0` is in the tab order, `-1` is not.
    pub tab_index: i32,
    /// Whether this element is disabled.
    pub disabled: bool,
    /// Radio-like checked state.
    pub checked: bool,
    /// Activation flag owned by list-like components (menu item `selected`).
    pub selected: bool,
    /// Whether the element stays focusable while disabled.
    pub always_focusable: bool,
    /// Whether this element is an encapsulation boundary. Its descendants
    /// resolve their root node to this element.
    pub shadow_root: bool,
    /// For wrapper elements: the nested item they expose.
    pub item: Option<NodeId>,
}

impl NodeData {
    /// Create a new `NodeData` with the given tag and sensible defaults.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            attributes: BTreeMap::new(),
            tab_index: -1,
            disabled: false,
            checked: false,
            selected: false,
            always_focusable: false,
            shadow_root: false,
            item: None,
        }
    }

    /// Set the element id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the `name` attribute (builder).
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_attribute("name", name)
    }

    /// Set the tab index (builder).
    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = tab_index;
        self
    }

    /// Set whether this element is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the checked state (builder).
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Mark this element focusable even while disabled (builder).
    pub fn always_focusable(mut self, always_focusable: bool) -> Self {
        self.always_focusable = always_focusable;
        self
    }

    /// Mark this element as an encapsulation boundary (builder).
    pub fn shadow_root(mut self, shadow_root: bool) -> Self {
        self.shadow_root = shadow_root;
        self
    }

    /// Expose a nested item through this wrapper (builder).
    pub fn wrapping(mut self, item: NodeId) -> Self {
        self.item = Some(item);
        self
    }

    /// Read an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_owned(), value.into());
    }

    /// Remove an attribute. Returns the old value if it was present.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }
}
