//! List items and the traversal helpers shared by list-like components.
//!
//! An item is active when its `tab_index` is `0`. Every helper here re-reads
//! the collection it is handed; nothing is cached between calls.

use crate::dom::{ElementTree, Focusable, NodeData, NodeId};

/// Capability set an element needs to take part in list navigation.
pub trait ListItem: Focusable {
    /// For wrapper elements, the nested item they expose.
    fn nested_item(&self) -> Option<NodeId> {
        None
    }
}

impl ListItem for NodeData {
    fn nested_item(&self) -> Option<NodeId> {
        self.item
    }
}

/// The currently active item and its position in the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveItem {
    pub id: NodeId,
    pub index: usize,
}

/// Default activatability: the item is not disabled.
pub fn is_item_not_disabled<I: ListItem>(item: &I) -> bool {
    !item.is_disabled()
}

fn check<T>(tree: &T, id: NodeId, is_activatable: &dyn Fn(&T::Element) -> bool) -> bool
where
    T: ElementTree,
{
    tree.get(id).is_some_and(is_activatable)
}

fn set_tab_index<T>(tree: &mut T, id: NodeId, tab_index: i32)
where
    T: ElementTree,
    T::Element: ListItem,
{
    if let Some(item) = tree.get_mut(id) {
        item.set_tab_index(tab_index);
    }
}

/// Give `id` the roving tab stop and focus it.
pub fn activate<T>(tree: &mut T, id: NodeId)
where
    T: ElementTree,
    T::Element: ListItem,
{
    set_tab_index(tree, id, 0);
    tree.focus(id);
}

/// The first activatable item whose `tab_index` is `0`.
pub fn get_active_item<T>(
    tree: &T,
    items: &[NodeId],
    is_activatable: &dyn Fn(&T::Element) -> bool,
) -> Option<ActiveItem>
where
    T: ElementTree,
    T::Element: ListItem,
{
    items.iter().enumerate().find_map(|(index, &id)| {
        let item = tree.get(id)?;
        (item.tab_index() == 0 && is_activatable(item)).then_some(ActiveItem { id, index })
    })
}

pub fn get_first_activatable_item<T>(
    tree: &T,
    items: &[NodeId],
    is_activatable: &dyn Fn(&T::Element) -> bool,
) -> Option<NodeId>
where
    T: ElementTree,
{
    items
        .iter()
        .copied()
        .find(|&id| check(tree, id, is_activatable))
}

pub fn get_last_activatable_item<T>(
    tree: &T,
    items: &[NodeId],
    is_activatable: &dyn Fn(&T::Element) -> bool,
) -> Option<NodeId>
where
    T: ElementTree,
{
    items
        .iter()
        .rev()
        .copied()
        .find(|&id| check(tree, id, is_activatable))
}

/// The next activatable item after `index`.
///
/// Without `wrap`, stepping past the end yields `None`. When every other item
/// is skipped, the item at `index` itself is returned.
pub fn get_next_item<T>(
    tree: &T,
    items: &[NodeId],
    index: usize,
    is_activatable: &dyn Fn(&T::Element) -> bool,
    wrap: bool,
) -> Option<NodeId>
where
    T: ElementTree,
{
    let len = items.len();
    for step in 1..len {
        let next = (index + step) % len;
        if next < index && !wrap {
            return None;
        }
        if check(tree, items[next], is_activatable) {
            return Some(items[next]);
        }
    }
    items.get(index).copied()
}

/// The previous activatable item before `index`. Mirrors [`get_next_item`].
pub fn get_prev_item<T>(
    tree: &T,
    items: &[NodeId],
    index: usize,
    is_activatable: &dyn Fn(&T::Element) -> bool,
    wrap: bool,
) -> Option<NodeId>
where
    T: ElementTree,
{
    let len = items.len();
    for step in 1..len {
        let prev = (index + len - step) % len;
        if prev > index && !wrap {
            return None;
        }
        if check(tree, items[prev], is_activatable) {
            return Some(items[prev]);
        }
    }
    items.get(index).copied()
}

pub fn activate_first_item<T>(
    tree: &mut T,
    items: &[NodeId],
    is_activatable: &dyn Fn(&T::Element) -> bool,
) -> Option<NodeId>
where
    T: ElementTree,
    T::Element: ListItem,
{
    let first = get_first_activatable_item(tree, items, is_activatable)?;
    activate(tree, first);
    Some(first)
}

pub fn activate_last_item<T>(
    tree: &mut T,
    items: &[NodeId],
    is_activatable: &dyn Fn(&T::Element) -> bool,
) -> Option<NodeId>
where
    T: ElementTree,
    T::Element: ListItem,
{
    let last = get_last_activatable_item(tree, items, is_activatable)?;
    activate(tree, last);
    Some(last)
}

/// Activate the item after `active`, or the first item when nothing is active.
pub fn activate_next_item<T>(
    tree: &mut T,
    items: &[NodeId],
    active: Option<ActiveItem>,
    is_activatable: &dyn Fn(&T::Element) -> bool,
    wrap: bool,
) -> Option<NodeId>
where
    T: ElementTree,
    T::Element: ListItem,
{
    let Some(active) = active else {
        return activate_first_item(tree, items, is_activatable);
    };
    let next = get_next_item(tree, items, active.index, is_activatable, wrap)?;
    activate(tree, next);
    Some(next)
}

/// Activate the item before `active`, or the last item when nothing is active.
pub fn activate_previous_item<T>(
    tree: &mut T,
    items: &[NodeId],
    active: Option<ActiveItem>,
    is_activatable: &dyn Fn(&T::Element) -> bool,
    wrap: bool,
) -> Option<NodeId>
where
    T: ElementTree,
    T::Element: ListItem,
{
    let Some(active) = active else {
        return activate_last_item(tree, items, is_activatable);
    };
    let prev = get_prev_item(tree, items, active.index, is_activatable, wrap)?;
    activate(tree, prev);
    Some(prev)
}
