//! Keyboard navigation over a dynamic collection of list items.
//!
//! The controller owns no items and caches nothing: every operation re-reads
//! the collection through the configured supplier, so children may be added,
//! removed or reordered between calls.

use crate::dom::{ElementTree, Focusable, NodeId};
use crate::event::input::{Key, KeyEvent};

use super::item::{self, ListItem};

/// Predicate over a single element.
pub type ElementPredicate<E> = Box<dyn Fn(&E) -> bool>;

/// Callback mutating one item of the tree.
pub type ItemCallback<T> = Box<dyn Fn(&mut T, NodeId)>;

/// Keys a list reacts to by default: the four arrows, Home and End.
pub fn is_navigable_key(key: Key) -> bool {
    key.is_arrow() || matches!(key, Key::Home | Key::End)
}

// ---------------------------------------------------------------------------
// ListNavigationConfig
// ---------------------------------------------------------------------------

/// Wiring supplied by the component that owns the list.
pub struct ListNavigationConfig<T: ElementTree> {
    is_item: ElementPredicate<T::Element>,
    get_possible_items: Box<dyn Fn(&T) -> Vec<NodeId>>,
    is_rtl: Box<dyn Fn(&T) -> bool>,
    deactivate_item: ItemCallback<T>,
    activate_item: ItemCallback<T>,
    is_navigable_key: Box<dyn Fn(Key) -> bool>,
    is_activatable: ElementPredicate<T::Element>,
    wrap_navigation: Box<dyn Fn() -> bool>,
}

impl<T> ListNavigationConfig<T>
where
    T: ElementTree + 'static,
    T::Element: ListItem + 'static,
{
    /// Create a config from the two required pieces: how to recognise an
    /// item, and where the raw child collection comes from.
    ///
    /// Defaults: left-to-right, activation toggles the tab stop only, arrows
    /// plus Home/End are navigable, disabled items are skipped, navigation
    /// wraps.
    pub fn new(
        is_item: impl Fn(&T::Element) -> bool + 'static,
        get_possible_items: impl Fn(&T) -> Vec<NodeId> + 'static,
    ) -> Self {
        Self {
            is_item: Box::new(is_item),
            get_possible_items: Box::new(get_possible_items),
            is_rtl: Box::new(|_: &T| false),
            deactivate_item: Box::new(|tree: &mut T, id: NodeId| {
                if let Some(item) = tree.get_mut(id) {
                    item.set_tab_index(-1);
                }
            }),
            activate_item: Box::new(|tree: &mut T, id: NodeId| {
                if let Some(item) = tree.get_mut(id) {
                    item.set_tab_index(0);
                }
            }),
            is_navigable_key: Box::new(is_navigable_key),
            is_activatable: Box::new(item::is_item_not_disabled::<T::Element>),
            wrap_navigation: Box::new(|| true),
        }
    }

    /// Set the right-to-left query, evaluated on every keydown (builder).
    pub fn rtl(mut self, is_rtl: impl Fn(&T) -> bool + 'static) -> Self {
        self.is_rtl = Box::new(is_rtl);
        self
    }

    /// Set the item activation callback (builder).
    pub fn on_activate(mut self, activate: impl Fn(&mut T, NodeId) + 'static) -> Self {
        self.activate_item = Box::new(activate);
        self
    }

    /// Set the item deactivation callback (builder).
    pub fn on_deactivate(mut self, deactivate: impl Fn(&mut T, NodeId) + 'static) -> Self {
        self.deactivate_item = Box::new(deactivate);
        self
    }

    /// Set which keys the controller handles (builder).
    pub fn navigable_keys(mut self, is_navigable: impl Fn(Key) -> bool + 'static) -> Self {
        self.is_navigable_key = Box::new(is_navigable);
        self
    }

    /// Override which items may become active during traversal (builder).
    pub fn activatable(mut self, is_activatable: impl Fn(&T::Element) -> bool + 'static) -> Self {
        self.is_activatable = Box::new(is_activatable);
        self
    }

    /// Set whether traversal wraps around the ends (builder).
    pub fn wrap_navigation(mut self, wrap: impl Fn() -> bool + 'static) -> Self {
        self.wrap_navigation = Box::new(wrap);
        self
    }
}

// ---------------------------------------------------------------------------
// ListNavigationController
// ---------------------------------------------------------------------------

/// Roving-tabindex keyboard navigation for lists and menus.
pub struct ListNavigationController<T: ElementTree> {
    config: ListNavigationConfig<T>,
}

impl<T> ListNavigationController<T>
where
    T: ElementTree,
    T::Element: ListItem,
{
    pub fn new(config: ListNavigationConfig<T>) -> Self {
        Self { config }
    }

    /// The current items: possible items that pass `is_item`, with wrappers
    /// unwrapped one level.
    pub fn items(&self, tree: &T) -> Vec<NodeId> {
        let is_item = &self.config.is_item;
        let mut items = Vec::new();
        for candidate in (self.config.get_possible_items)(tree) {
            let Some(element) = tree.get(candidate) else {
                continue;
            };
            if is_item(element) {
                items.push(candidate);
                continue;
            }
            if let Some(inner) = element.nested_item() {
                if tree.get(inner).is_some_and(is_item) {
                    items.push(inner);
                }
            }
        }
        items
    }

    /// Handle a keydown on the list container.
    ///
    /// Returns the newly activated item, if the key moved activation.
    pub fn handle_keydown(&self, tree: &mut T, event: &mut KeyEvent) -> Option<NodeId> {
        let key = event.code;
        if event.default_prevented() || !(self.config.is_navigable_key)(key) {
            return None;
        }
        let items = self.items(tree);
        if items.is_empty() {
            return None;
        }
        let is_activatable = &*self.config.is_activatable;
        let active = item::get_active_item(tree, &items, is_activatable);
        event.prevent_default();

        let is_rtl = (self.config.is_rtl)(tree);
        let (inline_previous, inline_next) = if is_rtl {
            (Key::Right, Key::Left)
        } else {
            (Key::Left, Key::Right)
        };
        let wrap = (self.config.wrap_navigation)();

        let next = if key == Key::Down || key == inline_next {
            item::activate_next_item(tree, &items, active, is_activatable, wrap)
        } else if key == Key::Up || key == inline_previous {
            item::activate_previous_item(tree, &items, active, is_activatable, wrap)
        } else if key == Key::Home {
            item::activate_first_item(tree, &items, is_activatable)
        } else if key == Key::End {
            item::activate_last_item(tree, &items, is_activatable)
        } else {
            None
        };

        cdebug!(key = %key, rtl = is_rtl, from = ?active.map(|a| a.id), to = ?next, "list keydown");
        self.clear_previous(tree, active, next);
        next
    }

    /// Activate the item after the active one, as if ArrowDown was pressed.
    pub fn activate_next_item(&self, tree: &mut T) -> Option<NodeId> {
        let items = self.items(tree);
        let is_activatable = &*self.config.is_activatable;
        let active = item::get_active_item(tree, &items, is_activatable);
        let wrap = (self.config.wrap_navigation)();
        let next = item::activate_next_item(tree, &items, active, is_activatable, wrap);
        self.clear_previous(tree, active, next);
        next
    }

    /// Activate the item before the active one, as if ArrowUp was pressed.
    pub fn activate_previous_item(&self, tree: &mut T) -> Option<NodeId> {
        let items = self.items(tree);
        let is_activatable = &*self.config.is_activatable;
        let active = item::get_active_item(tree, &items, is_activatable);
        let wrap = (self.config.wrap_navigation)();
        let prev = item::activate_previous_item(tree, &items, active, is_activatable, wrap);
        self.clear_previous(tree, active, prev);
        prev
    }

    /// Activate the first activatable item. Used to seed focus on open.
    pub fn activate_first_item(&self, tree: &mut T) -> Option<NodeId> {
        let items = self.items(tree);
        let is_activatable = &*self.config.is_activatable;
        let active = item::get_active_item(tree, &items, is_activatable);
        let first = item::activate_first_item(tree, &items, is_activatable);
        self.clear_previous(tree, active, first);
        first
    }

    /// Activate the last activatable item. Used to seed focus on open.
    pub fn activate_last_item(&self, tree: &mut T) -> Option<NodeId> {
        let items = self.items(tree);
        let is_activatable = &*self.config.is_activatable;
        let active = item::get_active_item(tree, &items, is_activatable);
        let last = item::activate_last_item(tree, &items, is_activatable);
        self.clear_previous(tree, active, last);
        last
    }

    fn clear_previous(&self, tree: &mut T, active: Option<item::ActiveItem>, next: Option<NodeId>) {
        if let (Some(active), Some(next)) = (active, next) {
            if active.id != next {
                if let Some(previous) = tree.get_mut(active.id) {
                    previous.set_tab_index(-1);
                }
            }
        }
    }

    /// Deactivate every current item.
    pub fn on_deactivate_items(&self, tree: &mut T) {
        for id in self.items(tree) {
            (self.config.deactivate_item)(tree, id);
        }
    }

    /// Make `target` the only active item and focus it.
    pub fn on_request_activation(&self, tree: &mut T, target: NodeId) {
        self.on_deactivate_items(tree);
        (self.config.activate_item)(tree, target);
        tree.focus(target);
    }

    /// Re-derive the roving tab stop after the collection changed.
    ///
    /// The first enabled item that already holds a tab stop keeps it and all
    /// other items lose theirs. Without one, the first activatable item gets
    /// the tab stop.
    pub fn on_slotchange(&self, tree: &mut T) {
        let items = self.items(tree);
        let mut encountered_activated = false;
        for &id in &items {
            let Some(item) = tree.get_mut(id) else {
                continue;
            };
            let is_activated = !item.is_disabled() && item.tab_index() > -1;
            if is_activated && !encountered_activated {
                encountered_activated = true;
                item.set_tab_index(0);
                continue;
            }
            item.set_tab_index(-1);
        }
        if encountered_activated {
            return;
        }
        let first = item::get_first_activatable_item(tree, &items, &*self.config.is_activatable);
        if let Some(first) = first {
            if let Some(item) = tree.get_mut(first) {
                item.set_tab_index(0);
            }
        }
        ctrace!(items = items.len(), first = ?first, "list slotchange");
    }
}

// ===========================================================================
// Tests
// ===========================================================================
