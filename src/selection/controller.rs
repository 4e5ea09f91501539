//! Radio-like mutual exclusion between controls sharing a name and root.
//!
//! [`SingleSelectionController`] belongs to one host control. The host must
//! forward its lifecycle (connect/disconnect), its focus changes and its
//! keydowns, and must call [`handle_checked_change`] synchronously whenever
//! its checked state changes. In return the controller keeps at most one
//! member of the group checked and maintains the group's roving tab stop.
//!
//! [`handle_checked_change`]: SingleSelectionController::handle_checked_change

use crate::dom::{ElementTree, Focusable, NodeId};
use crate::event::handler::EventDispatcher;
use crate::event::input::{Key, KeyEvent};
use crate::event::message::{Change, Envelope};

use super::control::SelectionControl;
use super::registry::{GroupKey, SelectionGroups};

/// Everything a selection controller touches while handling one call.
pub struct SelectionContext<'a, T> {
    pub tree: &'a mut T,
    pub groups: &'a mut SelectionGroups,
    pub events: &'a mut EventDispatcher,
}

impl<'a, T> SelectionContext<'a, T> {
    pub fn new(
        tree: &'a mut T,
        groups: &'a mut SelectionGroups,
        events: &'a mut EventDispatcher,
    ) -> Self {
        Self {
            tree,
            groups,
            events,
        }
    }
}

/// Per-host single-selection controller.
#[derive(Debug, Clone)]
pub struct SingleSelectionController {
    host: NodeId,
    /// Root node captured on connect; cleared on disconnect.
    root: Option<NodeId>,
    /// The group the host is registered in while connected.
    group: Option<GroupKey>,
    focused: bool,
    listening: bool,
}

impl SingleSelectionController {
    pub fn new(host: NodeId) -> Self {
        Self {
            host,
            root: None,
            group: None,
            focused: false,
            listening: false,
        }
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    /// Whether the host is connected and its events are being handled.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Whether the host currently holds focus, as last reported.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The root node captured when the host connected.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn current_key<T>(&self, tree: &T) -> Option<GroupKey>
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        let root = self.root?;
        let name = tree.get(self.host)?.name()?;
        Some(GroupKey::new(root, name))
    }

    /// Every control in the host's group, host included, in document order.
    ///
    /// A host without a name, without a captured root, or disconnected forms
    /// a group of one.
    pub fn controls<T>(&self, tree: &T, groups: &SelectionGroups) -> Vec<NodeId>
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        if !tree.is_connected(self.host) {
            return vec![self.host];
        }
        match self.current_key(tree) {
            Some(key) => {
                let members = self.named_members(tree, groups, &key);
                if members.is_empty() {
                    vec![self.host]
                } else {
                    members
                }
            }
            None => vec![self.host],
        }
    }

    /// Registered members of `key` that still exist in the tree.
    fn named_members<T: ElementTree>(
        &self,
        tree: &T,
        groups: &SelectionGroups,
        key: &GroupKey,
    ) -> Vec<NodeId> {
        groups
            .members(key)
            .iter()
            .copied()
            .filter(|&id| tree.get(id).is_some())
            .collect()
    }

    /// The members of the host's registered group; empty when unnamed.
    fn named_siblings<T: ElementTree>(&self, tree: &T, groups: &SelectionGroups) -> Vec<NodeId> {
        match &self.group {
            Some(key) => self.named_members(tree, groups, key),
            None => Vec::new(),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// The host entered a tree.
    ///
    /// Captures the root, joins the group, and if the host is already checked
    /// it wins over any checked sibling.
    pub fn host_connected<T>(&mut self, cx: &mut SelectionContext<'_, T>)
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        self.root = cx.tree.root_node(self.host);
        self.listening = true;
        self.join_group(cx);
        cdebug!(host = ?self.host, group = ?self.group, "selection host connected");

        if cx.tree.get(self.host).is_some_and(|h| h.is_checked()) {
            self.uncheck_siblings(cx);
        }
        self.update_tab_indices(cx);
    }

    /// The host left its tree.
    ///
    /// The remaining siblings get their tab stops recomputed without it.
    pub fn host_disconnected<T>(&mut self, cx: &mut SelectionContext<'_, T>)
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        self.listening = false;
        self.focused = false;
        if let Some(key) = &self.group {
            cx.groups.unregister(key, self.host);
        }
        self.update_tab_indices(cx);
        cdebug!(host = ?self.host, group = ?self.group, "selection host disconnected");
        self.group = None;
        self.root = None;
    }

    fn join_group<T>(&mut self, cx: &mut SelectionContext<'_, T>)
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        self.group = self.current_key(&*cx.tree);
        if let Some(key) = &self.group {
            cx.groups.register(&*cx.tree, key.clone(), self.host);
        }
    }

    /// The host's `name` changed while connected: move it to its new group.
    pub fn handle_name_change<T>(&mut self, cx: &mut SelectionContext<'_, T>)
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        if !self.listening {
            return;
        }
        if let Some(old) = self.group.take() {
            cx.groups.unregister(&old, self.host);
            let remaining = self.named_members(&*cx.tree, &*cx.groups, &old);
            apply_tab_indices(cx.tree, &remaining, None);
        }
        self.join_group(cx);
        if cx.tree.get(self.host).is_some_and(|h| h.is_checked()) {
            self.uncheck_siblings(cx);
        }
        self.update_tab_indices(cx);
    }

    // ── Property and focus notifications ─────────────────────────────

    /// Must be called synchronously after the host's checked state changes.
    pub fn handle_checked_change<T>(&mut self, cx: &mut SelectionContext<'_, T>)
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        if !cx.tree.get(self.host).is_some_and(|h| h.is_checked()) {
            return;
        }
        self.uncheck_siblings(cx);
        self.update_tab_indices(cx);
    }

    pub fn handle_focus_in<T>(&mut self, cx: &mut SelectionContext<'_, T>)
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        self.focused = true;
        self.update_tab_indices(cx);
    }

    pub fn handle_focus_out<T>(&mut self, cx: &mut SelectionContext<'_, T>)
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        self.focused = false;
        self.update_tab_indices(cx);
    }

    fn uncheck_siblings<T>(&self, cx: &mut SelectionContext<'_, T>)
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        for sibling in self.named_siblings(&*cx.tree, &*cx.groups) {
            if sibling == self.host {
                continue;
            }
            if let Some(control) = cx.tree.get_mut(sibling) {
                control.set_checked(false);
            }
        }
    }

    /// Recompute the group's roving tab stop.
    ///
    /// The checked member takes it; failing that the focused host; failing
    /// that every member stays focusable. While listening this covers
    /// [`controls`](Self::controls), so an unnamed host is its own tab stop.
    /// After disconnect only the remaining registered siblings are updated.
    pub fn update_tab_indices<T>(&self, cx: &mut SelectionContext<'_, T>)
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        let siblings = if self.listening {
            self.controls(&*cx.tree, &*cx.groups)
        } else {
            self.named_siblings(&*cx.tree, &*cx.groups)
        };
        let focused_host = self.focused.then_some(self.host);
        apply_tab_indices(cx.tree, &siblings, focused_host);
    }

    // ── Keyboard ─────────────────────────────────────────────────────

    /// Move the selection with the arrow keys.
    ///
    /// Down and Up step forward and backward. Right steps forward in a
    /// left-to-right context and backward in a right-to-left one, Left the
    /// opposite. Disabled members are skipped and the scan wraps; returning
    /// to the host changes nothing. Returns the newly selected control.
    pub fn handle_keydown<T>(
        &mut self,
        cx: &mut SelectionContext<'_, T>,
        event: &mut KeyEvent,
    ) -> Option<NodeId>
    where
        T: ElementTree,
        T::Element: SelectionControl,
    {
        if !self.listening || !event.code.is_arrow() {
            return None;
        }
        let siblings = self.controls(&*cx.tree, &*cx.groups);
        if siblings.is_empty() {
            return None;
        }
        event.prevent_default();

        let is_rtl = cx.tree.direction(self.host).is_rtl();
        let forwards = match event.code {
            Key::Down => true,
            Key::Up => false,
            Key::Right => !is_rtl,
            Key::Left => is_rtl,
            _ => return None,
        };

        let len = siblings.len();
        let host_index = siblings.iter().position(|&s| s == self.host)?;
        let next = (1..len)
            .map(|step| {
                if forwards {
                    (host_index + step) % len
                } else {
                    (host_index + len - step) % len
                }
            })
            .map(|index| siblings[index])
            .find(|&id| cx.tree.get(id).is_some_and(|c| !c.is_disabled()))?;

        for &sibling in &siblings {
            if sibling == next {
                continue;
            }
            if let Some(control) = cx.tree.get_mut(sibling) {
                control.set_checked(false);
                control.set_tab_index(-1);
            }
            cx.tree.blur(sibling);
        }
        if let Some(control) = cx.tree.get_mut(next) {
            control.set_checked(true);
            control.set_tab_index(0);
        }
        cx.tree.focus(next);
        cx.events.push(Envelope::new(Change, next).composed());
        cdebug!(from = ?self.host, to = ?next, key = %event.code, "selection moved");
        Some(next)
    }
}

/// Roving tab stop for a group: the checked member, else `focused_host`,
/// else everyone.
fn apply_tab_indices<T>(tree: &mut T, siblings: &[NodeId], focused_host: Option<NodeId>)
where
    T: ElementTree,
    T::Element: SelectionControl,
{
    let checked = siblings
        .iter()
        .copied()
        .find(|&id| tree.get(id).is_some_and(|c| c.is_checked()));

    if let Some(focusable) = checked.or(focused_host) {
        if let Some(control) = tree.get_mut(focusable) {
            control.set_tab_index(0);
        }
        for &sibling in siblings {
            if sibling == focusable {
                continue;
            }
            if let Some(control) = tree.get_mut(sibling) {
                control.set_tab_index(-1);
            }
        }
        return;
    }

    for &sibling in siblings {
        if let Some(control) = tree.get_mut(sibling) {
            control.set_tab_index(0);
        }
    }
}
