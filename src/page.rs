//! Page: the document, its mounted components, and event routing.
//!
//! [`Page`] owns the [`Document`], the components mounted on its elements and
//! a [`LifecycleTracker`]. Structural edits made through the page fire
//! connect/disconnect for whole subtrees and slot changes on the parents whose
//! children changed. Input is routed the way a browser would: keydowns bubble
//! from the focused element, clicks focus their target first, focus changes
//! notify both sides, and queued messages bubble from their sender until a
//! component consumes them.

use std::collections::HashMap;

use crate::component::{Component, LifecycleTracker};
use crate::components::{DefaultFocus, List, Menu, Radio};
use crate::document::Document;
use crate::dom::{Direction, Dom, NodeData, NodeId};
use crate::error::{Error, Result};
use crate::event::handler::EventDispatcher;
use crate::event::input::{InputEvent, KeyEvent};
use crate::event::message::Envelope;

/// Upper bound on message rounds in one settle pass.
const MAX_SETTLE_ROUNDS: usize = 64;

// ---------------------------------------------------------------------------
// PageConfig
// ---------------------------------------------------------------------------

/// Page-wide defaults.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Direction set on the document body.
    pub direction: Direction,
    /// Whether lists and menus mounted through the page wrap around.
    pub wrap_navigation: bool,
    /// Focus behavior of menus mounted through the page.
    pub menu_default_focus: DefaultFocus,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Ltr,
            wrap_navigation: true,
            menu_default_focus: DefaultFocus::FirstItem,
        }
    }
}

impl PageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document direction (builder).
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set list and menu wraparound (builder).
    pub fn with_wrap_navigation(mut self, wrap: bool) -> Self {
        self.wrap_navigation = wrap;
        self
    }

    /// Set what menus focus when opened (builder).
    pub fn with_menu_default_focus(mut self, default_focus: DefaultFocus) -> Self {
        self.menu_default_focus = default_focus;
        self
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

pub struct Page {
    pub document: Document,
    pub lifecycle: LifecycleTracker,
    pub config: PageConfig,
    components: HashMap<NodeId, Box<dyn Component>>,
    /// Messages that finished routing, oldest first.
    delivered: Vec<Envelope>,
    body: NodeId,
}

impl Page {
    /// Create a page with an empty `body` as document root.
    pub fn new(config: PageConfig) -> Self {
        let mut document = Document::new();
        let body = document
            .dom
            .insert(NodeData::new("body").with_attribute("dir", config.direction.as_str()));
        Self {
            document,
            lifecycle: LifecycleTracker::new(),
            config,
            components: HashMap::new(),
            delivered: Vec::new(),
            body,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn dom(&self) -> &Dom {
        &self.document.dom
    }

    /// Direct tree access. Edits made here skip lifecycle and slot change
    /// notifications.
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.document.dom
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.document.dom.focused()
    }

    // ── Structure ────────────────────────────────────────────────────

    /// Create a detached element.
    pub fn create(&mut self, data: NodeData) -> NodeId {
        self.document.dom.insert(data)
    }

    /// Insert a new element as the last child of `parent`.
    pub fn insert(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId> {
        let id = self.document.dom.insert_child(parent, data)?;
        self.children_changed(parent);
        self.settle();
        Ok(id)
    }

    /// Move `node` with its subtree under `parent`.
    ///
    /// Components inside the subtree are disconnected from their old place
    /// and connected again if the new place is connected.
    pub fn append(&mut self, parent: NodeId, node: NodeId) -> Result<()> {
        if !self.document.dom.contains(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        if !self.document.dom.contains(node) {
            return Err(Error::NodeNotFound(node));
        }
        if self.document.dom.is_inclusive_ancestor(node, parent) {
            return Err(Error::WouldCycle { node, parent });
        }
        let old_parent = self.document.dom.parent(node);
        self.disconnect_subtree(node);
        self.document.dom.append_child(parent, node)?;
        self.sync_subtree(node);
        if let Some(old_parent) = old_parent.filter(|&p| p != parent) {
            self.children_changed(old_parent);
        }
        self.children_changed(parent);
        self.settle();
        Ok(())
    }

    /// Detach `node` from its parent. Its subtree stays intact.
    pub fn detach(&mut self, node: NodeId) -> Result<()> {
        let parent = self.document.dom.parent(node);
        self.document.dom.detach(node)?;
        self.sync_subtree(node);
        if let Some(parent) = parent {
            self.children_changed(parent);
        }
        self.settle();
        Ok(())
    }

    /// Detach `node` and drop it, its subtree and their components.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        self.detach(node)?;
        for id in self.document.dom.walk_depth_first(node) {
            self.components.remove(&id);
        }
        self.document.dom.remove(node);
        Ok(())
    }

    fn disconnect_subtree(&mut self, node: NodeId) {
        for id in self.document.dom.walk_depth_first(node) {
            if !self.lifecycle.on_disconnect(id) {
                continue;
            }
            if let Some(component) = self.components.get_mut(&id) {
                component.on_disconnect(&mut self.document);
            }
        }
    }

    /// Bring every component in `node`'s subtree in line with whether its
    /// host is connected.
    fn sync_subtree(&mut self, node: NodeId) {
        for id in self.document.dom.walk_depth_first(node) {
            let Some(component) = self.components.get_mut(&id) else {
                continue;
            };
            if self.document.dom.is_connected(id) {
                if self.lifecycle.on_connect(id) {
                    ctrace!(host = ?id, component = component.component_type(), "connect");
                    component.on_connect(&mut self.document);
                }
            } else if self.lifecycle.on_disconnect(id) {
                ctrace!(host = ?id, component = component.component_type(), "disconnect");
                component.on_disconnect(&mut self.document);
            }
        }
    }

    fn children_changed(&mut self, parent: NodeId) {
        if !self.lifecycle.is_connected(parent) {
            return;
        }
        if let Some(component) = self.components.get_mut(&parent) {
            component.on_slotchange(&mut self.document);
        }
        self.lifecycle.on_update(parent);
    }

    // ── Components ───────────────────────────────────────────────────

    /// Mount a component on its host. Connects it right away if the host is
    /// connected.
    pub fn mount(&mut self, component: impl Component + 'static) -> Result<NodeId> {
        self.mount_boxed(Box::new(component))
    }

    pub fn mount_boxed(&mut self, component: Box<dyn Component>) -> Result<NodeId> {
        let host = component.host();
        if !self.document.dom.contains(host) {
            return Err(Error::NodeNotFound(host));
        }
        if self.components.contains_key(&host) {
            return Err(Error::ComponentExists(host));
        }
        cdebug!(host = ?host, component = component.component_type(), "mount");
        self.components.insert(host, component);
        self.sync_subtree(host);
        self.settle();
        Ok(host)
    }

    /// Mount a [`List`] using the page's wraparound default.
    pub fn mount_list(&mut self, host: NodeId) -> Result<NodeId> {
        self.mount(List::with_wrap(host, self.config.wrap_navigation))
    }

    /// Mount a [`Menu`] using the page's wraparound and focus defaults.
    pub fn mount_menu(&mut self, host: NodeId) -> Result<NodeId> {
        let menu = Menu::new(host)
            .with_wrap(self.config.wrap_navigation)
            .with_default_focus(self.config.menu_default_focus);
        self.mount(menu)
    }

    pub fn mount_radio(&mut self, host: NodeId) -> Result<NodeId> {
        self.mount(Radio::new(host))
    }

    /// Remove the component mounted on `host`, disconnecting it first.
    pub fn unmount(&mut self, host: NodeId) -> Option<Box<dyn Component>> {
        let mut component = self.components.remove(&host)?;
        if self.lifecycle.on_disconnect(host) {
            component.on_disconnect(&mut self.document);
        }
        self.settle();
        Some(component)
    }

    pub fn component<C: Component + 'static>(&self, host: NodeId) -> Option<&C> {
        self.components.get(&host)?.as_any().downcast_ref::<C>()
    }

    pub fn component_mut<C: Component + 'static>(&mut self, host: NodeId) -> Option<&mut C> {
        self.components.get_mut(&host)?.as_any_mut().downcast_mut::<C>()
    }

    /// Run `f` against a typed component and the document, then deliver
    /// whatever it caused.
    pub fn with_component<C, R>(
        &mut self,
        host: NodeId,
        f: impl FnOnce(&mut C, &mut Document) -> R,
    ) -> Option<R>
    where
        C: Component + 'static,
    {
        let before = self.focused();
        let component = self
            .components
            .get_mut(&host)?
            .as_any_mut()
            .downcast_mut::<C>()?;
        let result = f(component, &mut self.document);
        self.sync_focus(before);
        self.settle();
        Some(result)
    }

    // ── Properties ───────────────────────────────────────────────────

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let data = self
            .document
            .dom
            .get_mut(id)
            .ok_or(Error::NodeNotFound(id))?;
        data.set_attribute(name, value);
        self.property_changed(id, name);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<()> {
        let data = self
            .document
            .dom
            .get_mut(id)
            .ok_or(Error::NodeNotFound(id))?;
        data.remove_attribute(name);
        self.property_changed(id, name);
        Ok(())
    }

    /// Set `checked` programmatically. No `Change` message is emitted.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<()> {
        let data = self
            .document
            .dom
            .get_mut(id)
            .ok_or(Error::NodeNotFound(id))?;
        data.checked = checked;
        self.property_changed(id, "checked");
        Ok(())
    }

    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> Result<()> {
        let data = self
            .document
            .dom
            .get_mut(id)
            .ok_or(Error::NodeNotFound(id))?;
        data.disabled = disabled;
        self.property_changed(id, "disabled");
        Ok(())
    }

    fn property_changed(&mut self, id: NodeId, name: &str) {
        let before = self.focused();
        if let Some(component) = self.components.get_mut(&id) {
            component.on_property_changed(&mut self.document, name);
        }
        self.lifecycle.on_update(id);
        self.sync_focus(before);
        self.settle();
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Route an input event to the focused element, or the body when nothing
    /// has focus.
    pub fn handle_input(&mut self, event: InputEvent) {
        let target = self.focused().unwrap_or(self.body);
        match event {
            InputEvent::Key(key) => {
                self.dispatch_key(key);
            }
            InputEvent::Click => {
                // The target exists: it is focused or the body.
                let _ = self.click(target);
            }
        }
    }

    /// Bubble a keydown from the focused element to the top of the document.
    ///
    /// Returns the event as the last handler left it.
    pub fn dispatch_key(&mut self, mut event: KeyEvent) -> KeyEvent {
        let before = self.focused();
        let target = before.unwrap_or(self.body);
        let path = EventDispatcher::bubble_path(&self.document.dom, target, true);
        ctrace!(key = %event.code, target = ?target, "keydown");
        for id in path {
            if let Some(component) = self.components.get_mut(&id) {
                component.on_key(&mut self.document, &mut event);
            }
        }
        self.sync_focus(before);
        self.settle();
        event
    }

    /// Click `target`: focus it, then notify components from it upward.
    ///
    /// Disabled elements swallow the click.
    pub fn click(&mut self, target: NodeId) -> Result<()> {
        let data = self
            .document
            .dom
            .get(target)
            .ok_or(Error::NodeNotFound(target))?;
        if data.disabled {
            return Ok(());
        }
        let before = self.focused();
        self.document.dom.focus(target);
        self.sync_focus(before);

        let before = self.focused();
        let path = EventDispatcher::bubble_path(&self.document.dom, target, true);
        for id in path {
            if let Some(component) = self.components.get_mut(&id) {
                component.on_click(&mut self.document, target);
            }
        }
        self.sync_focus(before);
        self.settle();
        Ok(())
    }

    /// Move focus to `id`. Returns `true` if focus changed.
    pub fn focus(&mut self, id: NodeId) -> bool {
        let before = self.focused();
        let changed = self.document.dom.focus(id);
        self.sync_focus(before);
        self.settle();
        changed
    }

    /// Drop focus entirely. Returns `true` if something was focused.
    pub fn blur(&mut self) -> bool {
        let Some(before) = self.focused() else {
            return false;
        };
        self.document.dom.blur(before);
        self.sync_focus(Some(before));
        self.settle();
        true
    }

    /// Fire focus-out and focus-in if focus moved away from `before`.
    ///
    /// Handlers may move focus again; each move is reported in turn.
    fn sync_focus(&mut self, mut before: Option<NodeId>) {
        for _ in 0..MAX_SETTLE_ROUNDS {
            let after = self.focused();
            if before == after {
                return;
            }
            if let Some(old) = before.filter(|&old| self.document.dom.is_connected(old)) {
                for id in EventDispatcher::bubble_path(&self.document.dom, old, true) {
                    if let Some(component) = self.components.get_mut(&id) {
                        component.on_focus_out(&mut self.document, old);
                    }
                }
            }
            if let Some(new) = after {
                for id in EventDispatcher::bubble_path(&self.document.dom, new, true) {
                    if let Some(component) = self.components.get_mut(&id) {
                        component.on_focus_in(&mut self.document, new);
                    }
                }
            }
            before = after;
        }
    }

    // ── Messages ─────────────────────────────────────────────────────

    /// Deliver queued messages until the queue stays empty.
    fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_ROUNDS {
            let pending = self.document.dispatcher.drain();
            if pending.is_empty() {
                return;
            }
            for envelope in pending {
                let before = self.focused();
                self.route(envelope);
                self.sync_focus(before);
            }
        }
        cdebug!(
            pending = self.document.dispatcher.pending_count(),
            "message delivery did not settle"
        );
    }

    fn route(&mut self, mut envelope: Envelope) {
        let path = match envelope.target {
            Some(target) => vec![target],
            None => EventDispatcher::bubble_path(
                &self.document.dom,
                envelope.sender,
                envelope.composed,
            ),
        };
        for id in path {
            let Some(component) = self.components.get_mut(&id) else {
                continue;
            };
            if component.on_message(&mut self.document, &envelope) {
                ctrace!(
                    message = envelope.message.message_name(),
                    handler = ?id,
                    "message consumed"
                );
                envelope.mark_handled();
                break;
            }
        }
        self.delivered.push(envelope);
    }

    /// Take every message delivered so far, oldest first.
    pub fn take_messages(&mut self) -> Vec<Envelope> {
        std::mem::take(&mut self.delivered)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(PageConfig::default())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
