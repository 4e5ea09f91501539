//! Pilot: programmatic interaction with a headless [`Page`].
//!
//! The `Pilot` wraps a page and offers the input a user would produce (key
//! presses, clicks, focus moves) plus quick reads of the resulting state.
//!
//! # Examples
//!
//! ```
//! use material_controls::dom::NodeData;
//! use material_controls::event::Key;
//! use material_controls::testing::Pilot;
//!
//! let mut pilot = Pilot::new();
//! let body = pilot.page().body();
//! let list = pilot.page_mut().insert(body, NodeData::new("md-list")).unwrap();
//! let a = pilot.page_mut().insert(list, NodeData::new("md-list-item")).unwrap();
//! let b = pilot.page_mut().insert(list, NodeData::new("md-list-item")).unwrap();
//! pilot.page_mut().mount_list(list).unwrap();
//!
//! pilot.focus(a);
//! pilot.press(Key::Down);
//! assert_eq!(pilot.focused(), Some(b));
//! ```

use crate::dom::NodeId;
use crate::error::Result;
use crate::event::input::{self, InputEvent, Key, KeyEvent, KeyParseError, Modifiers};
use crate::page::{Page, PageConfig};

/// A headless page driver for tests.
pub struct Pilot {
    page: Page,
}

impl Pilot {
    pub fn new() -> Self {
        Self::with_config(PageConfig::default())
    }

    pub fn with_config(config: PageConfig) -> Self {
        Self {
            page: Page::new(config),
        }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Press `key` with no modifiers. Returns whether a handler prevented the
    /// default action.
    pub fn press(&mut self, key: Key) -> bool {
        self.press_with(key, Modifiers::NONE)
    }

    pub fn press_with(&mut self, key: Key, modifiers: Modifiers) -> bool {
        self.page
            .dispatch_key(KeyEvent::new(key, modifiers))
            .default_prevented()
    }

    /// Press a key by its DOM name, e.g. `"ArrowDown"`.
    pub fn press_named(&mut self, name: &str) -> std::result::Result<bool, KeyParseError> {
        let key: Key = name.parse()?;
        Ok(self.press(key))
    }

    /// Press each key in turn.
    pub fn press_all(&mut self, keys: &[Key]) {
        for &key in keys {
            self.press(key);
        }
    }

    pub fn click(&mut self, target: NodeId) -> Result<()> {
        self.page.click(target)
    }

    pub fn focus(&mut self, target: NodeId) -> bool {
        self.page.focus(target)
    }

    /// Feed a raw crossterm event, as a terminal host would. Returns `false`
    /// when the event carries no input for the page.
    pub fn feed(&mut self, event: crossterm::event::Event) -> bool {
        match input::try_from_crossterm(event) {
            Some(input) => {
                self.page.handle_input(input);
                true
            }
            None => false,
        }
    }

    /// Click whatever currently has focus.
    pub fn click_focused(&mut self) {
        self.page.handle_input(InputEvent::Click);
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.page.focused()
    }

    /// Tab indices of `ids`, in order. Missing nodes read as `i32::MIN`.
    pub fn tab_indices(&self, ids: &[NodeId]) -> Vec<i32> {
        ids.iter()
            .map(|&id| self.page.dom().get(id).map_or(i32::MIN, |d| d.tab_index))
            .collect()
    }

    /// Checked flags of `ids`, in order.
    pub fn checked(&self, ids: &[NodeId]) -> Vec<bool> {
        ids.iter()
            .map(|&id| self.page.dom().get(id).is_some_and(|d| d.checked))
            .collect()
    }

    /// Names of messages delivered since the last call.
    pub fn take_message_names(&mut self) -> Vec<String> {
        self.page
            .take_messages()
            .iter()
            .map(|env| env.message.message_name().to_owned())
            .collect()
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}
