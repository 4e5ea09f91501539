//! Input event types, decoupled from any particular backend.
//!
//! Defines [`Key`], [`Modifiers`], [`KeyEvent`] and [`InputEvent`]. Keys can be
//! parsed from DOM `KeyboardEvent.key` names (`"ArrowDown"`, `"Home"`, ...) or
//! converted from crossterm events, so terminal hosts can drive the
//! controllers directly.

use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

impl Key {
    /// Whether this is one of the four arrow keys.
    pub fn is_arrow(self) -> bool {
        matches!(self, Key::Left | Key::Right | Key::Up | Key::Down)
    }
}

impl fmt::Display for Key {
    /// Formats the DOM `KeyboardEvent.key` name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Enter => f.write_str("Enter"),
            Key::Escape => f.write_str("Escape"),
            Key::Tab | Key::BackTab => f.write_str("Tab"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Left => f.write_str("ArrowLeft"),
            Key::Right => f.write_str("ArrowRight"),
            Key::Up => f.write_str("ArrowUp"),
            Key::Down => f.write_str("ArrowDown"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::F(n) => write!(f, "F{n}"),
        }
    }
}

/// Error returned when a key name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name: {0:?}")]
pub struct KeyParseError(pub String);

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => match s.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                        Some(n) if (1..=24).contains(&n) => Key::F(n),
                        _ => return Err(KeyParseError(s.to_owned())),
                    },
                }
            }
        };
        Ok(key)
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keydown event with key, modifiers, and a default-prevented flag.
///
/// Handlers along the bubble path see the same event; once one of them calls
/// [`prevent_default`](KeyEvent::prevent_default) the navigation controllers
/// further up leave it alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            default_prevented: false,
        }
    }

    /// A key event without modifiers.
    pub fn key(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// Parse a DOM key name into an unmodified key event.
    pub fn named(name: &str) -> Result<Self, KeyParseError> {
        name.parse().map(Self::key)
    }

    /// Mark the event as handled.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event delivered to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Primary-button activation of the target element.
    Click,
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        let code = match ct.code {
            crossterm::event::KeyCode::Char(c) => Key::Char(c),
            crossterm::event::KeyCode::Enter => Key::Enter,
            crossterm::event::KeyCode::Esc => Key::Escape,
            crossterm::event::KeyCode::Tab => Key::Tab,
            crossterm::event::KeyCode::BackTab => Key::BackTab,
            crossterm::event::KeyCode::Backspace => Key::Backspace,
            crossterm::event::KeyCode::Delete => Key::Delete,
            crossterm::event::KeyCode::Left => Key::Left,
            crossterm::event::KeyCode::Right => Key::Right,
            crossterm::event::KeyCode::Up => Key::Up,
            crossterm::event::KeyCode::Down => Key::Down,
            crossterm::event::KeyCode::Home => Key::Home,
            crossterm::event::KeyCode::End => Key::End,
            crossterm::event::KeyCode::PageUp => Key::PageUp,
            crossterm::event::KeyCode::PageDown => Key::PageDown,
            crossterm::event::KeyCode::F(n) => Key::F(n),
            // Unsupported codes fall back to Escape.
            _ => Key::Escape,
        };
        KeyEvent::new(code, convert_modifiers(ct.modifiers))
    }
}

/// Convert a crossterm event into an [`InputEvent`].
///
/// Only key presses and repeats map to input; releases and non-key events
/// return `None`.
pub fn try_from_crossterm(event: crossterm::event::Event) -> Option<InputEvent> {
    match event {
        crossterm::event::Event::Key(ke) if ke.kind != crossterm::event::KeyEventKind::Release => {
            Some(InputEvent::Key(KeyEvent::from(ke)))
        }
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Modifiers ────────────────────────────────────────────────────

    #[test]
    fn modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::ALT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::SHIFT));
        assert_eq!(mods & Modifiers::CTRL, Modifiers::CTRL);
        assert!(Modifiers::NONE.is_empty());
    }

    // ── Key names ────────────────────────────────────────────────────

    #[test]
    fn parse_dom_key_names() {
        assert_eq!("ArrowDown".parse::<Key>(), Ok(Key::Down));
        assert_eq!("ArrowLeft".parse::<Key>(), Ok(Key::Left));
        assert_eq!("Home".parse::<Key>(), Ok(Key::Home));
        assert_eq!("End".parse::<Key>(), Ok(Key::End));
        assert_eq!("Esc".parse::<Key>(), Ok(Key::Escape));
        assert_eq!(" ".parse::<Key>(), Ok(Key::Char(' ')));
        assert_eq!("F12".parse::<Key>(), Ok(Key::F(12)));
    }

    #[test]
    fn parse_unknown_key_name() {
        let err = "Hyper".parse::<Key>().unwrap_err();
        assert_eq!(err, KeyParseError("Hyper".to_owned()));
        assert!(err.to_string().contains("Hyper"));
        assert!("F99".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn display_uses_dom_names() {
        for key in [Key::Up, Key::Down, Key::Left, Key::Right, Key::Home, Key::End] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
        assert_eq!(Key::Right.to_string(), "ArrowRight");
    }

    #[test]
    fn is_arrow() {
        assert!(Key::Left.is_arrow());
        assert!(Key::Down.is_arrow());
        assert!(!Key::Home.is_arrow());
    }

    // ── KeyEvent ─────────────────────────────────────────────────────

    #[test]
    fn prevent_default_sticks() {
        let mut ke = KeyEvent::key(Key::Down);
        assert!(!ke.default_prevented());
        ke.prevent_default();
        assert!(ke.default_prevented());
    }

    #[test]
    fn named_event() {
        let ke = KeyEvent::named("ArrowUp").unwrap();
        assert_eq!(ke.code, Key::Up);
        assert!(ke.modifiers.is_empty());
        assert!(KeyEvent::named("Nope").is_err());
    }

    // ── crossterm ────────────────────────────────────────────────────

    #[test]
    fn from_crossterm_arrows() {
        for (ct_code, expected) in [
            (crossterm::event::KeyCode::Left, Key::Left),
            (crossterm::event::KeyCode::Right, Key::Right),
            (crossterm::event::KeyCode::Up, Key::Up),
            (crossterm::event::KeyCode::Down, Key::Down),
            (crossterm::event::KeyCode::Home, Key::Home),
            (crossterm::event::KeyCode::End, Key::End),
        ] {
            let ct = crossterm::event::KeyEvent::new(ct_code, crossterm::event::KeyModifiers::NONE);
            let ke = KeyEvent::from(ct);
            assert_eq!(ke.code, expected);
            assert!(!ke.default_prevented());
        }
    }

    #[test]
    fn from_crossterm_modifiers() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('A'),
            crossterm::event::KeyModifiers::SHIFT | crossterm::event::KeyModifiers::ALT,
        );
        let ke = KeyEvent::from(ct);
        assert!(ke.modifiers.contains(Modifiers::SHIFT));
        assert!(ke.modifiers.contains(Modifiers::ALT));
        assert!(!ke.modifiers.contains(Modifiers::CTRL));
    }

    #[test]
    fn try_from_crossterm_filters() {
        let press = crossterm::event::Event::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Down,
            crossterm::event::KeyModifiers::NONE,
        ));
        assert_eq!(
            try_from_crossterm(press),
            Some(InputEvent::Key(KeyEvent::key(Key::Down)))
        );
        assert_eq!(try_from_crossterm(crossterm::event::Event::FocusGained), None);
        assert_eq!(
            try_from_crossterm(crossterm::event::Event::Resize(80, 24)),
            None
        );
    }
}
