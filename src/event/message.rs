//! Message trait, envelope, and built-in messages.
//!
//! The [`Message`] trait is object-safe and supports downcasting via `Any`.
//! [`Envelope`] wraps a boxed message with routing metadata (sender, target,
//! whether it crosses encapsulation boundaries). Built-in messages:
//! [`Change`], [`RequestActivation`], [`DeactivateItems`], [`Custom`].

use std::any::Any;

use crate::dom::node::NodeId;

// ---------------------------------------------------------------------------
// Message trait
// ---------------------------------------------------------------------------

/// Object-safe message trait.
pub trait Message: Send + 'static {
    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Human-readable name for this message type.
    fn message_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Wraps a boxed message with routing metadata.
pub struct Envelope {
    /// The message payload.
    pub message: Box<dyn Message>,
    /// The node that sent this message.
    pub sender: NodeId,
    /// If `Some`, the message is targeted at a specific node.
    /// If `None`, the message bubbles up from the sender.
    pub target: Option<NodeId>,
    /// Whether bubbling continues past shadow-root boundaries.
    pub composed: bool,
    /// Whether this message has been handled (stops propagation).
    pub handled: bool,
}

impl Envelope {
    /// Create a new envelope that bubbles from the sender within its root.
    pub fn new(message: impl Message, sender: NodeId) -> Self {
        Self {
            message: Box::new(message),
            sender,
            target: None,
            composed: false,
            handled: false,
        }
    }

    /// Create a new envelope targeted at a specific node.
    pub fn targeted(message: impl Message, sender: NodeId, target: NodeId) -> Self {
        Self {
            target: Some(target),
            ..Self::new(message, sender)
        }
    }

    /// Let the envelope bubble across encapsulation boundaries (builder).
    pub fn composed(mut self) -> Self {
        self.composed = true;
        self
    }

    /// Attempt to downcast the message to a concrete type.
    pub fn downcast_ref<T: Message + 'static>(&self) -> Option<&T> {
        self.message.as_any().downcast_ref::<T>()
    }

    /// Whether the payload is a `T`.
    pub fn is<T: Message + 'static>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Mark this envelope as handled, stopping further propagation.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("message_name", &self.message.message_name())
            .field("sender", &self.sender)
            .field("target", &self.target)
            .field("composed", &self.composed)
            .field("handled", &self.handled)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Built-in messages
// ---------------------------------------------------------------------------

/// A selection control changed its checked state through user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change;

impl Message for Change {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "change"
    }
}

/// An item asks its list to make it the single active item (e.g. on click).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestActivation;

impl Message for RequestActivation {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "request-activation"
    }
}

/// A sibling list or submenu asks the receiving list to deactivate all its
/// items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeactivateItems;

impl Message for DeactivateItems {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "deactivate-items"
    }
}

/// User-defined string message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Custom(pub String);

impl Custom {
    /// Create a new custom message.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Message for Custom {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        &self.0
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_id(sm: &mut SlotMap<NodeId, ()>) -> NodeId {
        sm.insert(())
    }

    #[test]
    fn builtin_names() {
        assert_eq!(Change.message_name(), "change");
        assert_eq!(RequestActivation.message_name(), "request-activation");
        assert_eq!(DeactivateItems.message_name(), "deactivate-items");
        assert_eq!(Custom::new("opened").message_name(), "opened");
    }

    #[test]
    fn envelope_new_bubbling() {
        let mut sm = SlotMap::with_key();
        let sender = make_id(&mut sm);
        let env = Envelope::new(Change, sender);
        assert_eq!(env.sender, sender);
        assert!(env.target.is_none());
        assert!(!env.composed);
        assert!(!env.handled);
    }

    #[test]
    fn envelope_targeted_and_composed() {
        let mut sm = SlotMap::with_key();
        let sender = make_id(&mut sm);
        let target = make_id(&mut sm);
        let env = Envelope::targeted(DeactivateItems, sender, target).composed();
        assert_eq!(env.target, Some(target));
        assert!(env.composed);
    }

    #[test]
    fn envelope_downcast() {
        let mut sm = SlotMap::with_key();
        let sender = make_id(&mut sm);
        let env = Envelope::new(Custom::new("x"), sender);
        assert_eq!(env.downcast_ref::<Custom>().map(|c| c.0.as_str()), Some("x"));
        assert!(!env.is::<Change>());
    }

    #[test]
    fn envelope_mark_handled() {
        let mut sm = SlotMap::with_key();
        let mut env = Envelope::new(Change, make_id(&mut sm));
        env.mark_handled();
        assert!(env.handled);
    }

    #[test]
    fn envelope_debug_shows_name() {
        let mut sm = SlotMap::with_key();
        let env = Envelope::new(RequestActivation, make_id(&mut sm));
        let dbg = format!("{env:?}");
        assert!(dbg.contains("request-activation"));
    }
}
