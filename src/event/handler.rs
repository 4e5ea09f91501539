//! Event dispatch: message queue and bubble path computation.
//!
//! [`EventDispatcher`] maintains a queue of [`Envelope`]s. The `bubble_path`
//! associated function computes the traversal order from a node upward for
//! bubble-phase delivery, honouring encapsulation boundaries.

use std::collections::VecDeque;

use super::message::Envelope;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// Queue-based event dispatcher.
///
/// Messages are enqueued via `push` and drained for processing via `drain`.
/// The dispatcher does not route messages itself; the page walks them through
/// the tree with `bubble_path`.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    queue: VecDeque<Envelope>,
}

impl EventDispatcher {
    /// Create a new, empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a message envelope for later processing.
    pub fn push(&mut self, envelope: Envelope) {
        ctrace!(
            message = envelope.message.message_name(),
            sender = ?envelope.sender,
            "enqueue"
        );
        self.queue.push_back(envelope);
    }

    /// Drain all pending messages. The queue is empty after this call.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    /// Number of pending messages.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterate pending messages without draining them.
    pub fn iter(&self) -> impl Iterator<Item = &Envelope> {
        self.queue.iter()
    }

    /// Compute the bubble path from `start` upward (inclusive).
    ///
    /// Returns `[start, parent, grandparent, ...]`. Unless `composed`, the
    /// path ends at the first shadow-root ancestor. If `start` does not exist
    /// in the tree, returns an empty vec.
    pub fn bubble_path(dom: &Dom, start: NodeId, composed: bool) -> Vec<NodeId> {
        if !dom.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        for ancestor in dom.ancestors(start) {
            path.push(ancestor);
            if !composed && dom.get(ancestor).is_some_and(|d| d.shadow_root) {
                break;
            }
        }
        path
    }
}

// ===========================================================================
// Tests
// ===========================================================================
