//! Component lifecycle: connect, disconnect, update.
//!
//! [`LifecycleTracker`] records which component hosts are currently connected
//! and queues the transitions so a host application can observe them.

use std::collections::HashSet;

use crate::dom::node::NodeId;

/// Transitions in a component's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The host was connected to the document.
    Connected { node_id: NodeId },
    /// The host left the document.
    Disconnected { node_id: NodeId },
    /// The host's state changed and its presentation is stale.
    Update { node_id: NodeId },
}

/// Tracks connected hosts and accumulates lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    connected: HashSet<NodeId>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a connection. Returns `false` (and queues nothing) if `id` was
    /// already connected.
    pub fn on_connect(&mut self, id: NodeId) -> bool {
        let inserted = self.connected.insert(id);
        if inserted {
            self.pending.push(LifecycleEvent::Connected { node_id: id });
        }
        inserted
    }

    /// Record a disconnection. Returns `false` if `id` was not connected.
    pub fn on_disconnect(&mut self, id: NodeId) -> bool {
        let removed = self.connected.remove(&id);
        if removed {
            self.pending.push(LifecycleEvent::Disconnected { node_id: id });
        }
        removed
    }

    /// Record that a connected host needs updating. No-op otherwise.
    pub fn on_update(&mut self, id: NodeId) {
        if self.connected.contains(&id) {
            self.pending.push(LifecycleEvent::Update { node_id: id });
        }
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        self.connected.contains(&id)
    }

    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }

    /// Drain all pending events in order of occurrence.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
