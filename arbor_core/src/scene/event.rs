// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node lifecycle listeners.

use alloc::boxed::Box;

use super::id::NodeId;

/// A lifecycle notification delivered to a node's listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeEvent {
    /// The node was attached to `parent`.
    Added {
        /// The new parent.
        parent: NodeId,
    },
    /// The node was detached from `parent`.
    Removed {
        /// The former parent.
        parent: NodeId,
    },
    /// The node is being destroyed. This is the last event it receives.
    Destroyed,
}

/// Handle returned by [`SceneGraph::on`](super::SceneGraph::on), used to
/// remove the listener again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u32);

/// A listener callback. Receives the node it is registered on.
pub type Listener = Box<dyn FnMut(NodeId, &NodeEvent)>;

pub(crate) struct ListenerEntry {
    pub(crate) id: ListenerId,
    pub(crate) callback: Listener,
}

pub(crate) fn emit(listeners: &mut [ListenerEntry], node: NodeId, event: &NodeEvent) {
    for entry in listeners {
        (entry.callback)(node, event);
    }
}
