// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by tree operations.

use core::fmt;

use super::id::NodeId;

/// A rejected tree or mask operation. The graph is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The target node's kind cannot hold children.
    NotAContainer(NodeId),
    /// Attaching `child` under `parent` would make a node its own ancestor.
    CycleDetected {
        /// The node being attached.
        child: NodeId,
        /// The requested parent.
        parent: NodeId,
    },
    /// A child index past the end of the child list.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The child count at the time of the call.
        len: usize,
    },
    /// A node cannot be masked by itself or by one of its ancestors.
    InvalidMask {
        /// The node being masked.
        node: NodeId,
        /// The rejected mask.
        mask: NodeId,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAContainer(id) => write!(f, "node {id} cannot hold children"),
            Self::CycleDetected { child, parent } => {
                write!(f, "attaching {child} under {parent} would create a cycle")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "child index {index} out of bounds (len {len})")
            }
            Self::InvalidMask { node, mask } => {
                write!(f, "node {mask} cannot mask {node}: it is the node or an ancestor")
            }
        }
    }
}

impl core::error::Error for SceneError {}
