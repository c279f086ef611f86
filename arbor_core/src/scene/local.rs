// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds in a node's own coordinate frame.

use core::mem;
use core::ops::{Deref, DerefMut};

use kurbo::Rect;

use crate::trace::{DetachedQuery, DetachedQueryEvent};
use crate::transform::Transform;

use super::SceneGraph;
use super::id::NodeId;

/// Runs a node as a parentless root with an identity transform.
///
/// On creation the node's parent link and transform are swapped out; on drop
/// (including during unwinding) the exact originals are put back and the
/// node's bounds are invalidated. The parent's child list is never touched,
/// so the swap is invisible outside the scope.
struct DetachedScope<'a> {
    graph: &'a mut SceneGraph,
    id: NodeId,
    saved_parent: Option<NodeId>,
    saved_transform: Option<Transform>,
}

impl<'a> DetachedScope<'a> {
    fn enter(graph: &'a mut SceneGraph, id: NodeId) -> Self {
        let node = graph.node_mut(id);
        let mode = node.transform.mode();
        let saved_parent = node.parent.take();
        let saved_transform = mem::replace(&mut node.transform, Transform::new(mode));
        Self {
            graph,
            id,
            saved_parent,
            saved_transform: Some(saved_transform),
        }
    }
}

impl Deref for DetachedScope<'_> {
    type Target = SceneGraph;

    fn deref(&self) -> &SceneGraph {
        self.graph
    }
}

impl DerefMut for DetachedScope<'_> {
    fn deref_mut(&mut self) -> &mut SceneGraph {
        self.graph
    }
}

impl Drop for DetachedScope<'_> {
    fn drop(&mut self) {
        if let Some(transform) = self.saved_transform.take()
            && self.graph.is_alive(self.id)
        {
            let node = self.graph.node_mut(self.id);
            node.transform = transform;
            node.parent = self.saved_parent;
            node.bounds_id += 1;
        }
    }
}

impl SceneGraph {
    /// Returns the bounds of `id` and its subtree as if `id` were a root with
    /// an identity transform.
    ///
    /// The result ignores every ancestor and the node's own position, scale,
    /// rotation, skew, and pivot. Afterwards the subtree's world state is
    /// recomposed against the real parent's current matrix, and the node's
    /// cached world bounds are invalidated.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn get_local_bounds(&mut self, id: NodeId) -> Rect {
        self.tracer.detached_query(&DetachedQueryEvent {
            node: id,
            query: DetachedQuery::LocalBounds,
        });
        let rect = {
            let mut scope = DetachedScope::enter(self, id);
            scope.get_bounds(id, false)
        };
        self.update_transform(id);
        rect
    }
}
