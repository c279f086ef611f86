// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform propagation, bounds, and coordinate conversion.
//!
//! Three update entry points differ in how much they touch:
//!
//! 1. [`update_transform`](SceneGraph::update_transform): the node and every
//!    visible descendant. Refreshes world matrices and world alpha and
//!    invalidates bounds.
//! 2. [`update_node_transform`](SceneGraph::update_node_transform): the same
//!    work for one node only.
//! 3. [`recursive_post_update_transform`](SceneGraph::recursive_post_update_transform):
//!    world matrices only, from the root down to the node. Alpha and bounds
//!    are left alone.
//!
//! A node without a parent composes against [`ParentFrame::DETACHED`]. The
//! node never gains a parent for this; the frame is passed in directly.
//!
//! Bounds are rebuilt lazily. Every update bumps the node's bounds id, and
//! [`get_bounds`](SceneGraph::get_bounds) only recomputes when that id moved
//! since the last computation.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::trace::{BoundsUpdateEvent, DetachedQuery, DetachedQueryEvent};
#[cfg(feature = "trace-rich")]
use crate::trace::TransformUpdateEvent;
use crate::transform::ParentFrame;

use super::SceneGraph;
use super::id::NodeId;

impl SceneGraph {
    /// The frame and world alpha a node composes against.
    fn parent_frame(&self, id: NodeId) -> (ParentFrame, f32) {
        match self.node(id).parent {
            Some(p) => {
                let parent = self.node(p);
                (ParentFrame::of(&parent.transform), parent.world_alpha)
            }
            None => (ParentFrame::DETACHED, 1.0),
        }
    }

    /// Recomputes the world matrix and world alpha of `id` and every visible
    /// descendant, and invalidates their bounds.
    ///
    /// Hidden children (and their subtrees) are skipped; their world state
    /// stays as it was.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn update_transform(&mut self, id: NodeId) {
        self.update_node_transform(id);
        for i in 0..self.node(id).children.len() {
            let child = self.node(id).children[i];
            if self.node(child).visible {
                self.update_transform(child);
            }
        }
    }

    /// Recomputes the world matrix and world alpha of `id` alone, from its
    /// parent's current state, and invalidates its bounds.
    pub fn update_node_transform(&mut self, id: NodeId) {
        let (frame, parent_alpha) = self.parent_frame(id);
        let node = self.node_mut(id);
        #[cfg(feature = "trace-rich")]
        let local_rebuilt = node.transform.is_local_dirty();
        node.transform.update_transform(&frame);
        node.world_alpha = node.alpha * parent_alpha;
        node.bounds_id += 1;

        #[cfg(feature = "trace-rich")]
        {
            let world_id = node.transform.world_id();
            self.tracer.transform_update(&TransformUpdateEvent {
                node: id,
                world_id,
                local_rebuilt,
            });
        }
    }

    /// Refreshes the world matrices on the path from the root down to `id`,
    /// inclusive, ignoring visibility.
    ///
    /// Only matrices are touched: world alpha and bounds ids stay as they
    /// were.
    pub fn recursive_post_update_transform(&mut self, id: NodeId) {
        let mut chain = Vec::new();
        let mut item = Some(id);
        while let Some(cur) = item {
            chain.push(cur);
            item = self.node(cur).parent;
        }
        for &cur in chain.iter().rev() {
            let (frame, _) = self.parent_frame(cur);
            self.node_mut(cur).transform.update_transform(&frame);
        }
    }

    /// Returns the world-space bounds of `id` and its visible, renderable
    /// descendants.
    ///
    /// Unless `skip_update` is set, the ancestors' matrices and the node's
    /// subtree are refreshed first. With `skip_update`, an ancestor moved
    /// since the last update is not seen and the previous rectangle comes
    /// back. An empty subtree yields [`Rect::ZERO`].
    pub fn get_bounds(&mut self, id: NodeId, skip_update: bool) -> Rect {
        if !skip_update {
            match self.node(id).parent {
                Some(parent) => self.recursive_post_update_transform(parent),
                None => self.tracer.detached_query(&DetachedQueryEvent {
                    node: id,
                    query: DetachedQuery::RootBounds,
                }),
            }
            self.update_transform(id);
        }

        if self.node(id).bounds_stale() {
            self.calculate_bounds(id);
        }
        self.node(id).bounds.get_rectangle()
    }

    /// Rebuilds the bounds of `id` from its own geometry and, recursively, its
    /// visible and renderable children, using current world matrices.
    ///
    /// A child with a mask contributes only where it overlaps the mask's
    /// bounds; a child with a filter area contributes only inside the area.
    pub fn calculate_bounds(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        node.bounds.clear();
        let world = *node.transform.world_matrix();
        node.kind.add_self_bounds(&world, &mut node.bounds);

        for i in 0..self.node(id).children.len() {
            let child = self.node(id).children[i];
            let c = self.node(child);
            if !c.visible || !c.renderable {
                continue;
            }
            self.calculate_bounds(child);

            let c = self.node(child);
            let child_bounds = c.bounds;
            if let Some(mask) = c.mask {
                self.calculate_bounds(mask);
                let mask_bounds = self.node(mask).bounds;
                self.node_mut(id)
                    .bounds
                    .add_bounds_mask(&child_bounds, &mask_bounds);
            } else if let Some(area) = c.filter_area {
                self.node_mut(id).bounds.add_bounds_area(&child_bounds, area);
            } else {
                self.node_mut(id).bounds.add_bounds(&child_bounds);
            }
        }

        let node = self.node_mut(id);
        node.last_bounds_id = Some(node.bounds_id);
        let e = BoundsUpdateEvent {
            node: id,
            bounds_id: node.bounds_id,
            rect: node.bounds.get_rectangle(),
        };
        self.tracer.bounds_update(&e);
    }

    /// Maps a point from `id`'s local space to world space.
    ///
    /// Unless `skip_update` is set, the matrices from the root down to `id`
    /// are refreshed first.
    pub fn to_global(&mut self, id: NodeId, position: Point, skip_update: bool) -> Point {
        if !skip_update {
            self.recursive_post_update_transform(id);
            self.update_node_transform(id);
        }
        self.node(id).transform.world_matrix().apply(position)
    }

    /// Maps a point to `id`'s local space.
    ///
    /// `position` is in world space, or in `from`'s local space when `from`
    /// is given. A singular world matrix yields non-finite coordinates.
    pub fn to_local(
        &mut self,
        id: NodeId,
        position: Point,
        from: Option<NodeId>,
        skip_update: bool,
    ) -> Point {
        let position = match from {
            Some(from) => self.to_global(from, position, skip_update),
            None => position,
        };
        if !skip_update {
            self.recursive_post_update_transform(id);
            self.update_node_transform(id);
        }
        self.node(id).transform.world_matrix().apply_inverse(position)
    }
}
