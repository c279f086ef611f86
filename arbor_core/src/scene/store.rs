// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node allocation, tree topology, masks, filters, and destruction.

use alloc::vec::Vec;
use core::mem;

use kurbo::Rect;

use crate::trace::NodeDestroyedEvent;

use super::error::SceneError;
use super::event::NodeEvent;
use super::id::{FilterId, NodeId};
use super::node::{DisplayObject, NodeKind};
use super::{SceneGraph, Slot};

/// Options for [`SceneGraph::destroy_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DestroyOptions {
    /// Destroy the whole subtree instead of orphaning the children.
    pub children: bool,
}

impl SceneGraph {
    // -- Allocation API --

    /// Creates a detached node and returns its handle.
    ///
    /// The node starts with an identity transform, alpha 1, visible and
    /// renderable, and no parent.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let node = DisplayObject::new(kind, self.config.transform_mode);
        self.live += 1;
        if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot; its generation was bumped on destroy.
            let slot = &mut self.slots[idx as usize];
            slot.node = Some(node);
            NodeId {
                idx,
                generation: slot.generation,
            }
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            assert!(idx != u32::MAX, "scene graph is full");
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId { idx, generation: 0 }
        }
    }

    /// Destroys a node, orphaning its children.
    ///
    /// See [`destroy_with`](Self::destroy_with).
    pub fn destroy(&mut self, id: NodeId) {
        self.destroy_with(id, DestroyOptions::default());
    }

    /// Destroys a node.
    ///
    /// In order: listeners get [`NodeEvent::Destroyed`] and are dropped; the
    /// node is detached from its parent; its mask gets its renderable flag
    /// back; nodes using it as a mask lose that mask; children are detached
    /// (and destroyed too when `options.children` is set); the slot is freed.
    /// Any later use of `id` panics.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_with(&mut self, id: NodeId, options: DestroyOptions) {
        self.emit(id, &NodeEvent::Destroyed);
        self.remove_all_listeners(id);

        let was_attached = match self.node(id).parent {
            Some(parent) => {
                self.unlink(parent, id);
                true
            }
            None => false,
        };

        if let Some(mask) = self.node_mut(id).mask.take() {
            self.release_mask(mask);
        }
        for slot in &mut self.slots {
            if let Some(node) = &mut slot.node
                && node.mask == Some(id)
            {
                node.mask = None;
            }
        }

        let children = mem::take(&mut self.node_mut(id).children);
        for &child in &children {
            self.node_mut(child).parent = None;
            self.emit(child, &NodeEvent::Removed { parent: id });
            if options.children {
                self.destroy_with(child, options);
            }
        }

        let slot = &mut self.slots[id.idx as usize];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.idx);
        self.live -= 1;

        self.tracer.node_destroyed(&NodeDestroyedEvent {
            node: id,
            was_attached,
            children: children.len(),
            children_destroyed: options.children,
        });
    }

    // -- Topology API --

    /// Appends `child` to `parent`'s children, detaching it from any previous
    /// parent first.
    ///
    /// # Errors
    ///
    /// [`SceneError::NotAContainer`] if `parent` cannot hold children;
    /// [`SceneError::CycleDetected`] if `parent` is `child` or one of its
    /// descendants; [`SceneError::InvalidMask`] if a node in `child`'s subtree
    /// is masked by `parent` or one of its ancestors.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        let len = self.node(parent).children.len();
        let index = if self.node(child).parent == Some(parent) {
            len - 1
        } else {
            len
        };
        self.add_child_at(parent, child, index)
    }

    /// Inserts `child` into `parent`'s children at `index`, detaching it from
    /// any previous parent first. `index` is interpreted after the detach.
    ///
    /// # Errors
    ///
    /// As [`add_child`](Self::add_child), plus
    /// [`SceneError::IndexOutOfBounds`] if `index` is past the end.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn add_child_at(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), SceneError> {
        if !self.node(parent).kind.is_container() {
            return Err(SceneError::NotAContainer(parent));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::CycleDetected { child, parent });
        }
        if let Some((node, mask)) = self.mask_above(child, parent) {
            return Err(SceneError::InvalidMask { node, mask });
        }
        let mut len = self.node(parent).children.len();
        if self.node(child).parent == Some(parent) {
            len -= 1;
        }
        if index > len {
            return Err(SceneError::IndexOutOfBounds { index, len });
        }

        if let Some(old) = self.node(child).parent {
            self.unlink(old, child);
            self.emit(child, &NodeEvent::Removed { parent: old });
        }

        let p = self.node_mut(parent);
        p.children.insert(index, child);
        p.bounds_id += 1;
        self.node_mut(child).parent = Some(parent);
        self.emit(child, &NodeEvent::Added { parent });
        Ok(())
    }

    /// Attaches this node to `parent` (as the last child) and returns the
    /// parent.
    ///
    /// # Errors
    ///
    /// As [`add_child`](Self::add_child).
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) -> Result<NodeId, SceneError> {
        self.add_child(parent, id)?;
        Ok(parent)
    }

    /// Detaches `child` from `parent`. Returns `false` (and does nothing) if
    /// `child` is not one of `parent`'s children.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.node(child).parent != Some(parent) {
            return false;
        }
        self.unlink(parent, child);
        self.emit(child, &NodeEvent::Removed { parent });
        true
    }

    /// Detaches the node from its parent, if it has one.
    pub fn remove_from_parent(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.remove_child(parent, id);
        }
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the direct children of a node in draw order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Returns every live node without a parent.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                let node = slot.node.as_ref()?;
                node.parent.is_none().then(|| NodeId {
                    idx: u32::try_from(idx).unwrap_or(u32::MAX),
                    generation: slot.generation,
                })
            })
            .collect()
    }

    /// Whether `ancestor` is `id` or lies on `id`'s parent chain.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut item = Some(id);
        while let Some(cur) = item {
            if cur == ancestor {
                return true;
            }
            item = self.node(cur).parent;
        }
        false
    }

    // -- Masks and filters --

    /// Sets or clears the node clipping `id`.
    ///
    /// The new mask stops drawing itself (`renderable = false`) and is
    /// flagged as a mask; a replaced mask gets both flags back.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidMask`] if `mask` is `id` or one of its ancestors.
    pub fn set_mask(&mut self, id: NodeId, mask: Option<NodeId>) -> Result<(), SceneError> {
        if let Some(m) = mask
            && self.is_ancestor_or_self(m, id)
        {
            return Err(SceneError::InvalidMask { node: id, mask: m });
        }
        if let Some(old) = mem::replace(&mut self.node_mut(id).mask, mask) {
            self.release_mask(old);
        }
        if let Some(m) = mask {
            let node = self.node_mut(m);
            node.renderable = false;
            node.is_mask = true;
        }
        Ok(())
    }

    /// The node clipping `id`, if any.
    #[must_use]
    pub fn mask(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).mask
    }

    /// Replaces the node's filter list with a copy of `filters`.
    pub fn set_filters(&mut self, id: NodeId, filters: Option<&[FilterId]>) {
        self.node_mut(id).filters = filters.map(<[FilterId]>::to_vec);
    }

    /// The node's filters.
    #[must_use]
    pub fn filters(&self, id: NodeId) -> Option<&[FilterId]> {
        self.node(id).filters.as_deref()
    }

    /// Sets the world-space region filters are confined to. A parent's bounds
    /// only include the part of this node's bounds inside the area.
    pub fn set_filter_area(&mut self, id: NodeId, area: Option<Rect>) {
        self.node_mut(id).filter_area = area;
    }

    /// The node's filter area.
    #[must_use]
    pub fn filter_area(&self, id: NodeId) -> Option<Rect> {
        self.node(id).filter_area
    }

    // -- Internals --

    /// Removes `child` from `parent`'s list and clears its parent link.
    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|&c| c != child);
        p.bounds_id += 1;
        self.node_mut(child).parent = None;
    }

    /// First node in `child`'s subtree whose mask would become itself or an
    /// ancestor once `child` hangs under `parent`.
    fn mask_above(&self, child: NodeId, parent: NodeId) -> Option<(NodeId, NodeId)> {
        let mut stack = Vec::from([child]);
        while let Some(cur) = stack.pop() {
            let node = self.node(cur);
            if let Some(mask) = node.mask
                && self.is_ancestor_or_self(mask, parent)
            {
                return Some((cur, mask));
            }
            stack.extend_from_slice(&node.children);
        }
        None
    }

    fn release_mask(&mut self, mask: NodeId) {
        if self.is_alive(mask) {
            let node = self.node_mut(mask);
            node.renderable = true;
            node.is_mask = false;
        }
    }
}
