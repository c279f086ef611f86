// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-backed scene graph.
//!
//! [`SceneGraph`] owns every node. Nodes are addressed by generational
//! [`NodeId`] handles; a parent is a handle, never an owning pointer. Using a
//! handle after its node was destroyed panics with `stale NodeId`.
//!
//! Work is split across submodules that all add methods to [`SceneGraph`]:
//!
//! - `store`: allocation, tree topology, masks, filters, and destruction.
//! - `update`: world transforms, bounds, and coordinate conversion.
//! - `local`: bounds in the node's own frame via a detached scope.
//! - `render`: the depth-first draw walk.

mod error;
mod event;
mod id;
mod local;
mod node;
mod render;
mod store;
mod update;

use alloc::boxed::Box;
use alloc::vec::Vec;

pub use error::SceneError;
pub use event::{Listener, ListenerId, NodeEvent};
pub use id::{FilterId, NodeId, TextureId};
pub use node::{DisplayObject, Graphics, NodeKind, Sprite, TilingSprite};
pub use render::RenderStats;
pub use store::DestroyOptions;

use crate::config::SceneConfig;
use crate::matrix::Matrix;
use crate::trace::{TraceSink, Tracer};
use crate::transform::Transform;

struct Slot {
    generation: u32,
    node: Option<DisplayObject>,
}

/// A tree of display objects with cached transforms and bounds.
pub struct SceneGraph {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    live: usize,
    config: SceneConfig,
    next_listener: u32,
    pub(crate) tracer: Tracer,
}

#[cold]
#[track_caller]
fn stale(id: NodeId) -> ! {
    panic!("stale NodeId: {id:?}");
}

impl core::fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SceneGraph")
            .field("live", &self.live)
            .field("slots", &self.slots.len())
            .field("config", &self.config)
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Creates an empty graph with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Creates an empty graph.
    #[must_use]
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
            config,
            next_listener: 0,
            tracer: Tracer::none(),
        }
    }

    /// The configuration this graph was created with.
    #[must_use]
    pub const fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Installs a trace sink, replacing any previous one.
    ///
    /// Without the `trace` feature the sink is dropped immediately.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.tracer = Tracer::new(sink);
    }

    /// Removes the trace sink.
    pub fn clear_trace_sink(&mut self) {
        self.tracer = Tracer::none();
    }

    /// Number of live nodes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Whether the graph holds no live nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.slots
            .get(id.idx as usize)
            .is_some_and(|s| s.generation == id.generation && s.node.is_some())
    }

    /// Read access to a node.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &DisplayObject {
        match self.slots.get(id.idx as usize) {
            Some(Slot {
                generation,
                node: Some(node),
            }) if *generation == id.generation => node,
            _ => stale(id),
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut DisplayObject {
        match self.slots.get_mut(id.idx as usize) {
            Some(Slot {
                generation,
                node: Some(node),
            }) if *generation == id.generation => node,
            _ => stale(id),
        }
    }

    // -- Node properties --

    /// The node's kind.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Mutable access to the node's kind.
    ///
    /// Changing geometry invalidates the node's bounds. Switching a node with
    /// children to [`NodeKind::Bare`] is allowed; its existing children stay
    /// attached.
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        let node = self.node_mut(id);
        node.bounds_id += 1;
        &mut node.kind
    }

    /// The node's transform.
    #[must_use]
    pub fn transform(&self, id: NodeId) -> &Transform {
        &self.node(id).transform
    }

    /// Mutable access to the node's transform components.
    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.node_mut(id).transform
    }

    /// The world matrix as of the last update.
    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Matrix {
        *self.node(id).transform.world_matrix()
    }

    /// The local matrix, rebuilt first if components changed.
    pub fn local_transform(&mut self, id: NodeId) -> Matrix {
        let t = &mut self.node_mut(id).transform;
        t.update_local_transform();
        *t.local_matrix()
    }

    /// Sets position, scale, rotation, skew, and pivot in one call.
    ///
    /// A scale of `0` (or NaN) on either axis is stored as `1`.
    #[expect(
        clippy::too_many_arguments,
        reason = "one argument per transform component"
    )]
    pub fn set_transform(
        &mut self,
        id: NodeId,
        x: f64,
        y: f64,
        scale_x: f64,
        scale_y: f64,
        rotation: f64,
        skew_x: f64,
        skew_y: f64,
        pivot_x: f64,
        pivot_y: f64,
    ) {
        fn nonzero(s: f64) -> f64 {
            if s == 0.0 || s.is_nan() { 1.0 } else { s }
        }
        let t = self.transform_mut(id);
        t.set_position(x, y);
        t.set_scale(nonzero(scale_x), nonzero(scale_y));
        t.set_rotation(rotation);
        t.set_skew(skew_x, skew_y);
        t.set_pivot(pivot_x, pivot_y);
    }

    /// Own opacity.
    #[must_use]
    pub fn alpha(&self, id: NodeId) -> f32 {
        self.node(id).alpha
    }

    /// Sets own opacity. Not clamped; takes effect on the next update.
    pub fn set_alpha(&mut self, id: NodeId, alpha: f32) {
        self.node_mut(id).alpha = alpha;
    }

    /// Opacity after multiplying in every ancestor, as of the last update.
    #[must_use]
    pub fn world_alpha(&self, id: NodeId) -> f32 {
        self.node(id).world_alpha
    }

    /// Whether the node's subtree takes part in updates and rendering.
    #[must_use]
    pub fn visible(&self, id: NodeId) -> bool {
        self.node(id).visible
    }

    /// Shows or hides the node's subtree.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.node_mut(id).visible = visible;
    }

    /// Whether the node draws itself.
    #[must_use]
    pub fn renderable(&self, id: NodeId) -> bool {
        self.node(id).renderable
    }

    /// Enables or disables the node's own draw. Children are unaffected.
    pub fn set_renderable(&mut self, id: NodeId, renderable: bool) {
        self.node_mut(id).renderable = renderable;
    }

    /// Whether this node and every ancestor is visible.
    #[must_use]
    pub fn world_visible(&self, id: NodeId) -> bool {
        let mut item = Some(id);
        while let Some(cur) = item {
            let node = self.node(cur);
            if !node.visible {
                return false;
            }
            item = node.parent;
        }
        true
    }

    // -- Listeners --

    /// Registers a lifecycle listener on a node.
    pub fn on(&mut self, id: NodeId, listener: Listener) -> ListenerId {
        let lid = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.node_mut(id).listeners.push(event::ListenerEntry {
            id: lid,
            callback: listener,
        });
        lid
    }

    /// Removes a listener. Returns `false` if it was not registered on `id`.
    pub fn off(&mut self, id: NodeId, listener: ListenerId) -> bool {
        let listeners = &mut self.node_mut(id).listeners;
        let before = listeners.len();
        listeners.retain(|l| l.id != listener);
        listeners.len() != before
    }

    /// Removes every listener on a node.
    pub fn remove_all_listeners(&mut self, id: NodeId) {
        self.node_mut(id).listeners.clear();
    }

    pub(crate) fn emit(&mut self, id: NodeId, event: &NodeEvent) {
        event::emit(&mut self.node_mut(id).listeners, id, event);
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;
    use crate::config::TransformMode;

    #[test]
    fn create_and_query() {
        let mut g = SceneGraph::new();
        let id = g.create_node(NodeKind::Container);
        assert!(g.is_alive(id), "alive");
        assert_eq!(g.len(), 1, "one node");
        assert_eq!(g.alpha(id), 1.0, "default alpha");
        assert!(g.visible(id) && g.renderable(id), "default flags");
        assert_eq!(g.transform(id).mode(), TransformMode::Static, "default mode");
    }

    #[test]
    fn config_selects_transform_mode() {
        let cfg = SceneConfig::default().with_transform_mode(TransformMode::Dynamic);
        let mut g = SceneGraph::with_config(cfg);
        let id = g.create_node(NodeKind::Bare);
        assert_eq!(g.transform(id).mode(), TransformMode::Dynamic, "mode threaded through");
    }

    #[test]
    fn set_transform_replaces_zero_scale() {
        let mut g = SceneGraph::new();
        let id = g.create_node(NodeKind::Container);
        g.set_transform(id, 1.0, 2.0, 0.0, 3.0, 0.5, 0.0, 0.0, 4.0, 5.0);
        let t = g.transform(id);
        assert_eq!(t.scale(), kurbo::Point::new(1.0, 3.0), "zero scale became one");
        assert_eq!(t.position(), kurbo::Point::new(1.0, 2.0), "position");
        assert_eq!(t.pivot(), kurbo::Point::new(4.0, 5.0), "pivot");
        assert_eq!(t.rotation(), 0.5, "rotation");
    }

    #[test]
    fn world_visible_walks_ancestors() {
        let mut g = SceneGraph::new();
        let a = g.create_node(NodeKind::Container);
        let b = g.create_node(NodeKind::Container);
        let c = g.create_node(NodeKind::Container);
        g.add_child(a, b).unwrap();
        g.add_child(b, c).unwrap();
        assert!(g.world_visible(c), "all visible");
        g.set_visible(a, false);
        assert!(!g.world_visible(c), "hidden ancestor");
        assert!(g.visible(c), "own flag untouched");
    }

    #[test]
    fn listeners_receive_events_until_removed() {
        let mut g = SceneGraph::new();
        let parent = g.create_node(NodeKind::Container);
        let child = g.create_node(NodeKind::Container);
        let log = Rc::new(RefCell::new(vec![]));
        let sink = Rc::clone(&log);
        let lid = g.on(
            child,
            Box::new(move |_, e: &NodeEvent| sink.borrow_mut().push(*e)),
        );
        g.add_child(parent, child).unwrap();
        g.remove_child(parent, child);
        assert!(g.off(child, lid), "removed");
        assert!(!g.off(child, lid), "already removed");
        g.add_child(parent, child).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![NodeEvent::Added { parent }, NodeEvent::Removed { parent }],
            "events before removal only"
        );
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn stale_handle_panics() {
        let mut g = SceneGraph::new();
        let id = g.create_node(NodeKind::Container);
        g.destroy(id);
        let _ = g.alpha(id);
    }
}
