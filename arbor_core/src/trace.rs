// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for scene updates.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! [`SceneGraph`](crate::scene::SceneGraph) emits. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] owns an optional boxed sink and lives inside the scene graph.
//! When the `trace` feature is **off**, every `Tracer` method compiles to
//! nothing and installing a sink simply drops it. When **on**, each method
//! performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates the per-node
//!   [`TransformUpdateEvent`] and its `TraceSink` method.

use alloc::boxed::Box;

use kurbo::Rect;

use crate::scene::{NodeId, RenderStats};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which query ran a node as if it were a detached root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetachedQuery {
    /// `get_local_bounds`: parent and transform swapped out for the duration.
    LocalBounds,
    /// `get_bounds` on a node without a parent.
    RootBounds,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a node's world matrix is recomposed.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct TransformUpdateEvent {
    /// The node that was updated.
    pub node: NodeId,
    /// The node's new world id.
    pub world_id: u64,
    /// Whether the local matrix had to be rebuilt first.
    pub local_rebuilt: bool,
}

/// Emitted when a node's bounds are recomputed (not when a cached value is
/// returned).
#[derive(Clone, Copy, Debug)]
pub struct BoundsUpdateEvent {
    /// The node whose bounds were rebuilt.
    pub node: NodeId,
    /// The node's bounds id the result was computed against.
    pub bounds_id: u64,
    /// The resulting rectangle.
    pub rect: Rect,
}

/// Emitted when a node is evaluated against the detached root frame.
#[derive(Clone, Copy, Debug)]
pub struct DetachedQueryEvent {
    /// The node being queried.
    pub node: NodeId,
    /// Which query it was.
    pub query: DetachedQuery,
}

/// Emitted when a node is destroyed.
#[derive(Clone, Copy, Debug)]
pub struct NodeDestroyedEvent {
    /// The (now stale) handle.
    pub node: NodeId,
    /// Whether the node had a parent when it was destroyed.
    pub was_attached: bool,
    /// How many direct children it had.
    pub children: usize,
    /// Whether those children were destroyed too (otherwise orphaned).
    pub children_destroyed: bool,
}

/// Emitted after a render walk completes.
#[derive(Clone, Copy, Debug)]
pub struct RenderPassEvent {
    /// The node the walk started from.
    pub root: NodeId,
    /// Counters collected during the walk.
    pub stats: RenderStats,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the scene graph.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a node's world matrix is recomposed (requires
    /// `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_transform_update(&mut self, e: &TransformUpdateEvent) {
        _ = e;
    }

    /// Called after a node's bounds are rebuilt.
    fn on_bounds_update(&mut self, e: &BoundsUpdateEvent) {
        _ = e;
    }

    /// Called when a node is queried against the detached root frame.
    fn on_detached_query(&mut self, e: &DetachedQueryEvent) {
        _ = e;
    }

    /// Called when a node is destroyed.
    fn on_node_destroyed(&mut self, e: &NodeDestroyedEvent) {
        _ = e;
    }

    /// Called after a render walk.
    fn on_render_pass(&mut self, e: &RenderPassEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owned wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
#[derive(Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether events will reach a sink.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits a [`TransformUpdateEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn transform_update(&mut self, e: &TransformUpdateEvent) {
        if let Some(s) = &mut self.sink {
            s.on_transform_update(e);
        }
    }

    /// Emits a [`BoundsUpdateEvent`].
    #[inline]
    pub fn bounds_update(&mut self, e: &BoundsUpdateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_bounds_update(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DetachedQueryEvent`].
    #[inline]
    pub fn detached_query(&mut self, e: &DetachedQueryEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_detached_query(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NodeDestroyedEvent`].
    #[inline]
    pub fn node_destroyed(&mut self, e: &NodeDestroyedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_node_destroyed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RenderPassEvent`].
    #[inline]
    pub fn render_pass(&mut self, e: &RenderPassEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_render_pass(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
