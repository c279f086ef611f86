// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fan-out sink.

use arbor_core::trace::{
    BoundsUpdateEvent, DetachedQueryEvent, NodeDestroyedEvent, RenderPassEvent, TraceSink,
    TransformUpdateEvent,
};

/// A [`TraceSink`] that forwards every event to each inner sink, in the order
/// they were added.
#[derive(Default)]
pub struct Tee {
    sinks: Vec<Box<dyn TraceSink>>,
}

impl std::fmt::Debug for Tee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tee")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Tee {
    /// Creates a tee with no outputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an output.
    #[must_use]
    pub fn with(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl TraceSink for Tee {
    fn on_transform_update(&mut self, e: &TransformUpdateEvent) {
        for s in &mut self.sinks {
            s.on_transform_update(e);
        }
    }

    fn on_bounds_update(&mut self, e: &BoundsUpdateEvent) {
        for s in &mut self.sinks {
            s.on_bounds_update(e);
        }
    }

    fn on_detached_query(&mut self, e: &DetachedQueryEvent) {
        for s in &mut self.sinks {
            s.on_detached_query(e);
        }
    }

    fn on_node_destroyed(&mut self, e: &NodeDestroyedEvent) {
        for s in &mut self.sinks {
            s.on_node_destroyed(e);
        }
    }

    fn on_render_pass(&mut self, e: &RenderPassEvent) {
        for s in &mut self.sinks {
            s.on_render_pass(e);
        }
    }
}
