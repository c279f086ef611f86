// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use arbor_core::trace::{
    BoundsUpdateEvent, DetachedQuery, DetachedQueryEvent, NodeDestroyedEvent, RenderPassEvent,
    TraceSink, TransformUpdateEvent,
};
use kurbo::Rect;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn query_name(query: DetachedQuery) -> &'static str {
    match query {
        DetachedQuery::LocalBounds => "local-bounds",
        DetachedQuery::RootBounds => "root-bounds",
    }
}

struct ShowRect(Rect);

impl std::fmt::Display for ShowRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = self.0;
        write!(f, "({:.1}, {:.1})..({:.1}, {:.1})", r.x0, r.y0, r.x1, r.y1)
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_transform_update(&mut self, e: &TransformUpdateEvent) {
        let local = if e.local_rebuilt { " +local" } else { "" };
        let _ = writeln!(
            self.writer,
            "[transform] node={} world_id={}{local}",
            e.node, e.world_id,
        );
    }

    fn on_bounds_update(&mut self, e: &BoundsUpdateEvent) {
        let _ = writeln!(
            self.writer,
            "[bounds] node={} bounds_id={} rect={}",
            e.node,
            e.bounds_id,
            ShowRect(e.rect),
        );
    }

    fn on_detached_query(&mut self, e: &DetachedQueryEvent) {
        let _ = writeln!(
            self.writer,
            "[detached] node={} query={}",
            e.node,
            query_name(e.query),
        );
    }

    fn on_node_destroyed(&mut self, e: &NodeDestroyedEvent) {
        let fate = if e.children_destroyed {
            "destroyed"
        } else {
            "orphaned"
        };
        let _ = writeln!(
            self.writer,
            "[destroy] node={:?} attached={} children={} ({fate})",
            e.node, e.was_attached, e.children,
        );
    }

    fn on_render_pass(&mut self, e: &RenderPassEvent) {
        let s = e.stats;
        let _ = writeln!(
            self.writer,
            "[render] root={} visited={} drawn={} culled={} masks={} filters={}",
            e.root, s.visited, s.drawn, s.culled, s.masks, s.filters,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use arbor_core::scene::{NodeId, NodeKind, SceneGraph, Sprite};

    #[test]
    fn pretty_print_bounds() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_bounds_update(&BoundsUpdateEvent {
            node: NodeId::DANGLING,
            bounds_id: 3,
            rect: Rect::new(0.0, 0.0, 10.0, 5.0),
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[bounds]"), "got: {output}");
        assert!(output.contains("bounds_id=3"), "got: {output}");
        assert!(output.contains("(10.0, 5.0)"), "got: {output}");
    }

    #[test]
    fn pretty_print_destroy() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_node_destroyed(&NodeDestroyedEvent {
            node: NodeId::DANGLING,
            was_attached: true,
            children: 2,
            children_destroyed: false,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("children=2 (orphaned)"), "got: {output}");
    }

    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn installed_in_scene() {
        let out = Rc::new(RefCell::new(Vec::new()));
        let mut g = SceneGraph::new();
        g.set_trace_sink(Box::new(PrettyPrintSink::new(Box::new(Shared(Rc::clone(
            &out,
        ))))));
        let s = g.create_node(NodeKind::Sprite(Sprite::new(4.0, 4.0)));
        let _ = g.get_bounds(s, false);

        let output = String::from_utf8(out.borrow().clone()).unwrap();
        assert!(output.contains("[detached]"), "got: {output}");
        assert!(output.contains("[transform]"), "got: {output}");
        assert!(output.contains("[bounds]"), "got: {output}");
    }
}
