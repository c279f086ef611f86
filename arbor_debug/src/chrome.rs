// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Scene events carry no timestamps, so each event is placed at its sequence
//! number in microseconds. Events about a node land on the thread row named
//! after its slot index, which groups a node's history in the viewer.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for (seq, recorded) in decode(bytes).enumerate() {
        events.push(match recorded {
            RecordedEvent::TransformUpdate {
                node,
                world_id,
                local_rebuilt,
            } => json!({
                "ph": "i",
                "name": "TransformUpdate",
                "cat": "Update",
                "ts": seq,
                "pid": 0,
                "tid": node.index,
                "s": "t",
                "args": {
                    "generation": node.generation,
                    "world_id": world_id,
                    "local_rebuilt": local_rebuilt,
                }
            }),
            RecordedEvent::BoundsUpdate {
                node,
                bounds_id,
                rect,
            } => json!({
                "ph": "i",
                "name": "BoundsUpdate",
                "cat": "Bounds",
                "ts": seq,
                "pid": 0,
                "tid": node.index,
                "s": "t",
                "args": {
                    "generation": node.generation,
                    "bounds_id": bounds_id,
                    "rect": [rect.x0, rect.y0, rect.x1, rect.y1],
                }
            }),
            RecordedEvent::DetachedQuery { node, query } => json!({
                "ph": "i",
                "name": format!("{query:?}"),
                "cat": "Bounds",
                "ts": seq,
                "pid": 0,
                "tid": node.index,
                "s": "t",
                "args": {
                    "generation": node.generation,
                }
            }),
            RecordedEvent::NodeDestroyed {
                node,
                was_attached,
                children,
                children_destroyed,
            } => json!({
                "ph": "i",
                "name": "NodeDestroyed",
                "cat": "Lifecycle",
                "ts": seq,
                "pid": 0,
                "tid": node.index,
                "s": "p",
                "args": {
                    "generation": node.generation,
                    "was_attached": was_attached,
                    "children": children,
                    "children_destroyed": children_destroyed,
                }
            }),
            RecordedEvent::RenderPass { root, stats } => json!({
                "ph": "i",
                "name": "RenderPass",
                "cat": "Render",
                "ts": seq,
                "pid": 0,
                "tid": root.index,
                "s": "g",
                "args": {
                    "visited": stats.visited,
                    "drawn": stats.drawn,
                    "culled": stats.culled,
                    "masks": stats.masks,
                    "filters": stats.filters,
                }
            }),
        });
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}
