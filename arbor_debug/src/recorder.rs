// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events as
//! fixed-size little-endian records into a [`Recording`]. The recording is
//! shared, so it stays readable after the sink has been boxed and handed to a
//! [`SceneGraph`](arbor_core::scene::SceneGraph). [`decode`] reads the bytes
//! back as an iterator of [`RecordedEvent`].
//!
//! Node handles are stored as raw `(index, generation)` pairs; the rectangle
//! in a bounds event is stored as four `f64`s.

use std::cell::RefCell;
use std::rc::Rc;

use arbor_core::scene::{NodeId, RenderStats};
use arbor_core::trace::{
    BoundsUpdateEvent, DetachedQuery, DetachedQueryEvent, NodeDestroyedEvent, RenderPassEvent,
    TraceSink, TransformUpdateEvent,
};
use kurbo::Rect;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_TRANSFORM_UPDATE: u8 = 1;
const TAG_BOUNDS_UPDATE: u8 = 2;
const TAG_DETACHED_QUERY: u8 = 3;
const TAG_NODE_DESTROYED: u8 = 4;
const TAG_RENDER_PASS: u8 = 5;

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

/// A shared, growable byte buffer written by a [`RecorderSink`].
///
/// Cloning is cheap and every clone sees the same bytes.
#[derive(Clone, Debug, Default)]
pub struct Recording(Rc<RefCell<Vec<u8>>>);

impl Recording {
    /// Copies out the bytes recorded so far.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }

    /// Number of bytes recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Decodes everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        decode(&self.0.borrow()).collect()
    }
}

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    out: Recording,
}

impl RecorderSink {
    /// Creates a recorder writing to a fresh [`Recording`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder that appends to an existing [`Recording`].
    #[must_use]
    pub fn with_recording(out: Recording) -> Self {
        Self { out }
    }

    /// Returns a handle to the recording this sink writes to.
    #[must_use]
    pub fn recording(&self) -> Recording {
        self.out.clone()
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.out.0.borrow_mut().push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.out.0.borrow_mut().extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.out.0.borrow_mut().extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_node(&mut self, id: NodeId) {
        self.write_u32(id.index());
        self.write_u32(id.generation());
    }

    fn write_count(&mut self, n: usize) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "child count capped at u32::MAX for recording"
        )]
        self.write_u32(n.min(u32::MAX as usize) as u32);
    }
}

impl TraceSink for RecorderSink {
    fn on_transform_update(&mut self, e: &TransformUpdateEvent) {
        self.write_u8(TAG_TRANSFORM_UPDATE);
        self.write_node(e.node);
        self.write_u64(e.world_id);
        self.write_u8(u8::from(e.local_rebuilt));
    }

    fn on_bounds_update(&mut self, e: &BoundsUpdateEvent) {
        self.write_u8(TAG_BOUNDS_UPDATE);
        self.write_node(e.node);
        self.write_u64(e.bounds_id);
        self.write_f64(e.rect.x0);
        self.write_f64(e.rect.y0);
        self.write_f64(e.rect.x1);
        self.write_f64(e.rect.y1);
    }

    fn on_detached_query(&mut self, e: &DetachedQueryEvent) {
        self.write_u8(TAG_DETACHED_QUERY);
        self.write_node(e.node);
        self.write_u8(match e.query {
            DetachedQuery::LocalBounds => 0,
            DetachedQuery::RootBounds => 1,
        });
    }

    fn on_node_destroyed(&mut self, e: &NodeDestroyedEvent) {
        self.write_u8(TAG_NODE_DESTROYED);
        self.write_node(e.node);
        self.write_u8(u8::from(e.was_attached));
        self.write_count(e.children);
        self.write_u8(u8::from(e.children_destroyed));
    }

    fn on_render_pass(&mut self, e: &RenderPassEvent) {
        self.write_u8(TAG_RENDER_PASS);
        self.write_node(e.root);
        self.write_u32(e.stats.visited);
        self.write_u32(e.stats.drawn);
        self.write_u32(e.stats.culled);
        self.write_u32(e.stats.masks);
        self.write_u32(e.stats.filters);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A node handle as stored in a recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedNode {
    /// Slot index.
    pub index: u32,
    /// Slot generation at the time of the event.
    pub generation: u32,
}

impl RecordedNode {
    /// Whether this refers to the same slot and generation as `id`.
    #[must_use]
    pub fn is(self, id: NodeId) -> bool {
        self.index == id.index() && self.generation == id.generation()
    }
}

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`TransformUpdateEvent`].
    TransformUpdate {
        /// Updated node.
        node: RecordedNode,
        /// New world id.
        world_id: u64,
        /// Whether the local matrix was rebuilt.
        local_rebuilt: bool,
    },
    /// A [`BoundsUpdateEvent`].
    BoundsUpdate {
        /// Node whose bounds were rebuilt.
        node: RecordedNode,
        /// Bounds id the result was computed against.
        bounds_id: u64,
        /// Resulting rectangle.
        rect: Rect,
    },
    /// A [`DetachedQueryEvent`].
    DetachedQuery {
        /// Queried node.
        node: RecordedNode,
        /// Which query.
        query: DetachedQuery,
    },
    /// A [`NodeDestroyedEvent`].
    NodeDestroyed {
        /// Destroyed node.
        node: RecordedNode,
        /// Whether it had a parent.
        was_attached: bool,
        /// Direct child count.
        children: u32,
        /// Whether the children were destroyed too.
        children_destroyed: bool,
    },
    /// A [`RenderPassEvent`].
    RenderPass {
        /// Walk root.
        root: RecordedNode,
        /// Walk counters.
        stats: RenderStats,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes: [u8; N] = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|b| b != 0)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_node(&mut self) -> Option<RecordedNode> {
        Some(RecordedNode {
            index: self.read_u32()?,
            generation: self.read_u32()?,
        })
    }

    fn decode_transform_update(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TransformUpdate {
            node: self.read_node()?,
            world_id: self.read_u64()?,
            local_rebuilt: self.read_bool()?,
        })
    }

    fn decode_bounds_update(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::BoundsUpdate {
            node: self.read_node()?,
            bounds_id: self.read_u64()?,
            rect: Rect::new(
                self.read_f64()?,
                self.read_f64()?,
                self.read_f64()?,
                self.read_f64()?,
            ),
        })
    }

    fn decode_detached_query(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DetachedQuery {
            node: self.read_node()?,
            query: match self.read_u8()? {
                0 => DetachedQuery::LocalBounds,
                _ => DetachedQuery::RootBounds,
            },
        })
    }

    fn decode_node_destroyed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::NodeDestroyed {
            node: self.read_node()?,
            was_attached: self.read_bool()?,
            children: self.read_u32()?,
            children_destroyed: self.read_bool()?,
        })
    }

    fn decode_render_pass(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RenderPass {
            root: self.read_node()?,
            stats: RenderStats {
                visited: self.read_u32()?,
                drawn: self.read_u32()?,
                culled: self.read_u32()?,
                masks: self.read_u32()?,
                filters: self.read_u32()?,
            },
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_TRANSFORM_UPDATE => self.decode_transform_update(),
            TAG_BOUNDS_UPDATE => self.decode_bounds_update(),
            TAG_DETACHED_QUERY => self.decode_detached_query(),
            TAG_NODE_DESTROYED => self.decode_node_destroyed(),
            TAG_RENDER_PASS => self.decode_render_pass(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
