// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for draw implementations.
//!
//! Arbor does not rasterize. A render backend implements [`DrawBackend`] and
//! is driven by [`SceneGraph::render`](crate::scene::SceneGraph::render),
//! which walks the visible tree depth-first and calls:
//!
//! - one `draw_*` method per renderable node, chosen by its
//!   [`NodeKind`];
//! - [`push_mask`](DrawBackend::push_mask) / [`pop_mask`](DrawBackend::pop_mask)
//!   around a masked subtree;
//! - [`push_filters`](DrawBackend::push_filters) /
//!   [`pop_filters`](DrawBackend::pop_filters) around a filtered subtree.
//!
//! Backends only see read-only [`NodeView`]s. Texture upload, batching, and
//! shader work are entirely the backend's business.
//!
//! ```rust,ignore
//! let mut plan = RenderPlan::new();
//! let stats = scene.render(root, &mut plan);
//! for item in &plan.items {
//!     gpu.submit(item);
//! }
//! ```

use kurbo::Rect;

use crate::matrix::Matrix;
use crate::scene::{FilterId, Graphics, NodeId, NodeKind, Sprite, TilingSprite};

/// A read-only snapshot of one node handed to a backend.
#[derive(Clone, Copy, Debug)]
pub struct NodeView<'a> {
    /// The node being drawn.
    pub id: NodeId,
    /// World matrix as of the update that preceded the walk.
    pub world_transform: &'a Matrix,
    /// Opacity after multiplying in every ancestor.
    pub world_alpha: f32,
    /// The node's kind.
    pub kind: &'a NodeKind,
}

/// Receives draw calls from a scene walk.
///
/// The three `draw_*` methods are required. Mask and filter brackets default
/// to no-ops, for backends without clipping or post-processing.
pub trait DrawBackend {
    /// Draws a sprite quad.
    fn draw_sprite(&mut self, node: &NodeView<'_>, sprite: &Sprite);

    /// Draws vector content.
    fn draw_graphics(&mut self, node: &NodeView<'_>, graphics: &Graphics);

    /// Draws a tiled quad.
    fn draw_tiling_sprite(&mut self, node: &NodeView<'_>, tiling: &TilingSprite);

    /// Starts clipping `node`'s subtree to `mask`.
    fn push_mask(&mut self, node: &NodeView<'_>, mask: &NodeView<'_>) {
        _ = (node, mask);
    }

    /// Ends the clip started by the matching [`push_mask`](Self::push_mask).
    fn pop_mask(&mut self, node: &NodeView<'_>) {
        _ = node;
    }

    /// Starts rendering `node`'s subtree through `filters`, optionally
    /// confined to `area`.
    fn push_filters(&mut self, node: &NodeView<'_>, filters: &[FilterId], area: Option<Rect>) {
        _ = (node, filters, area);
    }

    /// Ends the filter pass started by the matching
    /// [`push_filters`](Self::push_filters).
    fn pop_filters(&mut self, node: &NodeView<'_>) {
        _ = node;
    }
}
