// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: an ordered sequence of draw items for one scene walk.

use alloc::vec::Vec;

use arbor_core::backend::{DrawBackend, NodeView};
use arbor_core::matrix::Matrix;
use arbor_core::scene::{FilterId, Graphics, NodeId, Sprite, TextureId, TilingSprite};
use kurbo::{Point, Rect};

/// What a [`RenderItem`] asks the backend to do.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Draw a textured quad covering `frame` (local coordinates).
    Quad {
        /// Texture to sample, if any.
        texture: Option<TextureId>,
        /// Local-space quad.
        frame: Rect,
    },
    /// Fill local-space rectangles.
    Shapes {
        /// Rectangles to fill.
        shapes: Vec<Rect>,
    },
    /// Draw a repeating texture across `frame`.
    Tiled {
        /// Texture to repeat, if any.
        texture: Option<TextureId>,
        /// Local-space area to cover.
        frame: Rect,
        /// Offset of the tile pattern.
        tile_position: Point,
        /// Scale of the tile pattern.
        tile_scale: Point,
    },
    /// Start clipping to the geometry of `mask`.
    PushMask {
        /// The mask node.
        mask: NodeId,
        /// The mask's world transform (column-major 3×3).
        mask_transform: [f32; 9],
    },
    /// End the innermost clip.
    PopMask,
    /// Start rendering into a filter pass.
    PushFilters {
        /// Filters to apply, in order.
        filters: Vec<FilterId>,
        /// Optional world-space confinement.
        area: Option<Rect>,
    },
    /// End the innermost filter pass.
    PopFilters,
}

/// A single command in the render plan.
///
/// Items are produced in back-to-front order, matching the scene's
/// depth-first walk.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    /// The node this item originates from.
    pub node: NodeId,
    /// World-space transform (column-major 3×3).
    pub world_transform: [f32; 9],
    /// Opacity accumulated from ancestors. Not clamped.
    pub world_alpha: f32,
    /// What to do.
    pub command: DrawCommand,
}

/// An ordered list of draw commands recorded from one
/// [`SceneGraph::render`](arbor_core::scene::SceneGraph::render) call.
///
/// Pass a `RenderPlan` as the backend; backends then translate the items into
/// native draw calls.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Items in back-to-front order.
    pub items: Vec<RenderItem>,
}

impl RenderPlan {
    /// Creates an empty render plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of items that actually draw pixels (no brackets).
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| {
                matches!(
                    i.command,
                    DrawCommand::Quad { .. } | DrawCommand::Shapes { .. } | DrawCommand::Tiled { .. }
                )
            })
            .count()
    }

    /// Whether every push has a matching pop of the same kind, properly
    /// nested.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let mut stack = Vec::new();
        for item in &self.items {
            match item.command {
                DrawCommand::PushMask { .. } => stack.push(true),
                DrawCommand::PushFilters { .. } => stack.push(false),
                DrawCommand::PopMask => {
                    if stack.pop() != Some(true) {
                        return false;
                    }
                }
                DrawCommand::PopFilters => {
                    if stack.pop() != Some(false) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        stack.is_empty()
    }

    fn push(&mut self, node: &NodeView<'_>, command: DrawCommand) {
        self.items.push(RenderItem {
            node: node.id,
            world_transform: gpu_matrix(node.world_transform),
            world_alpha: node.world_alpha,
            command,
        });
    }
}

/// Converts to the column-major `f32` layout used for uniform uploads.
#[expect(
    clippy::cast_possible_truncation,
    reason = "GPU uniforms are f32; precision loss is acceptable"
)]
fn gpu_matrix(m: &Matrix) -> [f32; 9] {
    m.to_array(true).map(|v| v as f32)
}

impl DrawBackend for RenderPlan {
    fn draw_sprite(&mut self, node: &NodeView<'_>, sprite: &Sprite) {
        self.push(
            node,
            DrawCommand::Quad {
                texture: sprite.texture,
                frame: sprite.local_frame(),
            },
        );
    }

    fn draw_graphics(&mut self, node: &NodeView<'_>, graphics: &Graphics) {
        self.push(
            node,
            DrawCommand::Shapes {
                shapes: graphics.shapes.clone(),
            },
        );
    }

    fn draw_tiling_sprite(&mut self, node: &NodeView<'_>, tiling: &TilingSprite) {
        self.push(
            node,
            DrawCommand::Tiled {
                texture: tiling.texture,
                frame: tiling.local_frame(),
                tile_position: tiling.tile_position,
                tile_scale: tiling.tile_scale,
            },
        );
    }

    fn push_mask(&mut self, node: &NodeView<'_>, mask: &NodeView<'_>) {
        self.push(
            node,
            DrawCommand::PushMask {
                mask: mask.id,
                mask_transform: gpu_matrix(mask.world_transform),
            },
        );
    }

    fn pop_mask(&mut self, node: &NodeView<'_>) {
        self.push(node, DrawCommand::PopMask);
    }

    fn push_filters(&mut self, node: &NodeView<'_>, filters: &[FilterId], area: Option<Rect>) {
        self.push(
            node,
            DrawCommand::PushFilters {
                filters: filters.to_vec(),
                area,
            },
        );
    }

    fn pop_filters(&mut self, node: &NodeView<'_>) {
        self.push(node, DrawCommand::PopFilters);
    }
}
