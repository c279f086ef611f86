// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node state and node kinds.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};

use crate::bounds::Bounds;
use crate::config::TransformMode;
use crate::matrix::Matrix;
use crate::transform::Transform;

use super::event::ListenerEntry;
use super::id::{FilterId, NodeId, TextureId};

/// A textured quad.
///
/// The local frame spans `[-anchor.x * width, (1 - anchor.x) * width]`
/// horizontally and the same for `height`/`anchor.y` vertically, so an
/// anchor of `(0.5, 0.5)` centers the quad on the node's origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// Texture drawn into the quad, if any.
    pub texture: Option<TextureId>,
    /// Width in local units.
    pub width: f64,
    /// Height in local units.
    pub height: f64,
    /// Normalized origin within the quad.
    pub anchor: Point,
}

impl Sprite {
    /// Creates an untextured sprite with a top-left anchor.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            texture: None,
            width,
            height,
            anchor: Point::ZERO,
        }
    }

    /// Sets the texture.
    #[must_use]
    pub const fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Sets the anchor.
    #[must_use]
    pub const fn with_anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = Point::new(x, y);
        self
    }

    /// The quad in local coordinates.
    #[must_use]
    pub fn local_frame(&self) -> Rect {
        anchored_frame(self.width, self.height, self.anchor)
    }
}

/// Vector content, approximated for bounds purposes by a list of local
/// rectangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graphics {
    /// Filled rectangles in local coordinates.
    pub shapes: Vec<Rect>,
}

impl Graphics {
    /// Creates empty graphics.
    #[must_use]
    pub const fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Adds a rectangle.
    pub fn draw_rect(&mut self, rect: Rect) -> &mut Self {
        self.shapes.push(rect);
        self
    }

    /// Removes every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

/// A sprite whose texture repeats across its frame.
///
/// Bounds use the same frame as a [`Sprite`]. The tile offset and scale are
/// only read by backends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilingSprite {
    /// Texture that is tiled.
    pub texture: Option<TextureId>,
    /// Width of the tiled area in local units.
    pub width: f64,
    /// Height of the tiled area in local units.
    pub height: f64,
    /// Normalized origin within the frame.
    pub anchor: Point,
    /// Offset of the tile pattern.
    pub tile_position: Point,
    /// Scale of the tile pattern.
    pub tile_scale: Point,
}

impl TilingSprite {
    /// Creates an untextured tiling sprite with unit tile scale.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            texture: None,
            width,
            height,
            anchor: Point::ZERO,
            tile_position: Point::ZERO,
            tile_scale: Point::new(1.0, 1.0),
        }
    }

    /// The tiled area in local coordinates.
    #[must_use]
    pub fn local_frame(&self) -> Rect {
        anchored_frame(self.width, self.height, self.anchor)
    }
}

fn anchored_frame(width: f64, height: f64, anchor: Point) -> Rect {
    Rect::new(
        -anchor.x * width,
        -anchor.y * height,
        (1.0 - anchor.x) * width,
        (1.0 - anchor.y) * height,
    )
}

/// What a node draws and whether it can hold children.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum NodeKind {
    /// A plain node with no geometry and no child list.
    Bare,
    /// A grouping node.
    #[default]
    Container,
    /// A textured quad.
    Sprite(Sprite),
    /// Vector content.
    Graphics(Graphics),
    /// A tiled quad.
    TilingSprite(TilingSprite),
}

impl NodeKind {
    /// Whether nodes of this kind can hold children.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        !matches!(self, Self::Bare)
    }

    /// A short lowercase name, for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bare => "bare",
            Self::Container => "container",
            Self::Sprite(_) => "sprite",
            Self::Graphics(_) => "graphics",
            Self::TilingSprite(_) => "tiling-sprite",
        }
    }

    /// Adds this kind's own geometry, mapped through `world`, to `bounds`.
    pub fn add_self_bounds(&self, world: &Matrix, bounds: &mut Bounds) {
        let frame = match self {
            Self::Bare | Self::Container => return,
            Self::Sprite(s) => s.local_frame(),
            Self::TilingSprite(t) => t.local_frame(),
            Self::Graphics(g) => {
                for r in &g.shapes {
                    bounds.add_frame(world, r.x0, r.y0, r.x1, r.y1);
                }
                return;
            }
        };
        bounds.add_frame(world, frame.x0, frame.y0, frame.x1, frame.y1);
    }
}

/// The state of one node in a [`SceneGraph`](super::SceneGraph).
///
/// Read access goes through the graph ([`SceneGraph::node`](super::SceneGraph::node));
/// mutation goes through graph methods so that tree invariants hold.
pub struct DisplayObject {
    pub(crate) kind: NodeKind,
    pub(crate) transform: Transform,
    pub(crate) bounds: Bounds,
    pub(crate) alpha: f32,
    pub(crate) world_alpha: f32,
    pub(crate) visible: bool,
    pub(crate) renderable: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) mask: Option<NodeId>,
    pub(crate) is_mask: bool,
    pub(crate) filters: Option<Vec<FilterId>>,
    pub(crate) filter_area: Option<Rect>,
    pub(crate) bounds_id: u64,
    pub(crate) last_bounds_id: Option<u64>,
    pub(crate) listeners: Vec<ListenerEntry>,
}

impl DisplayObject {
    pub(crate) fn new(kind: NodeKind, mode: TransformMode) -> Self {
        Self {
            kind,
            transform: Transform::new(mode),
            bounds: Bounds::new(),
            alpha: 1.0,
            world_alpha: 1.0,
            visible: true,
            renderable: true,
            parent: None,
            children: Vec::new(),
            mask: None,
            is_mask: false,
            filters: None,
            filter_area: None,
            bounds_id: 0,
            last_bounds_id: None,
            listeners: Vec::new(),
        }
    }

    /// What this node draws.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The node's transform.
    #[inline]
    #[must_use]
    pub const fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The world matrix as of the last update.
    #[inline]
    #[must_use]
    pub const fn world_transform(&self) -> &Matrix {
        self.transform.world_matrix()
    }

    /// Own opacity. Not clamped.
    #[inline]
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Product of own and ancestor opacities as of the last update.
    #[inline]
    #[must_use]
    pub const fn world_alpha(&self) -> f32 {
        self.world_alpha
    }

    /// Whether the node and its subtree take part in updates and rendering.
    #[inline]
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Whether the node draws itself. Children are unaffected.
    #[inline]
    #[must_use]
    pub const fn renderable(&self) -> bool {
        self.renderable
    }

    /// The parent, if attached.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in draw order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The node clipping this one, if any.
    #[inline]
    #[must_use]
    pub const fn mask(&self) -> Option<NodeId> {
        self.mask
    }

    /// Whether another node uses this one as its mask.
    #[inline]
    #[must_use]
    pub const fn is_mask(&self) -> bool {
        self.is_mask
    }

    /// Filters applied to this node's subtree.
    #[inline]
    #[must_use]
    pub fn filters(&self) -> Option<&[FilterId]> {
        self.filters.as_deref()
    }

    /// Explicit filter region in world coordinates.
    #[inline]
    #[must_use]
    pub const fn filter_area(&self) -> Option<Rect> {
        self.filter_area
    }

    /// The node's bounds as of the last computation.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Bumped whenever the world state changes in a way that invalidates
    /// bounds.
    #[inline]
    #[must_use]
    pub const fn bounds_id(&self) -> u64 {
        self.bounds_id
    }

    /// Whether the cached bounds are behind [`bounds_id`](Self::bounds_id).
    #[inline]
    #[must_use]
    pub fn bounds_stale(&self) -> bool {
        self.last_bounds_id != Some(self.bounds_id)
    }
}

impl fmt::Debug for DisplayObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayObject")
            .field("kind", &self.kind.name())
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("alpha", &self.alpha)
            .field("world_alpha", &self.world_alpha)
            .field("visible", &self.visible)
            .field("renderable", &self.renderable)
            .field("mask", &self.mask)
            .field("is_mask", &self.is_mask)
            .field("world", self.transform.world_matrix())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
