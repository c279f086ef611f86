// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node transform: components, local matrix, and world matrix.
//!
//! A [`Transform`] owns the position, scale, skew, pivot, and rotation of a
//! node and derives two matrices from them:
//!
//! - the *local* matrix, built by [`Matrix::set_transform`];
//! - the *world* matrix, `parent_world ∘ local`, rebuilt by
//!   [`Transform::update_transform`].
//!
//! Two strategies share one contract (see [`TransformMode`]). They differ only
//! in *when* the local matrix is rebuilt, so for the same sequence of calls
//! they produce bit-identical matrices.
//!
//! Every call to [`update_transform`](Transform::update_transform) bumps
//! [`world_id`](Transform::world_id). Children remember the `world_id` they
//! last composed against, which is how a cached child can tell that its
//! parent moved.

use kurbo::Point;

use crate::config::TransformMode;
use crate::matrix::{Matrix, TransformComponents};
use crate::point::ObservablePoint;

/// What a child needs from its parent to compose a world matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParentFrame {
    /// The parent's world matrix.
    pub world: Matrix,
    /// The parent's [`world_id`](Transform::world_id) at the time `world` was
    /// read.
    pub world_id: u64,
}

impl ParentFrame {
    /// The frame used for nodes without a parent: identity, version 0.
    pub const DETACHED: Self = Self {
        world: Matrix::IDENTITY,
        world_id: 0,
    };

    /// Snapshots a transform's world state.
    #[inline]
    #[must_use]
    pub fn of(transform: &Transform) -> Self {
        Self {
            world: transform.world,
            world_id: transform.world_id,
        }
    }
}

impl Default for ParentFrame {
    fn default() -> Self {
        Self::DETACHED
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Strategy {
    Eager {
        /// Last parent world matrix composed against.
        parent_world: Option<Matrix>,
    },
    Cached {
        /// Bumped by every component change.
        local_id: u64,
        /// `local_id` at the last local rebuild.
        current_local_id: u64,
        /// Parent `world_id` at the last world rebuild.
        parent_id: u64,
    },
}

impl Strategy {
    const fn for_mode(mode: TransformMode) -> Self {
        match mode {
            TransformMode::Static => Self::Cached {
                local_id: 0,
                current_local_id: 0,
                parent_id: 0,
            },
            TransformMode::Dynamic => Self::Eager { parent_world: None },
        }
    }
}

/// A node's local components and derived matrices.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    position: ObservablePoint,
    scale: ObservablePoint,
    skew: ObservablePoint,
    pivot: ObservablePoint,
    rotation: f64,
    local: Matrix,
    world: Matrix,
    world_id: u64,
    strategy: Strategy,
}

impl Transform {
    /// Creates an identity transform using the given strategy.
    #[must_use]
    pub const fn new(mode: TransformMode) -> Self {
        Self {
            position: ObservablePoint::new(0.0, 0.0),
            scale: ObservablePoint::new(1.0, 1.0),
            skew: ObservablePoint::new(0.0, 0.0),
            pivot: ObservablePoint::new(0.0, 0.0),
            rotation: 0.0,
            local: Matrix::IDENTITY,
            world: Matrix::IDENTITY,
            world_id: 0,
            strategy: Strategy::for_mode(mode),
        }
    }

    /// Which strategy this transform uses.
    #[must_use]
    pub const fn mode(&self) -> TransformMode {
        match self.strategy {
            Strategy::Eager { .. } => TransformMode::Dynamic,
            Strategy::Cached { .. } => TransformMode::Static,
        }
    }

    // -- Component getters --

    /// Position in the parent's coordinate space.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position.get()
    }

    /// Per-axis scale.
    #[inline]
    #[must_use]
    pub const fn scale(&self) -> Point {
        self.scale.get()
    }

    /// Skew angles in radians.
    #[inline]
    #[must_use]
    pub const fn skew(&self) -> Point {
        self.skew.get()
    }

    /// Local origin of scale, skew, and rotation.
    #[inline]
    #[must_use]
    pub const fn pivot(&self) -> Point {
        self.pivot.get()
    }

    /// Rotation in radians.
    #[inline]
    #[must_use]
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Returns all components as one bundle.
    #[must_use]
    pub const fn components(&self) -> TransformComponents {
        TransformComponents {
            position: self.position.get(),
            scale: self.scale.get(),
            skew: self.skew.get(),
            pivot: self.pivot.get(),
            rotation: self.rotation,
        }
    }

    // -- Component setters --

    /// Sets the position.
    pub fn set_position(&mut self, x: f64, y: f64) {
        if self.position.set(x, y) {
            self.on_change();
        }
    }

    /// Sets the scale.
    pub fn set_scale(&mut self, x: f64, y: f64) {
        if self.scale.set(x, y) {
            self.on_change();
        }
    }

    /// Sets the skew angles.
    pub fn set_skew(&mut self, x: f64, y: f64) {
        if self.skew.set(x, y) {
            self.on_change();
        }
    }

    /// Sets the pivot.
    pub fn set_pivot(&mut self, x: f64, y: f64) {
        if self.pivot.set(x, y) {
            self.on_change();
        }
    }

    /// Sets the rotation in radians.
    pub fn set_rotation(&mut self, rotation: f64) {
        if self.rotation != rotation {
            self.rotation = rotation;
            self.on_change();
        }
    }

    /// Sets every component at once. Dirty at most once.
    pub fn set_components(&mut self, t: &TransformComponents) {
        let mut changed = self.position.copy_from(t.position);
        changed |= self.scale.copy_from(t.scale);
        changed |= self.skew.copy_from(t.skew);
        changed |= self.pivot.copy_from(t.pivot);
        if self.rotation != t.rotation {
            self.rotation = t.rotation;
            changed = true;
        }
        if changed {
            self.on_change();
        }
    }

    /// Replaces position, scale, skew, and rotation with the decomposition of
    /// `matrix`. The pivot is kept.
    ///
    /// Decomposition is lossy for mirrored matrices; see
    /// [`Matrix::decompose`].
    pub fn set_from_matrix(&mut self, matrix: &Matrix) {
        let mut parts = self.components();
        matrix.decompose(&mut parts);
        self.set_components(&parts);
    }

    // -- Matrices --

    /// The local matrix.
    ///
    /// With [`TransformMode::Static`] this is the matrix as of the last
    /// update; call [`update_local_transform`](Self::update_local_transform)
    /// first if components changed since.
    #[inline]
    #[must_use]
    pub const fn local_matrix(&self) -> &Matrix {
        &self.local
    }

    /// The world matrix as of the last update.
    #[inline]
    #[must_use]
    pub const fn world_matrix(&self) -> &Matrix {
        &self.world
    }

    /// Bumped every time the world matrix is recomposed.
    #[inline]
    #[must_use]
    pub const fn world_id(&self) -> u64 {
        self.world_id
    }

    /// The parent `world_id` this transform last composed against.
    ///
    /// Only cached transforms track this; eager ones return `None`.
    #[must_use]
    pub const fn parent_id(&self) -> Option<u64> {
        match self.strategy {
            Strategy::Cached { parent_id, .. } => Some(parent_id),
            Strategy::Eager { .. } => None,
        }
    }

    /// Whether the local matrix is behind the components.
    #[must_use]
    pub const fn is_local_dirty(&self) -> bool {
        match self.strategy {
            Strategy::Cached {
                local_id,
                current_local_id,
                ..
            } => local_id != current_local_id,
            Strategy::Eager { .. } => false,
        }
    }

    /// Rebuilds the local matrix if it is behind the components.
    pub fn update_local_transform(&mut self) {
        if let Strategy::Cached {
            local_id,
            current_local_id,
            ..
        } = &mut self.strategy
            && *local_id != *current_local_id
        {
            *current_local_id = *local_id;
            self.local.set_transform_components(&TransformComponents {
                position: self.position.get(),
                scale: self.scale.get(),
                skew: self.skew.get(),
                pivot: self.pivot.get(),
                rotation: self.rotation,
            });
        }
    }

    /// Recomposes the world matrix as `parent.world ∘ local` and bumps
    /// [`world_id`](Self::world_id).
    pub fn update_transform(&mut self, parent: &ParentFrame) {
        self.update_local_transform();
        match &mut self.strategy {
            Strategy::Eager { parent_world } => *parent_world = Some(parent.world),
            Strategy::Cached { parent_id, .. } => *parent_id = parent.world_id,
        }
        self.compose_world(&parent.world);
    }

    fn compose_world(&mut self, parent_world: &Matrix) {
        self.world = *parent_world;
        self.world.append(&self.local);
        self.world_id += 1;
    }

    fn rebuild_local(&mut self) {
        let parts = self.components();
        self.local.set_transform_components(&parts);
    }

    fn on_change(&mut self) {
        match &mut self.strategy {
            Strategy::Cached { local_id, .. } => *local_id += 1,
            Strategy::Eager { parent_world } => {
                let parent_world = *parent_world;
                self.rebuild_local();
                if let Some(pw) = parent_world {
                    self.compose_world(&pw);
                }
            }
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(TransformMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx_pt(p: Point, x: f64, y: f64) -> bool {
        (p.x - x).abs() < EPS && (p.y - y).abs() < EPS
    }

    fn drive(t: &mut Transform, parent: &ParentFrame) {
        t.set_position(12.0, -3.0);
        t.set_scale(1.5, 0.25);
        t.set_rotation(0.4);
        t.set_skew(0.05, -0.02);
        t.set_pivot(2.0, 7.0);
        t.update_transform(parent);
    }

    #[test]
    fn modes_are_bit_identical() {
        let mut parent_m = Matrix::IDENTITY;
        parent_m.set_transform(100.0, 50.0, 0.0, 0.0, 2.0, 2.0, 0.3, 0.0, 0.0);
        let parent = ParentFrame {
            world: parent_m,
            world_id: 1,
        };
        let mut s = Transform::new(TransformMode::Static);
        let mut d = Transform::new(TransformMode::Dynamic);
        drive(&mut s, &parent);
        drive(&mut d, &parent);
        assert_eq!(s.local_matrix(), d.local_matrix(), "local matrices");
        assert_eq!(s.world_matrix(), d.world_matrix(), "world matrices");
    }

    #[test]
    fn world_is_parent_then_local() {
        let mut t = Transform::new(TransformMode::Static);
        t.set_position(10.0, 0.0);
        let parent = ParentFrame {
            world: Matrix::from_translation(0.0, 5.0),
            world_id: 3,
        };
        t.update_transform(&parent);
        let mut expected = parent.world;
        expected.append(t.local_matrix());
        assert_eq!(*t.world_matrix(), expected, "composition order");
        assert!(approx_pt(t.world_matrix().apply(Point::ZERO), 10.0, 5.0), "origin");
        assert_eq!(t.parent_id(), Some(3), "parent id recorded");
    }

    #[test]
    fn static_defers_local_rebuild() {
        let mut t = Transform::new(TransformMode::Static);
        t.set_position(4.0, 4.0);
        assert!(t.is_local_dirty(), "dirty after set");
        assert!(t.local_matrix().is_identity(), "not rebuilt yet");
        t.update_transform(&ParentFrame::DETACHED);
        assert!(!t.is_local_dirty(), "clean after update");
        assert!(approx_pt(t.local_matrix().apply(Point::ZERO), 4.0, 4.0), "rebuilt");
    }

    #[test]
    fn dynamic_rebuilds_eagerly() {
        let mut t = Transform::new(TransformMode::Dynamic);
        t.set_position(4.0, 4.0);
        assert!(!t.is_local_dirty(), "never dirty");
        assert!(approx_pt(t.local_matrix().apply(Point::ZERO), 4.0, 4.0), "local now");
        // no parent seen yet, world untouched
        assert!(t.world_matrix().is_identity(), "world waits for a parent");

        t.update_transform(&ParentFrame {
            world: Matrix::from_translation(1.0, 1.0),
            world_id: 1,
        });
        let id = t.world_id();
        t.set_position(5.0, 4.0);
        assert!(approx_pt(t.world_matrix().apply(Point::ZERO), 6.0, 5.0), "world now");
        assert!(t.world_id() > id, "world id bumped");
    }

    #[test]
    fn unchanged_set_does_not_dirty() {
        let mut t = Transform::new(TransformMode::Static);
        t.update_transform(&ParentFrame::DETACHED);
        t.set_position(0.0, 0.0);
        t.set_rotation(0.0);
        assert!(!t.is_local_dirty(), "same values are not changes");
    }

    #[test]
    fn world_id_bumps_every_update() {
        let mut t = Transform::default();
        t.update_transform(&ParentFrame::DETACHED);
        let first = t.world_id();
        t.update_transform(&ParentFrame::DETACHED);
        assert_eq!(t.world_id(), first + 1, "always recomposed");
    }

    #[test]
    fn set_from_matrix_keeps_pivot() {
        let mut t = Transform::new(TransformMode::Static);
        t.set_pivot(3.0, 3.0);
        let mut m = Matrix::IDENTITY;
        m.set_transform(20.0, 10.0, 0.0, 0.0, 2.0, 3.0, 0.5, 0.0, 0.0);
        t.set_from_matrix(&m);
        assert_eq!(t.pivot(), Point::new(3.0, 3.0), "pivot kept");
        assert!(approx_pt(t.position(), 20.0, 10.0), "position");
        assert!(approx_pt(t.scale(), 2.0, 3.0), "scale");
        assert!((t.rotation() - 0.5).abs() < EPS, "rotation");
    }

    #[test]
    fn mode_reported() {
        assert_eq!(Transform::new(TransformMode::Dynamic).mode(), TransformMode::Dynamic, "dynamic");
        assert_eq!(Transform::default().mode(), TransformMode::Static, "default");
    }
}
