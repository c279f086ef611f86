// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounds accumulator.
//!
//! [`Bounds`] starts empty (`min = +∞`, `max = -∞`) and grows as points,
//! transformed frames, and other bounds are merged into it. It knows nothing
//! about nodes; a [`SceneGraph`](crate::scene::SceneGraph) owns one per node
//! and decides when to rebuild it.

use kurbo::{Point, Rect};

use crate::matrix::Matrix;

/// Min/max accumulator with a change counter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest X seen.
    pub min_x: f64,
    /// Smallest Y seen.
    pub min_y: f64,
    /// Largest X seen.
    pub max_x: f64,
    /// Largest Y seen.
    pub max_y: f64,
    update_id: u64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    /// Creates empty bounds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
            update_id: 0,
        }
    }

    /// Bumped each time the bounds are cleared for a rebuild.
    #[inline]
    #[must_use]
    pub const fn update_id(&self) -> u64 {
        self.update_id
    }

    /// Resets to empty and bumps [`update_id`](Self::update_id).
    pub fn clear(&mut self) {
        self.update_id += 1;
        self.min_x = f64::INFINITY;
        self.min_y = f64::INFINITY;
        self.max_x = f64::NEG_INFINITY;
        self.max_y = f64::NEG_INFINITY;
    }

    /// True when nothing has been added since the last clear.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Returns the bounds as a rectangle, or [`Rect::ZERO`] when empty.
    #[must_use]
    pub fn get_rectangle(&self) -> Rect {
        if self.is_empty() {
            Rect::ZERO
        } else {
            Rect::new(self.min_x, self.min_y, self.max_x, self.max_y)
        }
    }

    /// Extends to include `p`.
    #[inline]
    pub fn add_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }

    /// Extends by four already-transformed corners `[x0, y0, .. x3, y3]`.
    pub fn add_quad(&mut self, vertices: &[f64; 8]) {
        for corner in vertices.chunks_exact(2) {
            self.add_point(Point::new(corner[0], corner[1]));
        }
    }

    /// Extends by the local rectangle `(x0, y0)-(x1, y1)` mapped through
    /// `transform`.
    pub fn add_frame(&mut self, transform: &Matrix, x0: f64, y0: f64, x1: f64, y1: f64) {
        for corner in [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ] {
            self.add_point(transform.apply(corner));
        }
    }

    /// Extends by the interleaved `[x, y, ..]` pairs in `vertices[begin..end]`
    /// mapped through `transform`.
    ///
    /// A trailing lone coordinate is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `begin..end` is out of range for `vertices`.
    pub fn add_vertices(&mut self, transform: &Matrix, vertices: &[f64], begin: usize, end: usize) {
        for pair in vertices[begin..end].chunks_exact(2) {
            self.add_point(transform.apply(Point::new(pair[0], pair[1])));
        }
    }

    /// Merges `other`.
    pub fn add_bounds(&mut self, other: &Self) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Merges `other` clipped to `mask`.
    ///
    /// Nothing is merged when the two do not overlap.
    pub fn add_bounds_mask(&mut self, other: &Self, mask: &Self) {
        self.add_clipped(other, mask.min_x, mask.min_y, mask.max_x, mask.max_y);
    }

    /// Merges `other` clipped to `area`.
    ///
    /// Nothing is merged when the two do not overlap.
    pub fn add_bounds_area(&mut self, other: &Self, area: Rect) {
        self.add_clipped(other, area.x0, area.y0, area.x1, area.y1);
    }

    /// Merges the four corners of `other` mapped through `matrix`.
    pub fn add_bounds_matrix(&mut self, other: &Self, matrix: &Matrix) {
        self.add_frame(matrix, other.min_x, other.min_y, other.max_x, other.max_y);
    }

    /// Grows by `x` horizontally and `y` vertically on each side.
    ///
    /// Empty bounds stay empty.
    pub fn pad(&mut self, x: f64, y: f64) {
        if !self.is_empty() {
            self.min_x -= x;
            self.max_x += x;
            self.min_y -= y;
            self.max_y += y;
        }
    }

    fn add_clipped(&mut self, other: &Self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let min_x = other.min_x.max(x0);
        let min_y = other.min_y.max(y0);
        let max_x = other.max_x.min(x1);
        let max_y = other.max_y.min(y1);

        if min_x <= max_x && min_y <= max_y {
            self.min_x = self.min_x.min(min_x);
            self.min_y = self.min_y.min(min_y);
            self.max_x = self.max_x.max(max_x);
            self.max_y = self.max_y.max(max_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_bounds(x0: f64, y0: f64, x1: f64, y1: f64) -> Bounds {
        let mut b = Bounds::new();
        b.add_frame(&Matrix::IDENTITY, x0, y0, x1, y1);
        b
    }

    #[test]
    fn starts_empty() {
        let b = Bounds::new();
        assert!(b.is_empty(), "new bounds are empty");
        assert_eq!(b.get_rectangle(), Rect::ZERO, "zero rectangle when empty");
    }

    #[test]
    fn clear_resets_and_bumps() {
        let mut b = rect_bounds(0.0, 0.0, 1.0, 1.0);
        let id = b.update_id();
        b.clear();
        assert!(b.is_empty(), "cleared");
        assert_eq!(b.update_id(), id + 1, "update id bumped");
    }

    #[test]
    fn add_point_extends() {
        let mut b = Bounds::new();
        b.add_point(Point::new(3.0, -1.0));
        b.add_point(Point::new(-2.0, 4.0));
        assert_eq!(b.get_rectangle(), Rect::new(-2.0, -1.0, 3.0, 4.0), "extent");
    }

    #[test]
    fn add_frame_transforms_corners() {
        let mut m = Matrix::IDENTITY;
        m.rotate(core::f64::consts::FRAC_PI_2);
        let mut b = Bounds::new();
        b.add_frame(&m, 0.0, 0.0, 10.0, 5.0);
        let r = b.get_rectangle();
        assert!((r.x0 + 5.0).abs() < 1e-9 && r.y0.abs() < 1e-9, "origin: {r:?}");
        assert!((r.width() - 5.0).abs() < 1e-9, "rotated width");
        assert!((r.height() - 10.0).abs() < 1e-9, "rotated height");
    }

    #[test]
    fn add_quad_and_vertices() {
        let mut b = Bounds::new();
        b.add_quad(&[0.0, 0.0, 2.0, 0.0, 2.0, 3.0, 0.0, 3.0]);
        assert_eq!(b.get_rectangle(), Rect::new(0.0, 0.0, 2.0, 3.0), "quad");

        let mut v = Bounds::new();
        let verts = [100.0, 100.0, 1.0, 1.0, 4.0, 2.0, 99.0];
        v.add_vertices(&Matrix::from_translation(10.0, 0.0), &verts, 2, 7);
        assert_eq!(v.get_rectangle(), Rect::new(11.0, 1.0, 14.0, 2.0), "vertex range");
    }

    #[test]
    fn mask_clips_merge() {
        let mut b = Bounds::new();
        let child = rect_bounds(0.0, 0.0, 100.0, 100.0);
        let mask = rect_bounds(50.0, 50.0, 200.0, 200.0);
        b.add_bounds_mask(&child, &mask);
        assert_eq!(b.get_rectangle(), Rect::new(50.0, 50.0, 100.0, 100.0), "intersection");
    }

    #[test]
    fn disjoint_mask_leaves_bounds_unchanged() {
        let mut b = rect_bounds(0.0, 0.0, 1.0, 1.0);
        let before = b;
        let child = rect_bounds(0.0, 0.0, 10.0, 10.0);
        let mask = rect_bounds(20.0, 20.0, 30.0, 30.0);
        b.add_bounds_mask(&child, &mask);
        assert_eq!(b, before, "no overlap, no change");
    }

    #[test]
    fn area_clips_merge() {
        let mut b = Bounds::new();
        let child = rect_bounds(0.0, 0.0, 100.0, 100.0);
        b.add_bounds_area(&child, Rect::new(10.0, 20.0, 40.0, 300.0));
        assert_eq!(b.get_rectangle(), Rect::new(10.0, 20.0, 40.0, 100.0), "clipped to area");
    }

    #[test]
    fn bounds_matrix_and_pad() {
        let mut b = Bounds::new();
        let child = rect_bounds(0.0, 0.0, 10.0, 10.0);
        let mut m = Matrix::IDENTITY;
        m.scale(2.0, 1.0);
        b.add_bounds_matrix(&child, &m);
        assert_eq!(b.get_rectangle(), Rect::new(0.0, 0.0, 20.0, 10.0), "scaled");
        b.pad(1.0, 2.0);
        assert_eq!(b.get_rectangle(), Rect::new(-1.0, -2.0, 21.0, 12.0), "padded");

        let mut empty = Bounds::new();
        empty.pad(5.0, 5.0);
        assert!(empty.is_empty(), "padding empty bounds is a no-op");
    }
}
