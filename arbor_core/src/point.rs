// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points that report their own changes.
//!
//! Plain coordinates use [`kurbo::Point`] directly. [`ObservablePoint`] is the
//! variant owned by a [`Transform`](crate::transform::Transform): every
//! setter returns whether the stored value actually changed, and the owning
//! transform uses that to decide whether to mark itself dirty.

pub use kurbo::Point;

/// A coordinate pair whose setters report whether anything changed.
///
/// Writing the value it already holds is a no-op and returns `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObservablePoint {
    x: f64,
    y: f64,
}

impl ObservablePoint {
    /// Creates a point at `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The X coordinate.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// The Y coordinate.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Returns the value as a plain [`Point`].
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Sets both coordinates. Returns `true` if either one changed.
    #[inline]
    pub fn set(&mut self, x: f64, y: f64) -> bool {
        if self.x != x || self.y != y {
            self.x = x;
            self.y = y;
            true
        } else {
            false
        }
    }

    /// Sets the X coordinate. Returns `true` if it changed.
    #[inline]
    pub fn set_x(&mut self, x: f64) -> bool {
        let y = self.y;
        self.set(x, y)
    }

    /// Sets the Y coordinate. Returns `true` if it changed.
    #[inline]
    pub fn set_y(&mut self, y: f64) -> bool {
        let x = self.x;
        self.set(x, y)
    }

    /// Copies `p` into this point. Returns `true` if it changed.
    #[inline]
    pub fn copy_from(&mut self, p: Point) -> bool {
        self.set(p.x, p.y)
    }
}

impl From<Point> for ObservablePoint {
    #[inline]
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<ObservablePoint> for Point {
    #[inline]
    fn from(p: ObservablePoint) -> Self {
        p.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_change() {
        let mut p = ObservablePoint::new(1.0, 2.0);
        assert!(!p.set(1.0, 2.0), "same value is not a change");
        assert!(p.set(1.0, 3.0), "new y is a change");
        assert_eq!(p.get(), Point::new(1.0, 3.0), "stored");
    }

    #[test]
    fn single_axis_setters() {
        let mut p = ObservablePoint::default();
        assert!(p.set_x(4.0), "x changed");
        assert!(!p.set_x(4.0), "x unchanged");
        assert!(p.set_y(-1.0), "y changed");
        assert_eq!((p.x(), p.y()), (4.0, -1.0), "both stored");
    }

    #[test]
    fn copy_from_plain_point() {
        let mut p = ObservablePoint::new(0.0, 0.0);
        assert!(p.copy_from(Point::new(5.0, 6.0)), "changed");
        assert!(!p.copy_from(Point::new(5.0, 6.0)), "unchanged");
        assert_eq!(Point::from(p), Point::new(5.0, 6.0), "conversion");
    }
}
