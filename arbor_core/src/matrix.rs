// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2×3 affine matrix.
//!
//! [`Matrix`] maps `(x, y)` to `(a*x + c*y + tx, b*x + d*y + ty)`. All of its
//! in-place operations return `&mut Self` so they can be chained, and all of
//! them follow the same composition convention: [`append`](Matrix::append)
//! applies the argument *first*, [`prepend`](Matrix::prepend) applies it
//! *last*.
//!
//! Singular matrices are not an error. Inverting one produces non-finite
//! coefficients which propagate into whatever is computed from them; use
//! [`Matrix::is_finite`] to check.

use core::f64::consts::{PI, TAU};
use core::ops::{Mul, MulAssign};

use kurbo::{Affine, Point};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Below this, a skew sum (or its distance from a full turn) is treated as
/// zero by [`Matrix::decompose`].
const DECOMPOSE_EPSILON: f64 = 0.00001;

/// A 2-D affine transform stored as six coefficients.
///
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// | 0  0  1  |
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    /// X scale / rotation (row 0, column 0).
    pub a: f64,
    /// Y skew / rotation (row 1, column 0).
    pub b: f64,
    /// X skew / rotation (row 0, column 1).
    pub c: f64,
    /// Y scale / rotation (row 1, column 1).
    pub d: f64,
    /// X translation.
    pub tx: f64,
    /// Y translation.
    pub ty: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The decomposed parts of a local transform.
///
/// Filled by [`Matrix::decompose`] and consumed by
/// [`Matrix::set_transform_components`]. Decomposition never recovers the
/// pivot, so `pivot` is left as the caller set it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformComponents {
    /// Translation applied after scale, skew, and rotation.
    pub position: Point,
    /// Per-axis scale.
    pub scale: Point,
    /// Skew angles in radians.
    pub skew: Point,
    /// Local origin of scale, skew, and rotation.
    pub pivot: Point,
    /// Rotation in radians.
    pub rotation: f64,
}

impl Default for TransformComponents {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            scale: Point::new(1.0, 1.0),
            skew: Point::ZERO,
            pivot: Point::ZERO,
            rotation: 0.0,
        }
    }
}

impl Matrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Creates a matrix from its six coefficients.
    #[inline]
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Creates a pure translation.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Creates a matrix from a row-major 3×3 array.
    ///
    /// This is the inverse of [`to_array(false)`](Self::to_array); the last
    /// row is ignored.
    #[inline]
    #[must_use]
    pub const fn from_array(m: &[f64; 9]) -> Self {
        Self::new(m[0], m[3], m[1], m[4], m[2], m[5])
    }

    /// Overwrites all six coefficients.
    #[inline]
    pub fn set(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        *self = Self::new(a, b, c, d, tx, ty);
        self
    }

    /// Returns the matrix as a 3×3 array.
    ///
    /// With `transpose == false` the layout is row-major
    /// `[a, c, tx, b, d, ty, 0, 0, 1]`; with `transpose == true` it is
    /// column-major `[a, b, 0, c, d, 0, tx, ty, 1]`, which is what GPU
    /// uniform uploads expect.
    #[must_use]
    pub const fn to_array(&self, transpose: bool) -> [f64; 9] {
        if transpose {
            [
                self.a, self.b, 0.0, self.c, self.d, 0.0, self.tx, self.ty, 1.0,
            ]
        } else {
            [
                self.a, self.c, self.tx, self.b, self.d, self.ty, 0.0, 0.0, 1.0,
            ]
        }
    }

    /// Maps a point through this matrix.
    #[inline]
    #[must_use]
    pub fn apply(&self, pos: Point) -> Point {
        Point::new(
            self.a * pos.x + self.c * pos.y + self.tx,
            self.b * pos.x + self.d * pos.y + self.ty,
        )
    }

    /// Maps a point through the inverse of this matrix without mutating it.
    ///
    /// A singular matrix yields non-finite coordinates.
    #[must_use]
    pub fn apply_inverse(&self, pos: Point) -> Point {
        let id = 1.0 / (self.a * self.d + self.c * -self.b);
        let x = pos.x;
        let y = pos.y;
        Point::new(
            self.d * id * x + -self.c * id * y + (self.ty * self.c - self.tx * self.d) * id,
            self.a * id * y + -self.b * id * x + (-self.ty * self.a + self.tx * self.b) * id,
        )
    }

    /// Post-translates: `tx += x`, `ty += y`.
    #[inline]
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.tx += x;
        self.ty += y;
        self
    }

    /// Post-scales the whole mapping, translation included.
    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.a *= x;
        self.d *= y;
        self.c *= x;
        self.b *= y;
        self.tx *= x;
        self.ty *= y;
        self
    }

    /// Post-rotates the whole mapping by `angle` radians around the origin.
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        let cos = angle.cos();
        let sin = angle.sin();

        let a1 = self.a;
        let c1 = self.c;
        let tx1 = self.tx;

        self.a = a1 * cos - self.b * sin;
        self.b = a1 * sin + self.b * cos;
        self.c = c1 * cos - self.d * sin;
        self.d = c1 * sin + self.d * cos;
        self.tx = tx1 * cos - self.ty * sin;
        self.ty = tx1 * sin + self.ty * cos;
        self
    }

    /// Composes `self := self ∘ other`: `other` is applied first.
    ///
    /// This is how a world matrix is built: `parent_world.append(local)`.
    pub fn append(&mut self, other: &Self) -> &mut Self {
        let a1 = self.a;
        let b1 = self.b;
        let c1 = self.c;
        let d1 = self.d;

        self.a = other.a * a1 + other.b * c1;
        self.b = other.a * b1 + other.b * d1;
        self.c = other.c * a1 + other.d * c1;
        self.d = other.c * b1 + other.d * d1;
        self.tx = other.tx * a1 + other.ty * c1 + self.tx;
        self.ty = other.tx * b1 + other.ty * d1 + self.ty;
        self
    }

    /// Composes `self := other ∘ self`: `other` is applied last.
    pub fn prepend(&mut self, other: &Self) -> &mut Self {
        let tx1 = self.tx;

        if other.a != 1.0 || other.b != 0.0 || other.c != 0.0 || other.d != 1.0 {
            let a1 = self.a;
            let c1 = self.c;

            self.a = a1 * other.a + self.b * other.c;
            self.b = a1 * other.b + self.b * other.d;
            self.c = c1 * other.a + self.d * other.c;
            self.d = c1 * other.b + self.d * other.d;
        }

        self.tx = tx1 * other.a + self.ty * other.c + other.tx;
        self.ty = tx1 * other.b + self.ty * other.d + other.ty;
        self
    }

    /// Builds the matrix from position, pivot, scale, rotation, and skew.
    ///
    /// ```text
    /// a  = cos(rotation + skew_y) * scale_x
    /// b  = sin(rotation + skew_y) * scale_x
    /// c  = -sin(rotation - skew_x) * scale_y
    /// d  = cos(rotation - skew_x) * scale_y
    /// tx = x - (pivot_x * a + pivot_y * c)
    /// ty = y - (pivot_x * b + pivot_y * d)
    /// ```
    #[expect(
        clippy::too_many_arguments,
        reason = "one argument per transform component"
    )]
    pub fn set_transform(
        &mut self,
        x: f64,
        y: f64,
        pivot_x: f64,
        pivot_y: f64,
        scale_x: f64,
        scale_y: f64,
        rotation: f64,
        skew_x: f64,
        skew_y: f64,
    ) -> &mut Self {
        self.a = (rotation + skew_y).cos() * scale_x;
        self.b = (rotation + skew_y).sin() * scale_x;
        self.c = -(rotation - skew_x).sin() * scale_y;
        self.d = (rotation - skew_x).cos() * scale_y;

        self.tx = x - (pivot_x * self.a + pivot_y * self.c);
        self.ty = y - (pivot_x * self.b + pivot_y * self.d);
        self
    }

    /// [`set_transform`](Self::set_transform) from a component bundle.
    pub fn set_transform_components(&mut self, t: &TransformComponents) -> &mut Self {
        self.set_transform(
            t.position.x,
            t.position.y,
            t.pivot.x,
            t.pivot.y,
            t.scale.x,
            t.scale.y,
            t.rotation,
            t.skew.x,
            t.skew.y,
        )
    }

    /// Splits the matrix into position, scale, skew, and rotation.
    ///
    /// When the two skew angles cancel (within `1e-5`, or within `1e-5` of a
    /// full turn) the result is a pure rotation with zero skew; otherwise the
    /// rotation is zero and both skews are reported. In the rotation case,
    /// `a < 0 && d >= 0` shifts the rotation by half a turn toward zero.
    /// Scale is always non-negative, so a matrix with a negative scale does
    /// not round-trip exactly. `out.pivot` is not touched.
    pub fn decompose(&self, out: &mut TransformComponents) {
        let a = self.a;
        let b = self.b;
        let c = self.c;
        let d = self.d;

        let skew_x = -(-c).atan2(d);
        let skew_y = b.atan2(a);

        let delta = (skew_x + skew_y).abs();

        if delta < DECOMPOSE_EPSILON || (TAU - delta).abs() < DECOMPOSE_EPSILON {
            out.rotation = skew_y;
            if a < 0.0 && d >= 0.0 {
                out.rotation += if out.rotation <= 0.0 { PI } else { -PI };
            }
            out.skew = Point::ZERO;
        } else {
            out.rotation = 0.0;
            out.skew = Point::new(skew_x, skew_y);
        }

        out.scale = Point::new((a * a + b * b).sqrt(), (c * c + d * d).sqrt());
        out.position = Point::new(self.tx, self.ty);
    }

    /// Inverts in place.
    ///
    /// A singular matrix is not rejected; its coefficients become non-finite.
    pub fn invert(&mut self) -> &mut Self {
        let a1 = self.a;
        let b1 = self.b;
        let c1 = self.c;
        let d1 = self.d;
        let tx1 = self.tx;
        let n = a1 * d1 - b1 * c1;

        self.a = d1 / n;
        self.b = -b1 / n;
        self.c = -c1 / n;
        self.d = a1 / n;
        self.tx = (c1 * self.ty - d1 * tx1) / n;
        self.ty = -(a1 * self.ty - b1 * tx1) / n;
        self
    }

    /// Returns the inverse, leaving `self` untouched.
    #[must_use]
    pub fn inverted(&self) -> Self {
        let mut m = *self;
        m.invert();
        m
    }

    /// Resets to the identity.
    #[inline]
    pub fn identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Copies every coefficient into `target`.
    #[inline]
    pub fn copy_to<'a>(&self, target: &'a mut Self) -> &'a mut Self {
        *target = *self;
        target
    }

    /// Returns `a*d - b*c`.
    #[inline]
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Returns whether this is exactly the identity.
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Is this matrix [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.tx.is_finite()
            && self.ty.is_finite()
    }

    /// Is this matrix [NaN]?
    ///
    /// [NaN]: f64::is_nan
    #[inline]
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        self.a.is_nan()
            || self.b.is_nan()
            || self.c.is_nan()
            || self.d.is_nan()
            || self.tx.is_nan()
            || self.ty.is_nan()
    }
}

impl From<Affine> for Matrix {
    #[inline]
    fn from(affine: Affine) -> Self {
        let [a, b, c, d, tx, ty] = affine.as_coeffs();
        Self::new(a, b, c, d, tx, ty)
    }
}

impl From<Matrix> for Affine {
    #[inline]
    fn from(m: Matrix) -> Self {
        Self::new([m.a, m.b, m.c, m.d, m.tx, m.ty])
    }
}

impl Mul for Matrix {
    type Output = Self;

    /// `lhs * rhs` maps through `rhs` first, then `lhs`.
    #[inline]
    fn mul(mut self, rhs: Self) -> Self {
        self.append(&rhs);
        self
    }
}

impl MulAssign for Matrix {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.append(&rhs);
    }
}

impl Mul<Point> for Matrix {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: Point) -> Point {
        self.apply(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn approx_pt(p: Point, x: f64, y: f64) -> bool {
        approx(p.x, x) && approx(p.y, y)
    }

    fn approx_m(m: &Matrix, n: &Matrix) -> bool {
        approx(m.a, n.a)
            && approx(m.b, n.b)
            && approx(m.c, n.c)
            && approx(m.d, n.d)
            && approx(m.tx, n.tx)
            && approx(m.ty, n.ty)
    }

    #[test]
    fn identity_apply_is_exact() {
        let p = Point::new(123.456, -0.001);
        assert_eq!(Matrix::IDENTITY.apply(p), p, "identity must not perturb");
        assert_eq!(Matrix::default(), Matrix::IDENTITY, "default is identity");
    }

    #[test]
    fn translate_then_apply() {
        let mut m = Matrix::IDENTITY;
        m.translate(10.0, 20.0).translate(1.0, 2.0);
        assert!(approx_pt(m.apply(Point::new(1.0, 1.0)), 12.0, 23.0), "translation");
    }

    #[test]
    fn scale_includes_translation() {
        let mut m = Matrix::from_translation(5.0, 3.0);
        m.scale(2.0, 4.0);
        assert!(approx_pt(m.apply(Point::ZERO), 10.0, 12.0), "scaled translation");
        assert!(approx_pt(m.apply(Point::new(1.0, 1.0)), 12.0, 16.0), "scaled point");
    }

    #[test]
    fn rotate_quarter_turn() {
        let mut m = Matrix::IDENTITY;
        m.rotate(PI / 2.0);
        assert!(approx_pt(m.apply(Point::new(1.0, 0.0)), 0.0, 1.0), "x axis maps to y");
        assert!(approx_pt(m.apply(Point::new(0.0, 1.0)), -1.0, 0.0), "y axis maps to -x");
    }

    #[test]
    fn append_applies_argument_first() {
        let mut m = Matrix::from_translation(10.0, 0.0);
        let mut s = Matrix::IDENTITY;
        s.scale(2.0, 2.0);
        m.append(&s);
        // scale first, then translate
        assert!(approx_pt(m.apply(Point::new(1.0, 1.0)), 12.0, 2.0), "append order");
    }

    #[test]
    fn prepend_applies_argument_last() {
        let mut m = Matrix::from_translation(10.0, 0.0);
        let mut s = Matrix::IDENTITY;
        s.scale(2.0, 2.0);
        m.prepend(&s);
        // translate first, then scale
        assert!(approx_pt(m.apply(Point::new(1.0, 1.0)), 22.0, 2.0), "prepend order");
    }

    #[test]
    fn prepend_translation_shortcut() {
        let mut m = Matrix::new(2.0, 0.5, -0.5, 3.0, 1.0, 2.0);
        let before = m;
        m.prepend(&Matrix::from_translation(4.0, 5.0));
        assert_eq!(m.a, before.a, "linear part untouched");
        assert_eq!(m.d, before.d, "linear part untouched");
        assert!(approx(m.tx, 5.0) && approx(m.ty, 7.0), "translation added");
    }

    #[test]
    fn append_inverse_restores_points() {
        let a = Matrix::new(1.5, 0.3, -0.7, 2.0, 11.0, -4.0);
        let mut m = Matrix::from_translation(3.0, 9.0);
        let p = Point::new(7.0, -2.0);
        let before = m.apply(p);
        m.append(&a).append(&a.inverted());
        assert!(approx_pt(m.apply(p), before.x, before.y), "round trip");
    }

    #[test]
    fn apply_inverse_matches_inverted_apply() {
        let m = Matrix::new(0.8, 0.6, -0.6, 0.8, 40.0, -12.0);
        let p = Point::new(3.0, 4.0);
        let q = m.apply(p);
        let back = m.apply_inverse(q);
        assert!(approx_pt(back, p.x, p.y), "apply_inverse undoes apply");
        let back2 = m.inverted().apply(q);
        assert!(approx_pt(back2, p.x, p.y), "invert undoes apply");
    }

    #[test]
    fn singular_invert_is_not_finite() {
        let mut m = Matrix::new(0.0, 0.0, 0.0, 0.0, 1.0, 1.0);
        m.invert();
        assert!(!m.is_finite(), "singular inverse is non-finite");
        let p = Matrix::new(1.0, 2.0, 2.0, 4.0, 0.0, 0.0).apply_inverse(Point::new(1.0, 1.0));
        assert!(!p.x.is_finite(), "singular apply_inverse is non-finite");
    }

    #[test]
    fn set_transform_then_decompose_round_trips() {
        let mut m = Matrix::IDENTITY;
        m.set_transform(30.0, -15.0, 0.0, 0.0, 2.0, 0.5, 0.75, 0.0, 0.0);
        let mut out = TransformComponents::default();
        m.decompose(&mut out);
        assert!(approx_pt(out.position, 30.0, -15.0), "position");
        assert!(approx_pt(out.scale, 2.0, 0.5), "scale");
        assert!(approx(out.rotation, 0.75), "rotation");
        assert_eq!(out.skew, Point::ZERO, "no skew");
    }

    #[test]
    fn decompose_reports_skew_when_not_cancelling() {
        let mut m = Matrix::IDENTITY;
        m.set_transform(0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.3, 0.1);
        let mut out = TransformComponents::default();
        m.decompose(&mut out);
        assert_eq!(out.rotation, 0.0, "rotation zeroed");
        assert!(approx_pt(out.skew, 0.3, 0.1), "skew reported");
    }

    #[test]
    fn decompose_leaves_pivot_untouched() {
        let mut out = TransformComponents {
            pivot: Point::new(4.0, 5.0),
            ..TransformComponents::default()
        };
        Matrix::from_translation(1.0, 2.0).decompose(&mut out);
        assert_eq!(out.pivot, Point::new(4.0, 5.0), "pivot kept");
    }

    #[test]
    fn decompose_mirrored_x_is_lossy() {
        // scale (-1, 1) comes back as a half-turn Y skew with unsigned scale
        let m = Matrix::new(-1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let mut out = TransformComponents::default();
        m.decompose(&mut out);
        assert_eq!(out.rotation, 0.0, "skew branch");
        assert!(approx_pt(out.skew, 0.0, PI), "skew: {:?}", out.skew);
        assert!(approx_pt(out.scale, 1.0, 1.0), "scale is unsigned");
        let mut rebuilt = Matrix::IDENTITY;
        rebuilt.set_transform_components(&out);
        assert!(approx_m(&rebuilt, &m), "same mapping after rebuild");
    }

    #[test]
    fn pivot_offsets_translation() {
        let mut m = Matrix::IDENTITY;
        m.set_transform(10.0, 10.0, 5.0, 5.0, 2.0, 2.0, 0.0, 0.0, 0.0);
        assert!(approx_pt(m.apply(Point::new(5.0, 5.0)), 10.0, 10.0), "pivot lands on position");
    }

    #[test]
    fn array_layouts() {
        let m = Matrix::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(m.to_array(false), [1.0, 3.0, 5.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0], "row-major");
        assert_eq!(m.to_array(true), [1.0, 2.0, 0.0, 3.0, 4.0, 0.0, 5.0, 6.0, 1.0], "column-major");
        assert_eq!(Matrix::from_array(&m.to_array(false)), m, "from_array inverts to_array");
    }

    #[test]
    fn affine_conversion_agrees() {
        let m = Matrix::new(0.5, 0.2, -0.3, 1.5, 7.0, 8.0);
        let affine = Affine::from(m);
        let p = Point::new(2.0, -3.0);
        assert!(approx_pt(affine * p, m.apply(p).x, m.apply(p).y), "same mapping");
        assert_eq!(Matrix::from(affine), m, "lossless");
    }

    #[test]
    fn mul_is_append() {
        let a = Matrix::new(2.0, 0.0, 0.0, 2.0, 1.0, 1.0);
        let b = Matrix::new(0.0, 1.0, -1.0, 0.0, 3.0, 0.0);
        let mut c = a;
        c.append(&b);
        assert!(approx_m(&(a * b), &c), "mul matches append");
        let mut d = a;
        d *= b;
        assert!(approx_m(&d, &c), "mul_assign matches append");
    }

    #[test]
    fn determinant_and_copy() {
        let m = Matrix::new(2.0, 1.0, 1.0, 3.0, 0.0, 0.0);
        assert!(approx(m.determinant(), 5.0), "det");
        let mut target = Matrix::IDENTITY;
        m.copy_to(&mut target);
        assert_eq!(target, m, "copied");
        target.identity();
        assert!(target.is_identity(), "reset");
    }
}
