//! Degree-based trigonometry and line geometry.
//!
//! Turtle headings are kept in degrees throughout; these helpers convert
//! to radians only at the point where `f64` trigonometry is called.

use crate::types::{Point, Scalar};

/// Below this sine of the angle between two lines they count as parallel.
const PARALLEL_TOLERANCE: Scalar = 1e-9;

/// Sine of an angle in degrees.
#[inline]
#[must_use]
pub fn sind(degrees: Scalar) -> Scalar {
    degrees.to_radians().sin()
}

/// Cosine of an angle in degrees.
#[inline]
#[must_use]
pub fn cosd(degrees: Scalar) -> Scalar {
    degrees.to_radians().cos()
}

/// Angle of the vector (x, y) in degrees, in the range (-180, 180].
///
/// Returns 0 for the zero vector.
#[must_use]
pub fn angle(x: Scalar, y: Scalar) -> Scalar {
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }
    y.atan2(x).to_degrees()
}

/// The point at distance `radius` from `center` in direction `degrees`.
#[inline]
#[must_use]
pub fn polar(center: Point, radius: Scalar, degrees: Scalar) -> Point {
    Point::new(
        radius.mul_add(cosd(degrees), center.x),
        radius.mul_add(sind(degrees), center.y),
    )
}

/// Intersection of the line through `p1`, `p2` with the line through
/// `p3`, `p4`, using the two-point determinant form.
///
/// Returns `None` when the lines are parallel (or coincident) within
/// tolerance, or when either pair of points coincides. The tolerance is
/// relative to the lengths of both defining segments, so it behaves the
/// same for tiny and huge drawings.
#[must_use]
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let d12 = p1 - p2;
    let d34 = p3 - p4;
    let denom = d12.cross(d34);
    if denom.abs() <= PARALLEL_TOLERANCE * d12.hypot() * d34.hypot() {
        return None;
    }

    let a = p1.to_vec2().cross(p2.to_vec2());
    let b = p3.to_vec2().cross(p4.to_vec2());
    Some(Point::new(
        a.mul_add(d34.x, -(d12.x * b)) / denom,
        a.mul_add(d34.y, -(d12.y * b)) / denom,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
