//! Stroke outlining: turn a centerline path into the boundary of the ink.
//!
//! The outline is traced clockwise in two passes over the path:
//!
//! - **Forward** (`d = +1`): start cap at index 0, then the left-hand edge
//!   through the interior points, then the end cap at the last index.
//! - **Backward** (`d = -1`): the right-hand edge through the interior
//!   points in reverse, stopping at index 1 so the start cap is not
//!   emitted twice.
//!
//! Caps are half-circle fans of `cap_facets / 2 + 1` vertices. Interior
//! points are mitered joins: the intersection of the two offset lines on
//! the current side, or a single offset vertex when the segments are
//! collinear.

use crate::math::{line_intersection, polar};
use crate::types::{Point, Polygon, Scalar, StrokePath, StrokePoint};

/// Which of the two traversals is being traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Ascending indices, tracing the left-hand edge.
    Forward,
    /// Descending indices, tracing the right-hand edge.
    Backward,
}

impl Pass {
    /// The direction code `d` used in offset angles (`heading + 90·d`).
    #[must_use]
    pub const fn sign(self) -> Scalar {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Outline one stroke path.
///
/// A single-point path yields a full circle of `cap_facets` vertices.
/// Anything longer yields two half-circle caps joined by the offset edges.
#[must_use]
pub fn outline_stroke(path: &StrokePath) -> Polygon {
    if path.is_empty() {
        Polygon::new()
    } else if path.is_dot() {
        dot_outline(&path.points()[0])
    } else {
        stroke_outline(path)
    }
}

/// The zero-length stroke: a full circle around the only point.
fn dot_outline(point: &StrokePoint) -> Polygon {
    let n = point.cap_facets;
    let step = 360.0 / Scalar::from(n);
    let mut polygon = Polygon::with_capacity(n as usize);
    for j in 0..n {
        let angle = Scalar::from(j) * step;
        polygon.push(point.offset(angle), j == n - 1);
    }
    polygon
}

fn stroke_outline(path: &StrokePath) -> Polygon {
    let points = path.points();
    let headings = path.headings();
    let last = points.len() - 1;

    let capacity = points[0].cap_facets as usize + points[last].cap_facets as usize + 2 * last;
    let mut polygon = Polygon::with_capacity(capacity);

    // Forward pass: start cap, left edge, end cap.
    push_cap(&mut polygon, &points[0], headings[0] - 90.0);
    for i in 1..last {
        polygon.push(join_vertex(path, i, Pass::Forward), i == last - 1);
    }
    push_cap(&mut polygon, &points[last], headings[last - 1] + 90.0);

    // Backward pass: right edge only.
    for i in (1..last).rev() {
        polygon.push(join_vertex(path, i, Pass::Backward), i == 1);
    }

    polygon
}

/// Push a half-circle fan starting at `start_angle` and turning clockwise.
fn push_cap(polygon: &mut Polygon, point: &StrokePoint, start_angle: Scalar) {
    let n = point.cap_facets;
    let step = 360.0 / Scalar::from(n);
    let half = n / 2;
    for j in 0..=half {
        let angle = Scalar::from(j).mul_add(-step, start_angle);
        polygon.push(polar(point.point, point.radius(), angle), j == half);
    }
}

/// The outline vertex for interior index `i` on the given pass.
///
/// This is where a rounded or beveled join would plug in: it would emit
/// several vertices here instead of the single miter point.
///
/// # Panics
///
/// Panics if `i` is not an interior index (`0 < i < len - 1`).
#[must_use]
#[allow(clippy::float_cmp)]
pub fn join_vertex(path: &StrokePath, i: usize, pass: Pass) -> Point {
    let points = path.points();
    let headings = path.headings();
    assert!(
        i > 0 && i + 1 < points.len(),
        "join index {i} is not interior to a path of {} points",
        points.len()
    );

    let d = pass.sign();
    let (heading_prev, heading_next, prev, next) = match pass {
        Pass::Forward => (headings[i - 1], headings[i], &points[i - 1], &points[i + 1]),
        Pass::Backward => (headings[i], headings[i - 1], &points[i + 1], &points[i - 1]),
    };
    let point = &points[i];

    let normal_prev = 90.0f64.mul_add(d, heading_prev);
    let corner = point.offset(normal_prev);

    if heading_prev == heading_next {
        // Both offset edges pass through the same point.
        return corner;
    }

    let normal_next = 90.0f64.mul_add(d, heading_next);
    line_intersection(
        prev.offset(normal_prev),
        corner,
        point.offset(normal_next),
        next.offset(normal_next),
    )
    .unwrap_or(corner)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
