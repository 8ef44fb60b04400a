//! Core types shared across the turtlescad system.
//!
//! These types define the data contract between the turtle state tracker
//! and the stroke outliner: centerline samples, stroke paths, and the
//! outline polygons produced from them.

pub use kurbo::{Point, Vec2};

use crate::error::{GeometryError, GeometryResult};
use crate::math::polar;

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// Convenience alias for plane coordinates, lengths, and angles in degrees.
pub type Scalar = f64;

/// Tolerance for floating-point comparisons.
pub const EPSILON: Scalar = 1e-9;

/// Pen width used when nothing else is configured.
pub const DEFAULT_PEN_WIDTH: Scalar = 1.0;

/// End-cap facet count used when nothing else is configured.
pub const DEFAULT_CAP_FACETS: u32 = 60;

// ---------------------------------------------------------------------------
// StrokePoint
// ---------------------------------------------------------------------------

/// One centerline sample of a stroke.
///
/// Carries the pen width and end-cap resolution that were in effect when
/// the sample was taken, so a stroke can change width along its length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    /// Centerline position.
    pub point: Point,
    /// Pen width at this sample (always positive).
    pub thickness: Scalar,
    /// Number of facets approximating a full circular cap (even, at least 2).
    pub cap_facets: u32,
}

impl StrokePoint {
    #[must_use]
    pub const fn new(point: Point, thickness: Scalar, cap_facets: u32) -> Self {
        Self {
            point,
            thickness,
            cap_facets,
        }
    }

    /// Half the pen width.
    #[inline]
    #[must_use]
    pub fn radius(&self) -> Scalar {
        self.thickness / 2.0
    }

    /// The point half a pen width away from the centerline, in the
    /// direction `degrees`.
    #[inline]
    #[must_use]
    pub fn offset(&self, degrees: Scalar) -> Point {
        polar(self.point, self.radius(), degrees)
    }
}

// ---------------------------------------------------------------------------
// StrokePath
// ---------------------------------------------------------------------------

/// The centerline of one pen-down/pen-up cycle.
///
/// `headings[i]` is the direction of travel, in degrees, from `points[i]`
/// to `points[i + 1]`, so a well-formed path always has exactly one more
/// point than it has headings.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePath {
    points: Vec<StrokePoint>,
    headings: Vec<Scalar>,
}

impl StrokePath {
    /// Start a path at a single point with no segments.
    #[must_use]
    pub fn new(start: StrokePoint) -> Self {
        Self {
            points: vec![start],
            headings: Vec::new(),
        }
    }

    /// Build a path from raw parts, checking the point/heading invariant.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InconsistentPath`] if `points.len()` is not
    /// `headings.len() + 1`.
    pub fn from_parts(points: Vec<StrokePoint>, headings: Vec<Scalar>) -> GeometryResult<Self> {
        let path = Self { points, headings };
        path.validate()?;
        Ok(path)
    }

    /// Append a segment ending at `point`, travelled along `heading`.
    pub fn push(&mut self, point: StrokePoint, heading: Scalar) {
        self.points.push(point);
        self.headings.push(heading);
    }

    /// Check the point/heading invariant.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InconsistentPath`] when the counts disagree.
    pub fn validate(&self) -> GeometryResult<()> {
        if self.points.len() == self.headings.len() + 1 {
            Ok(())
        } else {
            Err(GeometryError::InconsistentPath {
                points: self.points.len(),
                headings: self.headings.len(),
            })
        }
    }

    #[must_use]
    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    #[must_use]
    pub fn headings(&self) -> &[Scalar] {
        &self.headings
    }

    /// Number of centerline points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no points (never true for a validated path).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the stroke has zero length (a single sample).
    #[must_use]
    pub fn is_dot(&self) -> bool {
        self.points.len() == 1
    }
}

// ---------------------------------------------------------------------------
// Polygon
// ---------------------------------------------------------------------------

/// One vertex of an outline polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineVertex {
    pub point: Point,
    /// Set on the final vertex of each run (a cap fan or an edge).
    ///
    /// Purely a layout hint for writers; it has no geometric meaning.
    pub is_last: bool,
}

/// A closed outline, stored open: the first vertex is not repeated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<OutlineVertex>,
}

impl Polygon {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: Point, is_last: bool) {
        self.vertices.push(OutlineVertex { point, is_last });
    }

    #[must_use]
    pub fn vertices(&self) -> &[OutlineVertex] {
        &self.vertices
    }

    /// Iterate over the vertex positions only.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertices.iter().map(|v| v.point)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: Scalar, y: Scalar) -> StrokePoint {
        StrokePoint::new(Point::new(x, y), 2.0, 4)
    }

    #[test]
    fn stroke_point_offset() {
        let p = sample(1.0, 1.0);
        let up = p.offset(90.0);
        assert!((up.x - 1.0).abs() < EPSILON);
        assert!((up.y - 2.0).abs() < EPSILON);
    }

    #[test]
    fn new_path_is_consistent() {
        let path = StrokePath::new(sample(0.0, 0.0));
        assert!(path.validate().is_ok());
        assert!(path.is_dot());
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn push_keeps_invariant() {
        let mut path = StrokePath::new(sample(0.0, 0.0));
        path.push(sample(1.0, 0.0), 0.0);
        path.push(sample(1.0, 1.0), 90.0);
        assert!(path.validate().is_ok());
        assert_eq!(path.points().len(), path.headings().len() + 1);
    }

    #[test]
    fn from_parts_rejects_mismatch() {
        let err = StrokePath::from_parts(vec![sample(0.0, 0.0)], vec![0.0]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::InconsistentPath {
                points: 1,
                headings: 1
            }
        );
    }

    #[test]
    fn from_parts_rejects_empty() {
        assert!(StrokePath::from_parts(Vec::new(), Vec::new()).is_err());
    }

    #[test]
    fn polygon_push() {
        let mut poly = Polygon::new();
        assert!(poly.is_empty());
        poly.push(Point::new(1.0, 2.0), false);
        poly.push(Point::new(3.0, 4.0), true);
        assert_eq!(poly.len(), 2);
        assert!(poly.vertices()[1].is_last);
        assert_eq!(poly.points().next(), Some(Point::new(1.0, 2.0)));
    }
}
