//! Turtle state tracking.
//!
//! The turtle owns the cursor (position, heading), the pen attributes
//! (width, end-cap facets), and the stroke path being drawn while the pen
//! is down. Lifting the pen finalizes the path into an outline polygon.
//!
//! Front ends drive the turtle only through [`TurtleCommands`], so a script
//! interpreter, a fixed command list, or a test can all stand in for each
//! other.

use tracing::{debug, trace};

use crate::error::{GeometryError, GeometryResult};
use crate::math::{angle, cosd, sind};
use crate::outline::outline_stroke;
use crate::types::{
    DEFAULT_CAP_FACETS, DEFAULT_PEN_WIDTH, Point, Polygon, Scalar, StrokePath, StrokePoint,
};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Initial pen attributes for a new turtle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleOptions {
    /// Initial pen width. Default: 1.
    pub pen_width: Scalar,
    /// Initial end-cap facet count. Default: 60.
    pub cap_facets: u32,
}

impl Default for TurtleOptions {
    fn default() -> Self {
        Self {
            pen_width: DEFAULT_PEN_WIDTH,
            cap_facets: DEFAULT_CAP_FACETS,
        }
    }
}

/// Which way to turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    /// Counter-clockwise.
    Left,
    /// Clockwise.
    Right,
}

impl TurnDirection {
    #[must_use]
    pub const fn sign(self) -> Scalar {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Capability interface
// ---------------------------------------------------------------------------

/// The drawing commands a front end may issue.
///
/// Headings are in degrees, 0 along +x, increasing counter-clockwise.
pub trait TurtleCommands {
    /// Start a stroke at the current position. No-op if already down.
    fn pen_down(&mut self);

    /// Finish the current stroke and return its outline.
    ///
    /// Returns `Ok(None)` if the pen was already up.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InconsistentPath`] if the stroke path broke
    /// its point/heading invariant.
    fn pen_up(&mut self) -> GeometryResult<Option<Polygon>>;

    fn is_pen_down(&self) -> bool;

    fn pen_width(&self) -> Scalar;

    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidPenWidth`] for non-finite or
    /// non-positive widths.
    fn set_pen_width(&mut self, width: Scalar) -> GeometryResult<()>;

    fn cap_facets(&self) -> u32;

    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidCapFacets`] unless `facets` is even
    /// and at least 2.
    fn set_cap_facets(&mut self, facets: i64) -> GeometryResult<()>;

    /// Move `distance` along the heading (backwards if negative).
    fn forward(&mut self, distance: Scalar);

    /// Change the heading by `degrees` in the given direction.
    fn turn(&mut self, degrees: Scalar, direction: TurnDirection);

    /// Jump to `(x, y)` without changing the heading.
    fn set_position(&mut self, x: Scalar, y: Scalar);

    fn heading(&self) -> Scalar;

    fn position(&self) -> Point;

    fn left(&mut self, degrees: Scalar) {
        self.turn(degrees, TurnDirection::Left);
    }

    fn right(&mut self, degrees: Scalar) {
        self.turn(degrees, TurnDirection::Right);
    }
}

// ---------------------------------------------------------------------------
// Turtle
// ---------------------------------------------------------------------------

/// Check an end-cap facet count.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidCapFacets`] for odd or sub-2 values.
pub fn validate_cap_facets(facets: i64) -> GeometryResult<u32> {
    if facets < 2 || facets % 2 != 0 {
        return Err(GeometryError::InvalidCapFacets(facets));
    }
    u32::try_from(facets).map_err(|_| GeometryError::InvalidCapFacets(facets))
}

/// Check a pen width.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidPenWidth`] unless `width` is finite and
/// positive.
pub fn validate_pen_width(width: Scalar) -> GeometryResult<Scalar> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(GeometryError::InvalidPenWidth(width))
    }
}

/// The turtle state tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct Turtle {
    position: Point,
    heading: Scalar,
    pen_width: Scalar,
    cap_facets: u32,
    /// The stroke in progress; `Some` exactly while the pen is down.
    stroke: Option<StrokePath>,
}

impl Turtle {
    /// Create a turtle at the origin, heading along +x, pen up.
    ///
    /// # Errors
    ///
    /// Returns an error if the options carry an invalid width or facet count.
    pub fn new(options: TurtleOptions) -> GeometryResult<Self> {
        let pen_width = validate_pen_width(options.pen_width)?;
        let cap_facets = validate_cap_facets(i64::from(options.cap_facets))?;
        Ok(Self {
            position: Point::ORIGIN,
            heading: 0.0,
            pen_width,
            cap_facets,
            stroke: None,
        })
    }

    /// The stroke path being drawn, if the pen is down.
    #[must_use]
    pub const fn stroke(&self) -> Option<&StrokePath> {
        self.stroke.as_ref()
    }

    const fn sample(&self) -> StrokePoint {
        StrokePoint::new(self.position, self.pen_width, self.cap_facets)
    }

    /// Move to `to`, recording a segment along `heading` if the pen is down.
    fn move_to(&mut self, to: Point, heading: Scalar) {
        self.position = to;
        let sample = self.sample();
        if let Some(stroke) = self.stroke.as_mut() {
            stroke.push(sample, heading);
        }
    }
}

impl Default for Turtle {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            heading: 0.0,
            pen_width: DEFAULT_PEN_WIDTH,
            cap_facets: DEFAULT_CAP_FACETS,
            stroke: None,
        }
    }
}

impl TurtleCommands for Turtle {
    fn pen_down(&mut self) {
        if self.stroke.is_none() {
            trace!(x = self.position.x, y = self.position.y, "pen down");
            self.stroke = Some(StrokePath::new(self.sample()));
        }
    }

    fn pen_up(&mut self) -> GeometryResult<Option<Polygon>> {
        let Some(stroke) = self.stroke.take() else {
            return Ok(None);
        };
        stroke.validate()?;
        let polygon = outline_stroke(&stroke);
        debug!(
            points = stroke.len(),
            vertices = polygon.len(),
            "stroke finalized"
        );
        Ok(Some(polygon))
    }

    fn is_pen_down(&self) -> bool {
        self.stroke.is_some()
    }

    fn pen_width(&self) -> Scalar {
        self.pen_width
    }

    fn set_pen_width(&mut self, width: Scalar) -> GeometryResult<()> {
        self.pen_width = validate_pen_width(width)?;
        Ok(())
    }

    fn cap_facets(&self) -> u32 {
        self.cap_facets
    }

    fn set_cap_facets(&mut self, facets: i64) -> GeometryResult<()> {
        self.cap_facets = validate_cap_facets(facets)?;
        Ok(())
    }

    fn forward(&mut self, distance: Scalar) {
        let heading = self.heading;
        let to = Point::new(
            distance.mul_add(cosd(heading), self.position.x),
            distance.mul_add(sind(heading), self.position.y),
        );
        self.move_to(to, heading);
    }

    fn turn(&mut self, degrees: Scalar, direction: TurnDirection) {
        self.heading = direction.sign().mul_add(degrees, self.heading);
    }

    fn set_position(&mut self, x: Scalar, y: Scalar) {
        let segment_heading = angle(x - self.position.x, y - self.position.y);
        self.move_to(Point::new(x, y), segment_heading);
    }

    fn heading(&self) -> Scalar {
        self.heading
    }

    fn position(&self) -> Point {
        self.position
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::EPSILON;

    fn turtle() -> Turtle {
        Turtle::new(TurtleOptions {
            pen_width: 2.0,
            cap_facets: 4,
        })
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let t = Turtle::default();
        assert_eq!(t.pen_width(), 1.0);
        assert_eq!(t.cap_facets(), 60);
        assert_eq!(t.heading(), 0.0);
        assert_eq!(t.position(), Point::ORIGIN);
        assert!(!t.is_pen_down());
        assert_eq!(Turtle::new(TurtleOptions::default()).unwrap(), t);
    }

    #[test]
    fn test_new_rejects_bad_options() {
        let odd = TurtleOptions {
            cap_facets: 5,
            ..TurtleOptions::default()
        };
        assert_eq!(Turtle::new(odd), Err(GeometryError::InvalidCapFacets(5)));
        let flat = TurtleOptions {
            pen_width: 0.0,
            ..TurtleOptions::default()
        };
        assert!(Turtle::new(flat).is_err());
    }

    #[test]
    fn test_forward_and_turn() {
        let mut t = turtle();
        t.forward(10.0);
        t.left(90.0);
        t.forward(5.0);
        let p = t.position();
        assert!((p.x - 10.0).abs() < EPSILON);
        assert!((p.y - 5.0).abs() < EPSILON);
        t.right(180.0);
        assert_eq!(t.heading(), -90.0);
    }

    #[test]
    fn test_backward_motion() {
        let mut t = turtle();
        t.forward(-3.0);
        assert!((t.position().x + 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_heading_not_normalized() {
        let mut t = turtle();
        for _ in 0..5 {
            t.left(90.0);
        }
        assert_eq!(t.heading(), 450.0);
    }

    #[test]
    fn test_pen_up_without_down_is_noop() {
        let mut t = turtle();
        assert_eq!(t.pen_up(), Ok(None));
    }

    #[test]
    fn test_pen_down_twice_keeps_stroke() {
        let mut t = turtle();
        t.pen_down();
        t.forward(1.0);
        t.pen_down();
        assert_eq!(t.stroke().unwrap().len(), 2);
    }

    #[test]
    fn test_moves_with_pen_up_record_nothing() {
        let mut t = turtle();
        t.forward(5.0);
        t.set_position(1.0, 1.0);
        assert!(t.stroke().is_none());
    }

    #[test]
    fn test_point_heading_invariant() {
        let mut t = turtle();
        t.pen_down();
        for i in 0..10 {
            if i % 3 == 0 {
                t.set_position(Scalar::from(i), Scalar::from(i * i));
            } else {
                t.forward(Scalar::from(i));
                t.left(30.0);
            }
            let stroke = t.stroke().unwrap();
            assert_eq!(stroke.points().len(), stroke.headings().len() + 1);
        }
        assert!(t.pen_up().unwrap().is_some());
    }

    #[test]
    fn test_forward_records_pre_motion_heading() {
        let mut t = turtle();
        t.left(30.0);
        t.pen_down();
        t.forward(1.0);
        t.left(60.0);
        assert_eq!(t.stroke().unwrap().headings(), &[30.0]);
    }

    #[test]
    fn test_set_position_records_segment_heading() {
        let mut t = turtle();
        t.left(10.0);
        t.pen_down();
        t.set_position(0.0, 5.0);
        let stroke = t.stroke().unwrap();
        assert!((stroke.headings()[0] - 90.0).abs() < EPSILON);
        // The turtle's own heading is untouched.
        assert_eq!(t.heading(), 10.0);
    }

    #[test]
    fn test_single_point_stroke() {
        let mut t = turtle();
        t.pen_down();
        let poly = t.pen_up().unwrap().unwrap();
        assert_eq!(poly.len(), 4);
        assert!(!t.is_pen_down());
    }

    #[test]
    fn test_width_applies_to_future_points() {
        let mut t = turtle();
        t.pen_down();
        t.set_pen_width(6.0).unwrap();
        t.set_cap_facets(8).unwrap();
        t.forward(1.0);
        let points = t.stroke().unwrap().points();
        assert_eq!(points[0].thickness, 2.0);
        assert_eq!(points[0].cap_facets, 4);
        assert_eq!(points[1].thickness, 6.0);
        assert_eq!(points[1].cap_facets, 8);
    }

    #[test]
    fn test_attributes_persist_across_strokes() {
        let mut t = turtle();
        t.set_pen_width(3.0).unwrap();
        t.pen_down();
        t.forward(2.0);
        t.left(90.0);
        t.pen_up().unwrap();

        t.pen_down();
        let start = t.stroke().unwrap().points()[0];
        assert!((start.point.x - 2.0).abs() < EPSILON);
        assert_eq!(start.thickness, 3.0);
        assert_eq!(t.heading(), 90.0);
        assert_eq!(t.stroke().unwrap().len(), 1);
    }

    #[test]
    fn test_cap_facets_validation() {
        let mut t = turtle();
        assert_eq!(t.set_cap_facets(3), Err(GeometryError::InvalidCapFacets(3)));
        assert_eq!(t.set_cap_facets(0), Err(GeometryError::InvalidCapFacets(0)));
        assert_eq!(t.set_cap_facets(-4), Err(GeometryError::InvalidCapFacets(-4)));
        assert_eq!(t.cap_facets(), 4);
        assert!(t.set_cap_facets(2).is_ok());
        assert_eq!(t.cap_facets(), 2);
    }

    #[test]
    fn test_pen_width_validation() {
        let mut t = turtle();
        assert!(t.set_pen_width(-1.0).is_err());
        assert!(t.set_pen_width(Scalar::NAN).is_err());
        assert!(t.set_pen_width(Scalar::INFINITY).is_err());
        assert_eq!(t.pen_width(), 2.0);
    }

    #[test]
    fn test_commands_through_trait_object() {
        let mut t: Box<dyn TurtleCommands> = Box::new(turtle());
        t.pen_down();
        t.forward(1.0);
        let poly = t.pen_up().unwrap().unwrap();
        assert_eq!(poly.len(), 6);
    }
}
