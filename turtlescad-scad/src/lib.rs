//! OpenSCAD writer for turtlescad drawings.
//!
//! Converts a [`Drawing`] into OpenSCAD source: one `polygon(points = [...]);`
//! statement per outline, nested inside `<wrapper> { ... }` blocks where the
//! drawing has block brackets.
//!
//! Key layout points:
//! - One tab of indentation per block level; polygon points are indented one
//!   level deeper than their `polygon(` line.
//! - Every point is written as `[x,y],`. A space follows unless the vertex
//!   closes a run; a run-closing vertex is followed by a line break unless it
//!   is the polygon's final vertex. This puts each cap fan and each edge on
//!   its own line.
//! - The first vertex is not repeated at the end; OpenSCAD closes polygons
//!   implicitly.

use std::fmt::Write;

use turtlescad_geometry::drawing::{Drawing, DrawingObject, find_matching_end};
use turtlescad_geometry::types::{Polygon, Scalar};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a [`Drawing`] to OpenSCAD source with default options.
#[must_use]
pub fn render(drawing: &Drawing) -> String {
    render_with_options(drawing, &RenderOptions::default())
}

/// Options controlling OpenSCAD output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Number of decimal places for coordinates. Default: 6.
    pub precision: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

/// Render a [`Drawing`] to OpenSCAD source with custom options.
#[must_use]
pub fn render_with_options(drawing: &Drawing, opts: &RenderOptions) -> String {
    let mut out = String::new();
    render_objects(&mut out, &drawing.objects, 0, opts);
    out
}

/// Render one polygon statement at the given block depth.
pub fn render_polygon(out: &mut String, polygon: &Polygon, depth: usize, opts: &RenderOptions) {
    let indent = tabs(depth);
    let inner = tabs(depth + 1);

    out.push_str(&indent);
    out.push_str("polygon(points = [\n");
    out.push_str(&inner);

    let count = polygon.len();
    for (k, vertex) in polygon.vertices().iter().enumerate() {
        let _ = write!(
            out,
            "[{},{}],",
            format_scalar(vertex.point.x, opts.precision),
            format_scalar(vertex.point.y, opts.precision),
        );
        if !vertex.is_last {
            out.push(' ');
        } else if k + 1 < count {
            out.push('\n');
            out.push_str(&inner);
        }
    }

    out.push('\n');
    out.push_str(&indent);
    out.push_str("]);\n");
}

/// Format a scalar to the given precision, stripping trailing zeros.
///
/// A trailing decimal point is stripped too, and negative zero (including
/// values that round to it) is written as `0`.
#[must_use]
pub fn format_scalar(v: Scalar, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    let trimmed = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

// ---------------------------------------------------------------------------
// Object walk
// ---------------------------------------------------------------------------

/// Render a slice of [`DrawingObject`]s at the given depth.
///
/// `BlockStart`/`BlockEnd` pairs recurse one level deeper.
fn render_objects(out: &mut String, objects: &[DrawingObject], depth: usize, opts: &RenderOptions) {
    let mut i = 0;
    while i < objects.len() {
        match &objects[i] {
            DrawingObject::Polygon(polygon) => {
                render_polygon(out, polygon, depth, opts);
                i += 1;
            }
            DrawingObject::BlockStart(wrapper) => {
                let end = find_matching_end(objects, i);
                let inner = &objects[i + 1..end];

                out.push_str(&tabs(depth));
                out.push_str(wrapper);
                out.push_str(" {\n");
                render_objects(out, inner, depth + 1, opts);
                out.push_str(&tabs(depth));
                out.push_str("}\n");

                i = end + 1;
            }
            DrawingObject::BlockEnd => {
                // Should not appear outside of a matched pair; skip.
                i += 1;
            }
        }
    }
}

fn tabs(depth: usize) -> String {
    "\t".repeat(depth)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use turtlescad_geometry::outline::outline_stroke;
    use turtlescad_geometry::types::{Point, StrokePath, StrokePoint};

    fn dot() -> Polygon {
        outline_stroke(&StrokePath::new(StrokePoint::new(Point::ORIGIN, 2.0, 4)))
    }

    fn bar() -> Polygon {
        let path = StrokePath::from_parts(
            vec![
                StrokePoint::new(Point::ORIGIN, 2.0, 4),
                StrokePoint::new(Point::new(1.0, 0.0), 2.0, 4),
            ],
            vec![0.0],
        )
        .unwrap();
        outline_stroke(&path)
    }

    fn bent() -> Polygon {
        let path = StrokePath::from_parts(
            vec![
                StrokePoint::new(Point::ORIGIN, 2.0, 4),
                StrokePoint::new(Point::new(1.0, 0.0), 2.0, 4),
                StrokePoint::new(Point::new(1.0, 1.0), 2.0, 4),
            ],
            vec![0.0, 90.0],
        )
        .unwrap();
        outline_stroke(&path)
    }

    // -- format_scalar tests --

    #[test]
    fn test_format_scalar_trailing_zeros() {
        assert_eq!(format_scalar(1.0, 6), "1");
        assert_eq!(format_scalar(1.5, 6), "1.5");
        assert_eq!(format_scalar(-2.5, 6), "-2.5");
        assert_eq!(format_scalar(100.0, 6), "100");
    }

    #[test]
    fn test_format_scalar_negative_zero() {
        assert_eq!(format_scalar(-0.0, 6), "0");
        assert_eq!(format_scalar(-0.000_000_1, 6), "0");
        assert_eq!(format_scalar(-0.4, 0), "0");
    }

    #[test]
    fn test_format_scalar_rounds() {
        assert_eq!(format_scalar(0.123_456_7, 6), "0.123457");
        assert_eq!(format_scalar(2.26, 1), "2.3");
        assert_eq!(format_scalar(7.0, 0), "7");
    }

    // -- polygon layout tests --

    #[test]
    fn test_render_dot() {
        let mut out = String::new();
        render_polygon(&mut out, &dot(), 0, &RenderOptions::default());
        assert_eq!(
            out,
            "polygon(points = [\n\t[1,0], [0,1], [-1,0], [0,-1],\n]);\n"
        );
    }

    #[test]
    fn test_render_two_point_stroke() {
        let mut out = String::new();
        render_polygon(&mut out, &bar(), 0, &RenderOptions::default());
        assert_eq!(
            out,
            "polygon(points = [\n\t[0,-1], [-1,0], [0,1],\n\t[1,1], [2,0], [1,-1],\n]);\n"
        );
    }

    #[test]
    fn test_render_joined_stroke_lines() {
        let mut out = String::new();
        render_polygon(&mut out, &bent(), 0, &RenderOptions::default());
        assert_eq!(
            out,
            "polygon(points = [\n\
             \t[0,-1], [-1,0], [0,1],\n\
             \t[0,1],\n\
             \t[0,1], [1,2], [2,1],\n\
             \t[2,-1],\n\
             ]);\n"
        );
    }

    #[test]
    fn test_render_indented() {
        let mut out = String::new();
        render_polygon(&mut out, &dot(), 2, &RenderOptions::default());
        assert!(out.starts_with("\t\tpolygon(points = [\n\t\t\t[1,0], "), "{out}");
        assert!(out.ends_with("\n\t\t]);\n"), "{out}");
    }

    // -- drawing tests --

    #[test]
    fn test_render_empty_drawing() {
        assert_eq!(render(&Drawing::new()), "");
    }

    #[test]
    fn test_render_polygons_in_order() {
        let mut d = Drawing::new();
        d.add_polygon(dot());
        d.add_polygon(bar());
        let s = render(&d);
        assert_eq!(s.matches("polygon(points = [").count(), 2);
        assert!(s.find("[1,0], [0,1]").unwrap() < s.find("[0,-1], [-1,0]").unwrap());
    }

    #[test]
    fn test_render_nested_blocks() {
        let mut d = Drawing::new();
        d.begin_block("union()");
        d.add_polygon(dot());
        d.begin_block("translate([5, 0])");
        d.add_polygon(dot());
        d.end_block();
        d.end_block();

        let s = render(&d);
        assert!(s.starts_with("union() {\n\tpolygon(points = [\n"), "{s}");
        assert!(s.contains("\ttranslate([5, 0]) {\n\t\tpolygon(points = [\n"), "{s}");
        assert!(s.ends_with("\t\t]);\n\t}\n}\n"), "{s}");
    }

    #[test]
    fn test_render_empty_block() {
        let mut d = Drawing::new();
        d.begin_block("union()");
        d.end_block();
        assert_eq!(render(&d), "union() {\n}\n");
    }

    #[test]
    fn test_render_precision() {
        let opts = RenderOptions { precision: 2 };
        let path = StrokePath::new(StrokePoint::new(Point::new(0.123, 0.0), 2.0, 2));
        let mut out = String::new();
        render_polygon(&mut out, &outline_stroke(&path), 0, &opts);
        assert!(out.contains("[1.12,0], [-0.88,0],"), "{out}");
    }
}
