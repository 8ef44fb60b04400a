//! Drawing assembly.
//!
//! A drawing is the ordered output of one script run: outline polygons in
//! the order their strokes were finished, interleaved with `BlockStart` /
//! `BlockEnd` brackets that group polygons under a named wrapper (for
//! example `union()` or `translate([0, 10])`).

use std::sync::Arc;

use crate::types::Polygon;

/// One entry in a [`Drawing`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingObject {
    /// A finished stroke outline.
    Polygon(Polygon),
    /// Open a wrapper block; everything up to the matching `BlockEnd` is
    /// inside it.
    BlockStart(Arc<str>),
    /// Close the most recent wrapper block.
    BlockEnd,
}

/// An ordered collection of polygons and wrapper brackets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Drawing {
    pub objects: Vec<DrawingObject>,
}

impl Drawing {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn push(&mut self, obj: DrawingObject) {
        self.objects.push(obj);
    }

    pub fn add_polygon(&mut self, polygon: Polygon) {
        self.push(DrawingObject::Polygon(polygon));
    }

    pub fn begin_block(&mut self, wrapper: impl Into<Arc<str>>) {
        self.push(DrawingObject::BlockStart(wrapper.into()));
    }

    pub fn end_block(&mut self) {
        self.push(DrawingObject::BlockEnd);
    }

    /// Iterate over the polygons, ignoring block structure.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.objects.iter().filter_map(|obj| match obj {
            DrawingObject::Polygon(p) => Some(p),
            _ => None,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Find the `BlockEnd` matching the `BlockStart` at index `start`.
///
/// Returns `objects.len()` if the bracket is never closed.
#[must_use]
pub fn find_matching_end(objects: &[DrawingObject], start: usize) -> usize {
    let mut depth = 0usize;
    for (offset, obj) in objects[start..].iter().enumerate() {
        match obj {
            DrawingObject::BlockStart(_) => depth += 1,
            DrawingObject::BlockEnd => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return start + offset;
                }
            }
            DrawingObject::Polygon(_) => {}
        }
    }
    objects.len()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygons_skip_brackets() {
        let mut d = Drawing::new();
        d.begin_block("union()");
        d.add_polygon(Polygon::new());
        d.end_block();
        d.add_polygon(Polygon::new());
        assert_eq!(d.objects.len(), 4);
        assert_eq!(d.polygons().count(), 2);
    }

    #[test]
    fn matching_end_nested() {
        let objects = vec![
            DrawingObject::BlockStart("a".into()),
            DrawingObject::BlockStart("b".into()),
            DrawingObject::Polygon(Polygon::new()),
            DrawingObject::BlockEnd,
            DrawingObject::BlockEnd,
        ];
        assert_eq!(find_matching_end(&objects, 0), 4);
        assert_eq!(find_matching_end(&objects, 1), 3);
    }

    #[test]
    fn matching_end_unclosed() {
        let objects = vec![
            DrawingObject::BlockStart("a".into()),
            DrawingObject::Polygon(Polygon::new()),
        ];
        assert_eq!(find_matching_end(&objects, 0), 2);
    }
}
