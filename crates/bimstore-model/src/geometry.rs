// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded geometry value types
//!
//! Every type here is a freshly constructed, independently owned value
//! graph: no shared state, no back-references, no cycles. Decoders build
//! them bottom-up (points, then rings and segments, then faces, then
//! polyhedra) and callers are free to keep or drop them at any point.

use crate::ElementId;
use serde::{Deserialize, Serialize};

/// A single 3D point
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinates as an array
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Ordered pair of points
///
/// Degenerate segments (start == end) are kept as-is.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    /// Create a new segment
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Check if start and end coincide
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Axis-aligned box given by two corner points
///
/// Upstream guarantees `min <= max` componentwise and the decoder does
/// not re-check it. [`BoundingBox::is_ordered`] is available for callers
/// that want the check.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Low corner
    pub min: Point,
    /// High corner
    pub max: Point,
}

impl BoundingBox {
    /// Create a new box
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Check that the corners are ordered componentwise
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Midpoint of the box diagonal
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}

/// One boundary ring of a face
///
/// Not implicitly closed: the first point is not repeated at the end.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Loop {
    /// Ring points in payload order
    pub points: Vec<Point>,
}

impl Loop {
    /// Create a ring from points
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of points in the ring
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the ring has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Planar face: one outer boundary ring plus interior holes
///
/// The first boundary group of a payload is always the outer ring; any
/// later groups are holes, in payload order. A face without a usable
/// outer ring cannot be constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Face {
    outer: Loop,
    holes: Vec<Loop>,
}

impl Face {
    /// Create a face from its rings
    ///
    /// Returns `None` when the outer ring is empty. Empty hole rings
    /// contribute nothing and are dropped.
    pub fn new(outer: Loop, holes: Vec<Loop>) -> Option<Self> {
        if outer.is_empty() {
            return None;
        }
        let holes = holes.into_iter().filter(|h| !h.is_empty()).collect();
        Some(Self { outer, holes })
    }

    /// Outer boundary ring
    pub fn outer(&self) -> &Loop {
        &self.outer
    }

    /// Interior hole rings in payload order
    pub fn holes(&self) -> &[Loop] {
        &self.holes
    }

    /// Total point count across all rings
    pub fn point_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Loop::len).sum::<usize>()
    }

    /// Iterate every point of the face, outer ring first
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.outer
            .points
            .iter()
            .chain(self.holes.iter().flat_map(|h| h.points.iter()))
    }
}

/// Face collection tagged as closed volume or open shell
///
/// The closed flag comes from the producing kind tag; face connectivity
/// is never checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyhedron {
    faces: Vec<Face>,
    closed: bool,
}

impl Polyhedron {
    /// Create a polyhedron from faces
    ///
    /// Returns `None` when `faces` is empty.
    pub fn new(faces: Vec<Face>, closed: bool) -> Option<Self> {
        if faces.is_empty() {
            return None;
        }
        Some(Self { faces, closed })
    }

    /// Faces in payload order
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Whether the faces describe a closed volume
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Iterate every point of every face
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.faces.iter().flat_map(Face::points)
    }
}

/// Ordered point collection; duplicates allowed
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PointSet {
    /// Points in payload order
    pub points: Vec<Point>,
}

impl PointSet {
    /// Create a point set
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the set has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Ordered point sequence read as connected segments
///
/// Shares the point-list payload shape with [`PointSet`]; the distinct
/// type preserves the connected reading downstream. Not implicitly
/// closed.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    /// Points in payload order
    pub points: Vec<Point>,
}

impl Polyline {
    /// Create a polyline
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the polyline has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments the sequence describes
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Decoded geometry, one variant per decode path
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Single point
    Point(Point),
    /// Point collection
    PointSet(PointSet),
    /// Connected point sequence
    Polyline(Polyline),
    /// Line segment
    Segment(LineSegment),
    /// Axis-aligned box
    Box(BoundingBox),
    /// Planar face with holes
    Face(Face),
    /// Face-set path result; one entry per surviving face group
    Polyhedra(Vec<Polyhedron>),
}

impl Geometry {
    /// Short variant name for logging
    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::PointSet(_) => "PointSet",
            Geometry::Polyline(_) => "Polyline",
            Geometry::Segment(_) => "Segment",
            Geometry::Box(_) => "Box",
            Geometry::Face(_) => "Face",
            Geometry::Polyhedra(_) => "Polyhedra",
        }
    }
}

/// Downstream consumer of decoded geometry
///
/// The storage layer implements this to materialize rows from decoded
/// values. Absent results and per-record decode failures never reach the
/// sink.
pub trait GeometrySink {
    /// Accept one decoded geometry for the given element
    fn accept(&mut self, element: ElementId, geometry: Geometry);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Loop {
        Loop::new(vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn test_face_requires_outer_ring() {
        assert!(Face::new(Loop::default(), Vec::new()).is_none());
        assert!(Face::new(Loop::default(), vec![triangle()]).is_none());
    }

    #[test]
    fn test_face_drops_empty_holes() {
        let face = Face::new(triangle(), vec![Loop::default(), triangle()]).unwrap();
        assert_eq!(face.holes().len(), 1);
        assert_eq!(face.point_count(), 6);
    }

    #[test]
    fn test_polyhedron_requires_faces() {
        assert!(Polyhedron::new(Vec::new(), true).is_none());

        let face = Face::new(triangle(), Vec::new()).unwrap();
        let solid = Polyhedron::new(vec![face], true).unwrap();
        assert!(solid.is_closed());
        assert_eq!(solid.face_count(), 1);
    }

    #[test]
    fn test_bounding_box_ordering() {
        let ordered = BoundingBox::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 2.0, 3.0));
        assert!(ordered.is_ordered());
        assert_eq!(ordered.center(), Point::new(0.5, 1.0, 1.5));

        let flipped = BoundingBox::new(Point::new(1.0, 0.0, 0.0), Point::new(0.0, 2.0, 3.0));
        assert!(!flipped.is_ordered());
    }

    #[test]
    fn test_degenerate_segment_accepted() {
        let p = Point::new(1.0, 2.0, 3.0);
        let segment = LineSegment::new(p, p);
        assert!(segment.is_degenerate());
    }

    #[test]
    fn test_polyline_segment_count() {
        assert_eq!(Polyline::default().segment_count(), 0);
        assert_eq!(Polyline::new(vec![Point::default()]).segment_count(), 0);
        assert_eq!(
            Polyline::new(vec![Point::default(), Point::new(1.0, 0.0, 0.0)]).segment_count(),
            1
        );
    }

    #[test]
    fn test_geometry_serde_round_trip() {
        let face = Face::new(triangle(), vec![triangle()]).unwrap();
        let solid = Polyhedron::new(vec![face.clone()], true).unwrap();

        let values = [
            Geometry::Point(Point::new(0.5, -1.0, 2.25)),
            Geometry::PointSet(PointSet::new(vec![Point::default()])),
            Geometry::Polyline(Polyline::new(vec![Point::default(), Point::new(1.0, 0.0, 0.0)])),
            Geometry::Segment(LineSegment::new(Point::default(), Point::new(0.0, 0.0, 1.0))),
            Geometry::Box(BoundingBox::new(Point::default(), Point::new(1.0, 1.0, 1.0))),
            Geometry::Face(face),
            Geometry::Polyhedra(vec![solid]),
        ];

        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            let back: Geometry = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value);
        }
    }
}
