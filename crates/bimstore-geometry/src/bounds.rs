// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounds of decoded geometry
//!
//! Used by storage consumers that index elements by spatial extent
//! without walking the full value graph themselves.

use bimstore_model::{BoundingBox, Geometry, Point};
use nalgebra::{Point3, Vector3};

/// Convert a point into its nalgebra form
pub fn to_point3(point: &Point) -> Point3<f64> {
    Point3::new(point.x, point.y, point.z)
}

/// Box extent as a vector, `max - min`
pub fn extent(bounds: &BoundingBox) -> Vector3<f64> {
    to_point3(&bounds.max) - to_point3(&bounds.min)
}

/// Componentwise bounds of a point sequence, `None` when empty
pub fn bounds_of_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<BoundingBox> {
    let mut iter = points.into_iter();
    let first = to_point3(iter.next()?);

    let (min, max) = iter.fold((first, first), |(min, max), point| {
        let p = to_point3(point);
        (min.inf(&p), max.sup(&p))
    });

    Some(BoundingBox::new(
        Point::new(min.x, min.y, min.z),
        Point::new(max.x, max.y, max.z),
    ))
}

/// Compute the axis-aligned bounds of a decoded geometry
///
/// Returns `None` for point-free values (an empty point set or
/// polyline). Box corners are re-ordered componentwise, so the result is
/// always a well-formed extent even when the decoded box was not.
pub fn geometry_bounds(geometry: &Geometry) -> Option<BoundingBox> {
    match geometry {
        Geometry::Point(p) => Some(BoundingBox::new(*p, *p)),
        Geometry::PointSet(set) => bounds_of_points(&set.points),
        Geometry::Polyline(line) => bounds_of_points(&line.points),
        Geometry::Segment(segment) => bounds_of_points([segment.start, segment.end].iter()),
        Geometry::Box(bounds) => bounds_of_points([bounds.min, bounds.max].iter()),
        Geometry::Face(face) => bounds_of_points(face.points()),
        Geometry::Polyhedra(shells) => bounds_of_points(shells.iter().flat_map(|s| s.points())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bimstore_model::{Face, Loop, PointSet, Polyhedron, Polyline};

    fn face(points: &[(f64, f64, f64)]) -> Face {
        let ring = Loop::new(
            points
                .iter()
                .map(|&(x, y, z)| Point::new(x, y, z))
                .collect(),
        );
        Face::new(ring, Vec::new()).unwrap()
    }

    #[test]
    fn test_empty_polyline_has_no_bounds() {
        assert!(geometry_bounds(&Geometry::Polyline(Polyline::default())).is_none());
        assert!(geometry_bounds(&Geometry::PointSet(PointSet::default())).is_none());
    }

    #[test]
    fn test_point_bounds_collapse_to_point() {
        let p = Point::new(1.0, 2.0, 3.0);
        let bounds = geometry_bounds(&Geometry::Point(p)).unwrap();
        assert_eq!(bounds.min, p);
        assert_eq!(bounds.max, p);
        assert_relative_eq!(extent(&bounds).norm(), 0.0);
    }

    #[test]
    fn test_polyhedron_bounds_cover_all_faces() {
        let bottom = face(&[(0.0, 0.0, 0.0), (2.0, 0.0, 0.0), (2.0, 2.0, 0.0)]);
        let top = face(&[(0.0, 0.0, 5.0), (-1.0, 0.0, 5.0), (0.0, 1.0, 5.0)]);
        let shell = Polyhedron::new(vec![bottom, top], false).unwrap();

        let bounds = geometry_bounds(&Geometry::Polyhedra(vec![shell])).unwrap();
        assert_eq!(bounds.min, Point::new(-1.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point::new(2.0, 2.0, 5.0));
        assert!(bounds.is_ordered());
    }

    #[test]
    fn test_unordered_box_is_normalized() {
        let flipped = BoundingBox::new(Point::new(4.0, 0.0, 0.0), Point::new(0.0, 1.0, 1.0));
        let bounds = geometry_bounds(&Geometry::Box(flipped)).unwrap();
        assert!(bounds.is_ordered());
        assert_relative_eq!(extent(&bounds).x, 4.0);
    }
}
