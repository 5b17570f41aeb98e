// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Payload decoders for each geometry kind
//!
//! Decoders turn one payload shape into its typed geometry, bottom-up:
//! points first, then rings and segments, then faces, then polyhedra.
//! Each decoder is registered with the [`GeometryRouter`](crate::GeometryRouter)
//! for the kind tags it handles.

use crate::payload::{as_array, as_object, field};
use crate::router::PayloadDecoder;
use bimstore_model::{
    BoundingBox, DecodeError, Face, Geometry, GeometryKind, LineSegment, Loop, Point, PointSet,
    Polyhedron, Polyline, Result,
};
use serde_json::{Map, Value};

/// Read one named coordinate as a float
fn coord(obj: &Map<String, Value>, key: &str) -> Result<f64> {
    field(obj, key)
        .and_then(Value::as_f64)
        .ok_or_else(|| DecodeError::point(format!("missing or non-numeric coordinate {}", key)))
}

/// Decode a point record: three numeric axis fields
///
/// A missing or non-numeric axis is a hard error, never substituted
/// with a default coordinate.
pub fn decode_point(value: &Value) -> Result<Point> {
    let obj = value
        .as_object()
        .ok_or_else(|| DecodeError::point("point record must be an object"))?;
    Ok(Point::new(
        coord(obj, "X")?,
        coord(obj, "Y")?,
        coord(obj, "Z")?,
    ))
}

/// Decode an ordered list of point records into one boundary ring
///
/// An empty list yields an empty ring; whether that is acceptable is the
/// caller's decision.
pub fn decode_loop(values: &[Value]) -> Result<Loop> {
    let mut points = Vec::with_capacity(values.len());
    for value in values {
        points.push(decode_point(value)?);
    }
    Ok(Loop::new(points))
}

/// Decode a face payload
///
/// The `VerticesWithHoles` groups hold the boundary rings: the first
/// group is the outer ring, later groups are holes in payload order.
/// A face whose outer ring is empty decodes to `None` - absent from the
/// result, never half-built.
pub fn decode_face(value: &Value) -> Result<Option<Face>> {
    let obj = as_object(value, "face payload")?;
    let groups = field(obj, "VerticesWithHoles")
        .ok_or_else(|| DecodeError::payload("face payload missing VerticesWithHoles"))?;
    let groups = as_array(groups, "VerticesWithHoles")?;

    let mut outer = Loop::default();
    let mut holes = Vec::new();
    for (i, group) in groups.iter().enumerate() {
        let ring = decode_loop(as_array(group, "boundary group")?)?;
        if i == 0 {
            outer = ring;
        } else {
            holes.push(ring);
        }
    }

    Ok(Face::new(outer, holes))
}

/// Decode a face-set payload: an ordered list of face groups
///
/// Each group carries a `Faces` list and yields one polyhedron tagged
/// with the given closed flag. Faces that decode to absence are dropped;
/// a group with zero surviving faces produces no polyhedron, so the
/// result may be shorter than the input.
pub fn decode_face_sets(value: &Value, closed: bool) -> Result<Vec<Polyhedron>> {
    let groups = as_array(value, "face set payload")?;
    let mut shells = Vec::with_capacity(groups.len());

    for group in groups {
        let obj = as_object(group, "face set entry")?;
        let faces_value = field(obj, "Faces")
            .ok_or_else(|| DecodeError::payload("face set entry missing Faces"))?;
        let face_values = as_array(faces_value, "Faces")?;

        let mut faces = Vec::with_capacity(face_values.len());
        for face_value in face_values {
            if let Some(face) = decode_face(face_value)? {
                faces.push(face);
            }
        }

        if let Some(shell) = Polyhedron::new(faces, closed) {
            shells.push(shell);
        }
    }

    Ok(shells)
}

/// Decode an ordered list of point records
pub fn decode_points(value: &Value) -> Result<Vec<Point>> {
    let values = as_array(value, "point list payload")?;
    let mut points = Vec::with_capacity(values.len());
    for value in values {
        points.push(decode_point(value)?);
    }
    Ok(points)
}

/// Decode a line payload with `StartPoint` and `EndPoint` records
pub fn decode_segment(value: &Value) -> Result<LineSegment> {
    let obj = as_object(value, "line payload")?;
    let start = field(obj, "StartPoint")
        .ok_or_else(|| DecodeError::segment("line payload missing StartPoint"))?;
    let end = field(obj, "EndPoint")
        .ok_or_else(|| DecodeError::segment("line payload missing EndPoint"))?;
    Ok(LineSegment::new(decode_point(start)?, decode_point(end)?))
}

/// Decode a box payload with `LLB` and `URT` corner records
pub fn decode_bounding_box(value: &Value) -> Result<BoundingBox> {
    let obj = as_object(value, "box payload")?;
    let min = field(obj, "LLB").ok_or_else(|| DecodeError::bbox("box payload missing LLB"))?;
    let max = field(obj, "URT").ok_or_else(|| DecodeError::bbox("box payload missing URT"))?;
    Ok(BoundingBox::new(decode_point(min)?, decode_point(max)?))
}

/// Point decoder
pub struct PointDecoder;

impl PointDecoder {
    /// Create new decoder
    pub fn new() -> Self {
        Self
    }
}

impl Default for PointDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadDecoder for PointDecoder {
    fn decode(&self, payload: &Value) -> Result<Option<Geometry>> {
        Ok(Some(Geometry::Point(decode_point(payload)?)))
    }

    fn supported_kinds(&self) -> Vec<GeometryKind> {
        vec![GeometryKind::Point]
    }
}

/// Point set decoder
///
/// An empty payload list is a valid, empty point set.
pub struct PointSetDecoder;

impl PointSetDecoder {
    /// Create new decoder
    pub fn new() -> Self {
        Self
    }
}

impl Default for PointSetDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadDecoder for PointSetDecoder {
    fn decode(&self, payload: &Value) -> Result<Option<Geometry>> {
        Ok(Some(Geometry::PointSet(PointSet::new(decode_points(
            payload,
        )?))))
    }

    fn supported_kinds(&self) -> Vec<GeometryKind> {
        vec![GeometryKind::PointSet]
    }
}

/// Polyline decoder
///
/// Same payload shape as the point set path; the distinct result type
/// keeps the connected-segments reading downstream.
pub struct PolylineDecoder;

impl PolylineDecoder {
    /// Create new decoder
    pub fn new() -> Self {
        Self
    }
}

impl Default for PolylineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadDecoder for PolylineDecoder {
    fn decode(&self, payload: &Value) -> Result<Option<Geometry>> {
        Ok(Some(Geometry::Polyline(Polyline::new(decode_points(
            payload,
        )?))))
    }

    fn supported_kinds(&self) -> Vec<GeometryKind> {
        vec![GeometryKind::Polyline]
    }
}

/// Line segment decoder
pub struct SegmentDecoder;

impl SegmentDecoder {
    /// Create new decoder
    pub fn new() -> Self {
        Self
    }
}

impl Default for SegmentDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadDecoder for SegmentDecoder {
    fn decode(&self, payload: &Value) -> Result<Option<Geometry>> {
        Ok(Some(Geometry::Segment(decode_segment(payload)?)))
    }

    fn supported_kinds(&self) -> Vec<GeometryKind> {
        vec![GeometryKind::Line]
    }
}

/// Bounding box decoder
pub struct BoundingBoxDecoder;

impl BoundingBoxDecoder {
    /// Create new decoder
    pub fn new() -> Self {
        Self
    }
}

impl Default for BoundingBoxDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadDecoder for BoundingBoxDecoder {
    fn decode(&self, payload: &Value) -> Result<Option<Geometry>> {
        Ok(Some(Geometry::Box(decode_bounding_box(payload)?)))
    }

    fn supported_kinds(&self) -> Vec<GeometryKind> {
        vec![GeometryKind::Box]
    }
}

/// Face decoder
///
/// Decodes to absence when the outer ring is empty.
pub struct FaceDecoder;

impl FaceDecoder {
    /// Create new decoder
    pub fn new() -> Self {
        Self
    }
}

impl Default for FaceDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadDecoder for FaceDecoder {
    fn decode(&self, payload: &Value) -> Result<Option<Geometry>> {
        Ok(decode_face(payload)?.map(Geometry::Face))
    }

    fn supported_kinds(&self) -> Vec<GeometryKind> {
        vec![GeometryKind::Face]
    }
}

/// Face-set decoder, covering the solid and open-surface paths
///
/// The closed flag is fixed at registration from the kind tags the
/// instance handles; it is never inferred from face connectivity.
pub struct FaceSetDecoder {
    closed: bool,
}

impl FaceSetDecoder {
    /// Decoder for closed volumes (solid and triangulated-surface tags)
    pub fn closed() -> Self {
        Self { closed: true }
    }

    /// Decoder for open shells (surface tag)
    pub fn open() -> Self {
        Self { closed: false }
    }
}

impl PayloadDecoder for FaceSetDecoder {
    fn decode(&self, payload: &Value) -> Result<Option<Geometry>> {
        let shells = decode_face_sets(payload, self.closed)?;
        if shells.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Geometry::Polyhedra(shells)))
        }
    }

    fn supported_kinds(&self) -> Vec<GeometryKind> {
        if self.closed {
            vec![GeometryKind::Solid, GeometryKind::TriangulatedSurface]
        } else {
            vec![GeometryKind::Surface]
        }
    }
}
