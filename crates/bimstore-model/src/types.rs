// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identifier and kind-tag types shared across the storage pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe building-element identifier
///
/// Wraps the raw upstream object id (element 4711 becomes ElementId(4711))
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(id: u64) -> Self {
        ElementId(id)
    }
}

impl From<ElementId> for u64 {
    fn from(id: ElementId) -> Self {
        id.0
    }
}

/// Geometry kind tag enumeration
///
/// Discriminates which decoder interprets a serialized geometry payload.
/// Unknown tags are captured with their original string representation.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GeometryKind {
    /// Closed volume built from faces
    Solid,
    /// Triangulated closed volume; decodes like `Solid`
    TriangulatedSurface,
    /// Open shell built from faces
    Surface,
    /// Single planar face with optional holes
    Face,
    /// Line segment between two points
    Line,
    /// Axis-aligned bounding box
    Box,
    /// Single point
    Point,
    /// Ordered point collection
    PointSet,
    /// Ordered point sequence read as connected segments
    Polyline,
    /// Unknown tag - stores the original tag string
    Other(String),
}

impl GeometryKind {
    /// Parse a kind tag string (case-insensitive)
    ///
    /// Unrecognized tags are captured as [`GeometryKind::Other`].
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "SOLID" => GeometryKind::Solid,
            "TRIANGULATEDSURFACE" => GeometryKind::TriangulatedSurface,
            "SURFACE" => GeometryKind::Surface,
            "FACE" => GeometryKind::Face,
            "LINE" => GeometryKind::Line,
            "BOX" => GeometryKind::Box,
            "POINT" => GeometryKind::Point,
            "POINTSET" => GeometryKind::PointSet,
            "POLYLINE" => GeometryKind::Polyline,
            _ => GeometryKind::Other(s.to_string()),
        }
    }

    /// Get the canonical tag name
    pub fn name(&self) -> &str {
        match self {
            GeometryKind::Solid => "Solid",
            GeometryKind::TriangulatedSurface => "TriangulatedSurface",
            GeometryKind::Surface => "Surface",
            GeometryKind::Face => "Face",
            GeometryKind::Line => "Line",
            GeometryKind::Box => "Box",
            GeometryKind::Point => "Point",
            GeometryKind::PointSet => "PointSet",
            GeometryKind::Polyline => "Polyline",
            GeometryKind::Other(s) => s,
        }
    }

    /// Check if this kind decodes through the face-set path
    pub fn is_face_set(&self) -> bool {
        matches!(
            self,
            GeometryKind::Solid | GeometryKind::TriangulatedSurface | GeometryKind::Surface
        )
    }

    /// Check if the face-set path produces closed volumes for this kind
    ///
    /// Closedness is decided by the tag alone; face connectivity is never
    /// inspected.
    pub fn is_closed_volume(&self) -> bool {
        matches!(
            self,
            GeometryKind::Solid | GeometryKind::TriangulatedSurface
        )
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GeometryKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Default for GeometryKind {
    fn default() -> Self {
        GeometryKind::Other(String::new())
    }
}

/// One upstream geometry row
///
/// Couples the owning element, the kind tag selecting the decoder, and
/// the serialized payload blob as stored by the exporter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryRecord {
    /// Owning building element
    pub element: ElementId,
    /// Kind tag selecting the decoder
    pub kind: GeometryKind,
    /// Serialized nested payload
    pub payload: String,
}

impl GeometryRecord {
    /// Create a new record
    pub fn new(element: ElementId, kind: GeometryKind, payload: impl Into<String>) -> Self {
        Self {
            element,
            kind,
            payload: payload.into(),
        }
    }
}
