// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry router - dispatches payloads to decoders by kind tag

use crate::payload::parse_payload;
use bimstore_model::{Geometry, GeometryKind, Result};
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::sync::Arc;

/// Payload decoder trait
///
/// Each decoder handles one or more kind tags. `decode` returns
/// `Ok(None)` when the payload legitimately produces nothing (an empty
/// outer ring, no surviving face groups); errors are reserved for
/// malformed payloads.
pub trait PayloadDecoder: Send + Sync {
    /// Decode a parsed payload into typed geometry
    fn decode(&self, payload: &Value) -> Result<Option<Geometry>>;

    /// Get the kind tags this decoder handles
    fn supported_kinds(&self) -> Vec<GeometryKind>;
}

/// Geometry router - routes payloads to decoders
///
/// One lookup and one decode per call, no state carried across calls.
/// The router is `Send + Sync` and freely shareable between threads.
pub struct GeometryRouter {
    /// Registered decoders by kind
    decoders: FxHashMap<GeometryKind, Arc<dyn PayloadDecoder>>,
}

impl GeometryRouter {
    /// Create a router without any decoders registered
    pub fn new() -> Self {
        Self {
            decoders: FxHashMap::default(),
        }
    }

    /// Create a router with every payload shape decoder registered
    ///
    /// Registers the following decoders:
    /// - `PointDecoder` (Point)
    /// - `PointSetDecoder` (PointSet)
    /// - `PolylineDecoder` (Polyline)
    /// - `SegmentDecoder` (Line)
    /// - `BoundingBoxDecoder` (Box)
    /// - `FaceDecoder` (Face)
    /// - `FaceSetDecoder` (Solid, TriangulatedSurface, Surface)
    pub fn with_default_decoders() -> Self {
        use crate::decoders::{
            BoundingBoxDecoder, FaceDecoder, FaceSetDecoder, PointDecoder, PointSetDecoder,
            PolylineDecoder, SegmentDecoder,
        };

        let mut router = Self::new();
        router.register(Arc::new(PointDecoder::new()));
        router.register(Arc::new(PointSetDecoder::new()));
        router.register(Arc::new(PolylineDecoder::new()));
        router.register(Arc::new(SegmentDecoder::new()));
        router.register(Arc::new(BoundingBoxDecoder::new()));
        router.register(Arc::new(FaceDecoder::new()));
        router.register(Arc::new(FaceSetDecoder::closed()));
        router.register(Arc::new(FaceSetDecoder::open()));
        router
    }

    /// Register a decoder for all its supported kinds
    pub fn register(&mut self, decoder: Arc<dyn PayloadDecoder>) {
        for kind in decoder.supported_kinds() {
            self.decoders.insert(kind, Arc::clone(&decoder));
        }
    }

    /// Check if a kind has a registered decoder
    pub fn has_decoder(&self, kind: &GeometryKind) -> bool {
        self.decoders.contains_key(kind)
    }

    /// Decode a serialized payload for the given kind
    ///
    /// Unregistered kinds return `Ok(None)` before the payload is even
    /// parsed: upstream emits tags this subsystem does not model and
    /// they are expected, not errors.
    pub fn decode(&self, kind: &GeometryKind, payload: &str) -> Result<Option<Geometry>> {
        match self.decoders.get(kind) {
            Some(decoder) => decoder.decode(&parse_payload(payload)?),
            None => Ok(None),
        }
    }

    /// Decode an already-parsed payload value
    pub fn decode_value(&self, kind: &GeometryKind, payload: &Value) -> Result<Option<Geometry>> {
        match self.decoders.get(kind) {
            Some(decoder) => decoder.decode(payload),
            None => Ok(None),
        }
    }
}

impl Default for GeometryRouter {
    fn default() -> Self {
        Self::new()
    }
}
