// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # BIMStore Geometry Decoding
//!
//! Reconstructs typed 3D primitives from the generically-encoded geometry
//! payloads stored alongside building-model rows. Payloads are nested,
//! tagged text blobs produced by the upstream exporter; this crate turns
//! them back into points, segments, boxes, polylines, faces with holes,
//! and polyhedra.
//!
//! ## Overview
//!
//! - **Payload parsing**: serialized blobs become `serde_json::Value`
//!   trees, with typed errors on parse failure
//! - **Decoders**: one per payload shape, building values bottom-up
//!   (points, then rings, then faces, then polyhedra)
//! - **Routing**: a kind tag selects the decoder; unknown tags produce
//!   absence, never errors
//! - **Batching**: record batches decode with per-record tolerance,
//!   optionally in parallel
//!
//! ## Architecture
//!
//! The crate uses traits from `bimstore-model` for its seams:
//!
//! - [`PayloadDecoder`]: trait for individual kind decoders
//! - [`GeometryRouter`]: registry dispatching kind tags to decoders
//! - `GeometrySink`: downstream consumer fed by [`decode_into`]
//!
//! ## Quick Start
//!
//! ```
//! use bimstore_geometry::GeometryRouter;
//! use bimstore_model::{Geometry, GeometryKind};
//!
//! let router = GeometryRouter::with_default_decoders();
//!
//! let decoded = router
//!     .decode(
//!         &GeometryKind::Box,
//!         r#"{"LLB":{"X":0,"Y":0,"Z":0},"URT":{"X":1,"Y":1,"Z":1}}"#,
//!     )
//!     .unwrap();
//!
//! match decoded {
//!     Some(Geometry::Box(bounds)) => println!("box center {:?}", bounds.center()),
//!     _ => unreachable!(),
//! }
//! ```

pub mod batch;
pub mod bounds;
pub mod decoders;
pub mod payload;
pub mod router;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

// Re-export main types
pub use batch::{decode_into, decode_records, decode_records_parallel, BatchStats};
pub use bounds::{bounds_of_points, extent, geometry_bounds, to_point3};
pub use payload::parse_payload;
pub use router::{GeometryRouter, PayloadDecoder};

// Re-export decoders
pub use decoders::{
    decode_bounding_box, decode_face, decode_face_sets, decode_loop, decode_point, decode_points,
    decode_segment, BoundingBoxDecoder, FaceDecoder, FaceSetDecoder, PointDecoder, PointSetDecoder,
    PolylineDecoder, SegmentDecoder,
};
