// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIMStore Model - Shared types for building-model geometry storage
//!
//! This crate provides the shared vocabulary of the storage pipeline: the
//! typed geometry primitives reconstructed from serialized payloads, the
//! kind-tag enumeration that selects a decoder, and the error taxonomy
//! decoders report through.
//!
//! # Architecture
//!
//! - [`GeometryKind`] - kind tag discriminating payload shapes
//! - [`Geometry`] - uniformly-typed decode result
//! - [`Point`], [`Loop`], [`Face`], [`Polyhedron`] and friends - the
//!   decoded value types, built bottom-up by the geometry crate
//! - [`GeometrySink`] - the seam to the downstream row materializer
//! - [`DecodeError`] - decode failures; absence is not an error
//!
//! # Example
//!
//! ```
//! use bimstore_model::{Face, Loop, Point};
//!
//! let outer = Loop::new(vec![
//!     Point::new(0.0, 0.0, 0.0),
//!     Point::new(1.0, 0.0, 0.0),
//!     Point::new(1.0, 1.0, 0.0),
//! ]);
//!
//! // Faces without a usable outer ring cannot exist
//! let face = Face::new(outer, Vec::new()).unwrap();
//! assert_eq!(face.point_count(), 3);
//! ```

pub mod error;
pub mod geometry;
pub mod types;

// Re-export all public types
pub use error::*;
pub use geometry::*;
pub use types::*;
