// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry payload decoding

use thiserror::Error;

/// Result type alias for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors that can occur while decoding geometry payloads
///
/// Malformation of a required primitive always propagates to the caller.
/// Legitimately empty or unsupported input is reported as absence by the
/// decoders, never through this type.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The payload could not be parsed into a nested value tree, or its
    /// shape does not match what the kind tag demands
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// A point record is missing an axis field or holds a non-numeric value
    #[error("Malformed point: {0}")]
    MalformedPoint(String),

    /// A line payload is missing one of its end point records
    #[error("Malformed segment: {0}")]
    MalformedSegment(String),

    /// A box payload is missing one of its corner records
    #[error("Malformed box: {0}")]
    MalformedBox(String),
}

impl DecodeError {
    /// Create a payload error
    pub fn payload(msg: impl Into<String>) -> Self {
        DecodeError::MalformedPayload(msg.into())
    }

    /// Create a point error
    pub fn point(msg: impl Into<String>) -> Self {
        DecodeError::MalformedPoint(msg.into())
    }

    /// Create a segment error
    pub fn segment(msg: impl Into<String>) -> Self {
        DecodeError::MalformedSegment(msg.into())
    }

    /// Create a box error
    pub fn bbox(msg: impl Into<String>) -> Self {
        DecodeError::MalformedBox(msg.into())
    }
}
