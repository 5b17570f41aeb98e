// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Payload parsing into the generic nested value tree
//!
//! Payloads arrive as serialized text blobs produced by the upstream
//! geometry exporter. This module turns them into `serde_json::Value`
//! trees and provides shape accessors that fail with typed errors instead
//! of trusting dynamic field access to succeed.

use bimstore_model::{DecodeError, Result};
use serde_json::{Map, Value};

/// Parse a serialized payload into a value tree
///
/// Parse failure is fatal to the call and surfaces as
/// [`DecodeError::MalformedPayload`]; this layer never substitutes a
/// default geometry for unparseable input.
pub fn parse_payload(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| DecodeError::payload(e.to_string()))
}

/// Interpret a value as an object, naming `what` on mismatch
pub(crate) fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| DecodeError::payload(format!("{} must be an object", what)))
}

/// Interpret a value as an array, naming `what` on mismatch
pub(crate) fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| DecodeError::payload(format!("{} must be an array", what)))
}

/// Look up a field, tolerating lowercase spelling of the key
///
/// Exporter payloads carry `X`/`StartPoint`-style keys; lowercase
/// variants appear in older blobs.
pub(crate) fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key)
        .or_else(|| obj.get(key.to_ascii_lowercase().as_str()))
}
