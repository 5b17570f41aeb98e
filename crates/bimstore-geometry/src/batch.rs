// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch decoding over upstream geometry records
//!
//! One failed record never aborts its siblings: failures are logged and
//! skipped, matching the per-record tolerance of the storage layer.

use crate::router::GeometryRouter;
use bimstore_model::{ElementId, Geometry, GeometryRecord, GeometrySink};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};

/// Counters for one batch run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Records decoded into geometry
    pub decoded: usize,
    /// Records that produced nothing (unsupported kind or absent element)
    pub absent: usize,
    /// Records skipped after a decode error
    pub failed: usize,
}

/// Content hash of a record's kind and payload
fn record_hash(record: &GeometryRecord) -> u64 {
    let mut hasher = FxHasher::default();
    record.kind.hash(&mut hasher);
    record.payload.hash(&mut hasher);
    hasher.finish()
}

/// Decode records sequentially, memoizing identical payloads
///
/// Repeated building elements often share identical geometry blobs;
/// those decode once and the cached value is reused. Failing records are
/// logged and skipped.
pub fn decode_records(
    router: &GeometryRouter,
    records: &[GeometryRecord],
) -> Vec<(ElementId, Geometry)> {
    let mut cache: FxHashMap<u64, Option<Geometry>> = FxHashMap::default();
    let mut decoded = Vec::with_capacity(records.len());

    for record in records {
        let hash = record_hash(record);
        let result = match cache.get(&hash) {
            Some(cached) => cached.clone(),
            None => match router.decode(&record.kind, &record.payload) {
                Ok(result) => {
                    cache.insert(hash, result.clone());
                    result
                }
                Err(e) => {
                    tracing::warn!(
                        element = %record.element,
                        kind = %record.kind,
                        error = %e,
                        "Skipping record after decode failure"
                    );
                    continue;
                }
            },
        };

        if let Some(geometry) = result {
            decoded.push((record.element, geometry));
        }
    }

    decoded
}

/// Decode records in parallel
///
/// The router is shared read-only across the worker pool; each record
/// decodes independently. Result order follows input order.
pub fn decode_records_parallel(
    router: &GeometryRouter,
    records: &[GeometryRecord],
) -> Vec<(ElementId, Geometry)> {
    records
        .par_iter()
        .filter_map(|record| match router.decode(&record.kind, &record.payload) {
            Ok(Some(geometry)) => Some((record.element, geometry)),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    element = %record.element,
                    kind = %record.kind,
                    error = %e,
                    "Skipping record after decode failure"
                );
                None
            }
        })
        .collect()
}

/// Decode records into a sink, returning the run counters
///
/// Only decoded geometry reaches the sink; absences and failures are
/// counted and logged.
pub fn decode_into(
    router: &GeometryRouter,
    records: &[GeometryRecord],
    sink: &mut dyn GeometrySink,
) -> BatchStats {
    let mut stats = BatchStats::default();

    for record in records {
        match router.decode(&record.kind, &record.payload) {
            Ok(Some(geometry)) => {
                sink.accept(record.element, geometry);
                stats.decoded += 1;
            }
            Ok(None) => {
                tracing::debug!(
                    element = %record.element,
                    kind = %record.kind,
                    "Record produced no geometry"
                );
                stats.absent += 1;
            }
            Err(e) => {
                tracing::warn!(
                    element = %record.element,
                    kind = %record.kind,
                    error = %e,
                    "Skipping record after decode failure"
                );
                stats.failed += 1;
            }
        }
    }

    tracing::info!(
        decoded = stats.decoded,
        absent = stats.absent,
        failed = stats.failed,
        "Batch decode complete"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use bimstore_model::GeometryKind;

    const POINT: &str = r#"{"X":1,"Y":2,"Z":3}"#;
    const BAD_POINT: &str = r#"{"X":1,"Y":2}"#;

    fn record(id: u64, kind: GeometryKind, payload: &str) -> GeometryRecord {
        GeometryRecord::new(ElementId(id), kind, payload)
    }

    struct MemorySink {
        accepted: Vec<(ElementId, Geometry)>,
    }

    impl MemorySink {
        fn new() -> Self {
            Self {
                accepted: Vec::new(),
            }
        }
    }

    impl GeometrySink for MemorySink {
        fn accept(&mut self, element: ElementId, geometry: Geometry) {
            self.accepted.push((element, geometry));
        }
    }

    #[test]
    fn test_failed_record_does_not_abort_siblings() {
        let router = GeometryRouter::with_default_decoders();
        let records = [
            record(1, GeometryKind::Point, POINT),
            record(2, GeometryKind::Point, BAD_POINT),
            record(3, GeometryKind::Point, POINT),
        ];

        let decoded = decode_records(&router, &records);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].0, ElementId(1));
        assert_eq!(decoded[1].0, ElementId(3));
    }

    #[test]
    fn test_cache_reuses_identical_payloads() {
        let router = GeometryRouter::with_default_decoders();
        let records = [
            record(1, GeometryKind::Point, POINT),
            record(2, GeometryKind::Point, POINT),
        ];

        let decoded = decode_records(&router, &records);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].1, decoded[1].1);
    }

    #[test]
    fn test_unsupported_kind_is_absent_not_failed() {
        let router = GeometryRouter::with_default_decoders();
        let records = [record(1, GeometryKind::Other("CircleArc".into()), "{}")];

        let mut sink = MemorySink::new();
        let stats = decode_into(&router, &records, &mut sink);
        assert_eq!(stats.decoded, 0);
        assert_eq!(stats.absent, 1);
        assert_eq!(stats.failed, 0);
        assert!(sink.accepted.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let router = GeometryRouter::with_default_decoders();
        let records: Vec<GeometryRecord> = (0..64)
            .map(|i| {
                if i % 7 == 0 {
                    record(i, GeometryKind::Point, BAD_POINT)
                } else {
                    record(i, GeometryKind::Point, POINT)
                }
            })
            .collect();

        let sequential = decode_records(&router, &records);
        let parallel = decode_records_parallel(&router, &records);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_decode_into_counts_and_feeds_sink() {
        let router = GeometryRouter::with_default_decoders();
        let records = [
            record(1, GeometryKind::Point, POINT),
            record(2, GeometryKind::Point, BAD_POINT),
            record(3, GeometryKind::Face, r#"{"VerticesWithHoles":[[]]}"#),
        ];

        let mut sink = MemorySink::new();
        let stats = decode_into(&router, &records, &mut sink);
        assert_eq!(
            stats,
            BatchStats {
                decoded: 1,
                absent: 1,
                failed: 1
            }
        );
        assert_eq!(sink.accepted.len(), 1);
        assert_eq!(sink.accepted[0].0, ElementId(1));
    }
}
