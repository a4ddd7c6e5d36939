//! Common test helpers shared across the integration test suite.

use chrono::{DateTime, TimeZone, Utc};
use serbench::{Codec, DatasetGenerator, Record};

/// Fixed instant used as "now" so generated datasets compare equal across calls.
pub fn anchor() -> DateTime<Utc> {
    Utc.timestamp_opt(1_790_000_000, 987_654_321).unwrap()
}

/// Generate `n` records with a pinned clock.
pub fn dataset(n: usize) -> Vec<Record> {
    DatasetGenerator::new().with_anchor(anchor()).generate(n)
}

/// Encode then decode `records`, panicking with the codec name on failure.
#[allow(dead_code)]
pub fn round_trip(codec: &dyn Codec, records: &[Record]) -> Vec<Record> {
    let bytes = codec
        .encode(records)
        .unwrap_or_else(|e| panic!("{} failed to encode: {e}", codec.name()));
    codec
        .decode(&bytes)
        .unwrap_or_else(|e| panic!("{} failed to decode: {e}", codec.name()))
}
