//! BSON codec.
//!
//! BSON requires a document at the top level, so the record array is wrapped in a
//! single-key envelope document:
//!
//! ```text
//! { "records": [ { "id": 0, "name": "Awesome", ... }, ... ] }
//! ```
//!
//! Ids are stored as BSON `int64`; an id above `i64::MAX` cannot be represented and
//! is rejected with [`BenchError::UnsupportedValue`].

use serde::{Deserialize, Serialize};

use super::{Codec, Format};
use crate::error::{BenchError, Result};
use crate::record::Record;

/// Key of the envelope field holding the record array.
///
/// Must match the `records` field name of the envelope structs below.
pub const ENVELOPE_KEY: &str = "records";

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    records: &'a [Record],
}

#[derive(Deserialize)]
struct Envelope {
    records: Vec<Record>,
}

/// BSON codec backed by the `bson` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BsonCodec;

impl BsonCodec {
    /// Create a new BSON codec
    #[must_use]
    pub const fn new() -> Self {
        BsonCodec
    }
}

impl Codec for BsonCodec {
    fn format(&self) -> Format {
        Format::Bson
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        ::bson::to_vec(&EnvelopeRef { records }).map_err(|e| BenchError::unsupported(self.name(), e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        ::bson::from_slice::<Envelope>(bytes)
            .map(|envelope| envelope.records)
            .map_err(|e| BenchError::malformed(self.name(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::record::Address;
    use chrono::Utc;

    #[test]
    fn test_bson_round_trip() {
        let records = generate(25);
        let codec = BsonCodec::new();
        let bytes = codec.encode(&records).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), records);
    }

    #[test]
    fn test_length_prefix_matches_buffer() {
        let bytes = BsonCodec::new().encode(&generate(3)).unwrap();
        let declared = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(usize::try_from(declared).unwrap(), bytes.len());
    }

    #[test]
    fn test_envelope_key_present() {
        let bytes = BsonCodec::new().encode(&generate(1)).unwrap();
        let doc: ::bson::Document = ::bson::from_slice(&bytes).unwrap();
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec![ENVELOPE_KEY]);
        assert_eq!(doc.get_array(ENVELOPE_KEY).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_dataset() {
        let codec = BsonCodec::new();
        let bytes = codec.encode(&[]).unwrap();
        assert!(codec.decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_input() {
        let codec = BsonCodec::new();
        let bytes = codec.encode(&generate(2)).unwrap();
        let err = codec.decode(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, BenchError::MalformedInput { format: "BSON", .. }));
    }

    #[test]
    fn test_id_beyond_int64_is_unsupported() {
        let record = Record::new(u64::MAX, "Awesome", Utc::now(), Address::default());
        let err = BsonCodec::new().encode(&[record]).unwrap_err();
        assert_eq!(err.kind(), "UnsupportedValueError");
    }
}
