//! JSON codec.
//!
//! Encodes the dataset as a JSON array of record objects with `serde_json`.
//! Timestamps are written as RFC 3339 strings with nanosecond precision, so the
//! round trip is exact.

use super::{Codec, Format};
use crate::error::{BenchError, Result};
use crate::record::Record;

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Create a codec producing compact JSON
    #[must_use]
    pub const fn new() -> Self {
        JsonCodec { pretty: false }
    }

    /// Create a codec producing indented JSON
    #[must_use]
    pub const fn pretty() -> Self {
        JsonCodec { pretty: true }
    }
}

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn name(&self) -> &'static str {
        if self.pretty {
            "JSON (pretty)"
        } else {
            "JSON"
        }
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(records)
        } else {
            serde_json::to_vec(records)
        };
        encoded.map_err(|e| BenchError::unsupported(self.name(), e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        serde_json::from_slice(bytes).map_err(|e| BenchError::malformed(self.name(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;

    #[test]
    fn test_json_round_trip() {
        let records = generate(25);
        let codec = JsonCodec::new();
        let bytes = codec.encode(&records).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), records);
    }

    #[test]
    fn test_json_is_an_array_of_objects() {
        let bytes = JsonCodec::new().encode(&generate(1)).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(text.starts_with("[{\"id\":0,\"name\":\"Awesome\""));
        assert!(text.contains("\"address\":{\"line1\":\"Flat 1\",\"line2\":\"The Meadows\"}"));
    }

    #[test]
    fn test_empty_dataset() {
        let codec = JsonCodec::new();
        let bytes = codec.encode(&[]).unwrap();
        assert_eq!(bytes, b"[]");
        assert!(codec.decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_pretty_is_larger_but_equivalent() {
        let records = generate(3);
        let compact = JsonCodec::new().encode(&records).unwrap();
        let pretty = JsonCodec::pretty().encode(&records).unwrap();
        assert!(pretty.len() > compact.len());
        assert_eq!(JsonCodec::pretty().decode(&pretty).unwrap(), records);
        assert_eq!(JsonCodec::pretty().name(), "JSON (pretty)");
    }

    #[test]
    fn test_truncated_input() {
        let codec = JsonCodec::new();
        let bytes = codec.encode(&generate(2)).unwrap();
        let err = codec.decode(&bytes[..bytes.len() - 3]).unwrap_err();
        assert!(matches!(err, BenchError::MalformedInput { format: "JSON", .. }));
    }

    #[test]
    fn test_wrong_shape() {
        let err = JsonCodec::new().decode(br#"{"id": 1}"#).unwrap_err();
        assert_eq!(err.kind(), "MalformedInputError");
    }
}
