//! Benchmark execution.
//!
//! The [`BenchmarkRunner`] drives each codec over a dataset in the order supplied,
//! timing encode-start to decode-end and recording the encoded size. A codec that
//! fails is recorded as a failed [`BenchmarkResult`]; the run carries on with the
//! next codec.
//!
//! # Examples
//!
//! ```
//! use serbench::formats::default_codecs;
//! use serbench::generator::generate;
//! use serbench::runner::BenchmarkRunner;
//!
//! let dataset = generate(100);
//! let results = BenchmarkRunner::new().run(&dataset, &default_codecs()?);
//!
//! assert_eq!(results.len(), 4);
//! assert!(results.iter().all(|r| r.is_success()));
//! # Ok::<(), serbench::BenchError>(())
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{BenchError, Result};
use crate::formats::{Codec, Format};
use crate::record::{first_difference, Record};

/// Size and timing of one successful encode/decode cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// Length of the encoded payload in bytes
    pub encoded_len: usize,
    /// Wall-clock time from encode start to decode end
    pub elapsed: Duration,
    /// Number of records in the measured dataset
    pub records: usize,
    /// The encoded payload, when the runner retains it
    pub payload: Option<Vec<u8>>,
}

impl Measurement {
    /// Elapsed time in fractional milliseconds
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Outcome of benchmarking one codec.
#[derive(Debug)]
pub struct BenchmarkResult {
    /// Codec name as shown in reports
    pub name: &'static str,
    /// Format the codec implements
    pub format: Format,
    /// The measurement, or the error that aborted it
    pub outcome: std::result::Result<Measurement, BenchError>,
}

impl BenchmarkResult {
    /// Whether the codec completed its round trip
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The measurement of a successful run
    #[must_use]
    pub fn measurement(&self) -> Option<&Measurement> {
        self.outcome.as_ref().ok()
    }

    /// The error of a failed run
    #[must_use]
    pub fn error(&self) -> Option<&BenchError> {
        self.outcome.as_ref().err()
    }
}

/// Runs codecs over a dataset one at a time.
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    retain_payload: bool,
    verify: bool,
}

impl Default for BenchmarkRunner {
    fn default() -> Self {
        Self {
            retain_payload: true,
            verify: true,
        }
    }
}

impl BenchmarkRunner {
    /// Create a runner that keeps payloads and verifies round trips
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the encoded bytes in each result
    #[must_use]
    pub fn retain_payload(mut self, retain: bool) -> Self {
        self.retain_payload = retain;
        self
    }

    /// Compare decoded records with the input after the timer stops.
    ///
    /// A difference turns the result into [`BenchError::RoundTripMismatch`].
    #[must_use]
    pub fn verify_round_trip(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Benchmark every codec against `dataset`, in the order supplied.
    #[must_use]
    pub fn run(&self, dataset: &[Record], codecs: &[Box<dyn Codec>]) -> Vec<BenchmarkResult> {
        info!(records = dataset.len(), codecs = codecs.len(), "starting benchmark run");
        codecs
            .iter()
            .map(|codec| self.run_codec(dataset, codec.as_ref()))
            .collect()
    }

    /// Benchmark a single codec against `dataset`.
    #[must_use]
    pub fn run_codec(&self, dataset: &[Record], codec: &dyn Codec) -> BenchmarkResult {
        let name = codec.name();
        debug!(codec = name, "encoding");

        let outcome = self.measure(dataset, codec);
        match &outcome {
            Ok(m) => info!(
                codec = name,
                bytes = m.encoded_len,
                elapsed_ms = m.elapsed_ms(),
                "round trip complete"
            ),
            Err(e) => warn!(codec = name, kind = e.kind(), error = %e, "round trip failed"),
        }

        BenchmarkResult {
            name,
            format: codec.format(),
            outcome,
        }
    }

    fn measure(&self, dataset: &[Record], codec: &dyn Codec) -> Result<Measurement> {
        let start = Instant::now();
        let payload = codec.encode(dataset)?;
        let decoded = codec.decode(&payload)?;
        let elapsed = start.elapsed();

        if self.verify {
            if let Some(index) = first_difference(dataset, &decoded) {
                return Err(BenchError::RoundTripMismatch {
                    format: codec.name(),
                    detail: format!(
                        "record {index} differs ({} records in, {} out)",
                        dataset.len(),
                        decoded.len()
                    ),
                });
            }
        }

        Ok(Measurement {
            encoded_len: payload.len(),
            elapsed,
            records: dataset.len(),
            payload: self.retain_payload.then_some(payload),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{default_codecs, JsonCodec};
    use crate::generator::generate;

    /// Codec whose decode always rejects its input
    #[derive(Debug)]
    struct RejectingCodec;

    impl Codec for RejectingCodec {
        fn format(&self) -> Format {
            Format::Bson
        }

        fn name(&self) -> &'static str {
            "Rejecting"
        }

        fn encode(&self, _: &[Record]) -> Result<Vec<u8>> {
            Ok(vec![0xFF; 4])
        }

        fn decode(&self, _: &[u8]) -> Result<Vec<Record>> {
            Err(BenchError::malformed("Rejecting", "invalid tag"))
        }
    }

    /// Codec that silently drops the last record
    #[derive(Debug)]
    struct LossyCodec;

    impl Codec for LossyCodec {
        fn format(&self) -> Format {
            Format::Json
        }

        fn name(&self) -> &'static str {
            "Lossy"
        }

        fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
            JsonCodec::new().encode(records)
        }

        fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
            let mut records = JsonCodec::new().decode(bytes)?;
            records.pop();
            Ok(records)
        }
    }

    #[test]
    fn test_results_follow_codec_order() {
        let dataset = generate(10);
        let codecs = default_codecs().unwrap();
        let results = BenchmarkRunner::new().run(&dataset, &codecs);

        let formats: Vec<Format> = results.iter().map(|r| r.format).collect();
        assert_eq!(formats, Format::ALL.to_vec());
        assert!(results.iter().all(BenchmarkResult::is_success));
    }

    #[test]
    fn test_measurement_records_payload_length() {
        let dataset = generate(5);
        let result = BenchmarkRunner::new().run_codec(&dataset, &JsonCodec::new());
        let measurement = result.measurement().unwrap();

        let expected = JsonCodec::new().encode(&dataset).unwrap();
        assert_eq!(measurement.encoded_len, expected.len());
        assert_eq!(measurement.payload.as_deref(), Some(expected.as_slice()));
        assert_eq!(measurement.records, 5);
    }

    #[test]
    fn test_payload_can_be_dropped() {
        let result = BenchmarkRunner::new()
            .retain_payload(false)
            .run_codec(&generate(5), &JsonCodec::new());
        let measurement = result.measurement().unwrap();
        assert!(measurement.payload.is_none());
        assert!(measurement.encoded_len > 0);
    }

    #[test]
    fn test_failure_does_not_stop_the_run() {
        let codecs: Vec<Box<dyn Codec>> = vec![
            Box::new(JsonCodec::new()),
            Box::new(RejectingCodec),
            Box::new(JsonCodec::pretty()),
        ];
        let results = BenchmarkRunner::new().run(&generate(3), &codecs);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_success());
        assert_eq!(results[1].name, "Rejecting");
        assert_eq!(results[1].error().unwrap().kind(), "MalformedInputError");
        assert!(results[2].is_success());
    }

    #[test]
    fn test_mismatch_detected() {
        let result = BenchmarkRunner::new().run_codec(&generate(4), &LossyCodec);
        let err = result.error().unwrap();
        assert_eq!(err.kind(), "RoundTripMismatchError");
        assert!(err.to_string().contains("record 3"));
    }

    #[test]
    fn test_mismatch_ignored_without_verification() {
        let result = BenchmarkRunner::new()
            .verify_round_trip(false)
            .run_codec(&generate(4), &LossyCodec);
        assert!(result.is_success());
    }

    #[test]
    fn test_empty_dataset() {
        let results = BenchmarkRunner::new().run(&[], &default_codecs().unwrap());
        assert!(results.iter().all(BenchmarkResult::is_success));
        assert!(results
            .iter()
            .all(|r| r.measurement().unwrap().records == 0));
    }

    #[test]
    fn test_elapsed_ms() {
        let measurement = Measurement {
            encoded_len: 0,
            elapsed: Duration::from_micros(1500),
            records: 0,
            payload: None,
        };
        assert!((measurement.elapsed_ms() - 1.5).abs() < 1e-9);
    }
}
