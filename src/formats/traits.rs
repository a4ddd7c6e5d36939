//! Codec trait for serialization formats.
//!
//! This module defines the trait every format implementation provides, giving the
//! runner a uniform way to encode and decode a dataset regardless of the underlying
//! wire format.
//!
//! # Design
//!
//! The trait is object safe so the runner can iterate an ordered
//! `Vec<Box<dyn Codec>>`. Implementations hold only immutable configuration;
//! every call allocates its own output buffer.
//!
//! # Example
//!
//! ```
//! use serbench::formats::{Codec, JsonCodec};
//! use serbench::generator::generate;
//!
//! let records = generate(10);
//! let codec = JsonCodec::new();
//!
//! let bytes = codec.encode(&records)?;
//! assert_eq!(codec.decode(&bytes)?, records);
//! # Ok::<(), serbench::BenchError>(())
//! ```

use super::Format;
use crate::error::Result;
use crate::record::Record;

/// Trait for paired encode/decode implementations of one serialization format.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Delegate byte-level work to an existing library for the format
/// - Produce output of the same length every time for the same input
/// - Map library decode failures to [`BenchError::MalformedInput`](crate::BenchError::MalformedInput)
/// - Map library encode failures to [`BenchError::UnsupportedValue`](crate::BenchError::UnsupportedValue)
pub trait Codec: std::fmt::Debug {
    /// The format this codec implements.
    fn format(&self) -> Format;

    /// Name shown in reports.
    ///
    /// Defaults to the format's display name. Override when several codecs of the
    /// same format are benchmarked side by side.
    fn name(&self) -> &'static str {
        self.format().name()
    }

    /// Encode a dataset into a freshly allocated byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::UnsupportedValue`](crate::BenchError::UnsupportedValue)
    /// if a record holds a value the format cannot express.
    fn encode(&self, records: &[Record]) -> Result<Vec<u8>>;

    /// Decode bytes produced by [`encode`](Self::encode) back into a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::MalformedInput`](crate::BenchError::MalformedInput)
    /// if the bytes are truncated, carry an invalid tag, or do not match the
    /// format's schema.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>>;

    /// Encode then decode a dataset.
    ///
    /// # Errors
    ///
    /// Returns whichever error [`encode`](Self::encode) or [`decode`](Self::decode)
    /// raised first.
    fn round_trip(&self, records: &[Record]) -> Result<Vec<Record>> {
        let bytes = self.encode(records)?;
        self.decode(&bytes)
    }
}
