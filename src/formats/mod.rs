//! Serialization formats under benchmark.
//!
//! Every format implements the [`Codec`] trait, so the runner can treat them
//! uniformly. Byte-level encoding is always delegated to the format's library.
//!
//! # Supported Formats
//!
//! | Format | Module | Library | Description |
//! |--------|--------|---------|-------------|
//! | JSON | `json` | `serde_json` | Textual structured markup |
//! | BSON | `bson` | `bson` | Binary document format |
//! | Protobuf | `protobuf` | `prost-reflect` | Schema-driven binary format |
//! | MessagePack | `messagepack` | `rmp-serde` | Compact binary format |
//!
//! # Usage
//!
//! ```
//! use serbench::formats::{default_codecs, Format};
//!
//! let codecs = default_codecs()?;
//! let names: Vec<&str> = codecs.iter().map(|c| c.name()).collect();
//! assert_eq!(names, vec!["JSON", "BSON", "Protobuf", "MessagePack"]);
//! # Ok::<(), serbench::BenchError>(())
//! ```

mod traits;

pub mod bson;
pub mod json;
pub mod messagepack;
pub mod protobuf;

pub use self::bson::BsonCodec;
pub use json::JsonCodec;
pub use messagepack::MessagePackCodec;
pub use protobuf::{ProtobufCodec, SchemaDescriptor};
pub use traits::Codec;

use crate::error::Result;

/// Supported format types for selection and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Format {
    /// JSON text
    Json,
    /// BSON binary document
    Bson,
    /// Protocol Buffers
    Protobuf,
    /// MessagePack
    MessagePack,
}

impl Format {
    /// Every format, in the order a default run benchmarks them.
    pub const ALL: [Format; 4] = [
        Format::Json,
        Format::Bson,
        Format::Protobuf,
        Format::MessagePack,
    ];

    /// Look up a format by name.
    ///
    /// Matching is case-insensitive and accepts common aliases.
    /// Returns `None` if the name is not recognized.
    ///
    /// # Example
    ///
    /// ```
    /// use serbench::formats::Format;
    ///
    /// assert_eq!(Format::from_name("msgpack"), Some(Format::MessagePack));
    /// assert_eq!(Format::from_name("PROTO"), Some(Format::Protobuf));
    /// assert_eq!(Format::from_name("xml"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "bson" => Some(Self::Bson),
            "protobuf" | "proto" | "pb" => Some(Self::Protobuf),
            "messagepack" | "msgpack" | "mp" => Some(Self::MessagePack),
            _ => None,
        }
    }

    /// Get the human-readable name for this format.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Bson => "BSON",
            Self::Protobuf => "Protobuf",
            Self::MessagePack => "MessagePack",
        }
    }

    /// Whether the format's output is binary rather than text.
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        !matches!(self, Self::Json)
    }

    /// Build the default codec for this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the codec cannot be constructed. Only the protobuf codec
    /// has fallible setup (building its descriptor pool).
    pub fn codec(&self) -> Result<Box<dyn Codec>> {
        Ok(match self {
            Self::Json => Box::new(JsonCodec::new()),
            Self::Bson => Box::new(BsonCodec::new()),
            Self::Protobuf => Box::new(ProtobufCodec::new(SchemaDescriptor::default())?),
            Self::MessagePack => Box::new(MessagePackCodec::new()),
        })
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Build the default codec for every format, in [`Format::ALL`] order.
///
/// # Errors
///
/// Returns an error if any codec cannot be constructed.
pub fn default_codecs() -> Result<Vec<Box<dyn Codec>>> {
    codecs_for(&Format::ALL)
}

/// Build the default codec for each of `formats`, preserving their order.
///
/// # Errors
///
/// Returns an error if any codec cannot be constructed.
pub fn codecs_for(formats: &[Format]) -> Result<Vec<Box<dyn Codec>>> {
    formats.iter().map(Format::codec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_name() {
        assert_eq!(Format::from_name("json"), Some(Format::Json));
        assert_eq!(Format::from_name("BSON"), Some(Format::Bson));
        assert_eq!(Format::from_name("pb"), Some(Format::Protobuf));
        assert_eq!(Format::from_name("MessagePack"), Some(Format::MessagePack));
        assert_eq!(Format::from_name("unknown"), None);
    }

    #[test]
    fn test_format_name_round_trips() {
        for format in Format::ALL {
            assert_eq!(Format::from_name(format.name()), Some(format));
        }
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format!("{}", Format::MessagePack), "MessagePack");
    }

    #[test]
    fn test_is_binary() {
        assert!(!Format::Json.is_binary());
        assert!(Format::Bson.is_binary());
        assert!(Format::Protobuf.is_binary());
    }

    #[test]
    fn test_codecs_for_preserves_order() {
        let codecs = codecs_for(&[Format::MessagePack, Format::Json]).unwrap();
        let formats: Vec<Format> = codecs.iter().map(|c| c.format()).collect();
        assert_eq!(formats, vec![Format::MessagePack, Format::Json]);
    }

    #[test]
    fn test_default_codecs() {
        let codecs = default_codecs().unwrap();
        assert_eq!(codecs.len(), Format::ALL.len());
        for (codec, format) in codecs.iter().zip(Format::ALL) {
            assert_eq!(codec.format(), format);
        }
    }
}
