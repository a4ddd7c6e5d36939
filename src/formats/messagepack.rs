//! MessagePack codec.
//!
//! The default codec writes each record as a positional array (`rmp_serde::to_vec`),
//! the most compact form. [`MessagePackCodec::named`] writes records as maps keyed by
//! field name instead, trading size for self-description.

use super::{Codec, Format};
use crate::error::{BenchError, Result};
use crate::record::Record;

/// How structs are laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StructLayout {
    /// Positional arrays, field names omitted
    #[default]
    Compact,
    /// Maps keyed by field name
    Named,
}

/// MessagePack codec backed by `rmp-serde`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePackCodec {
    layout: StructLayout,
}

impl MessagePackCodec {
    /// Create a codec using the compact array layout
    #[must_use]
    pub const fn new() -> Self {
        MessagePackCodec {
            layout: StructLayout::Compact,
        }
    }

    /// Create a codec that writes field names
    #[must_use]
    pub const fn named() -> Self {
        MessagePackCodec {
            layout: StructLayout::Named,
        }
    }

    /// The struct layout this codec writes
    #[must_use]
    pub const fn layout(&self) -> StructLayout {
        self.layout
    }
}

impl Codec for MessagePackCodec {
    fn format(&self) -> Format {
        Format::MessagePack
    }

    fn name(&self) -> &'static str {
        match self.layout {
            StructLayout::Compact => "MessagePack",
            StructLayout::Named => "MessagePack (named)",
        }
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let encoded = match self.layout {
            StructLayout::Compact => rmp_serde::to_vec(records),
            StructLayout::Named => rmp_serde::to_vec_named(records),
        };
        encoded.map_err(|e| BenchError::unsupported(self.name(), e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        rmp_serde::from_slice(bytes).map_err(|e| BenchError::malformed(self.name(), e))
    }
}
