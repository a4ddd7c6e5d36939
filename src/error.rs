//! Error types for benchmark operations.
//!
//! This module provides the [`BenchError`] type for every fallible operation in the
//! crate and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all benchmark operations.
///
/// Codec failures (`MalformedInput`, `UnsupportedValue`, `RoundTripMismatch`) are
/// captured by the runner and reported as data. The remaining variants are fatal
/// to a run.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Decode received bytes inconsistent with the format or its schema.
    #[error("{format}: malformed input: {reason}")]
    MalformedInput {
        /// Name of the format that rejected the input
        format: &'static str,
        /// Library-provided description of the problem
        reason: String,
    },

    /// Encode was given a value the format cannot express.
    #[error("{format}: unsupported value: {reason}")]
    UnsupportedValue {
        /// Name of the format that rejected the value
        format: &'static str,
        /// Library-provided description of the problem
        reason: String,
    },

    /// Decode succeeded but produced records that differ from the input.
    #[error("{format}: round trip mismatch: {detail}")]
    RoundTripMismatch {
        /// Name of the format whose output differed
        format: &'static str,
        /// Where the first difference was found
        detail: String,
    },

    /// A protobuf field-number map is unusable.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// The dataset request cannot be satisfied.
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// The benchmark configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error while writing the report.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Build a [`BenchError::MalformedInput`] from any displayable library error.
    pub(crate) fn malformed(format: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::MalformedInput {
            format,
            reason: reason.to_string(),
        }
    }

    /// Build a [`BenchError::UnsupportedValue`] from any displayable library error.
    pub(crate) fn unsupported(format: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::UnsupportedValue {
            format,
            reason: reason.to_string(),
        }
    }

    /// The error kind as shown in reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } => "MalformedInputError",
            Self::UnsupportedValue { .. } => "UnsupportedValueError",
            Self::RoundTripMismatch { .. } => "RoundTripMismatchError",
            Self::InvalidSchema(_) => "InvalidSchemaError",
            Self::InvalidDataset(_) => "InvalidDatasetError",
            Self::InvalidConfig(_) => "InvalidConfigError",
            Self::Io(_) => "IoError",
        }
    }

    /// Whether this error is a codec-level failure the runner records as a result.
    #[must_use]
    pub const fn is_codec_failure(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. }
                | Self::UnsupportedValue { .. }
                | Self::RoundTripMismatch { .. }
        )
    }
}

/// Convenience type alias for [`std::result::Result`] with [`BenchError`].
pub type Result<T> = std::result::Result<T, BenchError>;
