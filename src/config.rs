//! Configuration for a benchmark run.
//!
//! This module provides the [`BenchConfig`] struct which controls the dataset size,
//! which formats are benchmarked, and how much of each payload the report prints.

use std::collections::HashSet;

use crate::error::{BenchError, Result};
use crate::formats::{codecs_for, Codec, Format};
use crate::report::ReportOptions;

/// Records generated when no size is given.
pub const DEFAULT_DATASET_SIZE: usize = 1000;

/// Largest dataset a run will generate.
pub const MAX_DATASET_SIZE: usize = 10_000_000;

/// Payload bytes the report prints when no preview width is given.
pub const DEFAULT_HEX_PREVIEW: usize = 64;

/// Configuration for a benchmark run.
///
/// # Examples
///
/// ```
/// use serbench::config::BenchConfig;
/// use serbench::formats::Format;
///
/// // Default configuration (1000 records, every format)
/// let config = BenchConfig::default();
/// assert_eq!(config.dataset_size, 1000);
///
/// // Only the binary formats, printing every payload byte
/// let config = BenchConfig::default()
///     .with_formats(vec![Format::Protobuf, Format::MessagePack])
///     .with_hex_preview(None);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Number of records to generate.
    pub dataset_size: usize,

    /// Formats to benchmark, in the order they run and are reported.
    pub formats: Vec<Format>,

    /// Payload bytes printed per result.
    ///
    /// `None` prints the whole payload; `Some(0)` suppresses the hex dump.
    pub hex_preview: Option<usize>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dataset_size: DEFAULT_DATASET_SIZE,
            formats: Format::ALL.to_vec(),
            hex_preview: Some(DEFAULT_HEX_PREVIEW),
        }
    }
}

impl BenchConfig {
    /// Set the number of records to generate
    #[must_use]
    pub fn with_dataset_size(mut self, dataset_size: usize) -> Self {
        self.dataset_size = dataset_size;
        self
    }

    /// Set the formats to benchmark
    #[must_use]
    pub fn with_formats(mut self, formats: Vec<Format>) -> Self {
        self.formats = formats;
        self
    }

    /// Set the hex preview width
    #[must_use]
    pub fn with_hex_preview(mut self, hex_preview: Option<usize>) -> Self {
        self.hex_preview = hex_preview;
        self
    }

    /// Check the configuration can run.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidDataset`] if the dataset is larger than
    /// [`MAX_DATASET_SIZE`], or [`BenchError::InvalidConfig`] if the format list is
    /// empty or names a format twice.
    pub fn validate(&self) -> Result<()> {
        if self.dataset_size > MAX_DATASET_SIZE {
            return Err(BenchError::InvalidDataset(format!(
                "{} records requested, at most {MAX_DATASET_SIZE} allowed",
                self.dataset_size
            )));
        }
        if self.formats.is_empty() {
            return Err(BenchError::InvalidConfig(
                "at least one format is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.formats.iter().find(|f| !seen.insert(**f)) {
            return Err(BenchError::InvalidConfig(format!(
                "format {duplicate} is listed more than once"
            )));
        }
        Ok(())
    }

    /// Build the codecs for the configured formats, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a codec cannot be constructed.
    pub fn codecs(&self) -> Result<Vec<Box<dyn Codec>>> {
        codecs_for(&self.formats)
    }

    /// Report options derived from this configuration
    #[must_use]
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            hex_preview: self.hex_preview,
            ..ReportOptions::default()
        }
    }
}
