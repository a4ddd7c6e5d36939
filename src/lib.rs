#![warn(missing_docs)]

//! # serbench: serialization format micro-benchmark
//!
//! Serializes a synthetic dataset through JSON, BSON, Protobuf and MessagePack,
//! measuring the encoded size and the combined encode/decode time of each.
//!
//! ## Quick Start
//!
//! ```
//! use serbench::formats::default_codecs;
//! use serbench::generator::generate;
//! use serbench::report::{render, ReportOptions};
//! use serbench::runner::BenchmarkRunner;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = generate(1000);
//! let results = BenchmarkRunner::new().run(&dataset, &default_codecs()?);
//!
//! for result in &results {
//!     if let Some(m) = result.measurement() {
//!         println!("{}: {} bytes in {:.3}ms", result.name, m.encoded_len, m.elapsed_ms());
//!     }
//! }
//! print!("{}", render(&results, &ReportOptions::default()));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`record`] - The synthetic `Record` and its `Address`
//! - [`generator`] - Deterministic dataset generation
//! - [`formats`] - The `Codec` trait and one codec per format
//! - [`runner`] - Timed encode/decode over each codec
//! - [`report`](mod@report) - Human-readable report output
//! - [`config`] - Run configuration
//! - [`error`] - Error types and result type

pub mod config;
pub mod error;
/// Serialization formats under benchmark, unified by the [`Codec`](formats::Codec) trait.
///
/// See the [`formats`] module documentation for the supported formats.
pub mod formats;
pub mod generator;
/// The synthetic `Record` and `Address` structures
pub mod record;
pub mod report;
pub mod runner;

pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use formats::{
    BsonCodec, Codec, Format, JsonCodec, MessagePackCodec, ProtobufCodec, SchemaDescriptor,
};
pub use generator::{generate, DatasetGenerator, TimestampMode};
pub use record::{Address, Record};
pub use report::{report, ReportOptions, TextReport};
pub use runner::{BenchmarkResult, BenchmarkRunner, Measurement};
