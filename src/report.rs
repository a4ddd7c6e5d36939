//! Human-readable benchmark reports.
//!
//! Each result gets a section framed by banner lines naming the format. A successful
//! result shows the payload size, a hex dump of the payload, and the elapsed time in
//! milliseconds. A failed result shows the error kind instead. A summary table closes
//! the report.
//!
//! # API Patterns
//!
//! - **Stdout**: [`report`] - Writes the default report to standard output
//! - **Any writer**: [`TextReport`] - Writes to any `std::io::Write`
//! - **String**: [`render`] - Renders to a `String`
//!
//! # Examples
//!
//! ```
//! use serbench::formats::JsonCodec;
//! use serbench::generator::generate;
//! use serbench::report::{render, ReportOptions};
//! use serbench::runner::BenchmarkRunner;
//!
//! let result = BenchmarkRunner::new().run_codec(&generate(2), &JsonCodec::new());
//! let text = render(&[result], &ReportOptions::default());
//!
//! assert!(text.contains("=========== JSON ==============="));
//! assert!(text.contains("Finished in"));
//! ```

use std::fmt::Write as _;
use std::io::Write;

use crate::error::Result;
use crate::runner::{BenchmarkResult, Measurement};

/// Bytes shown per hex dump line.
pub const HEX_BYTES_PER_LINE: usize = 32;

const BANNER_FILL: &str = "===========";
const BANNER_TAIL: &str = "===============";

/// Options controlling report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Payload bytes printed per result.
    ///
    /// `None` prints every byte; `Some(0)` omits the hex dump.
    pub hex_preview: Option<usize>,

    /// Append the summary table.
    pub summary: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            hex_preview: Some(crate::config::DEFAULT_HEX_PREVIEW),
            summary: true,
        }
    }
}

/// Write the report for `results` to standard output with default options.
///
/// # Errors
///
/// Returns [`BenchError::Io`](crate::BenchError::Io) if stdout cannot be written.
pub fn report(results: &[BenchmarkResult]) -> Result<()> {
    let stdout = std::io::stdout();
    TextReport::new(stdout.lock()).write_results(results)
}

/// Render the report for `results` into a string.
#[must_use]
pub fn render(results: &[BenchmarkResult], options: &ReportOptions) -> String {
    let mut output = String::new();

    for result in results {
        render_section(&mut output, result, options);
    }

    if options.summary && !results.is_empty() {
        render_summary(&mut output, results);
    }

    output
}

/// Report sink writing to any [`Write`] implementation.
#[derive(Debug)]
pub struct TextReport<W: Write> {
    writer: W,
    options: ReportOptions,
}

impl<W: Write> TextReport<W> {
    /// Create a report sink with default options
    pub fn new(writer: W) -> Self {
        TextReport {
            writer,
            options: ReportOptions::default(),
        }
    }

    /// Replace the rendering options
    #[must_use]
    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    /// Write the report for `results` and flush the writer.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::Io`](crate::BenchError::Io) if writing fails.
    pub fn write_results(&mut self, results: &[BenchmarkResult]) -> Result<()> {
        self.writer
            .write_all(render(results, &self.options).as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the sink and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn banner(output: &mut String, name: &str) {
    writeln!(output, "{BANNER_FILL} {name} {BANNER_TAIL}").ok();
}

fn render_section(output: &mut String, result: &BenchmarkResult, options: &ReportOptions) {
    output.push('\n');
    banner(output, result.name);

    match &result.outcome {
        Ok(measurement) => {
            writeln!(output, "{} size: {} bytes", result.name, measurement.encoded_len).ok();
            render_payload(output, result.name, measurement, options.hex_preview);
            writeln!(output, "Finished in {:.3}ms", measurement.elapsed_ms()).ok();
        }
        Err(error) => {
            writeln!(output, "{} failed: {} ({error})", result.name, error.kind()).ok();
        }
    }

    banner(output, result.name);
}

fn render_payload(
    output: &mut String,
    name: &str,
    measurement: &Measurement,
    preview: Option<usize>,
) {
    let Some(payload) = measurement.payload.as_deref() else {
        return;
    };

    let shown = preview.map_or(payload.len(), |limit| limit.min(payload.len()));
    if shown == 0 && !payload.is_empty() {
        return;
    }

    if shown < payload.len() {
        writeln!(output, "{name} value (first {shown} of {} bytes):", payload.len()).ok();
    } else {
        writeln!(output, "{name} value:").ok();
    }

    for line in hex_dump(&payload[..shown]) {
        writeln!(output, "  {line}").ok();
    }

    if shown < payload.len() {
        writeln!(output, "  ... {} more bytes", payload.len() - shown).ok();
    }
}

/// Render bytes as uppercase hex, [`HEX_BYTES_PER_LINE`] bytes per line, each line
/// prefixed with its offset.
///
/// # Examples
///
/// ```
/// use serbench::report::hex_dump;
///
/// assert_eq!(hex_dump(&[0x0A, 0xFF]), vec!["00000000  0AFF".to_string()]);
/// assert!(hex_dump(&[]).is_empty());
/// ```
#[must_use]
pub fn hex_dump(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(HEX_BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| {
            format!(
                "{:08X}  {}",
                i * HEX_BYTES_PER_LINE,
                hex::encode_upper(chunk)
            )
        })
        .collect()
}

fn render_summary(output: &mut String, results: &[BenchmarkResult]) {
    let largest = results
        .iter()
        .filter_map(BenchmarkResult::measurement)
        .map(|m| m.encoded_len)
        .max()
        .unwrap_or(0);

    output.push('\n');
    match results.iter().find_map(BenchmarkResult::measurement) {
        Some(m) => writeln!(output, "Summary ({} records)", m.records).ok(),
        None => writeln!(output, "Summary").ok(),
    };
    output.push_str(&"-".repeat(72));
    output.push('\n');
    writeln!(
        output,
        "{:<22} {:>14} {:>10} {:>12}  Status",
        "Format", "Size (bytes)", "Relative", "Time (ms)"
    )
    .ok();

    for result in results {
        match &result.outcome {
            Ok(m) => {
                let relative = if largest == 0 {
                    100.0
                } else {
                    ratio(m.encoded_len, largest) * 100.0
                };
                writeln!(
                    output,
                    "{:<22} {:>14} {:>9.1}% {:>12.3}  ok",
                    result.name,
                    m.encoded_len,
                    relative,
                    m.elapsed_ms()
                )
                .ok();
            }
            Err(e) => {
                writeln!(
                    output,
                    "{:<22} {:>14} {:>10} {:>12}  {}",
                    result.name,
                    "-",
                    "-",
                    "-",
                    e.kind()
                )
                .ok();
            }
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64
}
