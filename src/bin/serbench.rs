//! Runs every serialization format over the default synthetic dataset and prints
//! size and timing for each.
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default `serbench=info`).

use std::io;

use anyhow::Context;
use serbench::generator::DatasetGenerator;
use serbench::report::TextReport;
use serbench::runner::BenchmarkRunner;
use serbench::BenchConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("serbench=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = BenchConfig::default();
    config.validate().context("invalid benchmark configuration")?;

    let dataset = DatasetGenerator::new().generate(config.dataset_size);
    let codecs = config.codecs().context("failed to build codecs")?;

    let results = BenchmarkRunner::new().run(&dataset, &codecs);

    let failed = results.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        tracing::warn!(failed, "some codecs did not complete");
    }

    TextReport::new(io::stdout().lock())
        .with_options(config.report_options())
        .write_results(&results)
        .context("failed to write report")?;

    Ok(())
}
