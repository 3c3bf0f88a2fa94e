//! Run a pipeline end to end

use anyhow::{Context, Result};
use gleaner_core::Config;

/// Run the configured pipeline
pub fn run(config_path: &str) -> Result<()> {
    tracing::info!("Loading configuration from {}", config_path);

    let config = Config::load(config_path).context("Failed to load configuration")?;
    let pipeline = config.build().context("Invalid pipeline definition")?;

    tracing::info!("Project: {}", config.project.name);

    let summary = pipeline.run().context("Pipeline run failed")?;

    if summary.not_found > 0 {
        tracing::warn!(
            "{} collector(s) matched nothing; their targets were left unchanged",
            summary.not_found
        );
    }
    tracing::info!("✓ Rendered {} sink(s)", summary.rendered);
    Ok(())
}
