//! Validate configuration command

use anyhow::{Context, Result};
use gleaner_core::Config;

/// Run the validate command
pub fn run(config_path: &str) -> Result<()> {
    tracing::info!("Validating configuration: {}", config_path);

    let config = Config::load(config_path).context("Failed to load configuration")?;
    let pipeline = config.build().context("Invalid pipeline definition")?;

    let collectors: usize = pipeline.pipes().iter().map(|p| p.collectors().len()).sum();

    tracing::info!("✓ Project: {}", config.project.name);
    tracing::info!(
        "✓ Pipes: {} ({} collectors)",
        pipeline.pipes().len(),
        collectors
    );
    for pipe in pipeline.pipes() {
        tracing::info!("  {}", pipe.label());
        for collector in pipe.collectors() {
            tracing::info!(
                "    {} -> {} ({:?})",
                collector.query().as_str(),
                collector.target(),
                collector.policy()
            );
        }
    }
    tracing::info!("✓ Sinks: {}", pipeline.sinks().len());
    tracing::info!("✓ Configuration is valid");
    Ok(())
}
