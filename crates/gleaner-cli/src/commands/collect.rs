//! Print the store produced by extraction

use anyhow::{Context, Result};
use gleaner_core::{Config, PathStore};

use crate::StoreFormat;

/// Run every pipe and print the resulting store to stdout
pub fn run(config_path: &str, format: StoreFormat) -> Result<()> {
    tracing::info!("Loading configuration from {}", config_path);

    let config = Config::load(config_path).context("Failed to load configuration")?;
    let pipeline = config.build().context("Invalid pipeline definition")?;

    let (store, summary) = pipeline.extract().context("Extraction failed")?;
    tracing::info!(
        "Collected {} value(s), {} not found",
        summary.written,
        summary.not_found
    );
    if store.is_empty() {
        tracing::warn!("No values collected; every query came back empty");
    }

    print!("{}", format_store(&store, format)?);
    Ok(())
}

fn format_store(store: &PathStore, format: StoreFormat) -> Result<String> {
    let text = match format {
        StoreFormat::Yaml => serde_yaml::to_string(store)?,
        StoreFormat::Json => {
            let mut json = serde_json::to_string_pretty(store)?;
            json.push('\n');
            json
        }
        StoreFormat::Text => store.to_string(),
    };
    Ok(text)
}
