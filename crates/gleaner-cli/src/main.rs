//! Gleaner CLI
//!
//! Runs declarative extract-and-render pipelines defined in `gleaner.yaml`.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Gleaner - collect values from documents and render them through templates
#[derive(Parser)]
#[command(name = "gleaner")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file or project directory
    #[arg(short, long, default_value = "gleaner.yaml", env = "GLEANER_CONFIG")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Gleaner project
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Project name (defaults to directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Validate configuration without reading documents
    Validate,

    /// Run extraction only and print the collected store
    Collect {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = StoreFormat::Yaml)]
        format: StoreFormat,
    },

    /// Run the full pipeline: extraction, then every sink
    Run,
}

/// Format for printing a collected store
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreFormat {
    /// YAML document
    Yaml,
    /// Pretty-printed JSON
    Json,
    /// One `key: value` line per top-level key
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { path, name } => {
            commands::init::run(&path, name.as_deref())?;
        }
        Commands::Validate => {
            commands::validate::run(&cli.config)?;
        }
        Commands::Collect { format } => {
            commands::collect::run(&cli.config, format)?;
        }
        Commands::Run => {
            commands::run::run(&cli.config)?;
        }
    }

    Ok(())
}
