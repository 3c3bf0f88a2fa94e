//! Gleaner Core Library
//!
//! This crate provides the core functionality for Gleaner:
//! - A path-addressed intermediate store with replace/append/extend writes
//! - Document sources (in-memory values and YAML/JSON files)
//! - Query-driven collectors that merge matches into the store
//! - Template sinks that render the populated store to files
//! - Pipeline orchestration and YAML configuration
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Document   │────▶│  Collector  │────▶│  PathStore  │────▶│    Sink     │
//! │ (YAML/JSON) │     │  (JSONPath) │     │  (per run)  │     │ (template)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use gleaner_core::Config;
//!
//! let config = Config::load("./gleaner.yaml")?;
//! let pipeline = config.build()?;
//! let summary = pipeline.run()?;
//! println!("rendered {} sinks", summary.rendered);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collector;
pub mod config;
pub mod error;
pub mod key_path;
pub mod pipe;
pub mod pipeline;
pub mod query;
pub mod sink;
pub mod source;
pub mod store;

pub use collector::{CollectOutcome, Collector, WritePolicy};
pub use config::{Config, ProjectConfig};
pub use error::{Error, Result};
pub use key_path::KeyPath;
pub use pipe::ExtractionPipe;
pub use pipeline::{Pipeline, RunSummary};
pub use query::Query;
pub use sink::{Sink, TemplateFileSink};
pub use source::{DocumentSource, FileDocument, InMemoryDocument};
pub use store::PathStore;
