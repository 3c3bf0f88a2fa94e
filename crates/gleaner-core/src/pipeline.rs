//! Pipeline orchestration
//!
//! A pipeline runs every pipe against one fresh [`PathStore`], then hands
//! the finished store to every sink. Nothing is rolled back when a later
//! pipe or sink fails.

use std::ops::AddAssign;

use crate::error::Result;
use crate::pipe::ExtractionPipe;
use crate::sink::Sink;
use crate::store::PathStore;

/// Counts reported by a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Collectors whose query matched and wrote to the store
    pub written: usize,
    /// Collectors whose query matched nothing
    pub not_found: usize,
    /// Sinks that rendered successfully
    pub rendered: usize,
}

impl AddAssign for RunSummary {
    fn add_assign(&mut self, other: Self) {
        self.written += other.written;
        self.not_found += other.not_found;
        self.rendered += other.rendered;
    }
}

/// A complete run definition: pipes, then sinks
#[derive(Debug, Default)]
pub struct Pipeline {
    pipes: Vec<ExtractionPipe>,
    sinks: Vec<Box<dyn Sink>>,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pipe after the existing ones
    pub fn with_pipe(mut self, pipe: ExtractionPipe) -> Self {
        self.pipes.push(pipe);
        self
    }

    /// Add a sink after the existing ones
    pub fn with_sink(self, sink: impl Sink + 'static) -> Self {
        self.with_boxed_sink(Box::new(sink))
    }

    /// Add an already boxed sink after the existing ones
    pub fn with_boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Pipes in run order
    pub fn pipes(&self) -> &[ExtractionPipe] {
        &self.pipes
    }

    /// Sinks in run order
    pub fn sinks(&self) -> &[Box<dyn Sink>] {
        &self.sinks
    }

    /// Run every pipe against a fresh store without running any sink
    pub fn extract(&self) -> Result<(PathStore, RunSummary)> {
        let mut store = PathStore::new();
        let mut summary = RunSummary::default();
        for pipe in &self.pipes {
            summary += pipe.run(&mut store)?;
        }
        Ok((store, summary))
    }

    /// Extract into a fresh store, then send it to every sink in order
    pub fn run(&self) -> Result<RunSummary> {
        let (store, mut summary) = self.extract()?;
        for sink in &self.sinks {
            tracing::debug!("Sending store to {}", sink.describe());
            sink.send(&store)?;
            summary.rendered += 1;
        }
        tracing::info!(
            "Run complete: {} written, {} not found, {} rendered",
            summary.written,
            summary.not_found,
            summary.rendered
        );
        Ok(summary)
    }
}
