//! Extraction pipes
//!
//! A pipe applies an ordered list of collectors to the single document one
//! source provides.

use crate::collector::{CollectOutcome, Collector};
use crate::error::Result;
use crate::pipeline::RunSummary;
use crate::source::DocumentSource;
use crate::store::PathStore;

/// One source bound to the collectors that mine it
#[derive(Debug)]
pub struct ExtractionPipe {
    name: Option<String>,
    source: Box<dyn DocumentSource>,
    collectors: Vec<Collector>,
}

impl ExtractionPipe {
    /// Create a pipe with no collectors
    pub fn new(source: impl DocumentSource + 'static) -> Self {
        Self::from_boxed(Box::new(source))
    }

    /// Create a pipe from an already boxed source
    pub fn from_boxed(source: Box<dyn DocumentSource>) -> Self {
        Self {
            name: None,
            source,
            collectors: Vec::new(),
        }
    }

    /// Set the name used in logs
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a collector after the existing ones
    pub fn with_collector(mut self, collector: Collector) -> Self {
        self.collectors.push(collector);
        self
    }

    /// Name used in logs: the configured name, or the source's origin
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.source.describe())
    }

    /// Collectors in application order
    pub fn collectors(&self) -> &[Collector] {
        &self.collectors
    }

    /// Read the document once and apply every collector to it, in order
    ///
    /// Later collectors overwrite earlier ones' targets.
    pub fn run(&self, store: &mut PathStore) -> Result<RunSummary> {
        let document = self.source.root()?;
        let mut summary = RunSummary::default();
        for collector in &self.collectors {
            match collector.run(&document, store) {
                CollectOutcome::Written => summary.written += 1,
                CollectOutcome::NotFound => summary.not_found += 1,
            }
        }
        tracing::info!(
            "Pipe {}: {} written, {} not found",
            self.label(),
            summary.written,
            summary.not_found
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::key_path::KeyPath;
    use crate::source::{FileDocument, InMemoryDocument};
    use serde_json::json;

    fn kp(text: &str) -> KeyPath {
        KeyPath::parse(text).unwrap()
    }

    fn people() -> InMemoryDocument {
        InMemoryDocument::new(json!([{"name": "Ann"}, {"name": "Bo"}]))
    }

    #[test]
    fn test_pipe_extends_names() {
        let pipe = ExtractionPipe::new(people())
            .with_collector(Collector::extend("$[*].name", "data.people.names").unwrap());
        let mut store = PathStore::new();
        let summary = pipe.run(&mut store).unwrap();

        assert_eq!(summary.written, 1);
        assert_eq!(
            store.get(&kp("data.people.names")),
            Some(&json!(["Ann", "Bo"]))
        );
    }

    #[test]
    fn test_later_collector_wins() {
        let pipe = ExtractionPipe::new(people())
            .with_collector(Collector::replace("$[0].name", "who").unwrap())
            .with_collector(Collector::replace("$[1].name", "who").unwrap());
        let mut store = PathStore::new();
        pipe.run(&mut store).unwrap();
        assert_eq!(store.get(&kp("who")), Some(&json!(["Bo"])));
    }

    #[test]
    fn test_missing_query_is_counted_not_fatal() {
        let pipe = ExtractionPipe::new(people())
            .named("people")
            .with_collector(Collector::extend("$[*].email", "emails").unwrap())
            .with_collector(Collector::extend("$[*].name", "names").unwrap());
        let mut store = PathStore::new();
        let summary = pipe.run(&mut store).unwrap();

        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.written, 1);
        assert_eq!(store.get(&kp("emails")), None);
        assert_eq!(pipe.label(), "people");
    }

    #[test]
    fn test_source_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "key: [").unwrap();

        let pipe = ExtractionPipe::new(FileDocument::new(&path))
            .with_collector(Collector::extend("$[*]", "all").unwrap());
        let mut store = PathStore::new();
        let err = pipe.run(&mut store).unwrap_err();
        assert!(matches!(err, Error::DocumentParse { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_label_defaults_to_source() {
        let pipe = ExtractionPipe::new(FileDocument::new("data/people.json"));
        assert_eq!(pipe.label(), "data/people.json");
        assert!(pipe.collectors().is_empty());
    }
}
