//! Configuration parsing and validation
//!
//! This module loads a run definition from `gleaner.yaml` and compiles it
//! into a [`Pipeline`].
//!
//! # Example
//!
//! ```yaml
//! name: people-report
//! pipes:
//!   - name: people
//!     source:
//!       type: file
//!       path: data/people.json
//!     collectors:
//!       - query: "$[*].name"
//!         target: data.people.names
//!         policy: extend
//! sinks:
//!   - type: template
//!     template: templates/people.txt.j2
//!     output: output/people.txt
//! ```
//!
//! Relative paths are resolved against the directory holding the
//! configuration file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::collector::{Collector, WritePolicy};
use crate::error::{Error, Result};
use crate::pipe::ExtractionPipe;
use crate::pipeline::Pipeline;
use crate::sink::{Sink, TemplateFileSink};
use crate::source::{DocumentSource, FileDocument, InMemoryDocument};

/// Default configuration file name
pub const CONFIG_FILE: &str = "gleaner.yaml";

/// Root project configuration from `gleaner.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Extraction pipes, run in order
    #[serde(default)]
    pub pipes: Vec<PipeConfig>,

    /// Sinks, run in order after every pipe
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// One source and the collectors applied to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeConfig {
    /// Name used in logs
    #[serde(default)]
    pub name: Option<String>,

    /// Where the document comes from
    pub source: SourceConfig,

    /// Collectors, applied in order
    #[serde(default)]
    pub collectors: Vec<CollectorConfig>,
}

/// Document source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// YAML/JSON file on disk
    File {
        /// File path
        path: String,
    },

    /// Value written directly in the configuration
    Inline {
        /// The document
        value: serde_json::Value,
    },
}

/// Collector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// JSONPath query
    pub query: String,

    /// Dotted key path to write
    pub target: String,

    /// Write policy
    #[serde(default)]
    pub policy: WritePolicy,
}

/// Sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkConfig {
    /// Render a Jinja template file to an output file
    Template {
        /// Template file path
        template: String,
        /// Output file path
        output: String,
    },
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Base path of the project
    pub base_path: PathBuf,
}

impl Config {
    /// Load configuration from a directory or a configuration file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the project directory or gleaner.yaml file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let (config_path, base_path) = if path.is_dir() {
            (path.join(CONFIG_FILE), path.to_path_buf())
        } else {
            (
                path.to_path_buf(),
                path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            )
        };

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&config_path).map_err(Error::io(&config_path))?;
        Self::from_yaml(&contents, base_path)
    }

    /// Parse configuration text, resolving relative paths against `base_path`
    pub fn from_yaml(contents: &str, base_path: impl Into<PathBuf>) -> Result<Self> {
        let project: ProjectConfig = serde_yaml::from_str(contents)?;
        Ok(Self {
            project,
            base_path: base_path.into(),
        })
    }

    /// Resolve a configured path against the project directory
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Compile the configuration into a runnable pipeline
    ///
    /// Every query and key path is checked here, before any document is
    /// read or output written.
    pub fn build(&self) -> Result<Pipeline> {
        let mut pipeline = Pipeline::new();

        for (index, pipe_config) in self.project.pipes.iter().enumerate() {
            let mut pipe = ExtractionPipe::from_boxed(self.build_source(&pipe_config.source));
            if let Some(name) = &pipe_config.name {
                pipe = pipe.named(name.clone());
            }

            for collector in &pipe_config.collectors {
                let built = Collector::new(&collector.query, &collector.target, collector.policy)
                    .map_err(|e| Error::ConfigInvalid {
                        message: format!("pipe {}: {}", pipe_label(pipe_config, index), e),
                    })?;
                pipe = pipe.with_collector(built);
            }
            pipeline = pipeline.with_pipe(pipe);
        }

        for sink_config in &self.project.sinks {
            pipeline = pipeline.with_boxed_sink(self.build_sink(sink_config));
        }

        tracing::debug!(
            "Built pipeline '{}': {} pipes, {} sinks",
            self.project.name,
            pipeline.pipes().len(),
            pipeline.sinks().len()
        );
        Ok(pipeline)
    }

    fn build_source(&self, config: &SourceConfig) -> Box<dyn DocumentSource> {
        match config {
            SourceConfig::File { path } => Box::new(FileDocument::new(self.resolve(path))),
            SourceConfig::Inline { value } => Box::new(InMemoryDocument::new(value.clone())),
        }
    }

    fn build_sink(&self, config: &SinkConfig) -> Box<dyn Sink> {
        match config {
            SinkConfig::Template { template, output } => Box::new(TemplateFileSink::new(
                self.resolve(template),
                self.resolve(output),
            )),
        }
    }
}

fn pipe_label(config: &PipeConfig, index: usize) -> String {
    match &config.name {
        Some(name) => format!("'{}'", name),
        None => format!("#{}", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r#"
name: test-project
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "test-project");
        assert!(config.pipes.is_empty());
        assert!(config.sinks.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
name: people
description: Names report
pipes:
  - name: people
    source:
      type: file
      path: data/people.json
    collectors:
      - query: "$[*].name"
        target: data.people.names
        policy: extend
      - query: "$[0]"
        target: data.first
sinks:
  - type: template
    template: templates/people.txt.j2
    output: output/people.txt
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.pipes.len(), 1);
        let pipe = &config.pipes[0];
        assert_eq!(pipe.name.as_deref(), Some("people"));
        match &pipe.source {
            SourceConfig::File { path } => assert_eq!(path, "data/people.json"),
            _ => panic!("Expected file source"),
        }
        assert_eq!(pipe.collectors[0].policy, WritePolicy::Extend);
        assert_eq!(pipe.collectors[1].policy, WritePolicy::Replace);
        match &config.sinks[0] {
            SinkConfig::Template { template, output } => {
                assert_eq!(template, "templates/people.txt.j2");
                assert_eq!(output, "output/people.txt");
            }
        }
    }

    #[test]
    fn test_parse_inline_source() {
        let yaml = r#"
type: inline
value:
  - name: Ann
  - name: Bo
"#;
        let source: SourceConfig = serde_yaml::from_str(yaml).unwrap();
        match source {
            SourceConfig::Inline { value } => assert_eq!(value[1]["name"], "Bo"),
            _ => panic!("Expected inline source"),
        }
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let yaml = r#"
name: bad
pipes:
  - source: { type: inline, value: {} }
    collectors:
      - query: "$.a"
        target: a
        policy: merge
"#;
        let err = Config::from_yaml(yaml, ".").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        let err = Config::from_yaml("name: x\nsink: []\n", ".").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let config = Config::from_yaml("name: x\n", "/projects/report").unwrap();
        assert_eq!(
            config.resolve("data/in.json"),
            PathBuf::from("/projects/report/data/in.json")
        );
        assert_eq!(config.resolve("/tmp/in.json"), PathBuf::from("/tmp/in.json"));
    }

    #[test]
    fn test_build_counts_pipes_and_sinks() {
        let yaml = r#"
name: x
pipes:
  - source: { type: inline, value: [1, 2] }
    collectors:
      - { query: "$[*]", target: xs, policy: extend }
  - source: { type: file, path: other.yaml }
sinks:
  - { type: template, template: t.j2, output: out.txt }
"#;
        let pipeline = Config::from_yaml(yaml, "/base").unwrap().build().unwrap();
        assert_eq!(pipeline.pipes().len(), 2);
        assert_eq!(pipeline.pipes()[0].collectors().len(), 1);
        assert_eq!(pipeline.pipes()[1].label(), "/base/other.yaml");
        assert_eq!(pipeline.sinks()[0].describe(), "/base/out.txt");
    }

    #[test]
    fn test_build_rejects_bad_key_path() {
        let yaml = r#"
name: x
pipes:
  - name: people
    source: { type: inline, value: [] }
    collectors:
      - { query: "$[*]", target: "data..names" }
"#;
        let err = Config::from_yaml(yaml, ".").unwrap().build().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'people'"));
        assert!(message.contains("data..names"));
    }

    #[test]
    fn test_build_rejects_bad_query() {
        let yaml = r#"
name: x
pipes:
  - source: { type: inline, value: [] }
    collectors:
      - { query: "names[", target: names }
"#;
        let err = Config::from_yaml(yaml, ".").unwrap().build().unwrap_err();
        assert!(err.to_string().contains("pipe #1"));
        assert!(err.to_string().contains("names["));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "name: from-dir\n").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.project.name, "from-dir");
        assert_eq!(config.base_path, dir.path());
    }

    #[test]
    fn test_load_from_file_uses_parent_as_base() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "name: from-file\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.project.name, "from-file");
        assert_eq!(config.base_path, dir.path());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }
}
