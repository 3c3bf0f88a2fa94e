//! Document sources
//!
//! A source provides one root value for a pipe's collectors to query.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::{Error, Result};

/// Provider of a root document value
pub trait DocumentSource: fmt::Debug {
    /// Obtain the root value
    ///
    /// Repeated calls return equal values as long as the backing data does
    /// not change.
    fn root(&self) -> Result<Cow<'_, Value>>;

    /// Short human-readable origin, used in logs
    fn describe(&self) -> String;
}

/// Parse YAML (or JSON) text into a value tree
///
/// The conversion to JSON values is lossy for floats JSON cannot represent:
/// `.nan`, `.inf` and `-.inf` become `null`.
pub fn parse_document(text: &str) -> std::result::Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(text)
}

/// A document already held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryDocument {
    value: Value,
}

impl InMemoryDocument {
    /// Wrap an already-parsed value
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Parse YAML or JSON text into an in-memory document
    pub fn parse(text: &str) -> Result<Self> {
        let value = parse_document(text).map_err(|source| Error::DocumentParse {
            origin: "<inline>".to_string(),
            source,
        })?;
        Ok(Self::new(value))
    }
}

impl DocumentSource for InMemoryDocument {
    fn root(&self) -> Result<Cow<'_, Value>> {
        Ok(Cow::Borrowed(&self.value))
    }

    fn describe(&self) -> String {
        "<inline>".to_string()
    }
}

/// A YAML/JSON document read from disk on every [`root`](DocumentSource::root) call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    /// Create a source for the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for FileDocument {
    fn root(&self) -> Result<Cow<'_, Value>> {
        let contents = std::fs::read_to_string(&self.path).map_err(Error::io(&self.path))?;
        let value = parse_document(&contents).map_err(|source| Error::DocumentParse {
            origin: self.path.display().to_string(),
            source,
        })?;
        tracing::debug!("Loaded document {}", self.path.display());
        Ok(Cow::Owned(value))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
