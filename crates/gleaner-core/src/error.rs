//! Error types for gleaner-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for gleaner-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gleaner-core
///
/// A query that matches nothing is not an error; collectors report it as
/// [`CollectOutcome::NotFound`](crate::collector::CollectOutcome::NotFound).
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// Key path is empty or contains an empty segment
    #[error("invalid key path '{path}': {message}")]
    InvalidKeyPath {
        /// The key path as written
        path: String,
        /// Description of the problem
        message: String,
    },

    /// Query string is not valid JSONPath
    #[error("invalid query '{query}': {message}")]
    InvalidQuery {
        /// The query as written
        query: String,
        /// Parser message
        message: String,
    },

    /// Document text could not be parsed as YAML/JSON
    #[error("failed to parse document {origin}: {source}")]
    DocumentParse {
        /// File path or `<inline>`
        origin: String,
        /// Underlying parser error
        #[source]
        source: serde_yaml::Error,
    },

    /// Template rendering error
    #[error("template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    /// IO error on a source, template, or output path
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
