//! JSONPath queries against document trees
//!
//! Queries use RFC 9535 syntax via `serde_json_path`. A query is parsed once
//! and can be evaluated against any number of documents.

use std::fmt;

use serde_json::Value;
use serde_json_path::JsonPath;

use crate::error::{Error, Result};

/// A parsed JSONPath query
pub struct Query {
    text: String,
    path: JsonPath,
}

impl Query {
    /// Parse a query string
    ///
    /// The legacy root spelling `$.[` is accepted as `$[`, so `$.[*].name`
    /// and `$[*].name` are the same query. Syntax errors are reported as
    /// [`Error::InvalidQuery`].
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let normalized = match trimmed.strip_prefix("$.[") {
            Some(rest) => format!("$[{}", rest),
            None => trimmed.to_string(),
        };

        let path = JsonPath::parse(&normalized).map_err(|e| Error::InvalidQuery {
            query: text.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            text: text.to_string(),
            path,
        })
    }

    /// Evaluate against `document`
    ///
    /// Returns `None` when no node matches. Otherwise returns every matched
    /// node in document order; a single match is still a one-element list.
    pub fn evaluate(&self, document: &Value) -> Option<Vec<Value>> {
        let nodes = self.path.query(document).all();
        if nodes.is_empty() {
            return None;
        }
        Some(nodes.into_iter().cloned().collect())
    }

    /// The query as originally written
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Query").field(&self.text).finish()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
