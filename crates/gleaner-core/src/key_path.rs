//! Dotted key paths addressing locations in a [`PathStore`](crate::PathStore)
//!
//! `"data.people.names"` names the `names` entry inside the `people`
//! mapping inside the top-level `data` mapping.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A parsed, non-empty key path
///
/// Every segment but the last names an intermediate mapping; the last names
/// the slot that writes target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    parents: Vec<String>,
    leaf: String,
}

impl KeyPath {
    /// Parse a dotted key path
    ///
    /// Surrounding whitespace on the whole path is trimmed. An empty path or
    /// an empty segment (`"a..b"`, `".a"`, `"a."`) is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidKeyPath {
                path: text.to_string(),
                message: "key path is empty".to_string(),
            });
        }

        let mut segments = Vec::new();
        for (index, segment) in trimmed.split('.').enumerate() {
            if segment.is_empty() {
                return Err(Error::InvalidKeyPath {
                    path: text.to_string(),
                    message: format!("segment {} is empty", index + 1),
                });
            }
            segments.push(segment.to_string());
        }

        let leaf = segments.pop().ok_or_else(|| Error::InvalidKeyPath {
            path: text.to_string(),
            message: "key path is empty".to_string(),
        })?;

        Ok(Self {
            parents: segments,
            leaf,
        })
    }

    /// Segments naming intermediate mappings, outermost first
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// Final segment
    pub fn leaf(&self) -> &str {
        &self.leaf
    }
}

impl FromStr for KeyPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for parent in &self.parents {
            write!(f, "{}.", parent)?;
        }
        f.write_str(&self.leaf)
    }
}
