//! Query-driven collectors
//!
//! A collector pairs a [`Query`] (how to find data) with a target
//! [`KeyPath`] and a [`WritePolicy`] (how to merge it). Collectors hold no
//! run state and can be applied to any number of documents.
//!
//! # Example
//!
//! ```yaml
//! collectors:
//!   - query: "$[*].name"
//!     target: data.people.names
//!     policy: extend
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::key_path::KeyPath;
use crate::query::Query;
use crate::store::PathStore;

/// How a match result is merged into the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    /// Replace the target with the match result
    #[default]
    Replace,
    /// Append the whole match result as one element
    Append,
    /// Append each matched node as its own element
    Extend,
}

/// Result of applying one collector to one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// The query matched and the store was written
    Written,
    /// The query matched nothing; the store is unchanged
    NotFound,
}

/// One extraction rule
#[derive(Debug)]
pub struct Collector {
    query: Query,
    target: KeyPath,
    policy: WritePolicy,
}

impl Collector {
    /// Build a collector, parsing both the query and the target key path
    pub fn new(query: &str, target: &str, policy: WritePolicy) -> Result<Self> {
        Ok(Self {
            query: Query::parse(query)?,
            target: KeyPath::parse(target)?,
            policy,
        })
    }

    /// Collector that replaces `target` with the match result
    pub fn replace(query: &str, target: &str) -> Result<Self> {
        Self::new(query, target, WritePolicy::Replace)
    }

    /// Collector that appends the match result to `target`
    pub fn append(query: &str, target: &str) -> Result<Self> {
        Self::new(query, target, WritePolicy::Append)
    }

    /// Collector that extends `target` with every matched node
    pub fn extend(query: &str, target: &str) -> Result<Self> {
        Self::new(query, target, WritePolicy::Extend)
    }

    /// Evaluate the query against `document` and merge any match into `store`
    pub fn run(&self, document: &Value, store: &mut PathStore) -> CollectOutcome {
        let Some(matched) = self.query.evaluate(document) else {
            tracing::warn!("Could not find path: {}", self.query);
            return CollectOutcome::NotFound;
        };

        tracing::debug!("{:?} {} -> {}", self.policy, self.query, self.target);

        match self.policy {
            WritePolicy::Replace => store.set(&self.target, Value::Array(matched)),
            WritePolicy::Append => store.append(&self.target, Value::Array(matched)),
            WritePolicy::Extend => store.extend(&self.target, matched),
        }
        CollectOutcome::Written
    }

    /// The query this collector evaluates
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The key path this collector writes
    pub fn target(&self) -> &KeyPath {
        &self.target
    }

    /// The write policy
    pub fn policy(&self) -> WritePolicy {
        self.policy
    }
}
