//! Path-addressed intermediate store
//!
//! A [`PathStore`] is the shared state of one pipeline run. Collectors write
//! into it by [`KeyPath`]; sinks read the finished tree.
//!
//! Intermediate segments are created on demand as empty mappings. A write
//! that passes through a slot currently holding a non-mapping value replaces
//! that value with a mapping (last write wins, no type conflict error).

use serde::Serialize;
use serde_json::{Map, Value};

use crate::key_path::KeyPath;

/// Nested mapping of path segments to values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PathStore {
    root: Map<String, Value>,
}

impl PathStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is at `path` with `value`
    pub fn set(&mut self, path: &KeyPath, value: Value) {
        with_parent(&mut self.root, path.parents(), |parent| {
            parent.insert(path.leaf().to_string(), value);
        });
    }

    /// Append `value` as one new element of the sequence at `path`
    ///
    /// A missing or non-sequence value at `path` is first reset to an empty
    /// sequence.
    pub fn append(&mut self, path: &KeyPath, value: Value) {
        self.push_all(path, [value]);
    }

    /// Append every element of `values`, in order, to the sequence at `path`
    ///
    /// A missing or non-sequence value at `path` is first reset to an empty
    /// sequence.
    pub fn extend<I>(&mut self, path: &KeyPath, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.push_all(path, values);
    }

    /// Read the value at `path`
    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        let mut node = &self.root;
        for segment in path.parents() {
            node = node.get(segment)?.as_object()?;
        }
        node.get(path.leaf())
    }

    /// The whole tree, keyed by top-level segment
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    fn push_all<I>(&mut self, path: &KeyPath, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        with_parent(&mut self.root, path.parents(), |parent| {
            let slot = parent.entry(path.leaf().to_string()).or_insert(Value::Null);
            let mut items = match slot.take() {
                Value::Array(items) => items,
                _ => Vec::new(),
            };
            items.extend(values);
            *slot = Value::Array(items);
        });
    }
}

/// Walk `parents` from `node`, get-or-creating each level as a mapping, and
/// apply `f` to the innermost one.
///
/// A level currently holding a non-mapping value is replaced by an empty
/// mapping.
fn with_parent<R>(
    node: &mut Map<String, Value>,
    parents: &[String],
    f: impl FnOnce(&mut Map<String, Value>) -> R,
) -> R {
    let Some((segment, rest)) = parents.split_first() else {
        return f(node);
    };
    let slot = node.entry(segment.clone()).or_insert(Value::Null);
    let mut child = match slot.take() {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let result = with_parent(&mut child, rest, f);
    *slot = Value::Object(child);
    result
}

impl std::fmt::Display for PathStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, value) in &self.root {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}
