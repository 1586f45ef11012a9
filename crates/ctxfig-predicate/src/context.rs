//! Runtime and section contexts

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A mapping from dimension name to dimension value.
///
/// Semantically unordered; stored sorted so that display output and
/// diagnostics are stable. A dimension that is absent from a context is
/// unconstrained, never "empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(BTreeMap<String, String>);

/// A dimension was given two different values within one predicate chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dimension '{dimension}' is '{existing}' and cannot be redefined as '{conflicting}'")]
pub struct OverlayConflict {
    pub dimension: String,
    pub existing: String,
    pub conflicting: String,
}

impl Context {
    /// Create an empty context, which constrains nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a predicate string into a context.
    ///
    /// Fails if the predicate names the same dimension twice with different
    /// values; a repeated identical pair is accepted.
    pub fn from_predicate(predicate: &str) -> Result<Self, OverlayConflict> {
        Self::new().overlay(crate::codec::decode(predicate))
    }

    /// Value of a dimension, if constrained.
    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.0.get(dimension).map(String::as_str)
    }

    pub fn contains(&self, dimension: &str) -> bool {
        self.0.contains_key(dimension)
    }

    /// Set a dimension, returning its previous value.
    pub fn insert(&mut self, dimension: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(dimension.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(dimension, value)` pairs in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate dimension names in order.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Return a new context with `pairs` layered on top of this one.
    ///
    /// A pair that repeats an existing dimension with the same value is a
    /// no-op. A pair that gives an existing dimension (or a dimension seen
    /// earlier in `pairs`) a different value is an [`OverlayConflict`].
    pub fn overlay<I, K, V>(&self, pairs: I) -> Result<Self, OverlayConflict>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged = self.clone();
        for (dimension, value) in pairs {
            let dimension = dimension.into();
            let value = value.into();
            match merged.0.get(&dimension) {
                Some(existing) if *existing != value => {
                    return Err(OverlayConflict {
                        existing: existing.clone(),
                        dimension,
                        conflicting: value,
                    });
                }
                Some(_) => {}
                None => {
                    merged.0.insert(dimension, value);
                }
            }
        }
        Ok(merged)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::codec::encode(self))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Context {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for Context {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}
