//! Flattening nested contextual documents into sections
//!
//! A document is a mapping in which some keys are *directives*: a reserved
//! prefix followed by a predicate, e.g. `__context?env=production`. The
//! value under a directive is a nested document that only applies when the
//! predicate holds. Directives may nest inside each other and inside
//! ordinary keys at any depth.
//!
//! Flattening walks the tree depth-first in document key order and emits
//! an ordered list of [`Section`]s:
//!
//! - each level contributes a *root* section holding its non-directive keys
//!   under the context inherited from enclosing directives;
//! - each directive extends the inherited context with its predicate and
//!   contributes the sections of its own subtree;
//! - sections found below an ordinary key are re-wrapped under that key so
//!   merging puts their values back at the right path.
//!
//! ```
//! use ctxfig_core::{DocumentFlattener, Value};
//! use serde_json::json;
//!
//! let doc = Value::from(json!({
//!     "color": "red",
//!     "__context?env=dev": { "color": "blue" },
//! }));
//! let sections = DocumentFlattener::default().flatten(&doc).unwrap();
//!
//! assert_eq!(sections.len(), 2);
//! assert!(sections[0].context().is_empty());
//! assert_eq!(sections[1].context().get("env"), Some("dev"));
//! assert_eq!(sections[1].config()["color"], "blue");
//! ```

use crate::error::{Error, Result};
use crate::options::DEFAULT_DIRECTIVE_PREFIX;
use crate::section::Section;
use crate::value::{Mapping, Value};
use ctxfig_predicate::{Context, decode};
use std::iter;

/// How a mapping key is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind<'a> {
    /// A context directive; `predicate` is the text after the prefix.
    Directive { predicate: &'a str },
    /// An ordinary configuration key.
    Data { name: &'a str },
}

impl<'a> KeyKind<'a> {
    /// Classify `key` against a directive prefix.
    ///
    /// An empty prefix recognizes no directives.
    pub fn classify(key: &'a str, prefix: &str) -> Self {
        if prefix.is_empty() {
            return KeyKind::Data { name: key };
        }
        match key.strip_prefix(prefix) {
            Some(predicate) => KeyKind::Directive { predicate },
            None => KeyKind::Data { name: key },
        }
    }
}

/// Turns a contextual document into an ordered section list.
#[derive(Debug, Clone)]
pub struct DocumentFlattener {
    prefix: String,
}

impl Default for DocumentFlattener {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTIVE_PREFIX)
    }
}

/// Result of walking one mapping level.
struct Level {
    /// Non-directive keys at this level, with nested mappings reduced to
    /// their own roots.
    root: Mapping,
    /// Sections found below this level, in document order.
    nested: Vec<Section>,
}

impl Level {
    fn into_sections(self, context: Context) -> Vec<Section> {
        iter::once(Section::new(context, Value::Mapping(self.root)))
            .chain(self.nested)
            .collect()
    }

    /// Like [`Level::into_sections`], but a directive whose own level only
    /// holds further directives does not emit an empty root section.
    fn into_directive_sections(self, context: Context) -> Vec<Section> {
        if self.root.is_empty() && !self.nested.is_empty() {
            self.nested
        } else {
            self.into_sections(context)
        }
    }
}

impl DocumentFlattener {
    /// Create a flattener recognizing directives that start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Flatten a top-level document.
    ///
    /// The first section always has the empty context.
    pub fn flatten(&self, document: &Value) -> Result<Vec<Section>> {
        self.flatten_in(document, &Context::new())
    }

    /// Flatten a document as if it were nested under `inherited`.
    pub fn flatten_in(&self, document: &Value, inherited: &Context) -> Result<Vec<Section>> {
        let level = self.walk(document, inherited, &mut Vec::new())?;
        Ok(level.into_sections(inherited.clone()))
    }

    /// `path` holds the directive keys from the document root to `node`.
    fn walk(&self, node: &Value, inherited: &Context, path: &mut Vec<String>) -> Result<Level> {
        let Value::Mapping(map) = node else {
            return Err(Error::invalid_document(path, node.kind()));
        };

        let mut root = Mapping::with_capacity(map.len());
        let mut nested = Vec::new();

        for (key, value) in map {
            match KeyKind::classify(key, &self.prefix) {
                KeyKind::Directive { predicate } => {
                    path.push(key.clone());
                    let context = inherited
                        .overlay(decode(predicate))
                        .map_err(|conflict| Error::context_conflict(path, conflict))?;
                    tracing::trace!(directive = %key, %context, "Flattening directive");

                    let level = self.walk(value, &context, path)?;
                    path.pop();
                    nested.extend(level.into_directive_sections(context));
                }
                KeyKind::Data { name } => match value {
                    Value::Mapping(_) => {
                        let level = self.walk(value, inherited, path)?;
                        root.insert(name.to_string(), Value::Mapping(level.root));
                        nested.extend(level.nested.into_iter().map(|section| wrap(name, section)));
                    }
                    _ => {
                        root.insert(name.to_string(), value.clone());
                    }
                },
            }
        }

        Ok(Level { root, nested })
    }
}

/// Re-home a section found below `key` so its fragment sits under `key`.
fn wrap(key: &str, section: Section) -> Section {
    let (context, config) = section.into_parts();
    let mut wrapped = Mapping::with_capacity(1);
    wrapped.insert(key.to_string(), config);
    Section::new(context, Value::Mapping(wrapped))
}
