//! Contextual configuration resolution
//!
//! The [`ConfigResolver`] flattens a document once, then answers any number
//! of `read` requests by selecting the sections whose context the runtime
//! context satisfies and deep-merging them in document order.

use crate::Result;
use crate::flatten::DocumentFlattener;
use crate::matcher::{Matcher, SimpleMatcher};
use crate::merge;
use crate::options::ResolverOptions;
use crate::section::Section;
use crate::value::Value;
use ctxfig_predicate::Context;
use serde::de::DeserializeOwned;
use std::fmt;

/// Resolves a contextual document for runtime contexts.
///
/// Sections are computed at construction and never change afterwards, so a
/// resolver can be shared across threads and read concurrently.
///
/// # Example
///
/// ```
/// use ctxfig_core::{ConfigResolver, Value};
/// use ctxfig_predicate::Context;
/// use serde_json::json;
///
/// let resolver = ConfigResolver::new(&Value::from(json!({
///     "color": "red",
///     "size": "small",
///     "__context?env=prod": { "color": "green" },
/// })))?;
///
/// let config = resolver.read(&Context::from([("env", "prod")]));
/// assert_eq!(config, Value::from(json!({"color": "green", "size": "small"})));
/// # Ok::<(), ctxfig_core::Error>(())
/// ```
pub struct ConfigResolver<M: Matcher = SimpleMatcher> {
    sections: Vec<Section>,
    /// One token per section, same order.
    tokens: Vec<M::SectionToken>,
    matcher: M,
    options: ResolverOptions,
}

impl ConfigResolver {
    /// Build a resolver with default options.
    ///
    /// Fails with [`crate::Error::InvalidDocument`] if `document` (or any
    /// directive's value) is not a mapping, and with
    /// [`crate::Error::ContextConflict`] if a nested directive redefines a
    /// dimension.
    pub fn new(document: &Value) -> Result<Self> {
        Self::build(document, ResolverOptions::default())
    }

    /// Build a resolver with the given options.
    pub fn with_options(document: &Value, options: ResolverOptions) -> Result<Self> {
        Self::build(document, options)
    }
}

impl<M: Matcher> ConfigResolver<M> {
    /// Build a resolver using matching strategy `M`.
    pub fn build(document: &Value, options: ResolverOptions) -> Result<Self> {
        let sections =
            DocumentFlattener::new(options.directive_prefix.as_str()).flatten(document)?;
        let matcher = M::from_sections(&sections);
        let tokens = sections
            .iter()
            .map(|section| matcher.tokenize_section(section.context()))
            .collect();

        tracing::debug!(
            sections = sections.len(),
            prefix = %options.directive_prefix,
            "Built config resolver"
        );

        Ok(Self {
            sections,
            tokens,
            matcher,
            options,
        })
    }

    /// The flattened sections, in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Fragments of every section matching `context`, in document order.
    ///
    /// Sections with identical predicates each contribute their fragment.
    pub fn matching(&self, context: &Context) -> Vec<&Value> {
        let run = self.matcher.tokenize_run(context);
        let matched: Vec<&Value> = self
            .sections
            .iter()
            .zip(&self.tokens)
            .filter(|(_, token)| self.matcher.matches(token, &run))
            .map(|(section, _)| section.config())
            .collect();

        tracing::trace!(%context, matched = matched.len(), "Matched sections");
        matched
    }

    /// Deep-merge `fragments` left to right onto an empty mapping.
    ///
    /// Later fragments win, whatever their predicates.
    pub fn merge_all<'a, I>(&self, fragments: I) -> Value
    where
        I: IntoIterator<Item = &'a Value>,
    {
        merge::merge_all(fragments)
    }

    /// The configuration in effect for `context`.
    pub fn read(&self, context: &Context) -> Value {
        self.merge_all(self.matching(context))
    }

    /// The configuration in effect for `context`, deserialized as `T`.
    ///
    /// ```
    /// use ctxfig_core::{ConfigResolver, Value};
    /// use ctxfig_predicate::Context;
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct Server {
    ///     port: u16,
    /// }
    ///
    /// let resolver = ConfigResolver::new(&Value::from(json!({
    ///     "port": 8080,
    ///     "__context?env=prod": { "port": 80 },
    /// })))?;
    /// let server: Server = resolver.read_as(&Context::from([("env", "prod")]))?;
    /// assert_eq!(server.port, 80);
    /// # Ok::<(), ctxfig_core::Error>(())
    /// ```
    pub fn read_as<T: DeserializeOwned>(&self, context: &Context) -> Result<T> {
        let resolved = serde_json::to_value(self.read(context))?;
        Ok(serde_json::from_value(resolved)?)
    }
}

impl<M: Matcher> fmt::Debug for ConfigResolver<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("sections", &self.sections)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
