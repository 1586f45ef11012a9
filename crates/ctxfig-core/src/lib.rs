//! Contextual configuration resolution
//!
//! A contextual document holds defaults plus overrides scoped to *contexts*:
//! combinations of dimension values such as `env=production` or
//! `region=east`. Scoped overrides live under directive keys
//! (`"__context?env=production"`) and may nest. This crate turns such a
//! document into the flat configuration in effect for a given runtime
//! context.
//!
//! Resolution runs in three stages:
//!
//! 1. **Flatten** ([`DocumentFlattener`]): at construction the document is
//!    walked once into an ordered list of [`Section`]s, each a
//!    `(context, fragment)` pair, with nested key paths rebuilt and
//!    contradictory nested predicates rejected.
//! 2. **Match** ([`context_matches`], [`Matcher`]): a section applies when
//!    every dimension it names has the same value in the runtime context.
//! 3. **Merge** ([`merge`]): matched fragments are deep-merged in document
//!    order; later fragments win, sequences and scalars replace wholesale.
//!
//! # Example
//!
//! ```
//! use ctxfig_core::{ConfigResolver, Value};
//! use ctxfig_predicate::Context;
//! use serde_json::json;
//!
//! let resolver = ConfigResolver::new(&Value::from(json!({
//!     "apiURL": "http://api.dev",
//!     "__context?env=production": {
//!         "apiURL": "https://api.example.com",
//!         "__context?colo=east": { "cache": { "host": "east.cache" } },
//!     },
//! })))?;
//!
//! let config = resolver.read(&Context::from([("env", "production"), ("colo", "east")]));
//! assert_eq!(config["apiURL"], "https://api.example.com");
//! assert_eq!(config.get_path(&["cache", "host"]).unwrap(), "east.cache");
//! # Ok::<(), ctxfig_core::Error>(())
//! ```

pub mod error;
pub mod flatten;
pub mod matcher;
pub mod merge;
pub mod options;
pub mod resolver;
pub mod section;
pub mod value;

pub use ctxfig_predicate::Context;
pub use error::{Error, Result};
pub use flatten::{DocumentFlattener, KeyKind};
pub use matcher::{
    Matcher, RunSlots, SectionSlots, SimpleMatcher, TokenMatcher, context_matches, filter,
};
pub use merge::{merge, merge_all, merge_into};
pub use options::{DEFAULT_DIRECTIVE_PREFIX, ResolverOptions};
pub use resolver::ConfigResolver;
pub use section::Section;
pub use value::{Mapping, Scalar, Value};
