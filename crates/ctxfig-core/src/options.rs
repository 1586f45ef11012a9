//! Resolver options
//!
//! Options are plain serde data so a host application can embed them in its
//! own configuration file:
//!
//! ```
//! use ctxfig_core::ResolverOptions;
//!
//! let options: ResolverOptions = serde_json::from_str(r#"{"directive_prefix": "@when "}"#).unwrap();
//! assert_eq!(options.directive_prefix, "@when ");
//!
//! let defaults: ResolverOptions = serde_json::from_str("{}").unwrap();
//! assert_eq!(defaults, ResolverOptions::default());
//! ```

use serde::{Deserialize, Serialize};

/// Prefix marking a mapping key as a context directive.
pub const DEFAULT_DIRECTIVE_PREFIX: &str = "__context?";

fn default_directive_prefix() -> String {
    DEFAULT_DIRECTIVE_PREFIX.to_string()
}

/// Settings that shape how a document is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// Keys starting with this prefix are directives; the rest of the key is
    /// the predicate. An empty prefix disables directives.
    #[serde(default = "default_directive_prefix")]
    pub directive_prefix: String,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            directive_prefix: default_directive_prefix(),
        }
    }
}

impl ResolverOptions {
    pub fn with_directive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.directive_prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix() {
        assert_eq!(ResolverOptions::default().directive_prefix, "__context?");
    }

    #[test]
    fn test_options_from_toml() {
        let options: ResolverOptions = toml::from_str("directive_prefix = \"+ctx:\"").unwrap();
        assert_eq!(options, ResolverOptions::default().with_directive_prefix("+ctx:"));
    }
}
