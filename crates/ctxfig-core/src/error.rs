//! Error types for ctxfig-core

/// Result type for ctxfig-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading a resolver
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document, or a directive's value, is not a mapping
    #[error("Invalid document at {path}: expected a mapping, found {found}")]
    InvalidDocument { path: String, found: &'static str },

    /// A directive redefines a dimension fixed by an enclosing directive
    #[error(
        "Context conflict at {path}: dimension '{dimension}' is '{existing}' and cannot be redefined as '{conflicting}'"
    )]
    ContextConflict {
        dimension: String,
        existing: String,
        conflicting: String,
        path: String,
    },

    /// The resolved configuration does not fit the requested type
    #[error("Failed to deserialize resolved config: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_document(path: &[String], found: &'static str) -> Self {
        Self::InvalidDocument {
            path: display_path(path),
            found,
        }
    }

    pub(crate) fn context_conflict(
        path: &[String],
        conflict: ctxfig_predicate::OverlayConflict,
    ) -> Self {
        Self::ContextConflict {
            dimension: conflict.dimension,
            existing: conflict.existing,
            conflicting: conflict.conflicting,
            path: display_path(path),
        }
    }
}

/// Separator between directive keys in diagnostic paths.
pub const PATH_SEPARATOR: &str = " > ";

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.join(PATH_SEPARATOR)
    }
}
