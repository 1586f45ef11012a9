//! Fixture documents stored under `test-fixtures/documents`.
//!
//! The same tree may be stored in several encodings; the file extension
//! picks the decoder.

use ctxfig_core::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Absolute path of the workspace's `test-fixtures/documents` directory.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/documents")
}

/// Load and decode `test-fixtures/documents/<name>`.
///
/// Supported extensions: `json`, `yaml`/`yml`, `toml`.
///
/// # Panics
/// Panics if the file cannot be read, has an unknown extension, or fails to
/// decode.
pub fn load_document(name: &str) -> Value {
    let path = fixtures_dir().join(name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("load_document: failed to read {}: {e}", path.display()));

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("load_document: invalid JSON in {name}: {e}")),
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .unwrap_or_else(|e| panic!("load_document: invalid YAML in {name}: {e}")),
        "toml" => toml::from_str(&content)
            .unwrap_or_else(|e| panic!("load_document: invalid TOML in {name}: {e}")),
        other => panic!("load_document: unsupported fixture extension {other:?} for {name}"),
    }
}
