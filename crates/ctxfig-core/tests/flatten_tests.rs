//! Tests for document flattening

use ctxfig_core::{Context, DocumentFlattener, Error, Section, Value};
use ctxfig_test_utils::documents::{conflicting_document, service_document};
use pretty_assertions::assert_eq;
use serde_json::json;

fn flatten(doc: serde_json::Value) -> Vec<Section> {
    DocumentFlattener::default()
        .flatten(&Value::from(doc))
        .unwrap()
}

fn section(context: &[(&str, &str)], config: serde_json::Value) -> Section {
    Section::new(context.iter().copied().collect(), Value::from(config))
}

#[test]
fn test_simple_config() {
    assert_eq!(
        flatten(json!({"color": "red"})),
        vec![section(&[], json!({"color": "red"}))]
    );
}

#[test]
fn test_config_with_one_section() {
    assert_eq!(
        flatten(json!({
            "color": "red",
            "__context?env=dev": {"color": "blue"}
        })),
        vec![
            section(&[], json!({"color": "red"})),
            section(&[("env", "dev")], json!({"color": "blue"})),
        ]
    );
}

#[test]
fn test_config_with_several_sections() {
    assert_eq!(
        flatten(json!({
            "color": "red",
            "__context?env=dev": {"color": "blue"},
            "__context?env=prod": {"color": "green"},
            "__context?env=prod&colo=east": {"color": "yellow"}
        })),
        vec![
            section(&[], json!({"color": "red"})),
            section(&[("env", "dev")], json!({"color": "blue"})),
            section(&[("env", "prod")], json!({"color": "green"})),
            section(&[("env", "prod"), ("colo", "east")], json!({"color": "yellow"})),
        ]
    );
}

#[test]
fn test_root_keys_after_directives_still_land_in_root() {
    let sections = flatten(json!({
        "__context?env=dev": {"color": "blue"},
        "color": "red"
    }));
    assert_eq!(sections[0], section(&[], json!({"color": "red"})));
    assert_eq!(sections[1], section(&[("env", "dev")], json!({"color": "blue"})));
}

#[test]
fn test_service_document_sections() {
    let sections = DocumentFlattener::default()
        .flatten(&service_document())
        .unwrap();

    assert_eq!(
        sections,
        vec![
            section(
                &[],
                json!({
                    "apiURL": "http://localhost:8080/api",
                    "assetURL": "http://localhost:8080/static"
                })
            ),
            section(
                &[("runtime", "server")],
                json!({"listenPort": 8080, "memcache": {"host": "localhost", "port": 11211}})
            ),
            section(
                &[("env", "production")],
                json!({
                    "apiURL": "https://api.example.com",
                    "assetURL": "https://static.example.com"
                })
            ),
            section(
                &[("env", "production"), ("runtime", "server")],
                json!({"listenPort": 80})
            ),
            section(
                &[("env", "production"), ("runtime", "server"), ("colo", "east")],
                json!({"memcache": {"host": "memcache.east.example.com", "port": 11212}})
            ),
            section(
                &[("env", "production"), ("runtime", "server"), ("colo", "west")],
                json!({"memcache": {"host": "memcache.west.example.com", "port": 11213}})
            ),
        ]
    );
}

#[test]
fn test_deep_data_path_is_rebuilt() {
    let sections = flatten(json!({
        "services": {
            "cache": {
                "ttl": 60,
                "__context?env=prod": {
                    "ttl": 3600,
                    "__context?colo=east": {"ttl": 7200}
                }
            }
        }
    }));

    assert_eq!(
        sections,
        vec![
            section(&[], json!({"services": {"cache": {"ttl": 60}}})),
            section(&[("env", "prod")], json!({"services": {"cache": {"ttl": 3600}}})),
            section(
                &[("env", "prod"), ("colo", "east")],
                json!({"services": {"cache": {"ttl": 7200}}})
            ),
        ]
    );
}

#[test]
fn test_nested_directive_with_same_value_is_allowed() {
    let sections = flatten(json!({
        "__context?env=prod": {
            "__context?env=prod&colo=east": {"a": 1}
        }
    }));
    assert_eq!(sections.len(), 2);
    assert_eq!(
        sections[1].context(),
        &Context::from([("env", "prod"), ("colo", "east")])
    );
}

#[test]
fn test_conflicting_nested_directive_fails() {
    let err = DocumentFlattener::default()
        .flatten(&conflicting_document())
        .unwrap_err();

    match err {
        Error::ContextConflict {
            dimension,
            existing,
            conflicting,
            path,
        } => {
            assert_eq!(dimension, "env");
            assert_eq!(existing, "production");
            assert_eq!(conflicting, "development");
            assert_eq!(path, "__context?env=production > __context?env=development");
        }
        other => panic!("expected a context conflict, got: {other}"),
    }
}

#[test]
fn test_conflict_within_one_predicate_fails() {
    let err = DocumentFlattener::default()
        .flatten(&Value::from(json!({"__context?env=dev&env=prod": {}})))
        .unwrap_err();
    assert!(matches!(err, Error::ContextConflict { ref dimension, .. } if dimension == "env"));
}

#[test]
fn test_flattening_is_deterministic() {
    let doc = service_document();
    let flattener = DocumentFlattener::default();
    assert_eq!(flattener.flatten(&doc).unwrap(), flattener.flatten(&doc).unwrap());
}
