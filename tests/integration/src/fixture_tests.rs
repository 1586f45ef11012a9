//! End-to-end resolution of fixture documents
//!
//! Each fixture is decoded from its file format into a document, resolved
//! for a runtime context, and compared against the expected flat config.

use ctxfig_core::{ConfigResolver, Error, ResolverOptions, TokenMatcher, Value};
use ctxfig_predicate::Context;
use ctxfig_test_utils::documents::{
    east_production_server, east_production_server_config, service_document,
};
use ctxfig_test_utils::fixtures::load_document;
use ctxfig_test_utils::logging;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

#[test]
fn test_service_fixture_json_matches_in_memory_document() {
    assert_eq!(load_document("service.json"), service_document());
}

#[test]
fn test_service_fixture_resolves_identically_across_formats() {
    logging::init();
    for name in ["service.json", "service.yaml"] {
        let resolver = ConfigResolver::new(&load_document(name)).unwrap();
        assert_eq!(
            resolver.read(&east_production_server()),
            east_production_server_config(),
            "fixture {name}"
        );
    }
}

#[test]
fn test_service_fixture_section_order() {
    let resolver = ConfigResolver::new(&load_document("service.yaml")).unwrap();
    let contexts: Vec<String> = resolver
        .sections()
        .iter()
        .map(|section| section.context().to_string())
        .collect();
    assert_eq!(
        contexts,
        vec![
            "",
            "runtime=server",
            "env=production",
            "env=production&runtime=server",
            "colo=east&env=production&runtime=server",
            "colo=west&env=production&runtime=server",
        ]
    );
}

#[test]
fn test_database_toml_fixture() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Pool {
        min: u32,
        max: u32,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Database {
        name: String,
        pool: Pool,
        #[serde(default)]
        replicas: Vec<String>,
        residency: Option<String>,
    }

    let resolver = ConfigResolver::<TokenMatcher>::build(
        &load_document("database.toml"),
        ResolverOptions::default(),
    )
    .unwrap();

    let local: Database = resolver.read_as(&Context::new()).unwrap();
    assert_eq!(
        local,
        Database {
            name: "orders".to_string(),
            pool: Pool { min: 1, max: 4 },
            replicas: vec![],
            residency: None,
        }
    );

    let eu = resolver.read(&Context::from([("env", "production"), ("region", "eu")]));
    assert_eq!(
        eu,
        Value::from(json!({
            "name": "orders",
            "pool": {"min": 1, "max": 32},
            "replicas": ["db-1.internal", "db-2.internal"],
            "tls": {"verify": true},
            "residency": "eu-west-1"
        }))
    );
}

#[test]
fn test_conflict_fixture_is_rejected() {
    let err = ConfigResolver::new(&load_document("conflict.yaml")).unwrap_err();
    assert!(
        matches!(err, Error::ContextConflict { ref dimension, .. } if dimension == "env"),
        "got: {err}"
    );
}

#[test]
fn test_non_mapping_fixture_is_rejected() {
    let err = ConfigResolver::new(&load_document("not-a-mapping.json")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid document at (root): expected a mapping, found sequence"
    );
}
