//! In-memory contextual documents.

use ctxfig_core::{Context, Value};
use serde_json::json;

/// The service scenario: defaults, a `runtime=server` override, and a
/// `env=production` override that nests per-colo memcache settings under a
/// second `runtime=server` directive.
///
/// Flattens to six sections, in this order:
///
/// 1. `{}`
/// 2. `runtime=server`
/// 3. `env=production`
/// 4. `env=production&runtime=server`
/// 5. `colo=east&env=production&runtime=server`
/// 6. `colo=west&env=production&runtime=server`
pub fn service_document() -> Value {
    Value::from(json!({
        "apiURL": "http://localhost:8080/api",
        "assetURL": "http://localhost:8080/static",
        "__context?runtime=server": {
            "listenPort": 8080,
            "memcache": {
                "host": "localhost",
                "port": 11211
            }
        },
        "__context?env=production": {
            "apiURL": "https://api.example.com",
            "assetURL": "https://static.example.com",
            "__context?runtime=server": {
                "listenPort": 80,
                "__context?colo=east": {
                    "memcache": {
                        "host": "memcache.east.example.com",
                        "port": 11212
                    }
                },
                "__context?colo=west": {
                    "memcache": {
                        "host": "memcache.west.example.com",
                        "port": 11213
                    }
                }
            }
        }
    }))
}

/// Runtime context for a production server in the east colo.
pub fn east_production_server() -> Context {
    Context::from([("runtime", "server"), ("env", "production"), ("colo", "east")])
}

/// What [`service_document`] resolves to for [`east_production_server`].
pub fn east_production_server_config() -> Value {
    Value::from(json!({
        "apiURL": "https://api.example.com",
        "assetURL": "https://static.example.com",
        "listenPort": 80,
        "memcache": {
            "host": "memcache.east.example.com",
            "port": 11212
        }
    }))
}

/// A document whose nested directive redefines `env`.
pub fn conflicting_document() -> Value {
    Value::from(json!({
        "__context?env=production": {
            "db": {
                "__context?env=development": {
                    "host": "localhost"
                }
            }
        }
    }))
}

/// Generate a document with one directive per `(dimension, value)` pair and
/// one nested two-dimension directive under each, for benchmarks.
///
/// Dimensions are named `d0..dN`, values `v0..vM`.
pub fn generated_document(dimensions: usize, values: usize) -> Value {
    let mut root = serde_json::Map::new();
    root.insert("name".to_string(), json!("generated"));
    root.insert("limits".to_string(), json!({"cpu": 1, "memory": 512}));

    for d in 0..dimensions {
        for v in 0..values {
            let mut body = serde_json::Map::new();
            body.insert(format!("d{d}"), json!(format!("v{v}")));
            body.insert("limits".to_string(), json!({"cpu": d + v}));
            let next = (d + 1) % dimensions.max(1);
            if next != d {
                body.insert(
                    format!("__context?d{next}=v{v}"),
                    json!({"limits": {"memory": 1024 * (v + 1)}}),
                );
            }
            root.insert(format!("__context?d{d}=v{v}"), serde_json::Value::Object(body));
        }
    }

    Value::from(serde_json::Value::Object(root))
}

/// A runtime context that sets every generated dimension to `value`.
pub fn generated_context(dimensions: usize, value: usize) -> Context {
    (0..dimensions)
        .map(|d| (format!("d{d}"), format!("v{value}")))
        .collect()
}
