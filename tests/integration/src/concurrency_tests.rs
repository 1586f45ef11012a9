//! Shared-resolver reads from many threads

use ctxfig_core::{ConfigResolver, ResolverOptions, TokenMatcher, Value};
use ctxfig_predicate::Context;
use ctxfig_test_utils::documents::{
    east_production_server, east_production_server_config, service_document,
};
use std::sync::Arc;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_resolvers_are_send_and_sync() {
    assert_send_sync::<ConfigResolver>();
    assert_send_sync::<ConfigResolver<TokenMatcher>>();
    assert_send_sync::<Value>();
    assert_send_sync::<Context>();
}

#[test]
fn test_concurrent_reads_see_the_same_sections() {
    let resolver = Arc::new(ConfigResolver::new(&service_document()).unwrap());
    let dev = Context::from([("runtime", "server"), ("env", "development")]);
    let dev_expected = resolver.read(&dev);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            let dev = dev.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    if i % 2 == 0 {
                        assert_eq!(
                            resolver.read(&east_production_server()),
                            east_production_server_config()
                        );
                    } else {
                        resolver.read(&dev);
                    }
                }
                resolver.read(&dev)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), dev_expected);
    }
}

#[test]
fn test_scoped_reads_with_token_matcher() {
    let resolver =
        ConfigResolver::<TokenMatcher>::build(&service_document(), ResolverOptions::default())
            .unwrap();
    let contexts = [
        Context::new(),
        east_production_server(),
        Context::from([("env", "production")]),
        Context::from([("runtime", "server"), ("env", "production"), ("colo", "west")]),
    ];
    let expected: Vec<Value> = contexts.iter().map(|c| resolver.read(c)).collect();

    thread::scope(|scope| {
        for (context, expected) in contexts.iter().zip(&expected) {
            let resolver = &resolver;
            scope.spawn(move || {
                for _ in 0..50 {
                    assert_eq!(&resolver.read(context), expected);
                }
            });
        }
    });
}
