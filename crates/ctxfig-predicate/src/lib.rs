//! Context predicates for ctxfig
//!
//! A predicate is a flat `key=value&key2=value2` string naming the dimension
//! values a configuration section applies to. This crate provides the
//! [`Context`] type those predicates decode into, and the codec that moves
//! between the two.
//!
//! # Example
//!
//! ```
//! use ctxfig_predicate::Context;
//!
//! let context = Context::from_predicate("env=production&colo=east").unwrap();
//! assert_eq!(context.get("env"), Some("production"));
//! assert_eq!(context.to_string(), "colo=east&env=production");
//! ```

pub mod codec;
pub mod context;

pub use codec::{decode, encode};
pub use context::{Context, OverlayConflict};
