//! Shared test utilities for the ctxfig workspace.
//!
//! This crate provides standardised documents and fixture loading so crate
//! test suites and benchmarks exercise the same inputs. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`documents`]: in-memory contextual documents, including the
//!   multi-dimension service scenario and a generator for large documents
//! - [`fixtures`]: loading fixture documents from `test-fixtures/documents`
//! - [`logging`]: tracing subscriber setup for tests

pub mod documents;
pub mod fixtures;
pub mod logging;
