//! Flattened `(context, fragment)` pairs

use crate::value::Value;
use ctxfig_predicate::Context;
use serde::Serialize;

/// A configuration fragment scoped to a context.
///
/// Produced once while flattening a document and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    context: Context,
    config: Value,
}

impl Section {
    pub fn new(context: Context, config: Value) -> Self {
        Self { context, config }
    }

    /// The predicate a runtime context must satisfy.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The fragment contributed when the section matches.
    pub fn config(&self) -> &Value {
        &self.config
    }

    pub fn into_parts(self) -> (Context, Value) {
        (self.context, self.config)
    }
}
