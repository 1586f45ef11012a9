//! Predicate string codec
//!
//! Predicates use `application/x-www-form-urlencoded` syntax: pairs are
//! separated by `&`, `+` decodes to a space, percent-escapes are decoded and
//! a pair without `=` carries an empty value.

use crate::context::Context;
use url::form_urlencoded;

/// Decode a predicate string into its `(dimension, value)` pairs.
///
/// Pairs are returned in the order they appear. Duplicate dimensions are
/// passed through untouched; [`Context::overlay`] decides what they mean.
///
/// # Examples
///
/// ```
/// use ctxfig_predicate::decode;
///
/// let pairs = decode("env=prod&region=us%20east");
/// assert_eq!(pairs, vec![
///     ("env".to_string(), "prod".to_string()),
///     ("region".to_string(), "us east".to_string()),
/// ]);
/// ```
pub fn decode(predicate: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(predicate.as_bytes())
        .into_owned()
        .collect()
}

/// Encode a context as a predicate string, dimensions in sorted order.
pub fn encode(context: &Context) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(context.iter())
        .finish()
}
