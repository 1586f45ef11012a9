//! Deep merge of configuration fragments
//!
//! Merge semantics, keyed on the `changes` side:
//! - Mapping over mapping: merge recursively by key
//! - Anything else (sequences, scalars, `null`, absent, mapping over
//!   non-mapping): the `changes` value replaces the base value wholesale
//! - Sequences are never merged element-wise
//! - A key's presence in `changes` decides replacement, not its truthiness
//! - Keys only in the base are carried through
//!
//! Inputs are never modified; results are built from clones.

use crate::value::Value;

/// Return `base` overlaid with `changes`.
///
/// ```
/// use ctxfig_core::{Value, merge};
/// use serde_json::json;
///
/// let base = Value::from(json!({"db": {"host": "a", "port": 1}, "tags": [1, 2, 3]}));
/// let changes = Value::from(json!({"db": {"port": 2}, "tags": [9]}));
/// let merged = merge(&base, &changes);
///
/// assert_eq!(merged, Value::from(json!({"db": {"host": "a", "port": 2}, "tags": [9]})));
/// ```
pub fn merge(base: &Value, changes: &Value) -> Value {
    let mut merged = base.clone();
    merge_into(&mut merged, changes);
    merged
}

/// Overlay `changes` onto `target` in place.
///
/// `changes` is only read; every value taken from it is cloned into
/// `target`, so later edits to `changes` cannot reach the result.
pub fn merge_into(target: &mut Value, changes: &Value) {
    match (target, changes) {
        (Value::Mapping(target_map), Value::Mapping(changes_map)) => {
            for (key, change) in changes_map {
                match target_map.get_mut(key) {
                    Some(existing) if existing.is_mapping() && change.is_mapping() => {
                        merge_into(existing, change);
                    }
                    Some(existing) => {
                        *existing = change.clone();
                    }
                    None => {
                        target_map.insert(key.clone(), change.clone());
                    }
                }
            }
        }
        (target, changes) => {
            *target = changes.clone();
        }
    }
}

/// Left-fold [`merge_into`] over `fragments`, starting from an empty mapping.
///
/// Later fragments win conflicts.
pub fn merge_all<'a, I>(fragments: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    fragments
        .into_iter()
        .fold(Value::mapping(), |mut merged, fragment| {
            merge_into(&mut merged, fragment);
            merged
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_objects() {
        let a = Value::from(json!({"a": "a-aaa", "b": "b-aaa"}));
        let b = Value::from(json!({"b": "b-bbb", "c": "c-bbb"}));
        assert_eq!(
            merge(&a, &b),
            Value::from(json!({"a": "a-aaa", "b": "b-bbb", "c": "c-bbb"}))
        );
    }

    #[test]
    fn test_new_keys_are_appended_after_base_keys() {
        let a = Value::from(json!({"x": 1, "y": 2}));
        let b = Value::from(json!({"z": 3, "x": 0}));
        let merged = merge(&a, &b);
        let keys: Vec<&String> = merged.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_mapping_replaces_scalar() {
        let a = Value::from(json!({"db": "sqlite://"}));
        let b = Value::from(json!({"db": {"host": "h"}}));
        assert_eq!(merge(&a, &b), b);
    }

    #[test]
    fn test_scalar_replaces_mapping() {
        let a = Value::from(json!({"db": {"host": "h"}}));
        let b = Value::from(json!({"db": false}));
        assert_eq!(merge(&a, &b), b);
    }

    #[test]
    fn test_inputs_are_untouched() {
        let a = Value::from(json!({"db": {"host": "a"}}));
        let b = Value::from(json!({"db": {"port": 1}}));
        let a_before = a.clone();
        let b_before = b.clone();
        let _ = merge(&a, &b);
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_merge_all_empty_is_empty_mapping() {
        assert!(merge_all(std::iter::empty()).is_empty_mapping());
    }

    #[test]
    fn test_merge_all_later_wins() {
        let layers = [
            Value::from(json!({"timeout": 100, "cache": {"mode": "off"}})),
            Value::from(json!({"timeout": 200})),
            Value::from(json!({"cache": {"mode": "on"}})),
            Value::from(json!({"timeout": 50})),
        ];
        let merged = merge_all(&layers);
        assert_eq!(merged["timeout"], 50);
        assert_eq!(merged.get_path(&["cache", "mode"]).unwrap(), "on");
    }
}
