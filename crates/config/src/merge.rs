//! Dotted-path writes into JSON trees.
//!
//! Responsibilities:
//! - Set a value at a dotted path like `a.b.c`, creating intermediate
//!   containers as needed.
//!
//! Does NOT handle:
//! - Deciding which paths to write (the loader iterates decrypted secrets).
//! - Reading values back (see [`Settings::get`](crate::Settings::get)).
//!
//! Invariants:
//! - Numeric segments address sequences; arrays are extended with nulls up
//!   to the written index.
//! - Non-numeric segments address mappings.
//! - An intermediate of the wrong kind is replaced by the container the
//!   next segment requires; the value at the final location is always
//!   overwritten.

use serde_json::{Map, Value};

/// Sets `value` at `path` inside `root`, overwriting anything already there.
pub fn set_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut parts = path.split('.');
    let Some(first) = parts.next() else {
        return;
    };
    let rest: Vec<&str> = parts.collect();
    set_in_value(root.entry(first).or_insert(Value::Null), &rest, value);
}

fn set_in_value(node: &mut Value, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *node = value;
        return;
    };

    match head.parse::<usize>() {
        Ok(index) => {
            if !node.is_array() {
                *node = Value::Array(Vec::new());
            }
            if let Some(items) = node.as_array_mut() {
                if items.len() <= index {
                    items.resize(index + 1, Value::Null);
                }
                if let Some(slot) = items.get_mut(index) {
                    set_in_value(slot, rest, value);
                }
            }
        }
        Err(_) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            if let Some(map) = node.as_object_mut() {
                set_in_value(map.entry(*head).or_insert(Value::Null), rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_sets_top_level_key() {
        let mut root = object(json!({"port": 3000}));
        set_path(&mut root, "port", json!(8080));
        assert_eq!(Value::Object(root), json!({"port": 8080}));
    }

    #[test]
    fn test_creates_intermediate_objects() {
        let mut root = object(json!({}));
        set_path(&mut root, "db.credentials.password", json!("hunter2"));
        assert_eq!(
            Value::Object(root),
            json!({"db": {"credentials": {"password": "hunter2"}}})
        );
    }

    #[test]
    fn test_merges_into_existing_subtree() {
        let mut root = object(json!({"db": {"host": "localhost"}}));
        set_path(&mut root, "db.password", json!("hunter2"));
        assert_eq!(
            Value::Object(root),
            json!({"db": {"host": "localhost", "password": "hunter2"}})
        );
    }

    #[test]
    fn test_overwrites_scalar_intermediate() {
        let mut root = object(json!({"db": "sqlite"}));
        set_path(&mut root, "db.host", json!("localhost"));
        assert_eq!(Value::Object(root), json!({"db": {"host": "localhost"}}));
    }

    #[test]
    fn test_numeric_segment_addresses_sequences() {
        let mut root = object(json!({"hosts": ["a"]}));
        set_path(&mut root, "hosts.2", json!("c"));
        assert_eq!(Value::Object(root), json!({"hosts": ["a", null, "c"]}));
    }

    #[test]
    fn test_numeric_segment_creates_sequence() {
        let mut root = object(json!({}));
        set_path(&mut root, "replicas.0.host", json!("db1"));
        assert_eq!(Value::Object(root), json!({"replicas": [{"host": "db1"}]}));
    }

    #[test]
    fn test_sibling_paths_are_unaffected() {
        let mut root = object(json!({"a": {"b": 1, "c": 2}}));
        set_path(&mut root, "a.b", json!(10));
        assert_eq!(Value::Object(root), json!({"a": {"b": 10, "c": 2}}));
    }

    fn lookup<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
        let mut parts = path.split('.');
        let mut node = root.get(parts.next()?)?;
        for part in parts {
            node = match (node, part.parse::<usize>()) {
                (Value::Array(items), Ok(index)) => items.get(index)?,
                (Value::Object(map), _) => map.get(part)?,
                _ => return None,
            };
        }
        Some(node)
    }

    proptest! {
        // A written path must always read back the written value, whatever
        // tree shape existed beforehand.
        #[test]
        fn prop_set_then_lookup_roundtrips(
            segments in proptest::collection::vec("[a-z]{1,6}", 1..5),
            value in -1000i64..1000,
        ) {
            let mut root = object(json!({"existing": {"keys": [1, 2, 3]}}));
            let path = segments.join(".");
            set_path(&mut root, &path, json!(value));
            prop_assert_eq!(lookup(&root, &path), Some(&json!(value)));
        }
    }
}
