//! Canonical text: the unit of equality when diffing nodes.
//!
//! A value is copied with object keys sorted and everything at or below the
//! depth limit replaced by [`DEPTH_PLACEHOLDER`], then pretty-printed with
//! two-space indentation. Arrays keep their order. Two values that differ
//! only in key order, or only below the depth limit, share one canonical
//! text.

use serde_json::{Map, Value};

use snapgraph_core::Node;

use crate::error::DiffError;

/// Replaces every value nested at or beyond the depth limit.
pub const DEPTH_PLACEHOLDER: &str = "<… depth limit …>";

/// Knobs for canonicalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalOptions {
    /// Nesting depth at which values are replaced by the placeholder. The
    /// document root is depth 0.
    pub max_depth: usize,
}

impl Default for CanonicalOptions {
    fn default() -> Self {
        CanonicalOptions { max_depth: 10 }
    }
}

/// Key-sorted, depth-truncated copy of `value`.
pub fn canonicalize(value: &Value, options: &CanonicalOptions) -> Value {
    truncate(value, 0, options.max_depth)
}

fn truncate(value: &Value, depth: usize, max_depth: usize) -> Value {
    if depth >= max_depth {
        return Value::String(DEPTH_PLACEHOLDER.to_string());
    }
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), truncate(&map[key.as_str()], depth + 1, max_depth));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| truncate(item, depth + 1, max_depth))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// Canonical text of an arbitrary value.
pub fn canonical_text(value: &Value, options: &CanonicalOptions) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&canonicalize(value, options))
}

/// Canonical text of a node's raw document.
///
/// Nodes without a raw document (every secondary node) have empty
/// canonical text.
pub fn node_canonical_text(node: &Node, options: &CanonicalOptions) -> Result<String, DiffError> {
    match &node.raw {
        Some(raw) => canonical_text(raw, options).map_err(|err| DiffError::NotSerializable {
            name: node.name.clone(),
            reason: err.to_string(),
        }),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorts_keys_at_every_level() {
        let text = canonical_text(&json!({"b": 1, "a": {"d": 2, "c": 3}}), &CanonicalOptions::default()).unwrap();
        assert_eq!(
            text,
            "{\n  \"a\": {\n    \"c\": 3,\n    \"d\": 2\n  },\n  \"b\": 1\n}"
        );
    }

    #[test]
    fn truncates_at_depth_limit() {
        let options = CanonicalOptions { max_depth: 2 };
        let value = json!({"a": {"b": {"c": 1}}, "list": [1, [2]]});
        assert_eq!(
            canonicalize(&value, &options),
            json!({"a": {"b": DEPTH_PLACEHOLDER}, "list": [DEPTH_PLACEHOLDER, DEPTH_PLACEHOLDER]})
        );
    }

    #[test]
    fn zero_depth_replaces_root() {
        let options = CanonicalOptions { max_depth: 0 };
        assert_eq!(canonicalize(&json!({"a": 1}), &options), json!(DEPTH_PLACEHOLDER));
    }

    #[test]
    fn differences_below_limit_vanish() {
        let options = CanonicalOptions { max_depth: 1 };
        let a = canonical_text(&json!({"deep": {"x": 1}}), &options).unwrap();
        let b = canonical_text(&json!({"deep": {"x": 2}}), &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn secondary_nodes_have_empty_text() {
        let node = Node::secondary("<<Incentive:Bonus[ClientProgram:P]>>").unwrap();
        assert_eq!(node_canonical_text(&node, &CanonicalOptions::default()).unwrap(), "");
    }
}
