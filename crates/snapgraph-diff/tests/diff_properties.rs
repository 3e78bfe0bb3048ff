//! Property tests for canonicalization, alignment and classification.

use std::collections::BTreeSet;

use proptest::prelude::*;
use serde_json::{Map, Value};

use snapgraph_core::{close, extract_nodes, ExtractOptions, NodeSet};
use snapgraph_diff::{align, canonical_text, compare, CanonicalOptions, CellKind};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::String),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(5, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Rebuilds every object with its keys inserted in reverse order.
fn reversed(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, item) in map.iter().rev() {
                out.insert(key.clone(), reversed(item));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(reversed).collect()),
        other => other.clone(),
    }
}

fn text_lines() -> impl Strategy<Value = String> {
    prop::collection::vec("( {0,4})[a-c]{0,3}", 0..12).prop_map(|lines| lines.join("\n"))
}

fn snapshot(names: &BTreeSet<u8>, version: u8) -> NodeSet {
    let items: Vec<Value> = names
        .iter()
        .map(|n| {
            serde_json::json!({
                "__reference_comparison_key": format!("<<Rule:R{}[ClientProgram:P]>>", n),
                "version": version
            })
        })
        .collect();
    close(
        extract_nodes(vec![Value::Array(items)], &ExtractOptions::default())
            .unwrap()
            .nodes,
    )
}

proptest! {
    #[test]
    fn canonical_text_ignores_key_order(value in json_value(), depth in 0usize..8) {
        let options = CanonicalOptions { max_depth: depth };
        let first = canonical_text(&value, &options).unwrap();
        let again = canonical_text(&value, &options).unwrap();
        let flipped = canonical_text(&reversed(&value), &options).unwrap();
        prop_assert_eq!(&first, &again);
        prop_assert_eq!(&first, &flipped);
    }

    #[test]
    fn aligned_rows_cover_both_texts(left in text_lines(), right in text_lines()) {
        let rows = align(&left, &right);
        let left_cells = rows.iter().filter(|r| r.left.kind != CellKind::Blank).count();
        let right_cells = rows.iter().filter(|r| r.right.kind != CellKind::Blank).count();
        prop_assert_eq!(left_cells, left.lines().count());
        prop_assert_eq!(right_cells, right.lines().count());
        prop_assert!(rows.len() >= left_cells.max(right_cells));
        for row in &rows {
            prop_assert!(!(row.left.kind == CellKind::Blank && row.right.kind == CellKind::Blank));
            if row.left.kind == CellKind::Equal {
                prop_assert_eq!(row.right.kind, CellKind::Equal);
            }
        }
    }

    #[test]
    fn distinct_lists_are_directional(
        a_names in prop::collection::btree_set(0u8..20, 0..10),
        b_names in prop::collection::btree_set(0u8..20, 0..10),
    ) {
        let a = snapshot(&a_names, 1);
        let b = snapshot(&b_names, 1);
        let diff = compare(&a, &b, &CanonicalOptions::default()).unwrap();

        let only_a: Vec<String> = a.keys().filter(|k| !b.contains_key(*k)).cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let only_b: Vec<String> = b.keys().filter(|k| !a.contains_key(*k)).cloned().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(&diff.added_in_a, &only_a);
        prop_assert_eq!(&diff.added_in_b, &only_b);
        prop_assert!(diff.changed.is_empty());
        prop_assert_eq!(diff.status_a.len(), a.len());
        prop_assert_eq!(diff.status_b.len(), b.len());
    }
}
