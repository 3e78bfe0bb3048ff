//! Closure: synthesize secondary nodes for dangling references.
//!
//! After closure every connection of every node names a node in the set.
//! Secondary nodes are appended after all primary nodes, in the order their
//! first referencing connection is met (primary nodes in order, each node's
//! connections in order).

use std::collections::HashSet;

use crate::key::is_key_shaped;
use crate::node::{Node, NodeSet};

/// Closes a set of primary nodes under reference.
///
/// Targets that are not key-shaped or whose class is unrecognized are left
/// dangling; extraction already filters those out of `connections`, so in
/// practice every target resolves.
pub fn close(primary: NodeSet) -> NodeSet {
    let mut seen: HashSet<String> = primary.keys().cloned().collect();
    let mut stubs = Vec::new();

    for node in primary.values() {
        for connection in &node.connections {
            let reference = connection.trim();
            if !seen.insert(reference.to_string()) {
                continue;
            }
            if !is_key_shaped(reference) {
                tracing::trace!(reference, "ignoring reference that is not key-shaped");
                continue;
            }
            match Node::secondary(reference) {
                Some(stub) => stubs.push(stub),
                None => tracing::trace!(reference, "ignoring reference with unrecognized class"),
            }
        }
    }

    let primary_count = primary.len();
    let mut closed = primary;
    closed.reserve(stubs.len());
    for stub in stubs {
        closed.insert(stub.name.clone(), stub);
    }
    tracing::debug!(
        primary = primary_count,
        secondary = closed.len() - primary_count,
        "closed node set"
    );
    closed
}

/// Names referenced by some node but absent from the set.
///
/// Empty for any set produced by [`close`] from extracted nodes.
pub fn dangling_references(nodes: &NodeSet) -> Vec<(String, String)> {
    nodes
        .values()
        .flat_map(|node| {
            node.connections
                .iter()
                .filter(|target| !nodes.contains_key(target.as_str()))
                .map(|target| (node.name.clone(), target.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::EntityClass;
    use crate::extract::{extract_nodes, ExtractOptions};
    use crate::node::NodeOrder;
    use serde_json::json;

    fn primary_set(items: serde_json::Value) -> NodeSet {
        extract_nodes(vec![items], &ExtractOptions::default())
            .unwrap()
            .nodes
    }

    #[test]
    fn synthesizes_missing_targets_once() {
        let nodes = primary_set(json!([
            {"__reference_comparison_key": "<<Rule:A[ClientProgram:P]>>", "x": "<<Incentive:I[ClientProgram:P]>>"},
            {"__reference_comparison_key": "<<Rule:B[ClientProgram:P]>>", "y": ["<<Incentive:I[ClientProgram:P]>>", "<<ClientProgram:P>>"]}
        ]));
        let closed = close(nodes);
        let names: Vec<&str> = closed.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec![
                "<<Rule:A[ClientProgram:P]>>",
                "<<Rule:B[ClientProgram:P]>>",
                "<<Incentive:I[ClientProgram:P]>>",
                "<<ClientProgram:P>>",
            ]
        );
        let program = &closed["<<ClientProgram:P>>"];
        assert_eq!(program.order, NodeOrder::Secondary);
        assert_eq!(program.class, EntityClass::ClientProgram);
        assert_eq!(program.program, "P");
        assert!(dangling_references(&closed).is_empty());
    }

    #[test]
    fn defined_targets_are_not_duplicated() {
        let nodes = primary_set(json!([
            {"__reference_comparison_key": "<<Rule:A[ClientProgram:P]>>", "x": "<<Rule:B[ClientProgram:P]>>"},
            {"__reference_comparison_key": "<<Rule:B[ClientProgram:P]>>", "x": "<<Rule:A[ClientProgram:P]>>"}
        ]));
        let closed = close(nodes);
        assert_eq!(closed.len(), 2);
        assert!(closed.values().all(Node::is_primary));
    }

    #[test]
    fn hand_built_malformed_targets_stay_dangling() {
        let mut nodes = primary_set(json!([
            {"__reference_comparison_key": "<<Rule:A[ClientProgram:P]>>"}
        ]));
        nodes
            .get_mut("<<Rule:A[ClientProgram:P]>>")
            .unwrap()
            .connections = vec!["free text".into(), "<<Widget:W[ClientProgram:P]>>".into()];
        let closed = close(nodes);
        assert_eq!(closed.len(), 1);
        assert_eq!(dangling_references(&closed).len(), 2);
    }
}
