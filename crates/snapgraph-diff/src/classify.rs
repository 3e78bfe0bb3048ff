//! Per-name diff status between two closed node sets.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use snapgraph_core::{Node, NodeOrder, NodeSet};

use crate::canonical::{node_canonical_text, CanonicalOptions};
use crate::error::DiffError;

/// Comparison outcome for one name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    /// Present on one side only.
    Distinct,
    Same,
    Changed,
}

/// Classifies one name given its node on each side.
///
/// A node counts as canonical-primary when it is primary and has non-empty
/// canonical text. Sides that disagree on that are `Changed`; otherwise the
/// canonical texts decide. Two secondary nodes are always `Same`.
pub fn classify_pair(
    a: Option<&Node>,
    b: Option<&Node>,
    options: &CanonicalOptions,
) -> Result<DiffStatus, DiffError> {
    let (Some(a), Some(b)) = (a, b) else {
        return Ok(DiffStatus::Distinct);
    };
    let a_text = node_canonical_text(a, options)?;
    let b_text = node_canonical_text(b, options)?;
    let a_primary = a.order == NodeOrder::Primary && !a_text.is_empty();
    let b_primary = b.order == NodeOrder::Primary && !b_text.is_empty();
    if a_primary != b_primary || a_text != b_text {
        Ok(DiffStatus::Changed)
    } else {
        Ok(DiffStatus::Same)
    }
}

/// Name lists and per-side statuses for two snapshots.
///
/// All lists follow sorted name order. `status_a` holds every name of
/// snapshot A (and likewise for B), which is what a renderer needs to tint
/// node borders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    pub added_in_a: Vec<String>,
    pub added_in_b: Vec<String>,
    pub changed: Vec<String>,
    pub status_a: IndexMap<String, DiffStatus>,
    pub status_b: IndexMap<String, DiffStatus>,
}

impl SnapshotDiff {
    /// True when both snapshots hold the same names with the same content.
    pub fn is_identical(&self) -> bool {
        self.added_in_a.is_empty() && self.added_in_b.is_empty() && self.changed.is_empty()
    }
}

/// Compares two closed node sets over the sorted union of their names.
pub fn compare(a: &NodeSet, b: &NodeSet, options: &CanonicalOptions) -> Result<SnapshotDiff, DiffError> {
    let names: BTreeSet<&str> = a.keys().chain(b.keys()).map(String::as_str).collect();
    let mut diff = SnapshotDiff::default();

    for name in names {
        let a_node = a.get(name);
        let b_node = b.get(name);
        let status = classify_pair(a_node, b_node, options)?;
        match status {
            DiffStatus::Distinct if a_node.is_some() => diff.added_in_a.push(name.to_string()),
            DiffStatus::Distinct => diff.added_in_b.push(name.to_string()),
            DiffStatus::Changed => diff.changed.push(name.to_string()),
            DiffStatus::Same => {}
        }
        if a_node.is_some() {
            diff.status_a.insert(name.to_string(), status);
        }
        if b_node.is_some() {
            diff.status_b.insert(name.to_string(), status);
        }
    }

    tracing::info!(
        only_a = diff.added_in_a.len(),
        only_b = diff.added_in_b.len(),
        changed = diff.changed.len(),
        "compared snapshots"
    );
    Ok(diff)
}
