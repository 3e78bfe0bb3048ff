//! Full diff report and its plain-text summary.

use std::fmt::Write;

use serde::Serialize;

use snapgraph_core::NodeSet;

use crate::aligned::{align, AlignedRow, Cell, CellKind};
use crate::canonical::{node_canonical_text, CanonicalOptions};
use crate::classify::{compare, SnapshotDiff};
use crate::error::DiffError;

/// Canonical texts and aligned rows for one changed node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangedNode {
    pub name: String,
    pub text_a: String,
    pub text_b: String,
    pub rows: Vec<AlignedRow>,
}

/// Everything a compare view shows for two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffReport {
    /// Column label for snapshot A, usually its id.
    pub label_a: String,
    pub label_b: String,
    pub diff: SnapshotDiff,
    /// One entry per name in `diff.changed`, same order.
    pub changes: Vec<ChangedNode>,
}

/// Compares two labelled node sets and renders every changed node.
pub fn build_report(
    label_a: &str,
    a: &NodeSet,
    label_b: &str,
    b: &NodeSet,
    options: &CanonicalOptions,
) -> Result<DiffReport, DiffError> {
    let diff = compare(a, b, options)?;
    let mut changes = Vec::with_capacity(diff.changed.len());
    for name in &diff.changed {
        let text_a = match a.get(name) {
            Some(node) => node_canonical_text(node, options)?,
            None => String::new(),
        };
        let text_b = match b.get(name) {
            Some(node) => node_canonical_text(node, options)?,
            None => String::new(),
        };
        let rows = align(&text_a, &text_b);
        tracing::debug!(name = %name, rows = rows.len(), "aligned changed node");
        changes.push(ChangedNode {
            name: name.clone(),
            text_a,
            text_b,
            rows,
        });
    }
    Ok(DiffReport {
        label_a: label_a.to_string(),
        label_b: label_b.to_string(),
        diff,
        changes,
    })
}

fn marker(cell: &Cell) -> char {
    match cell.kind {
        CellKind::Removed => '-',
        CellKind::Added => '+',
        CellKind::Equal | CellKind::Blank => ' ',
    }
}

fn write_names(out: &mut String, names: &[String]) {
    if names.is_empty() {
        out.push_str("  None\n");
    }
    for name in names {
        let _ = writeln!(out, "  {}", name);
    }
}

/// Renders the report as plain text.
///
/// Layout: a "Changed:" section with a two-column block per changed node,
/// then "Unique to <A> (Snapshot A):" and "Unique to <B> (Snapshot B):"
/// lists. Empty sections print `None`.
pub fn render_summary(report: &DiffReport) -> String {
    let mut out = String::new();

    out.push_str("Changed:\n");
    if report.changes.is_empty() {
        out.push_str("  None\n");
    }
    for change in &report.changes {
        let width = change
            .rows
            .iter()
            .map(|row| row.left.text.chars().count())
            .chain(std::iter::once(report.label_a.chars().count()))
            .max()
            .unwrap_or(0);
        let _ = writeln!(out, "\n  {}", change.name);
        let _ = writeln!(out, "    {:<width$} | {}", report.label_a, report.label_b);
        for row in &change.rows {
            let _ = writeln!(
                out,
                "  {} {:<width$} |{} {}",
                marker(&row.left),
                row.left.text,
                marker(&row.right),
                row.right.text
            );
        }
    }

    let _ = writeln!(out, "\nUnique to {} (Snapshot A):", report.label_a);
    write_names(&mut out, &report.diff.added_in_a);
    let _ = writeln!(out, "\nUnique to {} (Snapshot B):", report.label_b);
    write_names(&mut out, &report.diff.added_in_b);
    out
}
