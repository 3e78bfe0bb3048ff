//! Two-column aligned line diff.
//!
//! Both texts are split into lines and diffed with Myers' algorithm. Every
//! opcode run becomes a block of rows holding exactly one left and one
//! right cell; the shorter side of a run is padded with blank cells. Each
//! side of a run is dedented on its own so prettified JSON sits flush-left
//! in its column while keeping relative indentation.

use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices, Algorithm, DiffTag};

/// How a cell should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Equal,
    Removed,
    Added,
    /// Padding so both columns advance together.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub text: String,
}

impl Cell {
    fn new(kind: CellKind, text: String) -> Self {
        Cell { kind, text }
    }

    fn blank() -> Self {
        Cell::new(CellKind::Blank, String::new())
    }
}

/// One display row of the two-column view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub left: Cell,
    pub right: Cell,
}

/// Aligns `left` against `right` line by line.
pub fn align(left: &str, right: &str) -> Vec<AlignedRow> {
    let left_lines: Vec<&str> = left.lines().collect();
    let right_lines: Vec<&str> = right.lines().collect();
    let mut rows = Vec::with_capacity(left_lines.len().max(right_lines.len()));

    for op in capture_diff_slices(Algorithm::Myers, &left_lines, &right_lines) {
        let (tag, old, new) = op.as_tag_tuple();
        let (left_kind, right_kind) = match tag {
            DiffTag::Equal => (CellKind::Equal, CellKind::Equal),
            DiffTag::Delete | DiffTag::Insert | DiffTag::Replace => (CellKind::Removed, CellKind::Added),
        };
        let left_block = dedent_block(&left_lines[old]);
        let right_block = dedent_block(&right_lines[new]);
        push_block(&mut rows, left_block, left_kind, right_block, right_kind);
    }
    rows
}

fn push_block(
    rows: &mut Vec<AlignedRow>,
    left: Vec<String>,
    left_kind: CellKind,
    right: Vec<String>,
    right_kind: CellKind,
) {
    let height = left.len().max(right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    for _ in 0..height {
        rows.push(AlignedRow {
            left: left.next().map_or_else(Cell::blank, |text| Cell::new(left_kind, text)),
            right: right.next().map_or_else(Cell::blank, |text| Cell::new(right_kind, text)),
        });
    }
}

fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Strips the smallest leading-space count among non-blank lines from
/// every line of the block.
pub fn dedent_block(block: &[&str]) -> Vec<String> {
    let indent = block
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_spaces(line))
        .min()
        .unwrap_or(0);
    block
        .iter()
        .map(|line| line[leading_spaces(line).min(indent)..].to_string())
        .collect()
}
