//! Snapshot comparison for snapgraph.
//!
//! Two closed node sets are compared name by name. Each name present on
//! both sides is compared through its canonical text (key-sorted,
//! depth-truncated, pretty-printed raw document); changed nodes get a
//! row-aligned two-column line diff.
//!
//! # Modules
//!
//! - [`canonical`]: canonical text for values and nodes
//! - [`classify`]: per-name [`DiffStatus`] and the [`SnapshotDiff`] lists
//! - [`aligned`]: two-column aligned line diff
//! - [`report`]: full [`DiffReport`] and its plain-text summary

pub mod aligned;
pub mod canonical;
pub mod classify;
pub mod error;
pub mod report;

pub use aligned::{align, AlignedRow, Cell, CellKind};
pub use canonical::{canonical_text, node_canonical_text, CanonicalOptions};
pub use classify::{classify_pair, compare, DiffStatus, SnapshotDiff};
pub use error::DiffError;
pub use report::{build_report, render_summary, ChangedNode, DiffReport};
