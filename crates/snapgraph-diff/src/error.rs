//! Error types for snapshot comparison.

use thiserror::Error;

/// Errors produced while comparing snapshots.
#[derive(Debug, Error)]
pub enum DiffError {
    /// A node's raw document could not be rendered as canonical text.
    #[error("cannot serialize node {name}: {reason}")]
    NotSerializable { name: String, reason: String },
}
