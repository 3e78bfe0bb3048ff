//! Storage-layer types for snapshot identity and contents.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of a stored snapshot.
///
/// For the directory backend this is the snapshot's sub-directory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotId(pub String);

impl SnapshotId {
    pub fn new(id: impl Into<String>) -> Self {
        SnapshotId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SnapshotId {
    fn from(id: &str) -> Self {
        SnapshotId(id.to_string())
    }
}

impl From<String> for SnapshotId {
    fn from(id: String) -> Self {
        SnapshotId(id)
    }
}

/// One parsed document of a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// File name (directory backend) or caller-chosen label.
    pub name: String,
    pub value: Value,
}

impl Document {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Document {
            name: name.into(),
            value,
        }
    }
}

/// Summary of a stored snapshot (for listing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub id: SnapshotId,
    /// Number of documents in the snapshot.
    pub documents: usize,
    /// Hex blake3 fingerprint over document names and contents.
    pub fingerprint: String,
}
