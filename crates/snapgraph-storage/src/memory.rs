//! In-memory implementation of [`SnapshotStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and for callers that
//! already hold parsed documents. Documents keep insertion order.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::StorageError;
use crate::traits::SnapshotStore;
use crate::types::{Document, SnapshotId};

/// Snapshot store holding parsed documents in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    snapshots: BTreeMap<SnapshotId, Vec<Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty snapshot if it does not exist yet.
    pub fn create_snapshot(&mut self, id: impl Into<SnapshotId>) {
        self.snapshots.entry(id.into()).or_default();
    }

    /// Appends a document to a snapshot, creating the snapshot on demand.
    pub fn add_document(&mut self, id: impl Into<SnapshotId>, name: impl Into<String>, value: Value) {
        self.snapshots
            .entry(id.into())
            .or_default()
            .push(Document::new(name, value));
    }

    /// Removes a snapshot and returns its documents.
    pub fn remove_snapshot(&mut self, id: &SnapshotId) -> Result<Vec<Document>, StorageError> {
        self.snapshots
            .remove(id)
            .ok_or_else(|| StorageError::SnapshotNotFound(id.to_string()))
    }
}

impl SnapshotStore for InMemoryStore {
    fn list_snapshots(&self) -> Result<Vec<SnapshotId>, StorageError> {
        Ok(self.snapshots.keys().cloned().collect())
    }

    fn read_documents(&self, id: &SnapshotId) -> Result<Vec<Document>, StorageError> {
        self.snapshots
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::SnapshotNotFound(id.to_string()))
    }
}
