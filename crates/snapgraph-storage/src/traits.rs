//! The [`SnapshotStore`] trait defining where snapshots come from.
//!
//! Backends only list snapshot ids and hand out parsed documents; node
//! extraction and closure happen in [`crate::loader`], so every backend
//! yields identical node sets for identical documents.

use crate::error::StorageError;
use crate::hash::fingerprint;
use crate::types::{Document, SnapshotId, SnapshotSummary};

/// The read contract for snapshot sources.
///
/// The trait is synchronous: a load reads every document up front and
/// holds no state between calls.
pub trait SnapshotStore {
    // -------------------------------------------------------------------
    // Required operations
    // -------------------------------------------------------------------

    /// Lists all stored snapshots in ascending id order.
    fn list_snapshots(&self) -> Result<Vec<SnapshotId>, StorageError>;

    /// Reads every document of a snapshot, in a deterministic order.
    ///
    /// Fails with [`StorageError::SnapshotNotFound`] for unknown ids and
    /// with `Io`/`Parse` if any single document is unreadable.
    fn read_documents(&self, id: &SnapshotId) -> Result<Vec<Document>, StorageError>;

    // -------------------------------------------------------------------
    // Provided operations
    // -------------------------------------------------------------------

    /// Document count and fingerprint for one snapshot.
    fn summarize(&self, id: &SnapshotId) -> Result<SnapshotSummary, StorageError> {
        let documents = self.read_documents(id)?;
        Ok(SnapshotSummary {
            id: id.clone(),
            documents: documents.len(),
            fingerprint: fingerprint(&documents)?.to_hex().to_string(),
        })
    }

    /// Summaries of every stored snapshot.
    fn summaries(&self) -> Result<Vec<SnapshotSummary>, StorageError> {
        self.list_snapshots()?
            .iter()
            .map(|id| self.summarize(id))
            .collect()
    }
}
