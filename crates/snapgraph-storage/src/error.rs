//! Storage error types for snapgraph-storage.
//!
//! [`StorageError`] covers reading snapshot documents from a backend and
//! turning them into nodes: filesystem failures, JSON parse failures,
//! structurally malformed documents and unknown snapshots.

use std::path::PathBuf;

use snapgraph_core::CoreError;
use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document file is not valid JSON.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A document parsed but its top-level structure is not usable.
    #[error("document {document}: {source}")]
    Document {
        document: String,
        #[source]
        source: CoreError,
    },

    /// No snapshot with the given id exists in the store.
    #[error("snapshot not found: {0}")]
    SnapshotNotFound(String),

    /// JSON serialization failed while fingerprinting.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
