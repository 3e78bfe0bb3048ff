//! Snapshot storage for snapgraph.
//!
//! Provides the [`SnapshotStore`] trait that every snapshot source
//! implements, the [`DirectoryStore`] and [`InMemoryStore`] backends, and the
//! loader that turns a stored snapshot into a closed node set.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: SnapshotId, Document, SnapshotSummary
//! - [`traits`]: SnapshotStore trait definition
//! - [`directory`]: DirectoryStore, one sub-directory per snapshot
//! - [`memory`]: InMemoryStore implementation
//! - [`hash`]: blake3 snapshot fingerprints
//! - [`loader`]: extraction plus closure over a store

pub mod directory;
pub mod error;
pub mod hash;
pub mod loader;
pub mod memory;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use directory::DirectoryStore;
pub use error::StorageError;
pub use hash::fingerprint;
pub use loader::{load_snapshot, LoadReport, Snapshot};
pub use memory::InMemoryStore;
pub use traits::SnapshotStore;
pub use types::{Document, SnapshotId, SnapshotSummary};
