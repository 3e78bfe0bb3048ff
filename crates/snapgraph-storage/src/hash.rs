//! Deterministic snapshot fingerprints using blake3.
//!
//! A fingerprint covers every document's name and serialized value, in
//! store order. Two snapshots with byte-identical documents share a
//! fingerprint; any edit, rename or reordering changes it. Fingerprints are
//! derived state and never written anywhere.

use crate::error::StorageError;
use crate::types::Document;

/// Computes the blake3 fingerprint of a document sequence.
pub fn fingerprint(documents: &[Document]) -> Result<blake3::Hash, StorageError> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(documents.len() as u64).to_le_bytes());
    for document in documents {
        // Length prefixes keep name/value boundaries unambiguous.
        let bytes = serde_json::to_vec(&document.value)?;
        hasher.update(&(document.name.len() as u64).to_le_bytes());
        hasher.update(document.name.as_bytes());
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(&bytes);
    }
    Ok(hasher.finalize())
}
