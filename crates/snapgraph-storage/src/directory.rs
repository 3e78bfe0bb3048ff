//! Filesystem implementation of [`SnapshotStore`].
//!
//! The root directory holds one sub-directory per snapshot. Every regular
//! file ending in `.json` inside a snapshot directory is one document;
//! other files and nested directories are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::traits::SnapshotStore;
use crate::types::{Document, SnapshotId};

/// Snapshot store backed by a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a snapshot's documents.
    pub fn snapshot_dir(&self, id: &SnapshotId) -> PathBuf {
        self.root.join(id.as_str())
    }

    /// Document files of one snapshot, sorted by file name.
    fn document_paths(&self, id: &SnapshotId) -> Result<Vec<PathBuf>, StorageError> {
        let dir = self.snapshot_dir(id);
        if !dir.is_dir() {
            return Err(StorageError::SnapshotNotFound(id.to_string()));
        }
        let mut paths = Vec::new();
        for entry in read_dir(&dir)? {
            let entry = entry.map_err(|source| io_error(&dir, source))?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }
}

impl SnapshotStore for DirectoryStore {
    fn list_snapshots(&self) -> Result<Vec<SnapshotId>, StorageError> {
        let mut ids = Vec::new();
        for entry in read_dir(&self.root)? {
            let entry = entry.map_err(|source| io_error(&self.root, source))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                ids.push(SnapshotId::new(name));
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn read_documents(&self, id: &SnapshotId) -> Result<Vec<Document>, StorageError> {
        let paths = self.document_paths(id)?;
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let text = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
            let value = serde_json::from_str(&text).map_err(|source| StorageError::Parse {
                path: path.clone(),
                source,
            })?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::debug!(snapshot = %id, document = %name, bytes = text.len(), "read document");
            documents.push(Document::new(name, value));
        }
        Ok(documents)
    }
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir, StorageError> {
    fs::read_dir(dir).map_err(|source| io_error(dir, source))
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, DirectoryStore) {
        let root = tempfile::tempdir().unwrap();
        let snap = root.path().join("snap");
        fs::create_dir(&snap).unwrap();
        for (name, body) in files {
            fs::write(snap.join(name), body).unwrap();
        }
        let store = DirectoryStore::new(root.path());
        (root, store)
    }

    #[test]
    fn reads_only_json_files_in_name_order() {
        let (_root, store) = store_with(&[
            ("b.json", "[]"),
            ("notes.txt", "ignored"),
            ("a.json", "[{\"x\": 1}]"),
        ]);
        let docs = store.read_documents(&"snap".into()).unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
        assert_eq!(docs[0].value[0]["x"], 1);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let (_root, store) = store_with(&[("bad.json", "{not json")]);
        let err = store.read_documents(&"snap".into()).unwrap_err();
        assert!(matches!(err, StorageError::Parse { ref path, .. } if path.ends_with("bad.json")));
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn unknown_snapshot_is_not_found() {
        let (_root, store) = store_with(&[]);
        assert!(matches!(
            store.read_documents(&"other".into()),
            Err(StorageError::SnapshotNotFound(id)) if id == "other"
        ));
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let store = DirectoryStore::new("/definitely/not/here");
        assert!(matches!(store.list_snapshots(), Err(StorageError::Io { .. })));
    }
}
