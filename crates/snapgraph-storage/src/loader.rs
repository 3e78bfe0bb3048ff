//! Snapshot loading: documents to a closed, ordered node set.
//!
//! A load reads every document from the store up front, extracts primary
//! nodes document by document, then closes the set under reference. Any
//! unreadable or malformed document aborts the whole load; a partial graph
//! is never returned.

use serde::Serialize;

use snapgraph_core::{close, ExtractOptions, Extractor, NodeSet, ReferenceGraph};

use crate::error::StorageError;
use crate::traits::SnapshotStore;
use crate::types::SnapshotId;

/// Counts gathered while loading one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub documents: usize,
    pub primary: usize,
    pub secondary: usize,
    /// Names extracted more than once, in the order the repeats were met.
    pub collisions: Vec<String>,
}

/// A loaded snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub id: SnapshotId,
    /// Closed node set: primary nodes in extraction order, then secondary
    /// nodes in discovery order.
    pub nodes: NodeSet,
    pub report: LoadReport,
}

impl Snapshot {
    /// Builds the reference graph over this snapshot's nodes.
    pub fn graph(&self) -> ReferenceGraph {
        ReferenceGraph::from_nodes(self.nodes.clone())
    }

    /// Primary nodes only, in extraction order.
    pub fn primary_nodes(&self) -> impl Iterator<Item = &snapgraph_core::Node> {
        self.nodes.values().filter(|node| node.is_primary())
    }
}

/// Loads and closes one snapshot from `store`.
pub fn load_snapshot<S>(
    store: &S,
    id: &SnapshotId,
    options: &ExtractOptions,
) -> Result<Snapshot, StorageError>
where
    S: SnapshotStore + ?Sized,
{
    let documents = store.read_documents(id)?;
    let document_count = documents.len();

    let mut extractor = Extractor::new(options.clone());
    for document in documents {
        let added = extractor
            .add_document(document.value)
            .map_err(|source| StorageError::Document {
                document: document.name.clone(),
                source,
            })?;
        tracing::trace!(snapshot = %id, document = %document.name, nodes = added, "extracted");
    }
    let extraction = extractor.finish();
    let primary = extraction.nodes.len();
    let nodes = close(extraction.nodes);

    let report = LoadReport {
        documents: document_count,
        primary,
        secondary: nodes.len() - primary,
        collisions: extraction.collisions,
    };
    tracing::info!(
        snapshot = %id,
        documents = report.documents,
        primary = report.primary,
        secondary = report.secondary,
        collisions = report.collisions.len(),
        "loaded snapshot"
    );
    Ok(Snapshot {
        id: id.clone(),
        nodes,
        report,
    })
}
