//! Core error types for snapgraph-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Most oddities
//! in exported snapshots are not errors at all (unknown classes, incidental
//! bracket text, missing per-class fields); only a document whose top-level
//! shape cannot be understood is reported here.

use thiserror::Error;

/// Core errors produced by the snapgraph-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A document is neither a flat item array nor a bucketed object.
    #[error("malformed document: {reason}")]
    MalformedDocument { reason: String },

    /// A string does not follow the `<<Class:Name[ClientProgram:Program]>>` shape.
    #[error("invalid reference key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// A node name was looked up in a graph that does not contain it.
    #[error("node not found: {name}")]
    NodeNotFound { name: String },
}
