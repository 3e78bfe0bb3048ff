//! Core model for configuration snapshot graphs.
//!
//! A snapshot is a folder of exported JSON documents. Items inside those
//! documents name themselves and each other with bracketed reference keys
//! (`<<Class:Name[ClientProgram:Program]>>`). This crate turns the items into
//! typed [`Node`]s, closes the set under reference, and exposes the result as
//! a [`ReferenceGraph`].
//!
//! # Pipeline
//!
//! ```text
//! documents ──> Extractor ──> primary NodeSet ──> close() ──> closed NodeSet ──> ReferenceGraph
//! ```
//!
//! # Modules
//!
//! - [`key`]: reference key grammar and scanning
//! - [`class`]: the closed [`EntityClass`] enumeration
//! - [`node`]: [`Node`], [`NodeContent`], [`NodeOrder`]
//! - [`extract`]: document flattening and per-class content extraction
//! - [`closure`]: secondary node synthesis
//! - [`graph`]: petgraph-backed view, filters and renderer export
//! - [`detail`]: per-node detail panel

pub mod class;
pub mod closure;
pub mod detail;
pub mod error;
pub mod extract;
pub mod graph;
pub mod id;
pub mod key;
pub mod node;

// Re-export commonly used types
pub use class::{classify, EntityClass};
pub use closure::close;
pub use detail::NodeDetail;
pub use error::CoreError;
pub use extract::{extract_nodes, ExtractOptions, Extraction, Extractor};
pub use graph::{GraphExport, NodeFilter, ReferenceGraph};
pub use id::NodeId;
pub use key::ReferenceKey;
pub use node::{Node, NodeContent, NodeOrder, NodeSet};
