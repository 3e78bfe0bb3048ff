//! Per-class content exports for snapgraph.
//!
//! Writes the human-authored text of a snapshot's primary nodes
//! (messages, incentives, custom fields, page layouts) to CSV files so it
//! can be reviewed outside the platform.

pub mod error;
pub mod kind;
pub mod writer;

pub use error::ExportError;
pub use kind::ExportKind;
pub use writer::{export_path, write_csv, write_export_file, ExportOutcome};
