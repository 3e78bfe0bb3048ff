//! Export error types covering all file-writing failure modes.

use std::path::PathBuf;

/// Errors that can occur while writing content exports.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The output directory or file could not be prepared.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The requested export kind does not exist.
    #[error("unknown export kind: {0} (expected messages, incentives, custom-fields or page-layouts)")]
    UnknownKind(String),
}
