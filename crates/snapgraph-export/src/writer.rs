//! CSV file output for export kinds.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use snapgraph_core::Node;

use crate::error::ExportError;
use crate::kind::ExportKind;

/// Where an export landed and how many rows it holds (header excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub kind: ExportKind,
    pub path: PathBuf,
    pub rows: usize,
}

/// `<dir>/<snapshot>_<suffix>.csv`
pub fn export_path(dir: &Path, snapshot: &str, kind: ExportKind) -> PathBuf {
    dir.join(format!("{}_{}.csv", snapshot, kind.suffix()))
}

/// Writes the header and one record per matching node, in iteration order.
/// Returns the number of records written.
pub fn write_csv<'a, W, I>(writer: W, kind: ExportKind, nodes: I) -> Result<usize, ExportError>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Node>,
{
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(kind.headers())?;
    let mut rows = 0;
    for record in nodes.into_iter().filter_map(|node| kind.record(node)) {
        out.write_record(&record)?;
        rows += 1;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(rows)
}

/// Writes one export file, replacing any file already at its path.
pub fn write_export_file<'a, I>(
    dir: &Path,
    snapshot: &str,
    kind: ExportKind,
    nodes: I,
) -> Result<ExportOutcome, ExportError>
where
    I: IntoIterator<Item = &'a Node>,
{
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = export_path(dir, snapshot, kind);
    if path.exists() {
        fs::remove_file(&path).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "removed previous export");
    }
    let file = fs::File::create(&path).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    let rows = write_csv(io::BufWriter::new(file), kind, nodes)?;
    tracing::info!(kind = %kind, path = %path.display(), rows, "wrote export");
    Ok(ExportOutcome { kind, path, rows })
}
