//! Runtime settings read from the environment.
//!
//! - `SNAPGRAPH_ROOT`: directory holding one sub-directory per snapshot
//!   (default: "Snapshots")
//! - `SNAPGRAPH_CONTENT_DIR`: export output directory (default: "Content")
//! - `SNAPGRAPH_MAX_DEPTH`: canonicalization depth limit (default: 10)
//!
//! Command-line flags override these.

use std::path::PathBuf;

pub const ROOT_VAR: &str = "SNAPGRAPH_ROOT";
pub const CONTENT_DIR_VAR: &str = "SNAPGRAPH_CONTENT_DIR";
pub const MAX_DEPTH_VAR: &str = "SNAPGRAPH_MAX_DEPTH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
    pub content_dir: PathBuf,
    pub max_depth: usize,
}

impl Settings {
    pub fn from_env() -> Result<Settings, String> {
        Settings::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = lookup(ROOT_VAR).unwrap_or_else(|| "Snapshots".to_string());
        let content_dir = lookup(CONTENT_DIR_VAR).unwrap_or_else(|| "Content".to_string());
        let max_depth = match lookup(MAX_DEPTH_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| format!("{} must be a non-negative integer, got '{}'", MAX_DEPTH_VAR, raw))?,
            None => 10,
        };
        Ok(Settings {
            root: PathBuf::from(root),
            content_dir: PathBuf::from(content_dir),
            max_depth,
        })
    }
}
