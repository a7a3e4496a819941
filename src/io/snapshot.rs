//! Loading and saving the snapshot document.
//!
//! Loading is the only fallible step of a dashboard session: a snapshot that
//! cannot be read or parsed ends the session with an error, never with a
//! partially populated view.

use crate::core::{Error, Result, Snapshot};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Default snapshot location relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "public/meta.json";

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let contents = fs::read_to_string(path).map_err(|source| Error::SnapshotLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = parse_snapshot(&contents, path)?;
    info!(
        path = %path.display(),
        firms = snapshot.merged_dataset.firms.len(),
        themed_firms = snapshot.analysis.themes_by_firm.len(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

/// Parse snapshot text; `path` is only used for error reporting.
pub fn parse_snapshot(contents: &str, path: &Path) -> Result<Snapshot> {
    serde_json::from_str(contents).map_err(|source| Error::SnapshotParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a snapshot as pretty JSON, creating parent directories.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "Wrote snapshot");
    Ok(())
}
