pub mod output;
pub mod snapshot;

pub use output::{create_writer, OutputFormat, OutputWriter};
pub use snapshot::{load_snapshot, parse_snapshot, write_snapshot};

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Write a file, creating missing parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
