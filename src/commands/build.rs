use crate::build::run_build;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run_build_command(data_dir: &Path, out: &Path) -> Result<()> {
    let summary = run_build(data_dir, out)
        .with_context(|| format!("Failed to build snapshot from {}", data_dir.display()))?;
    println!("{}", summary);
    Ok(())
}
