use crate::config::CONFIG_FILE_NAME;
use crate::core::Error;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# Firmrank Configuration

[filters]
# Platform name as it appears in the snapshot, or "ALL"
platform = "ALL"
# "rating" or "sentiment"
rank_mode = "rating"
exclude_enforcement = false
# Minimum ratings (or scored reviews) for a firm to be ranked
min_n = 3

[enforcement]
# Uncomment to replace the built-in keyword stems
# keywords = ["dluh", "vymáh", "exekuc"]
extra_keywords = []

[output]
default_format = "terminal"

[snapshot]
path = "public/meta.json"
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_at(&PathBuf::from(CONFIG_FILE_NAME), force)
}

pub fn init_config_at(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        return Err(Error::config(format!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        ))
        .into());
    }

    io::write_file(config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", config_path.display());

    Ok(())
}
