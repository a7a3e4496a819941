//! Discovery and lenient parsing of `source_*.json` inputs.

use crate::core::{Error, Result, Review};
use crate::observability::set_current_file;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const SOURCE_PATTERN: &str = "source_*.json";

/// One collected source file. Only `firms` is consumed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SourceDataset {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub firms: Vec<SourceFirm>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SourceFirm {
    #[serde(default)]
    pub firm_id: Option<String>,
    #[serde(default)]
    pub firm_name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub offices: Vec<SourceOffice>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SourceOffice {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub platform_profiles: Vec<SourceProfile>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SourceProfile {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parsed inputs plus a note for every input that was skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    pub datasets: Vec<(String, SourceDataset)>,
    /// `"<file name>: <error>"` per skipped input
    pub skipped: Vec<String>,
}

/// All `source_*.json` files in `dir`, sorted by path.
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(SOURCE_PATTERN);
    let mut paths: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Unreadable source path: {}", e);
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(Error::NoSources {
            dir: dir.to_path_buf(),
        });
    }
    Ok(paths)
}

/// Add the opening brace that collected files sometimes lose.
pub fn repair_json(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with("\"metadata\"") || trimmed.starts_with("'metadata'") {
        format!("{{{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

pub fn parse_source(text: &str) -> std::result::Result<SourceDataset, serde_json::Error> {
    serde_json::from_str(&repair_json(text))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load every input; parse failures are collected, not propagated.
pub fn load_sources(paths: &[PathBuf]) -> Result<LoadedSources> {
    let mut loaded = LoadedSources::default();

    for path in paths {
        let _file = set_current_file(path);
        let name = file_name(path);
        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);

        match parse_source(&text) {
            Ok(dataset) => {
                debug!(source = %name, firms = dataset.firms.len(), "Parsed source");
                loaded.datasets.push((name, dataset));
            }
            Err(e) => {
                warn!(source = %name, error = %e, "Skipping invalid source");
                loaded.skipped.push(format!("{}: {}", name, e));
            }
        }
    }

    if loaded.datasets.is_empty() {
        return Err(Error::AllSourcesInvalid {
            count: loaded.skipped.len(),
        });
    }
    Ok(loaded)
}
