use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::classify::EnforcementClassifier;
use crate::io::output::OutputFormat;
use crate::priority::RankMode;

/// Root configuration structure for firmrank
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FirmrankConfig {
    /// Default filter values for the dashboard view
    #[serde(default)]
    pub filters: Option<FiltersConfig>,

    /// Enforcement keyword configuration
    #[serde(default)]
    pub enforcement: Option<EnforcementConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Snapshot location
    #[serde(default)]
    pub snapshot: Option<SnapshotConfig>,
}

impl FirmrankConfig {
    /// Classifier built from the `[enforcement]` section, or the defaults.
    pub fn enforcement_classifier(&self) -> EnforcementClassifier {
        self.enforcement
            .as_ref()
            .map(EnforcementConfig::classifier)
            .unwrap_or_default()
    }

    pub fn default_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.default_format)
    }

    pub fn snapshot_path(&self) -> Option<&PathBuf> {
        self.snapshot.as_ref().and_then(|s| s.path.as_ref())
    }
}

/// `[filters]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FiltersConfig {
    /// Platform name, or "ALL"
    #[serde(default)]
    pub platform: Option<String>,

    #[serde(default)]
    pub rank_mode: Option<RankMode>,

    #[serde(default)]
    pub exclude_enforcement: Option<bool>,

    /// Minimum sample size for a firm to be ranked
    #[serde(default)]
    pub min_n: Option<usize>,
}

/// `[enforcement]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EnforcementConfig {
    /// Replaces the built-in keyword set when present
    #[serde(default)]
    pub keywords: Option<Vec<String>>,

    /// Appended to the active keyword set
    #[serde(default)]
    pub extra_keywords: Vec<String>,
}

impl EnforcementConfig {
    pub fn classifier(&self) -> EnforcementClassifier {
        let base = match &self.keywords {
            Some(keywords) => EnforcementClassifier::new(keywords),
            None => EnforcementClassifier::default(),
        };
        base.with_extra_keywords(&self.extra_keywords)
    }
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}

/// `[snapshot]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SnapshotConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}
