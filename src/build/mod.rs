//! Snapshot producer: merges `source_*.json` collections into `meta.json`.
//!
//! This is the offline companion of the dashboard core. The core only reads
//! the document written here and never calls back into this module.

pub mod analysis;
pub mod keys;
pub mod merge;
pub mod platform;
pub mod sources;
pub mod taxonomy;

pub use analysis::build_analysis;
pub use keys::{completeness_score, firm_key, office_key, review_dedupe_key, slugify};
pub use merge::{dataset_quality, merge_datasets, REVIEWS_PER_FIRM_MIN};
pub use platform::{normalize_platform, PLATFORMS_PRIORITY};
pub use sources::{discover_sources, load_sources, parse_source, repair_json, LoadedSources};
pub use taxonomy::{categorize, excerpt, TAXONOMY};

use crate::core::{MergedDataset, Result, Snapshot};
use crate::io::write_snapshot;
use crate::observability::{set_phase, Phase};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_DATA_DIR: &str = "data";

pub const TARGET_FIRMS_MIN: usize = 20;
pub const REVIEWS_PER_FIRM_TARGET: usize = 20;
pub const REVIEWS_PER_FIRM_MAX: usize = 60;

/// Outcome of one build, printed by the command handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub out: PathBuf,
    pub firms: usize,
    pub reviews: usize,
    pub skipped_inputs: usize,
}

impl std::fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} (firms={}, reviews={}, skipped_inputs={})",
            self.out.display(),
            self.firms,
            self.reviews,
            self.skipped_inputs
        )
    }
}

/// Dataset metadata block with a creation timestamp.
pub fn build_metadata(created_at: &str) -> Value {
    json!({
        "country": "Czech Republic",
        "created_at": created_at,
        "target_firms_min": TARGET_FIRMS_MIN,
        "reviews_per_firm_min": REVIEWS_PER_FIRM_MIN,
        "reviews_per_firm_target": REVIEWS_PER_FIRM_TARGET,
        "reviews_per_firm_max": REVIEWS_PER_FIRM_MAX,
        "platforms_priority": PLATFORMS_PRIORITY,
        "notes": "Merged from local source_*.json files. Public web sources only.",
    })
}

/// Assemble a snapshot from already loaded sources.
pub fn build_snapshot(loaded: &LoadedSources, created_at: &str) -> Snapshot {
    let (firms, quality) = {
        let _phase = set_phase(Phase::Merging);
        merge_datasets(&loaded.datasets)
    };
    let analysis = {
        let _phase = set_phase(Phase::Analysis);
        build_analysis(&firms, &quality, &loaded.skipped)
    };

    Snapshot {
        merged_dataset: MergedDataset {
            metadata: Some(build_metadata(created_at)),
            firms,
            dataset_quality: Some(quality),
        },
        analysis,
    }
}

/// Discover, merge, analyse and write the snapshot.
pub fn run_build(data_dir: &Path, out: &Path) -> Result<BuildSummary> {
    let loaded = {
        let _phase = set_phase(Phase::SourceDiscovery);
        let paths = discover_sources(data_dir)?;
        info!(inputs = paths.len(), dir = %data_dir.display(), "Discovered sources");
        load_sources(&paths)?
    };

    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let snapshot = build_snapshot(&loaded, &created_at);

    {
        let _phase = set_phase(Phase::OutputGeneration);
        write_snapshot(out, &snapshot)?;
    }

    let summary = BuildSummary {
        out: out.to_path_buf(),
        firms: snapshot.merged_dataset.firms.len(),
        reviews: snapshot
            .merged_dataset
            .dataset_quality
            .as_ref()
            .map_or(0, |q| q.reviews_collected),
        skipped_inputs: loaded.skipped.len(),
    };
    info!(
        firms = summary.firms,
        reviews = summary.reviews,
        skipped = summary.skipped_inputs,
        "Snapshot built"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::load_snapshot;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn metadata_carries_targets() {
        let meta = build_metadata("2024-05-01T00:00:00.000Z");
        assert_eq!(meta["created_at"], "2024-05-01T00:00:00.000Z");
        assert_eq!(meta["reviews_per_firm_min"], 10);
        assert_eq!(meta["platforms_priority"][1], "Firmy.cz");
    }

    #[test]
    fn run_build_writes_loadable_snapshot() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(
            data.join("source_google.json"),
            r#"{"firms": [{"firm_id": "alfa", "firm_name": "Alfa", "offices": [
                {"city": "Praha", "reviews": [
                    {"platform": "google", "rating_value": 5, "rating_scale": 5}
                ]}
            ]}]}"#,
        )
        .unwrap();
        fs::write(data.join("source_broken.json"), "{").unwrap();

        let out = temp.path().join("public").join("meta.json");
        let summary = run_build(&data, &out).unwrap();
        assert_eq!(summary.firms, 1);
        assert_eq!(summary.reviews, 1);
        assert_eq!(summary.skipped_inputs, 1);

        let snapshot = load_snapshot(&out).unwrap();
        assert_eq!(snapshot.merged_dataset.firms[0].firm_id, "alfa");
        assert!(snapshot.analysis.limitations[0].starts_with("Skipped invalid JSON input: source_broken.json"));
    }
}
