//! CLI command implementations.
//!
//! Available commands:
//! - **rank**: filter firms and print the dashboard with the top ranking
//! - **firm**: detail card for one firm
//! - **build**: merge `source_*.json` inputs into a snapshot
//! - **init**: write a default `.firmrank.toml`

pub mod build;
pub mod firm;
pub mod init;
pub mod rank;

pub use build::run_build_command;
pub use firm::{show_firm, FirmCommandConfig};
pub use init::init_config;
pub use rank::{run_rank, RankConfig};

use crate::cli::{FilterArgs, OutputArgs};
use crate::config::FirmrankConfig;
use crate::io::snapshot::DEFAULT_SNAPSHOT_PATH;
use crate::io::{create_writer, OutputFormat, OutputWriter};
use crate::priority::FilterConfig;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Explicit path, else `[snapshot] path`, else `public/meta.json`.
pub fn resolve_snapshot_path(explicit: Option<PathBuf>, config: &FirmrankConfig) -> PathBuf {
    explicit
        .or_else(|| config.snapshot_path().cloned())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH))
}

/// Explicit format, else `[output] default_format`, else terminal.
pub fn resolve_format(explicit: Option<OutputFormat>, config: &FirmrankConfig) -> OutputFormat {
    explicit
        .or_else(|| config.default_format())
        .unwrap_or_default()
}

/// Layer CLI flags over environment and config file defaults.
pub fn resolve_filters<F>(
    config: &FirmrankConfig,
    env: F,
    filters: &FilterArgs,
    search: Option<&str>,
) -> FilterConfig
where
    F: Fn(&str) -> Option<String>,
{
    let resolved = FilterConfig::resolve(config, env).with_overrides(
        filters.platform.as_deref(),
        filters.rank_mode,
        filters.exclude_enforcement_override(),
        filters.min_n,
    );
    match search {
        Some(text) => resolved.with_search_text(text),
        None => resolved,
    }
}

/// Writer for the requested destination; colors are off for files and `--plain`.
pub fn open_writer(output: &OutputArgs, format: OutputFormat) -> Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match &output.output {
        Some(path) => Box::new(BufWriter::new(create_output_file(path)?)),
        None => Box::new(std::io::stdout()),
    };
    if output.plain || output.output.is_some() {
        colored::control::set_override(false);
    }
    Ok(create_writer(format, sink))
}

fn create_output_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::io::ensure_dir(parent)?;
    }
    File::create(path).with_context(|| format!("Failed to create output file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_and_validate_config, SnapshotConfig};
    use crate::priority::{PlatformFilter, RankMode};
    use indoc::indoc;

    #[test]
    fn snapshot_path_precedence() {
        let mut config = FirmrankConfig::default();
        assert_eq!(
            resolve_snapshot_path(None, &config),
            PathBuf::from("public/meta.json")
        );

        config.snapshot = Some(SnapshotConfig {
            path: Some(PathBuf::from("out/meta.json")),
        });
        assert_eq!(
            resolve_snapshot_path(None, &config),
            PathBuf::from("out/meta.json")
        );
        assert_eq!(
            resolve_snapshot_path(Some(PathBuf::from("x.json")), &config),
            PathBuf::from("x.json")
        );
    }

    #[test]
    fn format_precedence() {
        let config = parse_and_validate_config(indoc! {r#"
            [output]
            default_format = "markdown"
        "#})
        .unwrap();
        assert_eq!(resolve_format(None, &config), OutputFormat::Markdown);
        assert_eq!(
            resolve_format(Some(OutputFormat::Json), &config),
            OutputFormat::Json
        );
        assert_eq!(
            resolve_format(None, &FirmrankConfig::default()),
            OutputFormat::Terminal
        );
    }

    #[test]
    fn cli_flags_beat_env_and_file() {
        let config = parse_and_validate_config(indoc! {r#"
            [filters]
            platform = "Firmy.cz"
            min_n = 7
            rank_mode = "sentiment"
        "#})
        .unwrap();
        let env = |key: &str| (key == "FIRMRANK_MIN_N").then(|| "4".to_string());
        let flags = FilterArgs {
            platform: Some("Google Maps".into()),
            ..FilterArgs::default()
        };

        let resolved = resolve_filters(&config, env, &flags, Some("novák"));
        assert_eq!(resolved.platform, PlatformFilter::Only("Google Maps".into()));
        assert_eq!(resolved.min_n, 4);
        assert_eq!(resolved.rank_mode, RankMode::Sentiment);
        assert_eq!(resolved.search_text, "novák");
    }

    #[test]
    fn include_flag_beats_env_exclusion() {
        let env = |key: &str| (key == "FIRMRANK_EXCLUDE_ENFORCEMENT").then(|| "true".to_string());
        let flags = FilterArgs {
            include_enforcement: true,
            ..FilterArgs::default()
        };

        let resolved = resolve_filters(&FirmrankConfig::default(), env, &flags, None);
        assert!(!resolved.exclude_enforcement);

        let config = FirmrankConfig::default();
        let resolved = resolve_filters(&config, env, &FilterArgs::default(), None);
        assert!(resolved.exclude_enforcement);
    }
}
