use super::{open_writer, resolve_filters, resolve_format, resolve_snapshot_path};
use crate::cli::{FilterArgs, OutputArgs};
use crate::config;
use crate::observability::{set_phase, Phase};
use crate::session::Session;
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

pub struct RankConfig {
    pub snapshot: Option<PathBuf>,
    pub search: Option<String>,
    pub filters: FilterArgs,
    pub output: OutputArgs,
}

pub fn run_rank(config: RankConfig) -> Result<()> {
    let file_config = config::get_config();
    let path = resolve_snapshot_path(config.snapshot, file_config);

    let session = {
        let _phase = set_phase(Phase::SnapshotLoading);
        Session::load(&path, file_config.enforcement_classifier())?
    };

    let filters = resolve_filters(
        file_config,
        |key| std::env::var(key).ok(),
        &config.filters,
        config.search.as_deref(),
    );

    let report = {
        let _phase = set_phase(Phase::Filtering);
        session.dashboard(&filters)
    };
    debug!(
        firms = report.view.totals.firms,
        reviews = report.view.totals.reviews,
        ranked = report.view.ranking.entries.len(),
        excluded = report.view.filter_stats.total_filtered(),
        "Dashboard prepared"
    );

    let _phase = set_phase(Phase::OutputGeneration);
    let format = resolve_format(config.output.format, file_config);
    let mut writer = open_writer(&config.output, format)?;
    writer.write_dashboard(&report)
}
