use super::{open_writer, resolve_filters, resolve_format, resolve_snapshot_path};
use crate::cli::{FilterArgs, OutputArgs};
use crate::config;
use crate::observability::{set_phase, Phase};
use crate::session::Session;
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

pub struct FirmCommandConfig {
    pub firm_id: String,
    pub snapshot: Option<PathBuf>,
    pub filters: FilterArgs,
    pub output: OutputArgs,
}

pub fn show_firm(config: FirmCommandConfig) -> Result<()> {
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
        None,
    );

    let detail = {
        let _phase = set_phase(Phase::Filtering);
        session.firm_detail(&config.firm_id, &filters)?
    };
    debug!(
        firm = %detail.firm_id,
        reviews = detail.stats.reviews_n,
        has_themes = detail.themes.is_some(),
        "Firm detail prepared"
    );

    let _phase = set_phase(Phase::OutputGeneration);
    let format = resolve_format(config.output.format, file_config);
    let mut writer = open_writer(&config.output, format)?;
    writer.write_firm_detail(&detail)
}
