//! Filtering and ranking of firms for the dashboard.

pub mod filter_config;
pub mod filter_predicates;
pub mod view;
pub mod view_pipeline;

pub use filter_config::{
    FilterConfig, PlatformFilter, RankMode, ALL_PLATFORMS, DEFAULT_MIN_N, RANKING_LIMIT,
};
pub use filter_predicates::FilterStatistics;
pub use view::{DashboardView, DatasetTotals, FirmRow, RankedFirm, RankingOutcome};
pub use view_pipeline::{prepare_view, rank_firms, search_firms, sort_firm_rows};
