//! Derived view types produced by the view pipeline.

use super::filter_config::{FilterConfig, RankMode};
use super::filter_predicates::FilterStatistics;
use crate::aggregation::FirmStats;
use serde::{Deserialize, Serialize};

/// One firm in the filtered firm list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmRow {
    pub firm_id: String,
    pub firm_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub cities: Vec<String>,
    pub platforms: Vec<String>,
    pub stats: FirmStats,
}

/// One entry of a ranking list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFirm {
    /// 1-based position
    pub rank: usize,
    pub firm_id: String,
    pub firm_name: String,
    /// Average rating or average sentiment, depending on the mode
    pub value: f64,
    /// `ratings_n` or `scored_n`, depending on the mode
    pub sample_n: usize,
    pub reviews_n: usize,
}

/// Result of ranking firms under one mode.
///
/// An empty entry list is a valid outcome: no firm met `min_n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub mode: RankMode,
    pub min_n: usize,
    pub limit: usize,
    /// Number of firms eligible before truncation
    pub eligible_total: usize,
    pub entries: Vec<RankedFirm>,
}

impl RankingOutcome {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// User-facing note when nothing could be ranked.
    pub fn note(&self) -> Option<String> {
        if !self.is_empty() {
            return None;
        }
        let sample = match self.mode {
            RankMode::Rating => "ratings",
            RankMode::Sentiment => "sentiment-scored reviews",
        };
        Some(format!(
            "No firm has at least {} {} under the current filters (minN = {}).",
            self.min_n, sample, self.min_n
        ))
    }
}

/// Dataset-wide counters under the active filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetTotals {
    /// Firms matching the search text
    pub firms: usize,
    /// Reviews surviving the review-level filters
    pub reviews: usize,
    pub reviews_with_rating: usize,
    pub reviews_with_text: usize,
}

/// Everything the presentation layer needs for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub config: FilterConfig,
    pub totals: DatasetTotals,
    /// Ordered by filtered review count desc, then name asc
    pub firms: Vec<FirmRow>,
    pub ranking: RankingOutcome,
    pub filter_stats: FilterStatistics,
}
