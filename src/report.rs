//! Report structures handed to the output writers.

use crate::aggregation::FirmStats;
use crate::core::{OverallThemes, ThemeSummary};
use crate::priority::{DashboardView, FilterConfig};
use serde::{Deserialize, Serialize};

/// Dashboard for one filter state plus the overall themes side-channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub view: DashboardView,
    pub overall_themes: OverallThemes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub limitations: Vec<String>,
}

/// Detail card for a single firm.
///
/// Search text does not apply here: the firm is addressed by id. Platform and
/// enforcement filters still apply to its stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmDetail {
    pub firm_id: String,
    pub firm_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub cities: Vec<String>,
    pub platforms: Vec<String>,
    pub offices_n: usize,
    /// Reviews before any filtering
    pub reviews_total: usize,
    pub stats: FirmStats,
    pub config: FilterConfig,
    /// `None` when the build step produced no summary for this firm
    pub themes: Option<ThemeSummary>,
}
