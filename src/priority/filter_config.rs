//! Filter configuration for the dashboard view.
//!
//! `FilterConfig` is an immutable value passed into the pure pipeline. It is
//! rebuilt from user input on every change and never read from ambient state
//! inside the pipeline itself.
//!
//! Configuration precedence when building defaults: CLI args > env vars >
//! config file > built-in defaults.

use crate::config::FirmrankConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sample size below which a firm is not ranked.
pub const DEFAULT_MIN_N: usize = 3;

/// Length of each ranking list.
pub const RANKING_LIMIT: usize = 15;

/// Sentinel string for "all platforms".
pub const ALL_PLATFORMS: &str = "ALL";

/// Which metric the ranking list is ordered by.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RankMode {
    /// Average normalized rating
    #[default]
    Rating,
    /// Average sentiment score
    Sentiment,
}

impl RankMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RankMode::Rating => "rating",
            RankMode::Sentiment => "sentiment",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rating" => Some(RankMode::Rating),
            "sentiment" => Some(RankMode::Sentiment),
            _ => None,
        }
    }
}

impl fmt::Display for RankMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform restriction applied per review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlatformFilter {
    #[default]
    All,
    Only(String),
}

impl PlatformFilter {
    /// `"ALL"` (any case) or an empty string means no restriction.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_PLATFORMS) {
            PlatformFilter::All
        } else {
            PlatformFilter::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, PlatformFilter::All)
    }
}

impl From<String> for PlatformFilter {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PlatformFilter> for String {
    fn from(value: PlatformFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformFilter::All => f.write_str(ALL_PLATFORMS),
            PlatformFilter::Only(name) => f.write_str(name),
        }
    }
}

/// The active filter and ranking parameters.
///
/// # Examples
///
/// ```
/// use firmrank::priority::{FilterConfig, PlatformFilter, RankMode};
///
/// let config = FilterConfig::default()
///     .with_search_text("alfa")
///     .with_platform(PlatformFilter::parse("Google Maps"))
///     .with_rank_mode(RankMode::Sentiment)
///     .with_min_n(5);
///
/// assert_eq!(config.min_n, 5);
/// assert!(!config.exclude_enforcement);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Case-insensitive substring matched against firm names
    pub search_text: String,

    pub platform: PlatformFilter,

    pub rank_mode: RankMode,

    /// Drop reviews flagged by the enforcement classifier
    pub exclude_enforcement: bool,

    /// Minimum ratings (or scored reviews) for a firm to be ranked
    pub min_n: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            platform: PlatformFilter::All,
            rank_mode: RankMode::Rating,
            exclude_enforcement: false,
            min_n: DEFAULT_MIN_N,
        }
    }
}

impl FilterConfig {
    /// Resolve defaults from a config file and an environment lookup.
    ///
    /// Environment keys: `FIRMRANK_PLATFORM`, `FIRMRANK_RANK_MODE`,
    /// `FIRMRANK_EXCLUDE_ENFORCEMENT` and `FIRMRANK_MIN_N`. Unparseable values
    /// are ignored.
    pub fn resolve<F>(file: &FirmrankConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let filters = file.filters.clone().unwrap_or_default();
        let defaults = Self::default();

        let platform = env("FIRMRANK_PLATFORM")
            .or(filters.platform)
            .map(|p| PlatformFilter::parse(&p))
            .unwrap_or(defaults.platform);

        let rank_mode = env("FIRMRANK_RANK_MODE")
            .and_then(|v| RankMode::parse(&v))
            .or(filters.rank_mode)
            .unwrap_or(defaults.rank_mode);

        let exclude_enforcement = env("FIRMRANK_EXCLUDE_ENFORCEMENT")
            .and_then(|v| parse_bool(&v))
            .or(filters.exclude_enforcement)
            .unwrap_or(defaults.exclude_enforcement);

        let min_n = env("FIRMRANK_MIN_N")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .or(filters.min_n)
            .unwrap_or(defaults.min_n);

        Self {
            search_text: defaults.search_text,
            platform,
            rank_mode,
            exclude_enforcement,
            min_n,
        }
    }

    pub fn with_search_text(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into();
        self
    }

    pub fn with_platform(mut self, platform: PlatformFilter) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_rank_mode(mut self, rank_mode: RankMode) -> Self {
        self.rank_mode = rank_mode;
        self
    }

    pub fn with_exclude_enforcement(mut self, exclude: bool) -> Self {
        self.exclude_enforcement = exclude;
        self
    }

    pub fn with_min_n(mut self, min_n: usize) -> Self {
        self.min_n = min_n;
        self
    }

    /// Apply optional CLI overrides on top of resolved defaults.
    pub fn with_overrides(
        mut self,
        platform: Option<&str>,
        rank_mode: Option<RankMode>,
        exclude_enforcement: Option<bool>,
        min_n: Option<usize>,
    ) -> Self {
        if let Some(platform) = platform {
            self.platform = PlatformFilter::parse(platform);
        }
        if let Some(mode) = rank_mode {
            self.rank_mode = mode;
        }
        if let Some(exclude) = exclude_enforcement {
            self.exclude_enforcement = exclude;
        }
        if let Some(n) = min_n {
            self.min_n = n;
        }
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
