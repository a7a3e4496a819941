// Export modules for library usage
pub mod aggregation;
pub mod build;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod observability;
pub mod priority;
pub mod report;
pub mod scoring;
pub mod session;
pub mod themes;

// Re-export commonly used types
pub use crate::core::{
    Analysis, CategoryCount, Error, Firm, MergedDataset, Office, Result, Review, SentimentLabel,
    Snapshot, ThemeSummary,
};

pub use crate::aggregation::{compute_stats, flatten_firm, flatten_firms, FirmStats, FlatFirm};

pub use crate::classify::EnforcementClassifier;

pub use crate::priority::{
    prepare_view, rank_firms, DashboardView, FilterConfig, PlatformFilter, RankMode,
    RankingOutcome, RANKING_LIMIT,
};

pub use crate::scoring::rating_to_5;

pub use crate::themes::ThemeIndex;

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::report::{DashboardReport, FirmDetail};

pub use crate::session::Session;
