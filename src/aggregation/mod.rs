//! Firm flattening and per-firm statistics.

pub mod flatten;
pub mod stats;

pub use flatten::{flatten_firm, flatten_firms, FlatFirm, FlatReview};
pub use stats::{compute_stats, filtered_reviews, stats_for_reviews, FirmStats};
