pub mod errors;
pub mod snapshot;
pub mod types;

pub use errors::{Error, Result};
pub use snapshot::{
    Analysis, CategoryCount, Coverage, DatasetQuality, MergedDataset, OverallThemes, Rankings,
    RatingRankEntry, SentimentRankEntry, Snapshot, ThemeSummary,
};
pub use types::{CollectionSummary, Firm, Office, PlatformProfile, Review, SentimentLabel};
