//! The snapshot document: merged dataset plus precomputed analysis.

use super::types::Firm;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level artifact loaded once per session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub merged_dataset: MergedDataset,
    #[serde(default)]
    pub analysis: Analysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub firms: Vec<Firm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_quality: Option<DatasetQuality>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetQuality {
    pub firms_collected: usize,
    pub reviews_collected: usize,
    #[serde(default)]
    pub firms_below_min_reviews: Vec<String>,
    #[serde(default)]
    pub known_limitations: Vec<String>,
}

/// Precomputed reference data. Every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Coverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rankings: Option<Rankings>,
    #[serde(default)]
    pub sentiment_distribution: BTreeMap<String, usize>,
    #[serde(default)]
    pub themes_overall: OverallThemes,
    #[serde(default)]
    pub themes_by_firm: Vec<ThemeSummary>,
    #[serde(default)]
    pub limitations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(category: impl Into<String>, count: usize) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallThemes {
    #[serde(default)]
    pub top_positive_categories: Vec<CategoryCount>,
    #[serde(default)]
    pub top_negative_categories: Vec<CategoryCount>,
}

/// Per-firm themes and representative quotes, keyed by `firm_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSummary {
    pub firm_id: String,
    #[serde(default)]
    pub top_positive_categories: Vec<CategoryCount>,
    #[serde(default)]
    pub top_negative_categories: Vec<CategoryCount>,
    #[serde(default)]
    pub representative_quotes_positive: Vec<String>,
    #[serde(default)]
    pub representative_quotes_negative: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub firms_total: usize,
    pub reviews_total: usize,
    pub reviews_with_text: usize,
    pub reviews_with_rating: usize,
    #[serde(default)]
    pub platforms_used: Vec<String>,
    #[serde(default)]
    pub cities_covered: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    #[serde(default)]
    pub by_avg_rating_5: Vec<RatingRankEntry>,
    #[serde(default)]
    pub by_avg_sentiment_score: Vec<SentimentRankEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRankEntry {
    pub firm_id: String,
    pub firm_name: String,
    pub avg_rating_5: f64,
    pub ratings_n: usize,
    pub reviews_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRankEntry {
    pub firm_id: String,
    pub firm_name: String,
    pub avg_sentiment_score: f64,
    pub scored_n: usize,
    pub reviews_n: usize,
}
