//! Per-firm statistics under an active filter configuration.
//!
//! Stats are a pure function of a flattened firm and a `FilterConfig`. They
//! are never cached across filter changes. Means over an empty sample are
//! `None`, which callers must render differently from a real zero.

use super::flatten::{FlatFirm, FlatReview};
use crate::classify::EnforcementClassifier;
use crate::priority::filter_predicates::review_passes;
use crate::priority::FilterConfig;
use crate::scoring::rating_to_5;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FirmStats {
    /// Reviews surviving the platform and enforcement filters
    pub reviews_n: usize,
    /// Filtered reviews with a usable rating pair
    pub ratings_n: usize,
    pub avg_rating_5: Option<f64>,
    /// Filtered reviews with a sentiment score
    pub scored_n: usize,
    pub avg_sentiment: Option<f64>,
}

/// Running sum and count; the mean of nothing is `None`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    pub(crate) fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Reviews of a firm that pass the review-level filters, in original order.
pub fn filtered_reviews<'f, 'a>(
    firm: &'f FlatFirm<'a>,
    config: &'f FilterConfig,
    classifier: &'f EnforcementClassifier,
) -> impl Iterator<Item = &'f FlatReview<'a>> + 'f {
    firm.reviews
        .iter()
        .filter(move |r| review_passes(r.review, config, classifier))
}

/// Compute stats over an already filtered review sequence.
pub fn stats_for_reviews<'r, I>(reviews: I) -> FirmStats
where
    I: IntoIterator<Item = &'r crate::core::Review>,
{
    let mut reviews_n = 0;
    let mut ratings = MeanAccumulator::default();
    let mut sentiment = MeanAccumulator::default();

    for review in reviews {
        reviews_n += 1;
        if let Some(rating) = rating_to_5(review) {
            ratings.push(rating);
        }
        if let Some(score) = review.sentiment_score {
            sentiment.push(score);
        }
    }

    FirmStats {
        reviews_n,
        ratings_n: ratings.count(),
        avg_rating_5: ratings.mean(),
        scored_n: sentiment.count(),
        avg_sentiment: sentiment.mean(),
    }
}

/// Stats of one firm under the given filters.
pub fn compute_stats(
    firm: &FlatFirm<'_>,
    config: &FilterConfig,
    classifier: &EnforcementClassifier,
) -> FirmStats {
    stats_for_reviews(filtered_reviews(firm, config, classifier).map(|r| r.review))
}
