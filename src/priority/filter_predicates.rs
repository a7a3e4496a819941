//! Pure predicate functions for filtering firms and reviews.
//!
//! Each predicate takes a record and the relevant piece of configuration and
//! returns a boolean. The stats aggregator, the firm list and the dataset
//! counters all go through these same functions, so every consumer sees the
//! same filtered review set.

use super::filter_config::{FilterConfig, PlatformFilter};
use crate::classify::EnforcementClassifier;
use crate::core::Review;
use serde::{Deserialize, Serialize};

/// Counts of reviews rejected by each review-level predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStatistics {
    /// Reviews examined in firms that matched the search
    pub total_reviews_processed: usize,

    /// Reviews from a different platform
    pub filtered_by_platform: usize,

    /// Reviews flagged as enforcement language
    pub filtered_by_enforcement: usize,

    /// Reviews that passed every predicate
    pub reviews_kept: usize,
}

impl FilterStatistics {
    pub fn total_filtered(&self) -> usize {
        self.filtered_by_platform + self.filtered_by_enforcement
    }

    pub(crate) fn record(&mut self, outcome: ReviewOutcome) {
        self.total_reviews_processed += 1;
        match outcome {
            ReviewOutcome::Kept => self.reviews_kept += 1,
            ReviewOutcome::WrongPlatform => self.filtered_by_platform += 1,
            ReviewOutcome::Enforcement => self.filtered_by_enforcement += 1,
        }
    }
}

/// Why a review was kept or dropped. Platform is checked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Kept,
    WrongPlatform,
    Enforcement,
}

/// Case-insensitive substring match of the search text against a firm name.
///
/// Empty or whitespace-only search text matches every firm.
///
/// # Examples
///
/// ```
/// use firmrank::priority::filter_predicates::matches_search;
///
/// assert!(matches_search("Alfa Legal", "alfa"));
/// assert!(!matches_search("Beta & Partners", "alfa"));
/// assert!(matches_search("Beta & Partners", ""));
/// ```
#[inline]
pub fn matches_search(firm_name: &str, search_text: &str) -> bool {
    if search_text.trim().is_empty() {
        return true;
    }
    firm_name
        .to_lowercase()
        .contains(&search_text.to_lowercase())
}

/// Whether the review came from the selected platform.
///
/// Reviews without a platform only pass when no platform is selected.
#[inline]
pub fn matches_platform(review: &Review, platform: &PlatformFilter) -> bool {
    match platform {
        PlatformFilter::All => true,
        PlatformFilter::Only(name) => review.platform.as_deref() == Some(name.as_str()),
    }
}

/// Whether the review survives the enforcement exclusion.
#[inline]
pub fn passes_enforcement_filter(
    review: &Review,
    exclude_enforcement: bool,
    classifier: &EnforcementClassifier,
) -> bool {
    !exclude_enforcement || !classifier.is_enforcement_opt(review.review_text.as_deref())
}

/// Evaluate every review-level predicate.
pub fn evaluate_review(
    review: &Review,
    config: &FilterConfig,
    classifier: &EnforcementClassifier,
) -> ReviewOutcome {
    if !matches_platform(review, &config.platform) {
        return ReviewOutcome::WrongPlatform;
    }
    if !passes_enforcement_filter(review, config.exclude_enforcement, classifier) {
        return ReviewOutcome::Enforcement;
    }
    ReviewOutcome::Kept
}

/// Whether the review passes every review-level predicate.
#[inline]
pub fn review_passes(
    review: &Review,
    config: &FilterConfig,
    classifier: &EnforcementClassifier,
) -> bool {
    evaluate_review(review, config, classifier) == ReviewOutcome::Kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(platform: Option<&str>, text: Option<&str>) -> Review {
        Review {
            platform: platform.map(str::to_string),
            review_text: text.map(str::to_string),
            ..Review::default()
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        assert!(matches_search("Alfa Legal", "ALFA"));
        assert!(matches_search("Alfa Legal", "legal"));
        assert!(matches_search("Advokátní kancelář Čermák", "čermák"));
        assert!(!matches_search("Beta & Partners", "alfa"));
    }

    #[test]
    fn search_keeps_surrounding_whitespace() {
        assert!(!matches_search("Alfa", "alfa "));
        assert!(matches_search("Alfa Legal", "alfa "));
        assert!(matches_search("Alfa Legal", " legal"));
    }

    #[test]
    fn blank_search_matches_everything() {
        assert!(matches_search("", ""));
        assert!(matches_search("Anything", "   "));
    }

    #[test]
    fn platform_all_keeps_reviews_without_platform() {
        assert!(matches_platform(&review(None, None), &PlatformFilter::All));
    }

    #[test]
    fn specific_platform_requires_exact_match() {
        let only = PlatformFilter::Only("Google Maps".into());
        assert!(matches_platform(&review(Some("Google Maps"), None), &only));
        assert!(!matches_platform(&review(Some("Facebook"), None), &only));
        assert!(!matches_platform(&review(None, None), &only));
    }

    #[test]
    fn enforcement_filter_only_applies_when_enabled() {
        let classifier = EnforcementClassifier::default();
        let threat = review(None, Some("debt collection threat"));
        assert!(passes_enforcement_filter(&threat, false, &classifier));
        assert!(!passes_enforcement_filter(&threat, true, &classifier));
        assert!(passes_enforcement_filter(&review(None, None), true, &classifier));
    }

    #[test]
    fn platform_is_checked_before_enforcement() {
        let classifier = EnforcementClassifier::default();
        let config = FilterConfig::default()
            .with_platform(PlatformFilter::Only("Facebook".into()))
            .with_exclude_enforcement(true);
        let threat = review(Some("Google Maps"), Some("threat"));
        assert_eq!(
            evaluate_review(&threat, &config, &classifier),
            ReviewOutcome::WrongPlatform
        );
    }

    #[test]
    fn statistics_record_outcomes() {
        let mut stats = FilterStatistics::default();
        stats.record(ReviewOutcome::Kept);
        stats.record(ReviewOutcome::Enforcement);
        stats.record(ReviewOutcome::WrongPlatform);
        assert_eq!(stats.total_reviews_processed, 3);
        assert_eq!(stats.reviews_kept, 1);
        assert_eq!(stats.total_filtered(), 2);
    }
}
