//! Pure transformation pipeline for the dashboard view.
//!
//! # Architecture
//!
//! ```text
//! [FlatFirm]
//!        │
//!        ▼
//! ┌──────────────────┐
//! │  prepare_view()  │ ← FilterConfig, EnforcementClassifier (params, not env vars)
//! └──────────────────┘
//!        │
//!        ├─→ search_firms()      ← Firm-name substring match
//!        ├─→ compute_rows()      ← Per-review filters, stats, dataset totals
//!        ├─→ sort_firm_rows()    ← Review count desc, name asc
//!        └─→ rank_firms()        ← Eligibility, ordering, truncation
//!        │
//!        ▼
//! DashboardView
//! ```
//!
//! Every stage is deterministic and free of I/O. The whole pipeline re-runs
//! over the full dataset on each filter change; there is no incremental path.

use super::filter_config::{FilterConfig, RankMode, RANKING_LIMIT};
use super::filter_predicates::{evaluate_review, matches_search, FilterStatistics, ReviewOutcome};
use super::view::{DashboardView, DatasetTotals, FirmRow, RankedFirm, RankingOutcome};
use crate::aggregation::{stats_for_reviews, FlatFirm};
use crate::classify::EnforcementClassifier;
use std::cmp::Ordering;

/// Prepares the dashboard view for one filter state.
///
/// This is the single entry point used by every output format.
///
/// # Examples
///
/// ```
/// use firmrank::aggregation::flatten_firms;
/// use firmrank::classify::EnforcementClassifier;
/// use firmrank::priority::{prepare_view, FilterConfig};
///
/// let firms: Vec<firmrank::core::Firm> = Vec::new();
/// let flat = flatten_firms(&firms);
/// let view = prepare_view(&flat, &FilterConfig::default(), &EnforcementClassifier::default());
///
/// assert!(view.firms.is_empty());
/// assert!(view.ranking.note().is_some());
/// ```
pub fn prepare_view(
    firms: &[FlatFirm<'_>],
    config: &FilterConfig,
    classifier: &EnforcementClassifier,
) -> DashboardView {
    // Stage 1: Search
    let searched = search_firms(firms, &config.search_text);

    // Stage 2: Stats and totals
    let (mut rows, totals, filter_stats) = compute_rows(&searched, config, classifier);

    // Stage 3: Sort
    sort_firm_rows(&mut rows);

    // Stage 4: Rank
    let ranking = rank_firms(&rows, config.rank_mode, config.min_n, RANKING_LIMIT);

    DashboardView {
        config: config.clone(),
        totals,
        firms: rows,
        ranking,
        filter_stats,
    }
}

// ============================================================================
// STAGE 1: SEARCH
// ============================================================================

/// Firms whose name contains the search text, in dataset order.
pub fn search_firms<'f, 'a>(
    firms: &'f [FlatFirm<'a>],
    search_text: &str,
) -> Vec<&'f FlatFirm<'a>> {
    firms
        .iter()
        .filter(|f| matches_search(f.firm_name, search_text))
        .collect()
}

// ============================================================================
// STAGE 2: STATS AND TOTALS
// ============================================================================

fn compute_rows(
    firms: &[&FlatFirm<'_>],
    config: &FilterConfig,
    classifier: &EnforcementClassifier,
) -> (Vec<FirmRow>, DatasetTotals, FilterStatistics) {
    let mut filter_stats = FilterStatistics::default();
    let mut totals = DatasetTotals {
        firms: firms.len(),
        ..DatasetTotals::default()
    };

    let rows = firms
        .iter()
        .map(|firm| {
            let kept: Vec<_> = firm
                .reviews
                .iter()
                .filter(|r| {
                    let outcome = evaluate_review(r.review, config, classifier);
                    filter_stats.record(outcome);
                    outcome == ReviewOutcome::Kept
                })
                .map(|r| r.review)
                .collect();

            let stats = stats_for_reviews(kept.iter().copied());
            totals.reviews += stats.reviews_n;
            totals.reviews_with_rating += stats.ratings_n;
            totals.reviews_with_text += kept.iter().filter(|r| r.has_text()).count();

            FirmRow {
                firm_id: firm.firm_id.to_string(),
                firm_name: firm.firm_name.to_string(),
                website: firm.website.map(str::to_string),
                cities: firm.cities.iter().map(|c| c.to_string()).collect(),
                platforms: firm.platforms.iter().map(|p| p.to_string()).collect(),
                stats,
            }
        })
        .collect();

    (rows, totals, filter_stats)
}

// ============================================================================
// STAGE 3: SORTING
// ============================================================================

/// Sorts by filtered review count descending, then firm name ascending.
///
/// `firm_id` is the final tie-break so the order is total.
pub fn sort_firm_rows(rows: &mut [FirmRow]) {
    rows.sort_by(|a, b| {
        b.stats
            .reviews_n
            .cmp(&a.stats.reviews_n)
            .then_with(|| a.firm_name.cmp(&b.firm_name))
            .then_with(|| a.firm_id.cmp(&b.firm_id))
    });
}

// ============================================================================
// STAGE 4: RANKING
// ============================================================================

/// Metric value and sample size for a mode, if the firm has a defined mean.
fn ranking_metric(row: &FirmRow, mode: RankMode) -> Option<(f64, usize)> {
    match mode {
        RankMode::Rating => row.stats.avg_rating_5.map(|v| (v, row.stats.ratings_n)),
        RankMode::Sentiment => row.stats.avg_sentiment.map(|v| (v, row.stats.scored_n)),
    }
}

/// Value descending, sample size descending, then name and id ascending.
fn compare_ranked(a: &RankedFirm, b: &RankedFirm) -> Ordering {
    b.value
        .total_cmp(&a.value)
        .then_with(|| b.sample_n.cmp(&a.sample_n))
        .then_with(|| a.firm_name.cmp(&b.firm_name))
        .then_with(|| a.firm_id.cmp(&b.firm_id))
}

/// Select, order and truncate the ranking for one mode.
///
/// A firm is eligible when its mean is defined and its sample size is at
/// least `min_n`.
pub fn rank_firms(rows: &[FirmRow], mode: RankMode, min_n: usize, limit: usize) -> RankingOutcome {
    let mut eligible: Vec<RankedFirm> = rows
        .iter()
        .filter_map(|row| {
            let (value, sample_n) = ranking_metric(row, mode)?;
            (sample_n >= min_n).then(|| RankedFirm {
                rank: 0,
                firm_id: row.firm_id.clone(),
                firm_name: row.firm_name.clone(),
                value,
                sample_n,
                reviews_n: row.stats.reviews_n,
            })
        })
        .collect();

    let eligible_total = eligible.len();
    eligible.sort_by(compare_ranked);
    eligible.truncate(limit);
    for (i, entry) in eligible.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    RankingOutcome {
        mode,
        min_n,
        limit,
        eligible_total,
        entries: eligible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::{flatten_firms, FirmStats};
    use crate::core::{Firm, Office, Review};
    use crate::priority::PlatformFilter;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    fn rated(value: f64, text: &str) -> Review {
        Review {
            platform: Some("Google Maps".into()),
            review_text: Some(text.into()),
            rating_value: Some(json!(value)),
            rating_scale: Some(json!(5)),
            ..Review::default()
        }
    }

    fn firm(id: &str, name: &str, reviews: Vec<Review>) -> Firm {
        Firm {
            firm_id: id.into(),
            firm_name: name.into(),
            website: None,
            offices: vec![Office {
                city: Some("Praha".into()),
                reviews,
                ..Office::default()
            }],
            collection_summary: None,
        }
    }

    fn row(id: &str, name: &str, stats: FirmStats) -> FirmRow {
        FirmRow {
            firm_id: id.into(),
            firm_name: name.into(),
            website: None,
            cities: vec![],
            platforms: vec![],
            stats,
        }
    }

    fn rating_stats(reviews_n: usize, ratings_n: usize, avg: Option<f64>) -> FirmStats {
        FirmStats {
            reviews_n,
            ratings_n,
            avg_rating_5: avg,
            ..FirmStats::default()
        }
    }

    fn view(firms: &[Firm], config: &FilterConfig) -> DashboardView {
        prepare_view(&flatten_firms(firms), config, &EnforcementClassifier::default())
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    #[test]
    fn search_returns_only_matching_firms() {
        let firms = vec![
            firm("alfa", "Alfa Legal", vec![]),
            firm("beta", "Beta & Partners", vec![]),
        ];
        let v = view(&firms, &FilterConfig::default().with_search_text("alfa"));
        let names: Vec<_> = v.firms.iter().map(|f| f.firm_name.as_str()).collect();
        assert_eq!(names, vec!["Alfa Legal"]);
        assert_eq!(v.totals.firms, 1);
    }

    // ========================================================================
    // SORTING
    // ========================================================================

    #[test]
    fn firm_list_sorted_by_reviews_then_name() {
        let mut rows = vec![
            row("c", "Charlie", rating_stats(2, 0, None)),
            row("b", "Bravo", rating_stats(5, 0, None)),
            row("a", "Alpha", rating_stats(2, 0, None)),
        ];
        sort_firm_rows(&mut rows);
        let ids: Vec<_> = rows.iter().map(|r| r.firm_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn identical_names_fall_back_to_firm_id() {
        let mut rows = vec![
            row("z", "Same", rating_stats(1, 0, None)),
            row("y", "Same", rating_stats(1, 0, None)),
        ];
        sort_firm_rows(&mut rows);
        assert_eq!(rows[0].firm_id, "y");
    }

    // ========================================================================
    // RANKING
    // ========================================================================

    #[test]
    fn rating_ties_broken_by_sample_size() {
        let rows = vec![
            row("a", "A", rating_stats(3, 3, Some(4.0))),
            row("b", "B", rating_stats(9, 9, Some(4.0))),
            row("c", "C", rating_stats(4, 4, Some(4.5))),
        ];
        let outcome = rank_firms(&rows, RankMode::Rating, 3, 15);
        let ids: Vec<_> = outcome.entries.iter().map(|e| e.firm_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(outcome.entries[0].rank, 1);
        assert_eq!(outcome.entries[2].rank, 3);
    }

    #[test]
    fn min_n_excludes_small_samples() {
        let rows = vec![row("a", "A", rating_stats(3, 3, Some(5.0)))];
        let outcome = rank_firms(&rows, RankMode::Rating, 5, 15);
        assert!(outcome.is_empty());
        assert_eq!(outcome.eligible_total, 0);
        assert!(outcome.note().is_some());
    }

    #[test]
    fn undefined_mean_is_never_eligible() {
        let rows = vec![row("a", "A", rating_stats(3, 0, None))];
        assert!(rank_firms(&rows, RankMode::Rating, 0, 15).is_empty());
    }

    #[test]
    fn sentiment_mode_uses_scored_reviews() {
        let mut stats = rating_stats(4, 4, Some(1.0));
        stats.scored_n = 3;
        stats.avg_sentiment = Some(0.8);
        let mut other = rating_stats(4, 4, Some(5.0));
        other.scored_n = 3;
        other.avg_sentiment = Some(-0.2);
        let rows = vec![row("low", "Low", other), row("high", "High", stats)];

        let outcome = rank_firms(&rows, RankMode::Sentiment, 3, 15);
        assert_eq!(outcome.entries[0].firm_id, "high");
        assert_eq!(outcome.entries[0].sample_n, 3);
        assert_eq!(outcome.entries[1].value, -0.2);
    }

    #[test]
    fn ranking_truncates_to_limit() {
        let rows: Vec<_> = (0..20)
            .map(|i| {
                let stats = rating_stats(5, 5, Some(i as f64 / 4.0));
                row(&format!("f{i:02}"), &format!("Firm {i:02}"), stats)
            })
            .collect();
        let outcome = rank_firms(&rows, RankMode::Rating, 3, RANKING_LIMIT);
        assert_eq!(outcome.entries.len(), 15);
        assert_eq!(outcome.eligible_total, 20);
        assert_eq!(outcome.entries[0].firm_id, "f19");
    }

    // ========================================================================
    // FULL PIPELINE
    // ========================================================================

    #[test]
    fn totals_count_filtered_reviews() {
        let mut unrated = rated(1.0, "  ");
        unrated.rating_value = None;
        let firms = vec![
            firm("a", "A", vec![rated(4.0, "ok"), rated(5.0, "great service"), unrated]),
            firm("b", "B", vec![rated(2.0, "debt collection threat")]),
        ];
        let config = FilterConfig::default().with_exclude_enforcement(true);
        let v = view(&firms, &config);

        assert_eq!(
            v.totals,
            DatasetTotals {
                firms: 2,
                reviews: 3,
                reviews_with_rating: 2,
                reviews_with_text: 2,
            }
        );
        assert_eq!(v.filter_stats.filtered_by_enforcement, 1);
        assert_eq!(v.firms[0].firm_id, "a");
        assert_eq!(v.firms[1].stats.avg_rating_5, None);
    }

    #[test]
    fn platform_filter_applies_to_totals_and_rows() {
        let mut fb = rated(1.0, "fb");
        fb.platform = Some("Facebook".into());
        let firms = vec![firm("a", "A", vec![rated(5.0, "g"), fb])];
        let config =
            FilterConfig::default().with_platform(PlatformFilter::Only("Facebook".into()));
        let v = view(&firms, &config);

        assert_eq!(v.totals.reviews, 1);
        assert_eq!(v.firms[0].stats.avg_rating_5, Some(1.0));
        assert_eq!(v.filter_stats.filtered_by_platform, 1);
        // Platform set is a property of the firm, not of the filter.
        assert_eq!(v.firms[0].platforms, vec!["Facebook", "Google Maps"]);
    }

    #[test]
    fn single_firm_below_min_n_gives_empty_ranking() {
        let firms = vec![firm(
            "a",
            "A",
            vec![rated(4.0, "x"), rated(4.0, "y"), rated(4.0, "z")],
        )];
        let v = view(&firms, &FilterConfig::default().with_min_n(5));
        assert_eq!(v.firms[0].stats.ratings_n, 3);
        assert!(v.ranking.is_empty());
        assert!(v.ranking.note().is_some());
    }

    #[test]
    fn preparing_twice_is_identical() {
        let firms = vec![
            firm("a", "A", vec![rated(4.0, "x"), rated(2.0, "threat")]),
            firm("b", "B", vec![rated(4.0, "y")]),
        ];
        let config = FilterConfig::default()
            .with_exclude_enforcement(true)
            .with_min_n(1);
        assert_eq!(view(&firms, &config), view(&firms, &config));
    }
}
