//! End-to-end tests of the filter and ranking pipeline over a fixture snapshot.

mod common;

use common::small_session;
use firmrank::priority::DatasetTotals;
use firmrank::{FilterConfig, PlatformFilter, RankMode};
use pretty_assertions::assert_eq;

fn ids<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    items.into_iter().collect()
}

fn approx(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("mean is defined");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn default_filters_rank_by_rating() {
    let report = small_session().dashboard(&FilterConfig::default());
    let view = &report.view;

    assert_eq!(
        view.totals,
        DatasetTotals {
            firms: 4,
            reviews: 10,
            reviews_with_rating: 9,
            reviews_with_text: 5,
        }
    );
    assert_eq!(
        ids(view.firms.iter().map(|f| f.firm_id.as_str())),
        vec!["alfa", "beta", "gamma", "delta"]
    );

    let ranking = &view.ranking;
    assert_eq!(ranking.mode, RankMode::Rating);
    assert_eq!(
        ids(ranking.entries.iter().map(|e| e.firm_id.as_str())),
        vec!["alfa", "beta"]
    );
    assert_eq!(ranking.entries[0].rank, 1);
    assert!((ranking.entries[0].value - 4.5).abs() < 1e-9);
    assert_eq!(ranking.entries[0].sample_n, 4);
    assert!((ranking.entries[1].value - 4.0).abs() < 1e-9);
}

#[test]
fn firm_without_reviews_has_undefined_means() {
    let report = small_session().dashboard(&FilterConfig::default());
    let delta = report
        .view
        .firms
        .iter()
        .find(|f| f.firm_id == "delta")
        .unwrap();

    assert_eq!(delta.stats.reviews_n, 0);
    assert_eq!(delta.stats.avg_rating_5, None);
    assert_eq!(delta.stats.avg_sentiment, None);
    assert_eq!(delta.cities, vec!["Brno", "Praha"]);
}

#[test]
fn non_numeric_rating_counts_as_no_rating() {
    let report = small_session().dashboard(&FilterConfig::default());
    let gamma = report
        .view
        .firms
        .iter()
        .find(|f| f.firm_id == "gamma")
        .unwrap();

    assert_eq!(gamma.stats.reviews_n, 3);
    assert_eq!(gamma.stats.ratings_n, 2);
    approx(gamma.stats.avg_rating_5, 5.0);
}

#[test]
fn lower_min_n_admits_small_samples() {
    let report = small_session().dashboard(&FilterConfig::default().with_min_n(2));
    assert_eq!(
        ids(report.view.ranking.entries.iter().map(|e| e.firm_id.as_str())),
        vec!["gamma", "alfa", "beta"]
    );
}

#[test]
fn excluding_enforcement_changes_stats() {
    let config = FilterConfig::default().with_exclude_enforcement(true);
    let report = small_session().dashboard(&config);
    let alfa = &report.view.firms[0];

    assert_eq!(alfa.firm_id, "alfa");
    assert_eq!(alfa.stats.reviews_n, 3);
    approx(alfa.stats.avg_rating_5, 13.0 / 3.0);
    assert_eq!(report.view.filter_stats.filtered_by_enforcement, 1);
    assert_eq!(
        ids(report.view.firms.iter().map(|f| f.firm_name.as_str())),
        vec!["Alfa Legal", "Beta & Partners", "Gamma Advokáti", "Delta s.r.o."]
    );
}

#[test]
fn platform_filter_is_exact() {
    let google = FilterConfig::default().with_platform(PlatformFilter::parse("Google Maps"));
    let report = small_session().dashboard(&google);

    assert_eq!(report.view.totals.reviews, 6);
    assert_eq!(
        ids(report.view.ranking.entries.iter().map(|e| e.firm_id.as_str())),
        vec!["alfa"]
    );
    approx(report.view.firms[0].stats.avg_rating_5, 14.0 / 3.0);

    let lowercase = FilterConfig::default().with_platform(PlatformFilter::parse("google maps"));
    assert_eq!(small_session().dashboard(&lowercase).view.totals.reviews, 0);
}

#[test]
fn sentiment_mode_uses_scored_reviews() {
    let config = FilterConfig::default().with_rank_mode(RankMode::Sentiment);
    let report = small_session().dashboard(&config);
    let entries = &report.view.ranking.entries;

    assert_eq!(ids(entries.iter().map(|e| e.firm_id.as_str())), vec!["alfa", "beta"]);
    assert!((entries[0].value - 0.275).abs() < 1e-9);
    assert_eq!(entries[1].sample_n, 3);
}

#[test]
fn unreachable_min_n_yields_note() {
    let report = small_session().dashboard(&FilterConfig::default().with_min_n(50));
    assert!(report.view.ranking.is_empty());
    assert_eq!(
        report.view.ranking.note().unwrap(),
        "No firm has at least 50 ratings under the current filters (minN = 50)."
    );
}

#[test]
fn search_filters_firm_list_and_totals() {
    let session = small_session();
    let report = session.dashboard(&FilterConfig::default().with_search_text(" ADVOK"));
    assert_eq!(
        ids(report.view.firms.iter().map(|f| f.firm_id.as_str())),
        vec!["gamma"]
    );
    assert_eq!(report.view.totals.reviews, 3);
    assert!(report.view.ranking.is_empty());

    let none = session.dashboard(&FilterConfig::default().with_search_text("zzz"));
    assert!(none.view.firms.is_empty());
    assert_eq!(none.view.totals, DatasetTotals::default());
}

#[test]
fn same_config_gives_same_view() {
    let session = small_session();
    let config = FilterConfig::default()
        .with_exclude_enforcement(true)
        .with_rank_mode(RankMode::Sentiment);
    assert_eq!(session.dashboard(&config), session.dashboard(&config));
}

#[test]
fn overall_themes_and_limitations_pass_through() {
    let report = small_session().dashboard(&FilterConfig::default());
    assert_eq!(report.overall_themes.top_positive_categories.len(), 3);
    assert_eq!(report.limitations.len(), 1);
}
