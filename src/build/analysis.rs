//! Snapshot-level analysis computed once at build time.
//!
//! Rankings here are unfiltered reference data; the interactive ranking in
//! `priority` is recomputed per filter state and does not read them.

use super::taxonomy::{categorize, excerpt, EXCERPT_WORDS};
use crate::aggregation::{stats_for_reviews, FirmStats};
use crate::core::{
    Analysis, CategoryCount, Coverage, DatasetQuality, Firm, OverallThemes, Rankings,
    RatingRankEntry, Review, SentimentLabel, SentimentRankEntry, ThemeSummary,
};
use crate::scoring::has_rating;
use crate::themes::{top_categories, OVERALL_THEME_LIMIT};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Minimum samples for a firm to enter a build-time ranking.
pub const RANKING_MIN_SAMPLES: usize = 3;
/// Entries kept per build-time ranking.
pub const RANKING_TOP: usize = 30;
/// Categories kept per polarity per firm.
pub const FIRM_THEME_LIMIT: usize = 5;
/// Quotes kept per polarity per firm.
pub const QUOTES_PER_POLARITY: usize = 4;

pub const LOW_SAMPLE_LIMITATION: &str = "Most firms have limited or zero publicly captured reviews in the provided inputs; rankings may be unstable for low n.";

/// Category counter that remembers first-seen order for equal counts.
#[derive(Debug, Default)]
struct CategoryCounter {
    counts: Vec<CategoryCount>,
}

impl CategoryCounter {
    fn add(&mut self, category: &str) {
        match self.counts.iter_mut().find(|c| c.category == category) {
            Some(c) => c.count += 1,
            None => self.counts.push(CategoryCount::new(category, 1)),
        }
    }

    fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn top(&self, limit: usize) -> Vec<CategoryCount> {
        top_categories(&self.counts, limit)
    }
}

#[derive(Debug, Default)]
struct Polarity {
    categories: CategoryCounter,
    quotes: Vec<String>,
}

impl Polarity {
    fn absorb(&mut self, review: &Review, categories: &[&str], overall: &mut CategoryCounter) {
        for category in categories {
            self.categories.add(category);
            overall.add(category);
        }
        if self.quotes.len() < QUOTES_PER_POLARITY {
            if let Some(quote) = review.text().and_then(|t| excerpt(t, EXCERPT_WORDS)) {
                self.quotes.push(quote);
            }
        }
    }
}

fn firm_reviews(firm: &Firm) -> impl Iterator<Item = &Review> {
    firm.offices.iter().flat_map(|o| &o.reviews)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Value desc, sample count desc, firm name asc.
fn rank_order(a: (f64, usize, &str), b: (f64, usize, &str)) -> Ordering {
    b.0.total_cmp(&a.0)
        .then_with(|| b.1.cmp(&a.1))
        .then_with(|| a.2.cmp(b.2))
}

fn rankings(firms: &[Firm], stats: &[FirmStats]) -> Rankings {
    let mut by_rating: Vec<RatingRankEntry> = firms
        .iter()
        .zip(stats)
        .filter(|(_, s)| s.ratings_n >= RANKING_MIN_SAMPLES)
        .filter_map(|(f, s)| {
            s.avg_rating_5.map(|avg| RatingRankEntry {
                firm_id: f.firm_id.clone(),
                firm_name: f.firm_name.clone(),
                avg_rating_5: avg,
                ratings_n: s.ratings_n,
                reviews_n: s.reviews_n,
            })
        })
        .collect();
    by_rating.sort_by(|a, b| {
        rank_order(
            (a.avg_rating_5, a.ratings_n, a.firm_name.as_str()),
            (b.avg_rating_5, b.ratings_n, b.firm_name.as_str()),
        )
    });
    by_rating.truncate(RANKING_TOP);
    for entry in &mut by_rating {
        entry.avg_rating_5 = round3(entry.avg_rating_5);
    }

    let mut by_sentiment: Vec<SentimentRankEntry> = firms
        .iter()
        .zip(stats)
        .filter(|(_, s)| s.scored_n >= RANKING_MIN_SAMPLES)
        .filter_map(|(f, s)| {
            s.avg_sentiment.map(|avg| SentimentRankEntry {
                firm_id: f.firm_id.clone(),
                firm_name: f.firm_name.clone(),
                avg_sentiment_score: avg,
                scored_n: s.scored_n,
                reviews_n: s.reviews_n,
            })
        })
        .collect();
    by_sentiment.sort_by(|a, b| {
        rank_order(
            (a.avg_sentiment_score, a.scored_n, a.firm_name.as_str()),
            (b.avg_sentiment_score, b.scored_n, b.firm_name.as_str()),
        )
    });
    by_sentiment.truncate(RANKING_TOP);
    for entry in &mut by_sentiment {
        entry.avg_sentiment_score = round3(entry.avg_sentiment_score);
    }

    Rankings {
        by_avg_rating_5: by_rating,
        by_avg_sentiment_score: by_sentiment,
    }
}

fn coverage(firms: &[Firm], quality: &DatasetQuality) -> Coverage {
    let reviews = || firms.iter().flat_map(firm_reviews);
    let platforms: BTreeSet<String> = reviews()
        .filter_map(|r| r.platform.as_deref().filter(|p| !p.is_empty()))
        .map(str::to_string)
        .collect();
    let cities: BTreeSet<String> = firms
        .iter()
        .flat_map(|f| &f.offices)
        .filter_map(|o| o.city.as_deref().filter(|c| !c.is_empty()))
        .map(str::to_string)
        .collect();

    Coverage {
        firms_total: quality.firms_collected,
        reviews_total: quality.reviews_collected,
        reviews_with_text: reviews().filter(|r| r.has_text()).count(),
        reviews_with_rating: reviews().filter(|r| has_rating(r)).count(),
        platforms_used: platforms.into_iter().collect(),
        cities_covered: cities.into_iter().collect(),
    }
}

/// Build the analysis section for a merged firm list.
///
/// `skipped_sources` are `"<file>: <error>"` notes for inputs that failed to
/// parse; each becomes a limitation line.
pub fn build_analysis(
    firms: &[Firm],
    quality: &DatasetQuality,
    skipped_sources: &[String],
) -> Analysis {
    let mut overall_pos = CategoryCounter::default();
    let mut overall_neg = CategoryCounter::default();
    let mut sentiment_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut themes_by_firm = Vec::new();
    let mut stats = Vec::with_capacity(firms.len());

    for firm in firms {
        let mut positive = Polarity::default();
        let mut negative = Polarity::default();

        for review in firm_reviews(firm) {
            let label = review.label();
            *sentiment_distribution
                .entry(label.as_str().to_string())
                .or_default() += 1;

            match label {
                SentimentLabel::Positive => {
                    let categories = categorize(review.review_text.as_deref().unwrap_or(""));
                    positive.absorb(review, &categories, &mut overall_pos);
                }
                SentimentLabel::Negative => {
                    let categories = categorize(review.review_text.as_deref().unwrap_or(""));
                    negative.absorb(review, &categories, &mut overall_neg);
                }
                _ => {}
            }
        }

        if !positive.categories.is_empty() || !negative.categories.is_empty() {
            themes_by_firm.push(ThemeSummary {
                firm_id: firm.firm_id.clone(),
                top_positive_categories: positive.categories.top(FIRM_THEME_LIMIT),
                top_negative_categories: negative.categories.top(FIRM_THEME_LIMIT),
                representative_quotes_positive: positive.quotes,
                representative_quotes_negative: negative.quotes,
            });
        }

        stats.push(stats_for_reviews(firm_reviews(firm)));
    }

    let limitations = skipped_sources
        .iter()
        .map(|s| format!("Skipped invalid JSON input: {}", s))
        .chain(std::iter::once(LOW_SAMPLE_LIMITATION.to_string()))
        .collect();

    Analysis {
        coverage: Some(coverage(firms, quality)),
        rankings: Some(rankings(firms, &stats)),
        sentiment_distribution,
        themes_overall: OverallThemes {
            top_positive_categories: overall_pos.top(OVERALL_THEME_LIMIT),
            top_negative_categories: overall_neg.top(OVERALL_THEME_LIMIT),
        },
        themes_by_firm,
        limitations,
    }
}
