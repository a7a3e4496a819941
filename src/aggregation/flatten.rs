//! Flattening of the firm → offices → reviews hierarchy.
//!
//! Every consumer of the dashboard works on a per-firm view: which cities the
//! firm operates in, which platforms its reviews came from, and one sequence of
//! reviews. Reviews are borrowed from the snapshot and keep a back-reference to
//! the firm and office they were collected under. No review deduplication
//! happens here; the merged dataset is trusted to be canonical.

use crate::core::{Firm, Review};
use std::collections::BTreeSet;

/// Read-only per-firm projection of the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatFirm<'a> {
    pub firm_id: &'a str,
    pub firm_name: &'a str,
    pub website: Option<&'a str>,
    /// Distinct office cities, sorted
    pub cities: BTreeSet<&'a str>,
    /// Distinct review platforms, sorted
    pub platforms: BTreeSet<&'a str>,
    /// Reviews in office order, then in-office order
    pub reviews: Vec<FlatReview<'a>>,
}

/// A review together with the firm and office that own it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatReview<'a> {
    pub firm_id: &'a str,
    pub office_index: usize,
    pub review: &'a Review,
}

impl<'a> std::ops::Deref for FlatReview<'a> {
    type Target = Review;

    fn deref(&self) -> &Self::Target {
        self.review
    }
}

/// Flatten one firm.
pub fn flatten_firm(firm: &Firm) -> FlatFirm<'_> {
    let mut cities = BTreeSet::new();
    let mut platforms = BTreeSet::new();
    let mut reviews = Vec::with_capacity(firm.review_count());

    for (office_index, office) in firm.offices.iter().enumerate() {
        if let Some(city) = non_empty(office.city.as_deref()) {
            cities.insert(city);
        }
        for review in &office.reviews {
            if let Some(platform) = non_empty(review.platform.as_deref()) {
                platforms.insert(platform);
            }
            reviews.push(FlatReview {
                firm_id: &firm.firm_id,
                office_index,
                review,
            });
        }
    }

    FlatFirm {
        firm_id: &firm.firm_id,
        firm_name: &firm.firm_name,
        website: non_empty(firm.website.as_deref()),
        cities,
        platforms,
        reviews,
    }
}

/// Flatten every firm, preserving dataset order.
pub fn flatten_firms(firms: &[Firm]) -> Vec<FlatFirm<'_>> {
    firms.iter().map(flatten_firm).collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
