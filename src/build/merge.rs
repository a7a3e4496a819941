//! Merge source datasets into one firm list.
//!
//! Firms, offices and reviews keep first-seen order. A review replaced by a
//! more complete duplicate keeps the slot of the record it replaced.

use super::keys::{
    completeness_score, firm_key, office_key, review_dedupe_key, slugify, website_host,
};
use super::platform::normalize_platform;
use super::sources::SourceDataset;
use crate::core::{CollectionSummary, DatasetQuality, Firm, Office, PlatformProfile, Review};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::warn;

/// Firms with fewer merged reviews are listed in the dataset quality block.
pub const REVIEWS_PER_FIRM_MIN: usize = 10;

pub const MERGE_LIMITATION: &str =
    "Merged from provided JSON sources; public review availability varies widely by firm.";

const NO_REVIEWS_WARNING: &str = "No reviews present in merged sources.";

/// Insertion-ordered map keyed by merge key.
#[derive(Debug)]
struct Keyed<T> {
    index: HashMap<String, usize>,
    items: Vec<T>,
}

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            items: Vec::new(),
        }
    }
}

impl<T> Keyed<T> {
    fn get_or_insert_with(&mut self, key: String, make: impl FnOnce() -> T) -> &mut T {
        let items = &mut self.items;
        let slot = *self.index.entry(key).or_insert_with(|| {
            items.push(make());
            items.len() - 1
        });
        &mut self.items[slot]
    }
}

#[derive(Debug, Default)]
struct FirmAcc {
    firm_name: Option<String>,
    website: Option<String>,
    firm_ids: BTreeSet<String>,
    offices: Keyed<OfficeAcc>,
}

#[derive(Debug, Default)]
struct OfficeAcc {
    city: Option<String>,
    address: Option<String>,
    profiles: Vec<PlatformProfile>,
    reviews: Keyed<Review>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn fill_if_missing(slot: &mut Option<String>, value: &Option<String>) {
    if present(slot).is_none() {
        if let Some(v) = present(value) {
            *slot = Some(v.to_string());
        }
    }
}

impl FirmAcc {
    fn absorb_identity(
        &mut self,
        name: &Option<String>,
        website: &Option<String>,
        id: &Option<String>,
    ) {
        if let Some(name) = present(name) {
            let longer = present(&self.firm_name)
                .is_none_or(|current| name.chars().count() > current.chars().count());
            if longer {
                self.firm_name = Some(name.to_string());
            }
        }
        fill_if_missing(&mut self.website, website);
        if let Some(id) = present(id) {
            self.firm_ids.insert(id.to_string());
        }
    }

    /// Shortest collected id, then lexicographically smallest; else a slug.
    fn canonical_id(&self) -> String {
        let shortest = self
            .firm_ids
            .iter()
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        match shortest {
            Some(id) => id.clone(),
            None => match present(&self.website) {
                Some(website) => slugify(website_host(website)),
                None => slugify(present(&self.firm_name).unwrap_or("unknown")),
            },
        }
    }
}

impl OfficeAcc {
    fn absorb_review(&mut self, review: &Review) {
        let mut review = review.clone();
        review.platform = Some(normalize_platform(review.platform.as_deref()).to_string());
        let key = review_dedupe_key(&review);
        let score = completeness_score(&review);

        let mut inserted = false;
        let slot = self.reviews.get_or_insert_with(key, || {
            inserted = true;
            review.clone()
        });
        if !inserted && score > completeness_score(slot) {
            *slot = review;
        }
    }

    fn into_office(self) -> Office {
        let mut seen = HashSet::new();
        let platform_profiles = self
            .profiles
            .into_iter()
            .filter(|p| seen.insert((p.platform.clone(), p.source_url.clone())))
            .collect();
        Office {
            city: self.city,
            address: self.address,
            platform_profiles,
            reviews: self.reviews.items,
        }
    }
}

fn collection_summary(offices: &[Office]) -> CollectionSummary {
    let reviews_collected_total = offices.iter().map(|o| o.reviews.len()).sum();
    let platforms_used: BTreeSet<String> = offices
        .iter()
        .flat_map(|o| &o.reviews)
        .filter_map(|r| present(&r.platform).map(str::to_string))
        .collect();
    let cities_covered: BTreeSet<String> = offices
        .iter()
        .filter_map(|o| present(&o.city).map(str::to_string))
        .collect();
    let warnings = if reviews_collected_total == 0 {
        vec![NO_REVIEWS_WARNING.to_string()]
    } else {
        Vec::new()
    };

    CollectionSummary {
        reviews_collected_total,
        platforms_used: platforms_used.into_iter().collect(),
        cities_covered: cities_covered.into_iter().collect(),
        warnings,
    }
}

/// Merge firms across datasets and summarise the result.
pub fn merge_datasets(datasets: &[(String, SourceDataset)]) -> (Vec<Firm>, DatasetQuality) {
    let mut firms: Keyed<FirmAcc> = Keyed::default();

    for (_, dataset) in datasets {
        for source in &dataset.firms {
            let key = firm_key(source.website.as_deref(), source.firm_name.as_deref());
            let firm = firms.get_or_insert_with(key, FirmAcc::default);
            firm.absorb_identity(&source.firm_name, &source.website, &source.firm_id);

            for source_office in &source.offices {
                let key = office_key(
                    source_office.city.as_deref(),
                    source_office.address.as_deref(),
                );
                let office = firm.offices.get_or_insert_with(key, OfficeAcc::default);
                fill_if_missing(&mut office.city, &source_office.city);
                fill_if_missing(&mut office.address, &source_office.address);

                office.profiles.extend(
                    source_office
                        .platform_profiles
                        .iter()
                        .filter(|p| present(&p.source_url).is_some())
                        .map(|p| PlatformProfile {
                            platform: normalize_platform(p.platform.as_deref()).to_string(),
                            source_url: p.source_url.clone(),
                        }),
                );

                for review in &source_office.reviews {
                    office.absorb_review(review);
                }
            }
        }
    }

    let mut taken_ids = HashSet::new();
    let merged: Vec<Firm> = firms
        .items
        .into_iter()
        .map(|acc| {
            let firm_id = unique_id(acc.canonical_id(), &mut taken_ids);
            let offices: Vec<Office> = acc
                .offices
                .items
                .into_iter()
                .map(OfficeAcc::into_office)
                .collect();
            Firm {
                firm_id,
                firm_name: acc.firm_name.unwrap_or_default(),
                website: acc.website,
                collection_summary: Some(collection_summary(&offices)),
                offices,
            }
        })
        .collect();

    let quality = dataset_quality(&merged);
    (merged, quality)
}

/// Suffix `-2`, `-3`, ... until the id is unused, then claim it.
fn unique_id(candidate: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(candidate.clone()) {
        return candidate;
    }
    let unique = (2..)
        .map(|n| format!("{candidate}-{n}"))
        .find(|id| !taken.contains(id))
        .unwrap_or_default();
    warn!(firm_id = %candidate, renamed = %unique, "Duplicate firm id after merge");
    taken.insert(unique.clone());
    unique
}

pub fn dataset_quality(firms: &[Firm]) -> DatasetQuality {
    DatasetQuality {
        firms_collected: firms.len(),
        reviews_collected: firms.iter().map(Firm::review_count).sum(),
        firms_below_min_reviews: firms
            .iter()
            .filter(|f| f.review_count() < REVIEWS_PER_FIRM_MIN)
            .map(|f| f.firm_id.clone())
            .collect(),
        known_limitations: vec![MERGE_LIMITATION.to_string()],
    }
}
