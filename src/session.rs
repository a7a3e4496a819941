//! A loaded snapshot and everything derived from it once per load.
//!
//! The snapshot is immutable for the life of the session. Every call to
//! [`Session::dashboard`] re-flattens the firms and re-runs the full pipeline,
//! so no derived state can go stale between filter changes.

use crate::aggregation::{compute_stats, flatten_firm, flatten_firms};
use crate::classify::EnforcementClassifier;
use crate::core::{Error, Firm, Result, Snapshot};
use crate::io::load_snapshot;
use crate::priority::{prepare_view, FilterConfig};
use crate::report::{DashboardReport, FirmDetail};
use crate::themes::{ThemeIndex, OVERALL_THEME_LIMIT};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Session {
    snapshot: Snapshot,
    themes: ThemeIndex,
    classifier: EnforcementClassifier,
}

impl Session {
    pub fn new(snapshot: Snapshot, classifier: EnforcementClassifier) -> Self {
        let themes = ThemeIndex::build(&snapshot.analysis);
        Self {
            snapshot,
            themes,
            classifier,
        }
    }

    /// Load a snapshot file. Failure here is terminal for the session.
    pub fn load(path: &Path, classifier: EnforcementClassifier) -> Result<Self> {
        Ok(Self::new(load_snapshot(path)?, classifier))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn themes(&self) -> &ThemeIndex {
        &self.themes
    }

    pub fn classifier(&self) -> &EnforcementClassifier {
        &self.classifier
    }

    pub fn firms(&self) -> &[Firm] {
        &self.snapshot.merged_dataset.firms
    }

    /// Run the full filter and ranking pipeline.
    pub fn dashboard(&self, config: &FilterConfig) -> DashboardReport {
        let flat = flatten_firms(self.firms());
        let view = prepare_view(&flat, config, &self.classifier);
        DashboardReport {
            view,
            overall_themes: self.themes.overall_top(OVERALL_THEME_LIMIT),
            limitations: self.snapshot.analysis.limitations.clone(),
        }
    }

    /// Detail card for one firm under the review-level filters.
    pub fn firm_detail(&self, firm_id: &str, config: &FilterConfig) -> Result<FirmDetail> {
        let firm = self
            .firms()
            .iter()
            .find(|f| f.firm_id == firm_id)
            .ok_or_else(|| Error::FirmNotFound(firm_id.to_string()))?;
        let flat = flatten_firm(firm);
        let stats = compute_stats(&flat, config, &self.classifier);

        Ok(FirmDetail {
            firm_id: firm.firm_id.clone(),
            firm_name: firm.firm_name.clone(),
            website: flat.website.map(str::to_string),
            cities: flat.cities.iter().map(|c| c.to_string()).collect(),
            platforms: flat.platforms.iter().map(|p| p.to_string()).collect(),
            offices_n: firm.offices.len(),
            reviews_total: flat.reviews.len(),
            stats,
            config: config.clone(),
            themes: self.themes.lookup(firm_id).cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Analysis, MergedDataset, Office, Review, ThemeSummary};
    use serde_json::json;

    fn session() -> Session {
        let review = Review {
            platform: Some("Google Maps".into()),
            review_text: Some("great".into()),
            rating_value: Some(json!(5)),
            rating_scale: Some(json!(5)),
            ..Review::default()
        };
        let snapshot = Snapshot {
            merged_dataset: MergedDataset {
                firms: vec![
                    Firm {
                        firm_id: "alfa".into(),
                        firm_name: "Alfa Legal".into(),
                        website: None,
                        offices: vec![Office {
                            city: Some("Praha".into()),
                            reviews: vec![review],
                            ..Office::default()
                        }],
                        collection_summary: None,
                    },
                    Firm {
                        firm_id: "beta".into(),
                        firm_name: "Beta & Partners".into(),
                        website: None,
                        offices: vec![],
                        collection_summary: None,
                    },
                ],
                ..MergedDataset::default()
            },
            analysis: Analysis {
                themes_by_firm: vec![ThemeSummary {
                    firm_id: "alfa".into(),
                    ..ThemeSummary::default()
                }],
                ..Analysis::default()
            },
        };
        Session::new(snapshot, EnforcementClassifier::default())
    }

    #[test]
    fn dashboard_runs_full_pipeline() {
        let report = session().dashboard(&FilterConfig::default().with_min_n(1));
        assert_eq!(report.view.totals.firms, 2);
        assert_eq!(report.view.firms[0].firm_id, "alfa");
        assert_eq!(report.view.ranking.entries.len(), 1);
    }

    #[test]
    fn firm_detail_includes_themes_when_present() {
        let s = session();
        let detail = s.firm_detail("alfa", &FilterConfig::default()).unwrap();
        assert_eq!(detail.cities, vec!["Praha"]);
        assert_eq!(detail.stats.avg_rating_5, Some(5.0));
        assert!(detail.themes.is_some());

        let detail = s.firm_detail("beta", &FilterConfig::default()).unwrap();
        assert!(detail.themes.is_none());
        assert_eq!(detail.stats.avg_rating_5, None);
    }

    #[test]
    fn unknown_firm_is_an_error() {
        let err = session()
            .firm_detail("gamma", &FilterConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::FirmNotFound(id) if id == "gamma"));
    }
}
