//! Keyed access to theme summaries.
//!
//! Summaries are opaque reference data produced by the build step. This module
//! indexes them by `firm_id` once per snapshot load and never recomputes them
//! from review text.

use crate::core::{Analysis, CategoryCount, OverallThemes, ThemeSummary};
use std::collections::HashMap;

/// Number of overall categories shown per polarity.
pub const OVERALL_THEME_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeIndex {
    by_firm: HashMap<String, ThemeSummary>,
    overall: OverallThemes,
}

impl ThemeIndex {
    /// Index the analysis section. A repeated `firm_id` keeps the last entry.
    pub fn build(analysis: &Analysis) -> Self {
        let by_firm = analysis
            .themes_by_firm
            .iter()
            .map(|summary| (summary.firm_id.clone(), summary.clone()))
            .collect();

        Self {
            by_firm,
            overall: analysis.themes_overall.clone(),
        }
    }

    /// Summary for a firm; `None` means "no summary", not an error.
    pub fn lookup(&self, firm_id: &str) -> Option<&ThemeSummary> {
        self.by_firm.get(firm_id)
    }

    pub fn len(&self) -> usize {
        self.by_firm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_firm.is_empty()
    }

    /// Overall themes, top `limit` categories by count per polarity.
    pub fn overall_top(&self, limit: usize) -> OverallThemes {
        OverallThemes {
            top_positive_categories: top_categories(&self.overall.top_positive_categories, limit),
            top_negative_categories: top_categories(&self.overall.top_negative_categories, limit),
        }
    }
}

/// Highest counts first; equal counts keep their input order.
pub fn top_categories(categories: &[CategoryCount], limit: usize) -> Vec<CategoryCount> {
    let mut sorted = categories.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    sorted.truncate(limit);
    sorted
}
