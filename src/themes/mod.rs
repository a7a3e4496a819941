//! Lookup of precomputed theme and quote summaries.

pub mod lookup;

pub use lookup::{top_categories, ThemeIndex, OVERALL_THEME_LIMIT};
