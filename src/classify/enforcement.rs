//! Keyword heuristic for enforcement and mass-claim reviews.
//!
//! Some reviews are reactions to debt collection, copyright-claim mailings or
//! automated legal threats rather than genuine client experiences. This module
//! flags them by substring match against a keyword set so that the dashboard
//! can optionally exclude them. It favours recall; false positives are the
//! accepted cost of an opt-in filter.

use serde::{Deserialize, Serialize};

/// Keywords used when no configuration overrides them.
///
/// Stems are matched as substrings of the normalized text, so `exekuc`
/// catches `exekuce`, `exekuční`, `exekutor` and so on.
pub const DEFAULT_ENFORCEMENT_KEYWORDS: &[&str] = &[
    "dluh",
    "vymáh",
    "exekuc",
    "exekut",
    "pojist",
    "předžalob",
    "automatiz",
    "picrights",
    "copyright",
    "mass",
    "threat",
    "debt",
    "collection",
    "enforcement",
];

/// Trim, collapse internal whitespace and lowercase.
///
/// # Examples
///
/// ```
/// use firmrank::classify::normalize_text;
///
/// assert_eq!(normalize_text("  Debt\n\tCOLLECTION  "), "debt collection");
/// ```
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Substring classifier over an injectable keyword set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementClassifier {
    keywords: Vec<String>,
}

impl Default for EnforcementClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_ENFORCEMENT_KEYWORDS.iter().copied())
    }
}

impl EnforcementClassifier {
    /// Build a classifier from arbitrary keywords.
    ///
    /// Keywords are normalized the same way as review text. Empty keywords are
    /// dropped, since they would match every review.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: Vec::new(),
        }
        .with_extra_keywords(keywords)
    }

    /// Extend the keyword set.
    pub fn with_extra_keywords<I, S>(self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords = self.keywords;
        for keyword in extra {
            let keyword = normalize_text(keyword.as_ref());
            if !keyword.is_empty() && !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether the text contains any enforcement keyword.
    ///
    /// Empty or whitespace-only text is never flagged.
    pub fn is_enforcement(&self, text: &str) -> bool {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return false;
        }
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }

    /// Classify optional review text; absent text is never flagged.
    pub fn is_enforcement_opt(&self, text: Option<&str>) -> bool {
        text.is_some_and(|t| self.is_enforcement(t))
    }
}
