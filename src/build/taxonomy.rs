//! Fixed theme taxonomy and quote excerpts.
//!
//! Categories are matched by keyword stem against normalized review text. The
//! taxonomy order decides which categories survive the per-review cap.

use crate::classify::normalize_text;

/// At most this many categories are assigned to one review.
pub const MAX_CATEGORIES_PER_REVIEW: usize = 3;

/// Words kept in a representative quote.
pub const EXCERPT_WORDS: usize = 25;

pub const TAXONOMY: &[(&str, &[&str])] = &[
    (
        "communication_responsiveness",
        &["komunik", "neodpov", "email", "telefon", "call", "reply", "respond", "dovolat"],
    ),
    (
        "professionalism_competence",
        &[
            "profesion",
            "expert",
            "kvalit",
            "professionals",
            "excellent",
            "brilliant",
            "neprofesion",
            "lajd",
        ],
    ),
    (
        "ethics_trust",
        &[
            "etika",
            "ethic",
            "nefér",
            "podvod",
            "lži",
            "lies",
            "slander",
            "dirty",
            "zneuž",
            "zatajuj",
            "neserióz",
            "without ethics",
        ],
    ),
    (
        "fees_value_transparency",
        &[
            "cena", "náklad", "cost", "fees", "price", "záloha", "prachy", "peníze", "value",
            "finance", "majetek",
        ],
    ),
    (
        "speed_timeliness",
        &["rychl", "fast", "delay", "zpožd", "roky", "late", "pozd", "nikam se nepohnul"],
    ),
    (
        "outcome_effectiveness",
        &[
            "vyřeš",
            "solution",
            "help",
            "pomoc",
            "nepomoh",
            "result",
            "success",
            "spravedlnost",
            "pokrok",
        ],
    ),
    (
        "empathy_human_approach",
        &["přístup", "human", "arrog", "arogant", "poniž", "zesměš", "unpleasant", "reception"],
    ),
    (
        "enforcement_debt_mass_mail",
        &[
            "dluh",
            "vymáh",
            "exekuc",
            "pojist",
            "předžalob",
            "automatiz",
            "picrights",
            "copyright",
            "mass",
            "threat",
        ],
    ),
];

/// Categories whose keywords occur in `text`, in taxonomy order, capped.
///
/// # Examples
///
/// ```
/// use firmrank::build::categorize;
///
/// assert_eq!(
///     categorize("Rychlá komunikace, skvělý přístup"),
///     vec!["communication_responsiveness", "speed_timeliness", "empathy_human_approach"]
/// );
/// assert!(categorize("   ").is_empty());
/// ```
pub fn categorize(text: &str) -> Vec<&'static str> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return Vec::new();
    }
    TAXONOMY
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| normalized.contains(kw)))
        .map(|(category, _)| *category)
        .take(MAX_CATEGORIES_PER_REVIEW)
        .collect()
}

/// First `max_words` whitespace-separated words, or `None` for blank text.
pub fn excerpt(text: &str, max_words: usize) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().take(max_words).collect();
    (!words.is_empty()).then(|| words.join(" "))
}
