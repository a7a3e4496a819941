//! Identity keys used when merging sources.

use super::platform::normalize_platform;
use crate::classify::normalize_text;
use crate::core::Review;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use sha2::{Digest, Sha256};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static NON_ALPHANUMERIC_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap());
static URL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").unwrap());

/// ASCII slug: diacritics stripped, non-alphanumeric runs become `-`.
///
/// # Examples
///
/// ```
/// use firmrank::build::slugify;
///
/// assert_eq!(slugify("Advokátní kancelář Dvořák"), "advokatni-kancelar-dvorak");
/// assert_eq!(slugify("***"), "unknown");
/// ```
pub fn slugify(text: &str) -> String {
    let stripped: String = text.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    let slug = NON_ALPHANUMERIC_RUN
        .replace_all(&stripped, "-")
        .trim_matches('-')
        .to_lowercase();
    if slug.is_empty() {
        "unknown".to_string()
    } else {
        slug
    }
}

/// Host part of a website, scheme removed.
pub fn website_host(website: &str) -> &str {
    let rest = URL_SCHEME
        .find(website)
        .map_or(website, |m| &website[m.end()..]);
    rest.split('/').next().unwrap_or(rest)
}

/// `w:<website>` when a website is known, else `n:<name>`.
pub fn firm_key(website: Option<&str>, firm_name: Option<&str>) -> String {
    let website = website.unwrap_or("").trim().to_lowercase();
    if !website.is_empty() {
        return format!("w:{}", website);
    }
    format!("n:{}", normalize_text(firm_name.unwrap_or("")))
}

pub fn office_key(city: Option<&str>, address: Option<&str>) -> String {
    let city = city.unwrap_or("").trim().to_lowercase();
    let address = address.unwrap_or("").trim().to_lowercase();
    match (city.is_empty(), address.is_empty()) {
        (false, false) => format!("{}|{}", city, address),
        (false, true) => city,
        (true, false) => format!("addr:{}", address),
        (true, true) => "unknown".to_string(),
    }
}

fn sha256_hex(text: &str) -> String {
    Sha256::digest(text.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn raw_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn non_empty(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Key under which duplicate reviews collapse.
///
/// A source review id identifies a review on its platform. Without one the
/// key combines author, dates, the raw rating pair and hashes of the
/// normalized text and URL.
pub fn review_dedupe_key(review: &Review) -> String {
    let platform = normalize_platform(review.platform.as_deref());
    if let Some(id) = review.review_id.as_deref().filter(|id| !id.is_empty()) {
        return format!("{}|rid:{}", platform, id);
    }

    let author = normalize_text(review.author_name.as_deref().unwrap_or(""));
    let text = normalize_text(review.review_text.as_deref().unwrap_or(""));
    let url = normalize_text(review.source_url.as_deref().unwrap_or(""));
    let text_hash = if text.is_empty() {
        "no_text".to_string()
    } else {
        sha256_hex(&text)
    };
    let url_hash = if url.is_empty() {
        "no_url".to_string()
    } else {
        sha256_hex(&url)
    };

    format!(
        "{}|a:{}|dp:{}|dr:{}|r:{}/{}|t:{}|u:{}",
        platform,
        author,
        review.date_published.as_deref().unwrap_or(""),
        review.date_raw.as_deref().unwrap_or(""),
        raw_value(review.rating_value.as_ref()),
        raw_value(review.rating_scale.as_ref()),
        text_hash,
        url_hash
    )
}

/// How much a review record carries; higher replaces lower on collision.
pub fn completeness_score(review: &Review) -> u32 {
    let mut score = 0;
    if non_empty(review.review_id.as_deref()) {
        score += 4;
    }
    if non_empty(review.date_published.as_deref()) {
        score += 2;
    }
    let present = |v: &Option<Value>| matches!(v, Some(v) if !v.is_null());
    if present(&review.rating_value) && present(&review.rating_scale) {
        score += 2;
    }
    if review.has_text() {
        score += 2;
    }
    if non_empty(review.author_name.as_deref()) {
        score += 1;
    }
    if non_empty(review.source_url.as_deref()) {
        score += 1;
    }
    score
}
