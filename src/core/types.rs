//! Firm, office and review records as they appear in the merged snapshot.
//!
//! These types mirror the JSON document produced by the build step. Fields that
//! upstream sources frequently omit are optional, and the rating pair is kept as
//! raw JSON so that non-numeric inputs survive a load/save round trip.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A law firm and every office merged under its `firm_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firm {
    pub firm_id: String,
    /// Empty when the producer knew the firm only by its website
    #[serde(default, deserialize_with = "null_as_default")]
    pub firm_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offices: Vec<Office>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_summary: Option<CollectionSummary>,
}

impl Firm {
    /// Total number of reviews across all offices.
    pub fn review_count(&self) -> usize {
        self.offices.iter().map(|o| o.reviews.len()).sum()
    }
}

/// A branch location; the direct container of reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Office {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub platform_profiles: Vec<PlatformProfile>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// A single rating/text record from one external platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub review_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_scale: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub sentiment_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_label: Option<SentimentLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl Review {
    /// Review text with surrounding whitespace removed, if any remains.
    pub fn text(&self) -> Option<&str> {
        self.review_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn has_text(&self) -> bool {
        self.text().is_some()
    }

    /// Label with absent values folded into `Unknown`.
    pub fn label(&self) -> SentimentLabel {
        self.sentiment_label.unwrap_or(SentimentLabel::Unknown)
    }
}

/// Fixed sentiment label set. Unrecognized strings become `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
    Mixed,
    #[serde(other)]
    Unknown,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Mixed => "mixed",
            SentimentLabel::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub reviews_collected_total: usize,
    #[serde(default)]
    pub platforms_used: Vec<String>,
    #[serde(default)]
    pub cities_covered: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Explicit `null` reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts any JSON value; only numbers are kept.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}

/// Accepts string or numeric ids; anything else is absent.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn review_deserializes_with_missing_fields() {
        let review: Review = serde_json::from_value(json!({})).unwrap();
        assert_eq!(review, Review::default());
    }

    #[test]
    fn non_numeric_sentiment_score_is_absent() {
        let review: Review =
            serde_json::from_value(json!({"sentiment_score": "0.7"})).unwrap();
        assert_eq!(review.sentiment_score, None);

        let review: Review = serde_json::from_value(json!({"sentiment_score": 0.7})).unwrap();
        assert_eq!(review.sentiment_score, Some(0.7));
    }

    #[test]
    fn null_firm_name_and_lists_read_as_empty() {
        let firm: Firm = serde_json::from_value(json!({
            "firm_id": "ak-x-cz",
            "firm_name": null,
            "website": "https://ak-x.cz",
            "offices": [{"city": "Praha", "platform_profiles": null, "reviews": null}]
        }))
        .unwrap();
        assert_eq!(firm.firm_name, "");
        assert_eq!(firm.offices.len(), 1);
        assert!(firm.offices[0].reviews.is_empty());
        assert!(firm.offices[0].platform_profiles.is_empty());
    }

    #[test]
    fn numeric_review_id_becomes_string() {
        let review: Review = serde_json::from_value(json!({"review_id": 42})).unwrap();
        assert_eq!(review.review_id.as_deref(), Some("42"));
    }

    #[test]
    fn unknown_sentiment_label_maps_to_unknown() {
        let review: Review =
            serde_json::from_value(json!({"sentiment_label": "ecstatic"})).unwrap();
        assert_eq!(review.sentiment_label, Some(SentimentLabel::Unknown));
        assert_eq!(Review::default().label(), SentimentLabel::Unknown);
    }

    #[test]
    fn rating_pair_keeps_raw_values() {
        let review: Review =
            serde_json::from_value(json!({"rating_value": "five", "rating_scale": 5})).unwrap();
        assert_eq!(review.rating_value, Some(json!("five")));
        assert_eq!(review.rating_scale, Some(json!(5)));
    }

    #[test]
    fn whitespace_only_text_is_not_text() {
        let review = Review {
            review_text: Some("   \n".into()),
            ..Review::default()
        };
        assert!(!review.has_text());
        assert_eq!(review.text(), None);
    }

    #[test]
    fn firm_review_count_sums_offices() {
        let firm = Firm {
            firm_id: "a".into(),
            firm_name: "A".into(),
            website: None,
            offices: vec![
                Office {
                    reviews: vec![Review::default(), Review::default()],
                    ..Office::default()
                },
                Office {
                    reviews: vec![Review::default()],
                    ..Office::default()
                },
            ],
            collection_summary: None,
        };
        assert_eq!(firm.review_count(), 3);
    }
}
