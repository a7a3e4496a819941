//! Rating normalization onto a common 0-5 scale.
//!
//! Platforms report ratings on different scales (5 stars, 10 points, 100
//! percent). A rating exists only when both halves of the pair are numeric and
//! the scale is positive. The result is not clamped: a value above its scale
//! normalizes to more than 5.

use crate::core::Review;
use serde_json::Value;

/// Upper bound of the canonical scale.
pub const CANONICAL_SCALE: f64 = 5.0;

/// Normalize a raw `(value, scale)` pair.
///
/// Returns `None` when either half is not a JSON number or the scale is not
/// strictly positive.
///
/// # Examples
///
/// ```
/// use firmrank::scoring::normalize_pair;
/// use serde_json::json;
///
/// assert_eq!(normalize_pair(Some(&json!(8)), Some(&json!(10))), Some(4.0));
/// assert_eq!(normalize_pair(Some(&json!("8")), Some(&json!(10))), None);
/// assert_eq!(normalize_pair(Some(&json!(3)), Some(&json!(0))), None);
/// ```
pub fn normalize_pair(value: Option<&Value>, scale: Option<&Value>) -> Option<f64> {
    let value = value?.as_f64()?;
    let scale = scale?.as_f64()?;
    normalize_numeric(value, scale)
}

/// Normalize an already numeric pair.
#[inline]
pub fn normalize_numeric(value: f64, scale: f64) -> Option<f64> {
    if scale > 0.0 && value.is_finite() && scale.is_finite() {
        Some((value / scale) * CANONICAL_SCALE)
    } else {
        None
    }
}

/// Normalized rating of a review, if it carries a usable rating pair.
pub fn rating_to_5(review: &Review) -> Option<f64> {
    normalize_pair(review.rating_value.as_ref(), review.rating_scale.as_ref())
}

/// Whether the review contributes to rating statistics.
#[inline]
pub fn has_rating(review: &Review) -> bool {
    rating_to_5(review).is_some()
}
