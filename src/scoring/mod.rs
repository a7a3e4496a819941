//! Rating scale normalization.

pub mod rating;

pub use rating::{has_rating, normalize_numeric, normalize_pair, rating_to_5, CANONICAL_SCALE};
