pub mod enforcement;

pub use enforcement::{normalize_text, EnforcementClassifier, DEFAULT_ENFORCEMENT_KEYWORDS};
