//! Canonical platform names.

pub const GOOGLE_MAPS: &str = "Google Maps";
pub const FIRMY_CZ: &str = "Firmy.cz";
pub const FACEBOOK: &str = "Facebook";
pub const OTHER: &str = "Other";

/// Collection priority, highest first.
pub const PLATFORMS_PRIORITY: &[&str] = &[GOOGLE_MAPS, FIRMY_CZ, FACEBOOK, OTHER];

/// Map a free-form platform label onto one of the canonical names.
///
/// # Examples
///
/// ```
/// use firmrank::build::normalize_platform;
///
/// assert_eq!(normalize_platform(Some("google_maps")), "Google Maps");
/// assert_eq!(normalize_platform(Some("www.firmy.cz")), "Firmy.cz");
/// assert_eq!(normalize_platform(None), "Other");
/// ```
pub fn normalize_platform(raw: Option<&str>) -> &'static str {
    let Some(raw) = raw.filter(|p| !p.is_empty()) else {
        return OTHER;
    };
    let lower = raw.to_lowercase();
    if lower.contains("google") {
        GOOGLE_MAPS
    } else if lower.contains("firmy") {
        FIRMY_CZ
    } else if lower.contains("facebook") {
        FACEBOOK
    } else {
        OTHER
    }
}
