//! Value parsing helpers for unit file entries.

/// Prefix marking an asset from the game's shared resources.
pub const SHARED_PREFIX: &str = "SHARED:";

/// Image values that mean "no image".
const NO_IMAGE_SENTINELS: &[&str] = &["none", "blank.png"];

/// Parse an integer, accepting decimal notation truncated toward zero.
///
/// `"12"` → 12, `"-3"` → -3, `"10.7"` → 10, `"abc"` → None.
pub fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }

    let f = value.parse::<f64>().ok()?;
    if f.is_finite() && f.abs() < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Parse a boolean flag (`true` / `false`, any case).
pub fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Strip the shared-asset prefix from an image reference.
pub fn strip_shared(value: &str) -> &str {
    let value = value.trim();
    value.strip_prefix(SHARED_PREFIX).unwrap_or(value).trim()
}

/// Whether an image reference resolves to no image at all.
pub fn is_no_image(value: &str) -> bool {
    let name = strip_shared(value);
    name.is_empty() || NO_IMAGE_SENTINELS.iter().any(|s| name.eq_ignore_ascii_case(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("12"), Some(12));
        assert_eq!(parse_int(" -5 "), Some(-5));
        assert_eq!(parse_int("10.7"), Some(10));
        assert_eq!(parse_int("-2.9"), Some(-2));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("NaN"), None);
        assert_eq!(parse_int("inf"), None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" false"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn test_strip_shared() {
        assert_eq!(strip_shared("SHARED:gun.png"), "gun.png");
        assert_eq!(strip_shared("  gun.png "), "gun.png");
        assert_eq!(strip_shared("SHARED: gun.png"), "gun.png");
    }

    #[test]
    fn test_no_image_sentinels() {
        assert!(is_no_image("NONE"));
        assert!(is_no_image("none"));
        assert!(is_no_image("None"));
        assert!(is_no_image("SHARED:NONE"));
        assert!(is_no_image("blank.png"));
        assert!(is_no_image("SHARED:blank.png"));
        assert!(is_no_image(""));
        assert!(is_no_image("SHARED:"));
        assert!(!is_no_image("gun.png"));
        assert!(!is_no_image("none.png"));
    }
}
