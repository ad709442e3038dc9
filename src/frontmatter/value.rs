//! Value normalization for frontmatter scalars.
//!
//! Frontmatter uses a structured scalar syntax where booleans, numbers and
//! dates are valid unquoted, while arbitrary strings need quoting to
//! survive colons, spaces or marker characters. [`normalize`] classifies a
//! raw value and returns it in canonically quoted or unquoted form.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time formats recognized as unquotable scalars, besides RFC 3339.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Date-only formats recognized as unquotable scalars.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Normalize a raw value for insertion into the frontmatter block.
///
/// Rules, first match wins:
/// 1. Boolean literals `true` / `false` pass through.
/// 2. Numeric literals pass through.
/// 3. Recognized date/time strings pass through.
/// 4. Values already wrapped in double quotes pass through.
/// 5. Everything else is wrapped in single quotes.
pub fn normalize(raw: &str) -> String {
    if raw == "true" || raw == "false" {
        return raw.to_string();
    }
    if raw.parse::<f64>().is_ok() {
        return raw.to_string();
    }
    if is_date_like(raw) {
        return raw.to_string();
    }
    if raw.starts_with('"') && raw.ends_with('"') {
        return raw.to_string();
    }
    format!("'{raw}'")
}

fn is_date_like(raw: &str) -> bool {
    DateTime::parse_from_rfc3339(raw).is_ok()
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(raw, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(raw, fmt).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- Pass-through classes ---

    #[test]
    fn test_booleans_unchanged() {
        assert_eq!(normalize("true"), "true");
        assert_eq!(normalize("false"), "false");
    }

    #[test]
    fn test_numbers_unchanged() {
        assert_eq!(normalize("42"), "42");
        assert_eq!(normalize("-3.5"), "-3.5");
        assert_eq!(normalize("0"), "0");
    }

    #[test]
    fn test_dates_unchanged() {
        assert_eq!(normalize("2024-01-01"), "2024-01-01");
        assert_eq!(normalize("2024/01/01"), "2024/01/01");
        assert_eq!(normalize("2024-01-01T12:30:00"), "2024-01-01T12:30:00");
        assert_eq!(
            normalize("2024-01-01T12:30:00+02:00"),
            "2024-01-01T12:30:00+02:00"
        );
    }

    #[test]
    fn test_double_quoted_unchanged() {
        assert_eq!(normalize("\"already\""), "\"already\"");
        assert_eq!(normalize("\"has spaces too\""), "\"has spaces too\"");
    }

    // --- Quoting ---

    #[test]
    fn test_plain_strings_single_quoted() {
        assert_eq!(normalize("hello world"), "'hello world'");
        assert_eq!(normalize("a: colon"), "'a: colon'");
        assert_eq!(normalize("mark::er"), "'mark::er'");
    }

    #[test]
    fn test_empty_value_becomes_empty_quotes() {
        assert_eq!(normalize(""), "''");
    }

    #[test]
    fn test_single_quoted_input_is_requoted() {
        // Only double quotes count as pre-quoted.
        assert_eq!(normalize("'inner'"), "''inner''");
    }

    #[test]
    fn test_invalid_date_shapes_are_quoted() {
        assert_eq!(normalize("2024-13-40"), "'2024-13-40'");
        assert_eq!(normalize("yesterday"), "'yesterday'");
    }

    // --- Properties ---

    proptest! {
        // Every value either passes through or gains exactly one layer of
        // single quotes; normalize never mangles the payload.
        #[test]
        fn prop_normalize_is_identity_or_single_quote_wrap(s in "[a-zA-Z0-9 .:-]{0,24}") {
            let out = normalize(&s);
            let wrapped = format!("'{s}'");
            prop_assert!(out == s || out == wrapped);
        }

        #[test]
        fn prop_quoted_values_are_stable(s in "[a-zA-Z ]{0,16}") {
            let quoted = format!("\"{s}\"");
            prop_assert_eq!(normalize(&quoted), quoted);
        }
    }
}
