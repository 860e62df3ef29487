//! Magnitude string normalization.
//!
//! Scraped counters arrive as human-formatted text ("12.4K", "3M", "1,234").
//! Upstream data quality is unreliable, so anything that does not parse
//! becomes zero instead of an error.

use serde_json::Value;

const SUFFIXES: [(char, f64); 4] = [
    ('k', 1_000.0),
    ('m', 1_000_000.0),
    ('b', 1_000_000_000.0),
    ('t', 1_000_000_000_000.0),
];

/// Converts a magnitude string to a non-negative integer.
///
/// Commas are ignored and an optional trailing `k`/`m`/`b`/`t` suffix
/// (any case) multiplies the parsed value. The result is truncated toward
/// zero. Empty, malformed, negative or non-finite input yields `0`.
pub fn normalize_magnitude(value: &str) -> u64 {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    let Some(last) = cleaned.chars().last() else {
        return 0;
    };

    let lowered = last.to_ascii_lowercase();
    match SUFFIXES.iter().find(|(suffix, _)| *suffix == lowered) {
        Some((_, multiplier)) => {
            let digits = &cleaned[..cleaned.len() - last.len_utf8()];
            parse_float(digits)
                .map(|number| truncate(number * multiplier))
                .unwrap_or(0)
        }
        None => parse_float(&cleaned).map(truncate).unwrap_or(0),
    }
}

/// Normalizes a JSON value holding a magnitude.
///
/// Strings go through [`normalize_magnitude`]; numbers are rendered to text
/// first so both shapes share one policy. Every other JSON type yields `0`.
pub fn normalize_value(value: Option<&Value>) -> u64 {
    normalize_magnitude(&magnitude_text(value))
}

/// Renders a JSON magnitude to the text form kept on input records.
pub fn magnitude_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn parse_float(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn truncate(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    // `as` saturates at u64::MAX
    value.trunc() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_suffixes_in_any_case() {
        assert_eq!(normalize_magnitude("1.5K"), 1_500);
        assert_eq!(normalize_magnitude("1.5k"), 1_500);
        assert_eq!(normalize_magnitude("2M"), 2_000_000);
        assert_eq!(normalize_magnitude("3b"), 3_000_000_000);
        assert_eq!(normalize_magnitude("1T"), 1_000_000_000_000);
    }

    #[test]
    fn strips_commas_and_whitespace() {
        assert_eq!(normalize_magnitude("1,234"), 1_234);
        assert_eq!(normalize_magnitude("  12,400 "), 12_400);
        assert_eq!(normalize_magnitude("1,2K"), 12_000);
    }

    #[test]
    fn truncates_fractions() {
        assert_eq!(normalize_magnitude("12.9"), 12);
        assert_eq!(normalize_magnitude("1.2345K"), 1_234);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(normalize_magnitude("1e300"), u64::MAX);
        assert_eq!(normalize_magnitude("99999999T"), u64::MAX);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(normalize_magnitude(""), 0);
        assert_eq!(normalize_magnitude("   "), 0);
        assert_eq!(normalize_magnitude("garbage"), 0);
        assert_eq!(normalize_magnitude("K"), 0);
        assert_eq!(normalize_magnitude("abcK"), 0);
        assert_eq!(normalize_magnitude("inf"), 0);
        assert_eq!(normalize_magnitude("NaN"), 0);
        assert_eq!(normalize_magnitude("-5"), 0);
        assert_eq!(normalize_magnitude("1.5 views"), 0);
    }

    #[test]
    fn json_numbers_share_the_string_policy() {
        assert_eq!(normalize_value(Some(&json!(1500))), 1_500);
        assert_eq!(normalize_value(Some(&json!(12.7))), 12);
        assert_eq!(normalize_value(Some(&json!("4.2K"))), 4_200);
        assert_eq!(normalize_value(Some(&json!(null))), 0);
        assert_eq!(normalize_value(Some(&json!(true))), 0);
        assert_eq!(normalize_value(None), 0);
    }
}
