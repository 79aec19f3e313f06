//! Value coercers
//!
//! Small, total normalizers from untyped source values to canonical values. None of
//! them fail: anything unrecognised maps to a safe default or to `None`.

use itertools::Itertools;
use serde_json::Value;

use crate::models::types::Sector;

/// Literal the sources use as a fill-in for unknown text, anywhere in a string
pub const PLACEHOLDER_TOKEN: &str = "UNKNOWN";

/// Whole-value placeholders that mean "no data" (compared case-insensitively)
pub const PLACEHOLDER_VALUES: [&str; 4] = ["UNKNOWN", "NOT APPLICABLE", "NONE", "."];

/// Quintile label used when no band can be determined
pub const UNKNOWN_QUINTILE: &str = "Unknown";

/// Minimum digits for a usable telephone number
const MIN_PHONE_DIGITS: usize = 9;

/// Render a scalar as text, formatting integral numbers without a fraction
#[must_use]
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(format_float)
            }
        }
        other => Some(other.to_string()),
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Numeric coercion accepting numbers, numeric strings and booleans
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    number.filter(|f| f.is_finite())
}

/// Headcount coercion: rounded, non-negative, `0` when unparseable or absent
#[must_use]
pub fn coerce_count(value: Option<&Value>) -> u32 {
    value
        .and_then(coerce_number)
        .map(|f| f.round())
        .filter(|f| *f > 0.0)
        .map_or(0, |f| f.min(f64::from(u32::MAX)) as u32)
}

/// Sector from free text: anything mentioning independent or private schooling is
/// [`Sector::Independent`], everything else [`Sector::Public`]
#[must_use]
pub fn parse_sector(value: Option<&Value>) -> Sector {
    match value.and_then(Value::as_str) {
        Some(s) => {
            let upper = s.to_uppercase();
            if upper.contains("INDEPENDENT") || upper.contains("PRIVATE") {
                Sector::Independent
            } else {
                Sector::Public
            }
        }
        None => Sector::Public,
    }
}

/// Quintile band label
///
/// Numbers 1 to 5 become `"Q<n>"`, strings already carrying the `Q` prefix pass
/// through, numeric strings in range are prefixed. Everything else, sentinels
/// included, is [`UNKNOWN_QUINTILE`].
#[must_use]
pub fn parse_quintile(value: Option<&Value>) -> String {
    let band = match value {
        Some(Value::Number(n)) => n.as_f64().and_then(quintile_band),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.starts_with('Q') {
                return s.to_string();
            }
            s.parse::<f64>().ok().and_then(quintile_band)
        }
        _ => None,
    };
    band.map_or_else(|| UNKNOWN_QUINTILE.to_string(), |n| format!("Q{n}"))
}

fn quintile_band(f: f64) -> Option<u8> {
    (f.fract() == 0.0 && (1.0..=5.0).contains(&f)).then_some(f as u8)
}

/// No-fee flag: booleans pass through; `"yes"`, `"true"` or any phrase containing
/// "no fee" are true
#[must_use]
pub fn parse_no_fee(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            let lower = s.trim().to_lowercase();
            lower.contains("no fee") || lower == "yes" || lower == "true"
        }
        _ => false,
    }
}

/// Generic designation flag: booleans pass through; `"yes"` and `"true"` are true
#[must_use]
pub fn parse_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            let lower = s.trim().to_lowercase();
            lower == "yes" || lower == "true"
        }
        _ => false,
    }
}

/// Telephone number in regional grouping
///
/// Non-digits are stripped; fewer than nine digits is no number at all. Ten digits
/// are grouped as `0AA BBB CCCC`; other lengths are returned as bare digits.
#[must_use]
pub fn format_telephone(value: &Value) -> Option<String> {
    let text = value_to_string(value)?;
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();

    if digits.len() < MIN_PHONE_DIGITS {
        return None;
    }
    if digits.len() == 10 {
        return Some(format!("0{} {} {}", &digits[1..3], &digits[3..6], &digits[6..]));
    }
    Some(digits)
}

/// Address cleanup: removes the placeholder token wherever it occurs, collapses
/// whitespace runs, trims. Non-strings and empty results are `None`.
#[must_use]
pub fn clean_address(value: &Value) -> Option<String> {
    let text = value.as_str()?;
    let stripped = strip_token_ignore_case(text, PLACEHOLDER_TOKEN);
    non_empty(collapse_whitespace(&stripped))
}

/// Text cleanup for optional descriptive fields
///
/// Whitespace is collapsed and trimmed; whole-value placeholders
/// ([`PLACEHOLDER_VALUES`]) and empty results are `None`.
#[must_use]
pub fn clean_string(text: &str) -> Option<String> {
    let cleaned = collapse_whitespace(text);
    if PLACEHOLDER_VALUES
        .iter()
        .any(|placeholder| cleaned.eq_ignore_ascii_case(placeholder))
    {
        return None;
    }
    non_empty(cleaned)
}

/// [`clean_string`] over any scalar, numbers rendered as text
#[must_use]
pub fn clean_value(value: &Value) -> Option<String> {
    clean_string(&value_to_string(value)?)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn strip_token_ignore_case(text: &str, token: &str) -> String {
    // ASCII uppercasing keeps byte offsets aligned with the input
    let upper = text.to_ascii_uppercase();
    let token = token.to_ascii_uppercase();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, _) in upper.match_indices(&token) {
        out.push_str(&text[last..start]);
        last = start + token.len();
    }
    out.push_str(&text[last..]);
    out
}
