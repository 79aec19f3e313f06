//! Module for handling date parsing and formatting.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use super::conversions::{clean_string, value_to_string};
use super::types::DateFormatConfig;

/// Smallest integer read as epoch milliseconds (early 1973)
const EPOCH_MILLIS_FLOOR: i64 = 100_000_000_000;

/// Parse a date string with multiple format attempts
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();

    for format in &config.date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if config.enable_format_detection {
        if let Some(detected_format) = detect_date_format(s) {
            if let Ok(date) = NaiveDate::parse_from_str(s, &detected_format) {
                return Some(date);
            }
        }

        // Timestamps such as "2011-03-01 00:00:00" or "2011-03-01T00:00:00"
        if let Some(date_part) = s.split(['T', ' ']).next().filter(|part| part.len() < s.len()) {
            return parse_date_string(date_part, config);
        }
    }

    None
}

/// Try to detect the date format based on string patterns
#[must_use]
pub fn detect_date_format(s: &str) -> Option<String> {
    // ISO-like format with dashes (YYYY-MM-DD)
    if s.len() == 10 && s.chars().nth(4) == Some('-') && s.chars().nth(7) == Some('-') {
        return Some("%Y-%m-%d".to_string());
    }

    if s.contains('/') {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 3 {
            if parts[0].len() == 4 {
                return Some("%Y/%m/%d".to_string());
            } else if parts[2].len() == 4 {
                // Day-first unless the first part cannot be a day
                if let Ok(first_num) = parts[0].parse::<u8>() {
                    if first_num <= 12 {
                        if let Ok(second_num) = parts[1].parse::<u8>() {
                            if second_num > 12 {
                                return Some("%m/%d/%Y".to_string());
                            }
                        }
                    }
                    return Some("%d/%m/%Y".to_string());
                }
            }
        }
    }

    if s.contains('.') {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() == 3 && parts[2].len() == 4 {
            return Some("%d.%m.%Y".to_string());
        }
    }

    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        return Some("%Y%m%d".to_string());
    }

    None
}

/// Normalize a registration date to the configured output format
///
/// Recognised dates (textual, compact `YYYYMMDD` integers, or epoch milliseconds as
/// written by spreadsheet-to-JSON exports) are rendered in `config.output_format`.
/// Anything else that is not a placeholder is kept as cleaned text.
#[must_use]
pub fn normalize_registration_date(value: &Value, config: &DateFormatConfig) -> Option<String> {
    let date = match value {
        Value::Number(n) => n.as_i64().and_then(|raw| date_from_integer(raw, config)),
        Value::String(s) => parse_date_string(s, config),
        _ => None,
    };

    match date {
        Some(date) => Some(date.format(&config.output_format).to_string()),
        None => clean_string(&value_to_string(value)?),
    }
}

fn date_from_integer(raw: i64, config: &DateFormatConfig) -> Option<NaiveDate> {
    if config.accept_epoch_millis && raw.unsigned_abs() >= EPOCH_MILLIS_FLOOR.unsigned_abs() {
        return DateTime::from_timestamp_millis(raw).map(|dt| dt.date_naive());
    }
    if (10_000_101..=99_991_231).contains(&raw) {
        return NaiveDate::parse_from_str(&raw.to_string(), "%Y%m%d").ok();
    }
    None
}
