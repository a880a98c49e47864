//! # OBIS Field Extraction
//!
//! Scans a telegram frame line by line against the meter's fixed label table
//! and produces a [`Reading`] with one entry per matched line.
//!
//! The value position inside a matched line is fixed-width, so the configured
//! slice may include trailing unit text (`00123.456*k` out of
//! `1-0:1.8.0*255(00123.456*kWh)`). The parser therefore takes the longest
//! leading decimal prefix of the slice; a slice with no leading number yields
//! the NaN sentinel. Lines matching no rule are ignored.

use crate::constants::LINE_DELIMITER;
use crate::obis::frame::Frame;
use crate::obis::reading::Reading;

/// Maps one fixed OBIS line prefix to an output field and the substring range
/// holding its decimal value.
#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    /// Exact line prefix selecting this rule.
    pub prefix: &'static str,
    /// Start of the value slice, in bytes from line start.
    pub value_start: usize,
    /// End of the value slice, exclusive, clamped to the line length.
    pub value_end: usize,
    /// Output field name.
    pub field: &'static str,
}

/// The meter's label table. Prefixes differ in their trailing selector
/// segment, so at most one rule matches any line; first match wins.
pub const LABEL_RULES: [LabelRule; 8] = [
    LabelRule { prefix: "1-0:1.8.0*255(", value_start: 14, value_end: 25, field: "total" },
    LabelRule { prefix: "1-0:1.8.1*255(", value_start: 14, value_end: 25, field: "total_day" },
    LabelRule { prefix: "1-0:1.8.2*255(", value_start: 14, value_end: 25, field: "total_night" },
    LabelRule { prefix: "1-0:1.8.0*96(", value_start: 13, value_end: 24, field: "total_1d" },
    LabelRule { prefix: "1-0:1.8.0*97(", value_start: 13, value_end: 24, field: "total_7d" },
    LabelRule { prefix: "1-0:1.8.0*98(", value_start: 13, value_end: 24, field: "total_30d" },
    LabelRule { prefix: "1-0:1.8.0*99(", value_start: 13, value_end: 24, field: "total_365d" },
    LabelRule { prefix: "1-0:16.7.0*255(", value_start: 15, value_end: 21, field: "current_power" },
];

/// Extracts a [`Reading`] from one frame. Stateless and idempotent: the same
/// frame always yields the same reading.
pub fn extract(frame: &Frame) -> Reading {
    let text = frame.text();
    let mut reading = Reading::new();

    for line in text.split(LINE_DELIMITER) {
        let Some(rule) = LABEL_RULES.iter().find(|rule| line.starts_with(rule.prefix)) else {
            continue;
        };
        let end = rule.value_end.min(line.len());
        let start = rule.value_start.min(end);
        let value = line
            .get(start..end)
            .and_then(parse_decimal_prefix)
            .unwrap_or(f64::NAN);
        reading.insert(rule.field, value);
    }
    reading
}

/// Parses the longest leading decimal number of `s`: optional sign, digits,
/// at most one decimal point. Returns None when no digit is found.
fn parse_decimal_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(&b'+') | Some(&b'-')) {
        end += 1;
    }
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        // "5." and ".5" both count, a lone "." does not
        if digits > 0 || frac_end > end + 1 {
            digits += frac_end - (end + 1);
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_prefix_ignores_unit_suffix() {
        assert_eq!(parse_decimal_prefix("00123.456*k"), Some(123.456));
        assert_eq!(parse_decimal_prefix("0456.7*W)"), Some(456.7));
        assert_eq!(parse_decimal_prefix("-12.5 "), Some(-12.5));
    }

    #[test]
    fn decimal_prefix_handles_partial_numbers() {
        assert_eq!(parse_decimal_prefix("00456."), Some(456.0));
        assert_eq!(parse_decimal_prefix(".5"), Some(0.5));
        assert_eq!(parse_decimal_prefix(""), None);
        assert_eq!(parse_decimal_prefix("*kWh"), None);
        assert_eq!(parse_decimal_prefix("-"), None);
        assert_eq!(parse_decimal_prefix("."), None);
    }
}
