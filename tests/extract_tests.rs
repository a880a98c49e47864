//! Unit tests for the extract module: OBIS label matching and value-slice
//! parsing.


use obis2mqtt::obis::{extract, Frame, FrameReassembler, LABEL_RULES};
use telegram_fixtures::{complete_telegram, expected_fields};

fn frame_of(text: &str) -> Frame {
    let mut reassembler = FrameReassembler::new();
    let mut frames = reassembler.feed(format!("{text}!").as_bytes());
    assert_eq!(frames.len(), 1);
    frames.remove(0)
}

/// Tests that a complete telegram decodes every published field.
#[test]
fn test_extracts_all_eight_fields() {
    let reading = extract(&frame_of(&complete_telegram()));
    assert_eq!(reading.len(), 8);
    for (field, value) in expected_fields() {
        assert_eq!(reading.get(field), Some(value), "field {field}");
    }
}

/// Tests that lines matching no label rule are ignored.
#[test]
fn test_unmatched_lines_are_ignored() {
    let reading = extract(&frame_of(
        "/EBZ5DD3BZ06ETA_107\n1-0:0.0.0*255(1EBZ0100000000)\n1-0:96.5.0*255(001C0104)",
    ));
    assert!(reading.is_empty());
}

/// Tests that a matched line whose value slice holds no number produces the
/// NaN sentinel: present, counted, but not a value.
#[test]
fn test_malformed_value_becomes_nan_sentinel() {
    let reading = extract(&frame_of("1-0:1.8.0*255(*kWh)"));
    assert_eq!(reading.len(), 1);
    assert!(reading.get("total").unwrap().is_nan());
}

/// Tests that a line shorter than the configured slice end is clamped rather
/// than rejected.
#[test]
fn test_short_line_is_clamped() {
    let reading = extract(&frame_of("1-0:1.8.0*255(1.5"));
    assert_eq!(reading.get("total"), Some(1.5));
}

/// Tests that the value slice is position-fixed: digits beyond the slice end
/// are cut off, not parsed.
#[test]
fn test_value_slice_is_position_fixed() {
    // current_power reads 6 chars starting at offset 15
    let reading = extract(&frame_of("1-0:16.7.0*255(123456789*W)"));
    assert_eq!(reading.get("current_power"), Some(123456.0));
}

/// Tests that extraction is idempotent: the same frame always yields the
/// same reading.
#[test]
fn test_extraction_is_idempotent() {
    let frame = frame_of(&complete_telegram());
    assert_eq!(extract(&frame), extract(&frame));
}

/// Tests that carriage returns from CRLF line endings do not disturb
/// matching or parsing.
#[test]
fn test_crlf_line_endings_are_tolerated() {
    let telegram = complete_telegram().replace('\n', "\r\n");
    let reading = extract(&frame_of(&telegram));
    assert_eq!(reading.len(), 8);
    assert_eq!(reading.get("current_power"), Some(456.7));
}

/// Tests that the label table stays closed over exactly the eight published
/// fields, with distinct prefixes and value slices starting at the prefix
/// end.
#[test]
fn test_label_table_shape() {
    assert_eq!(LABEL_RULES.len(), 8);
    for rule in &LABEL_RULES {
        assert_eq!(rule.value_start, rule.prefix.len(), "rule {}", rule.field);
        assert!(rule.value_end > rule.value_start, "rule {}", rule.field);
    }
    let mut prefixes: Vec<_> = LABEL_RULES.iter().map(|r| r.prefix).collect();
    prefixes.sort_unstable();
    prefixes.dedup();
    assert_eq!(prefixes.len(), 8);
}
