//! Integration Tests for Large Output Handling
//!
//! These tests verify that batches the size of a long pod log are parsed
//! line by line with correct per-line results and aggregate counters.

use ansi_segments::{parse_lines, IngestStats};

/// Build a synthetic log with a fixed mix of line kinds
fn build_log(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 4 {
            0 => format!("2024-01-01T00:00:{:02}Z plain line {}", i % 60, i),
            1 => format!("\x1b[32mINFO\x1b[0m request {} served", i),
            2 => format!("\x1b[0m\x1b[2Kprogress {}%", i % 100),
            _ => format!("\x1b[1;38;5;{}mwarn\x1b[22m {}\x1b[0m", i % 256, i),
        })
        .collect()
}

#[test]
fn test_hundred_thousand_lines() {
    let lines = build_log(100_000);
    let (parsed, stats) = parse_lines(lines.iter().map(String::as_str));

    assert_eq!(parsed.len(), 100_000);
    assert_eq!(stats.lines, 100_000);
    assert_eq!(stats.plain_lines, 25_000);
    assert_eq!(stats.styled_lines, 50_000);
    assert_eq!(stats.noise_lines, 25_000);
    assert_eq!(stats.noise_ratio(), 0.25);

    for (line, result) in lines.iter().zip(&parsed) {
        assert!(!result.plain.contains('\x1b'), "line {:?}", line);
        if !result.segments.is_empty() {
            let joined: String = result.segments.iter().map(|s| &*s.text).collect();
            assert_eq!(joined, result.plain);
        }
    }
}

#[test]
fn test_plain_lines_are_borrowed() {
    let lines = build_log(1_000);
    let (parsed, _) = parse_lines(lines.iter().map(String::as_str));

    for result in parsed.iter().step_by(4) {
        assert!(matches!(result.plain, std::borrow::Cow::Borrowed(_)));
        assert!(!result.has_ansi);
    }
}

#[test]
fn test_styled_line_shape() {
    let lines = build_log(4);
    let (parsed, _) = parse_lines(lines.iter().map(String::as_str));

    // "\x1b[1;38;5;3mwarn\x1b[22m 3\x1b[0m"
    let warn = &parsed[3];
    assert_eq!(warn.plain, "warn 3");
    assert_eq!(warn.segments.len(), 2);
    assert!(warn.segments[0].style.bold);
    assert_eq!(warn.segments[0].style.fg.unwrap(), "#c4a000");
    assert!(!warn.segments[1].style.bold);
    assert_eq!(warn.segments[1].style.fg.unwrap(), "#c4a000");
}

#[test]
fn test_very_long_single_line() {
    let long = format!("\x1b[31m{}\x1b[0m{}", "x".repeat(500_000), "y".repeat(500_000));
    let (parsed, stats) = parse_lines([long.as_str()]);

    assert_eq!(parsed[0].plain.len(), 1_000_000);
    assert_eq!(parsed[0].segments.len(), 2);
    assert_eq!(stats.stripped_bytes(), 9);
}

#[test]
fn test_stats_merge_across_batches() {
    let lines = build_log(10_000);
    let (first, second) = lines.split_at(5_000);

    let mut total = IngestStats::new();
    for chunk in [first, second] {
        let (_, stats) = parse_lines(chunk.iter().map(String::as_str));
        total.merge(&stats);
    }

    let (_, whole) = parse_lines(lines.iter().map(String::as_str));
    assert_eq!(total, whole);
}
