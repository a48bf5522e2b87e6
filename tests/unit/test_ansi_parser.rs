//! Unit tests for the ANSI parser

use ansi_segments::{parse_ansi, strip_ansi, ParsedAnsi, RenderMode, Segment};

/// Concatenated segment texts
fn joined(parsed: &ParsedAnsi<'_>) -> String {
    parsed.segments.iter().map(|s| &*s.text).collect()
}

fn fg<'p>(segment: &'p Segment<'_>) -> Option<&'p str> {
    segment.style.fg.as_ref().map(|c| c.as_str())
}

#[cfg(test)]
mod ansi_parser_tests {
    use super::*;

    #[test]
    fn test_parse_plain_text() {
        let result = parse_ansi("Hello, World!");

        assert_eq!(result.plain, "Hello, World!");
        assert!(result.segments.is_empty());
        assert!(!result.has_ansi);
    }

    #[test]
    fn test_parse_empty_string() {
        let result = parse_ansi("");

        assert_eq!(result.plain, "");
        assert!(result.segments.is_empty());
        assert!(!result.has_ansi);
    }

    #[test]
    fn test_reset_only_line_signals_no_styling() {
        let result = parse_ansi("\x1b[0mstarting server on :8080");

        assert_eq!(result.plain, "starting server on :8080");
        assert!(result.segments.is_empty());
        assert!(result.has_ansi);
        assert!(result.is_noise());
    }

    #[test]
    fn test_fg_reset_keeps_second_segment_unstyled() {
        let result = parse_ansi("\x1b[31mred\x1b[39mnormal");

        assert_eq!(result.plain, "rednormal");
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.segments[0].text, "red");
        assert_eq!(fg(&result.segments[0]), Some("#cc0000"));
        assert_eq!(result.segments[1].text, "normal");
        assert_eq!(fg(&result.segments[1]), None);
    }

    #[test]
    fn test_palette_exactness() {
        let cases = [
            ("\x1b[31mx", "#cc0000"),
            ("\x1b[91mx", "#ef2929"),
            ("\x1b[38;5;196mx", "#ff0000"),
            ("\x1b[38;5;240mx", "#585858"),
            ("\x1b[38;2;255;128;0mx", "#ff8000"),
        ];

        for (input, expected) in cases {
            let result = parse_ansi(input);
            assert_eq!(result.segments.len(), 1, "input {:?}", input);
            assert_eq!(fg(&result.segments[0]), Some(expected), "input {:?}", input);
        }
    }

    #[test]
    fn test_background_colors() {
        let result = parse_ansi("\x1b[41mbg\x1b[0m \x1b[48;5;21mcube\x1b[49m");

        assert_eq!(result.plain, "bg cube");
        assert_eq!(result.segments.len(), 3);
        assert_eq!(result.segments[0].style.bg.unwrap(), "#cc0000");
        assert!(result.segments[1].style.is_default());
        assert_eq!(result.segments[2].style.bg.unwrap(), "#0000ff");
    }

    #[test]
    fn test_repeated_color_merges() {
        let result = parse_ansi("\x1b[31mhello \x1b[31mworld\x1b[0m");

        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].text, "hello world");
        assert_eq!(fg(&result.segments[0]), Some("#cc0000"));
    }

    #[test]
    fn test_non_sgr_csi_discarded() {
        let result = parse_ansi("\x1b[2Ahello");

        assert_eq!(result.plain, "hello");
        assert!(result.has_ansi);
        assert!(result.segments.is_empty());
    }

    #[test]
    fn test_cursor_sequence_between_styled_runs() {
        let result = parse_ansi("\x1b[1mab\x1b[10Gcd\x1b[0m");

        assert_eq!(result.plain, "abcd");
        assert_eq!(result.segments.len(), 1);
        assert!(result.segments[0].style.bold);
    }

    #[test]
    fn test_truncated_sequences() {
        for input in ["hello\x1b[", "hello\x1b", "hello\x1b]8;;", "hello\x1b(", "hello\x1b[1;3"] {
            let result = parse_ansi(input);
            assert_eq!(result.plain, "hello", "input {:?}", input);
            assert!(result.has_ansi);
        }
    }

    #[test]
    fn test_osc_hyperlink_stripped() {
        let input = "see \x1b]8;;https://kubernetes.io\x1b\\\x1b[4mdocs\x1b[24m\x1b]8;;\x1b\\ now";
        let result = parse_ansi(input);

        assert_eq!(result.plain, "see docs now");
        assert_eq!(result.segments.len(), 3);
        assert!(result.segments[1].style.underline);
        assert_eq!(result.segments[1].text, "docs");
    }

    #[test]
    fn test_bold_and_dim_are_independent() {
        let result = parse_ansi("\x1b[1;2mboth\x1b[22mnone");

        assert_eq!(result.segments.len(), 2);
        assert!(result.segments[0].style.bold);
        assert!(result.segments[0].style.dim);
        assert!(result.segments[1].style.is_default());
    }

    #[test]
    fn test_all_attributes() {
        let result = parse_ansi("\x1b[3;4;9mx\x1b[23my\x1b[24mz\x1b[29mw");

        let styles: Vec<_> = result.segments.iter().map(|s| s.style).collect();
        assert!(styles[0].italic && styles[0].underline && styles[0].strikethrough);
        assert!(!styles[1].italic && styles[1].underline && styles[1].strikethrough);
        assert!(!styles[2].underline && styles[2].strikethrough);
        assert!(styles[3].is_default());
    }

    #[test]
    fn test_unknown_codes_do_not_style() {
        let result = parse_ansi("\x1b[5;7;8mblink reverse hidden\x1b[0m");

        assert_eq!(result.plain, "blink reverse hidden");
        assert!(result.segments.is_empty());
        assert!(result.has_ansi);
    }

    #[test]
    fn test_malformed_extended_color() {
        let result = parse_ansi("\x1b[31m\x1b[38;5mstill red");

        assert_eq!(fg(&result.segments[0]), Some("#cc0000"));
    }

    #[test]
    fn test_truncated_truecolor_styles_nothing() {
        for input in ["\x1b[38;2;1mtext", "\x1b[48;2;1;4mtext"] {
            let result = parse_ansi(input);
            assert_eq!(result.plain, "text", "input {:?}", input);
            assert!(result.segments.is_empty(), "input {:?}", input);
            assert!(result.has_ansi);
        }
    }

    #[test]
    fn test_each_call_starts_unstyled() {
        let first = parse_ansi("\x1b[31munterminated red");
        let second = parse_ansi("\x1b[2Knext line");

        assert_eq!(first.segments.len(), 1);
        assert!(second.segments.is_empty());
    }

    #[test]
    fn test_round_trip_on_real_output() {
        let lines = [
            "\x1b[34mdir1\x1b[0m  \x1b[32mfile.txt\x1b[0m  \x1b[31mlink\x1b[0m",
            "On branch \x1b[32mmain\x1b[0m",
            "\x1b[1m\x1b[33mwarning\x1b[39m\x1b[0m\x1b[1m: unused variable\x1b[0m",
            "2024-01-01T00:00:00Z \x1b[2mINFO\x1b[22m pod/api-7f9c ready",
        ];

        for line in lines {
            let result = parse_ansi(line);
            assert_eq!(joined(&result), result.plain, "line {:?}", line);
            assert!(!result.plain.contains('\x1b'));
        }
    }

    #[test]
    fn test_adjacent_segments_differ() {
        let result = parse_ansi("\x1b[1ma\x1b[22m\x1b[1mb\x1b[0mc\x1b[0m\x1b[32md\x1b[32me");

        for pair in result.segments.windows(2) {
            assert_ne!(pair[0].style, pair[1].style);
        }
        assert_eq!(result.segments.len(), 3);
        assert_eq!(result.segments[0].text, "ab");
    }

    #[test]
    fn test_render_mode() {
        assert_eq!(parse_ansi("plain").render_mode(), RenderMode::Plain("plain"));
        assert_eq!(parse_ansi("\x1b[0mx").render_mode(), RenderMode::Plain("x"));
        assert!(matches!(
            parse_ansi("\x1b[1mx").render_mode(),
            RenderMode::Styled(segments) if segments.len() == 1
        ));
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[1;31mERROR\x1b[0m something failed"), "ERROR something failed");
        assert_eq!(strip_ansi("untouched"), "untouched");
    }

    #[test]
    fn test_parse_long_text() {
        let long_text = "a".repeat(10000);
        let input = format!("\x1b[31m{}\x1b[0m", long_text);
        let result = parse_ansi(&input);

        assert_eq!(result.plain.len(), 10000);
        assert_eq!(result.segments.len(), 1);
    }

    #[test]
    fn test_text_with_newlines() {
        let result = parse_ansi("Line 1\n\x1b[32mLine 2\x1b[0m\nLine 3");

        assert_eq!(result.plain, "Line 1\nLine 2\nLine 3");
        assert_eq!(result.segments.len(), 3);
    }
}
