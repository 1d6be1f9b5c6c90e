//! Property tests for the alignment and reconstruction guarantees of
//! text-only diffs.

use oa_diff::diff::{DeltaKind, EOS_MARKER, NEWLINE_MARKER, compute_deltas};
use oa_diff::{DiffGenerator, TerminalEncoding};
use proptest::prelude::*;

/// Undo padding and markers on one side of a text-only diff.
fn reconstruct(lines: &[String], padding: char) -> String {
    let joined: String = lines
        .concat()
        .chars()
        .filter(|&c| c != padding)
        .collect();
    let joined = joined
        .strip_suffix(EOS_MARKER)
        .expect("every side ends with the end-of-string marker");
    joined.replace(NEWLINE_MARKER, "\n")
}

// No padding glyph and no backslash, so markers stay unambiguous.
const TEXT: &str = "[a-z0-9 .,\n-]{0,24}";

proptest! {
    #[test]
    fn rows_are_aligned(actual in TEXT, expected in TEXT) {
        let result = DiffGenerator::new(TerminalEncoding::None).diff(&actual, &expected);
        prop_assert!(!result.is_empty());
        prop_assert_eq!(result.actual_lines().len(), result.expected_lines().len());
        prop_assert_eq!(result.diff_lines().len(), result.actual_lines().len());
        for index in 0..result.len() {
            let width = result.actual_lines()[index].chars().count();
            prop_assert_eq!(result.expected_lines()[index].chars().count(), width);
            prop_assert_eq!(result.diff_lines()[index].chars().count(), width);
        }
    }

    #[test]
    fn sides_reconstruct(actual in TEXT, expected in TEXT) {
        let result = DiffGenerator::new(TerminalEncoding::None).diff(&actual, &expected);
        prop_assert_eq!(reconstruct(result.actual_lines(), result.padding_marker()), actual);
        prop_assert_eq!(reconstruct(result.expected_lines(), result.padding_marker()), expected);
    }

    #[test]
    fn self_diff_is_all_equal(text in TEXT) {
        let result = DiffGenerator::new(TerminalEncoding::None).diff(&text, &text);
        prop_assert!(result.diff_lines().iter().all(|line| line.chars().all(|c| c == ' ')));
        prop_assert!(compute_deltas(&text, &text).iter().all(|d| d.kind == DeltaKind::Equal));
    }

    #[test]
    fn deletions_precede_insertions(actual in TEXT, expected in TEXT) {
        let deltas = compute_deltas(&actual, &expected);
        for pair in deltas.windows(2) {
            prop_assert!(!(pair[0].kind == DeltaKind::Insert && pair[1].kind == DeltaKind::Delete));
            prop_assert_ne!(pair[0].kind, pair[1].kind);
        }
    }

    #[test]
    fn colored_rows_have_matching_line_counts(actual in TEXT, expected in TEXT) {
        for encoding in [TerminalEncoding::Ansi16, TerminalEncoding::Ansi256, TerminalEncoding::Ansi16M] {
            let result = DiffGenerator::new(encoding).diff(&actual, &expected);
            prop_assert_eq!(result.actual_lines().len(), result.expected_lines().len());
            prop_assert!(result.diff_lines().is_empty());
        }
    }
}
