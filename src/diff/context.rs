//! Labeled context rows appended to a failure message.
//!
//! # Layout
//!
//! A single-line comparison renders as
//!
//! ```text
//!
//! Actual  : actual////////\0
//! Diff    : ------++++++++
//! Expected: //////expected\0
//! ```
//!
//! Multi-line values get one such block per display line, labeled
//! `Actual@n` / `Expected@n`. Identical interior lines collapse into a single
//! `[...]` row. Arrays are compared position by position with the same
//! collapsing rule, each position labeled `Actual[i]` / `Expected[i]`.

use tracing::{debug, trace};

use crate::config::Configuration;
use crate::diff::colors::DIFF_EQUAL;
use crate::diff::generator::{DiffGenerator, DiffResult};
use crate::error::{ContextError, ContextResult};
use crate::value::Value;

/// Label of the row holding diff glyphs.
pub const DIFF_LABEL: &str = "Diff";

/// Value of the row that stands in for collapsed identical content.
pub const ELISION_MARKER: &str = "[...]";

/// One row of a failure message. An empty label continues the previous row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextLine {
    pub label: String,
    pub value: String,
}

impl ContextLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// An empty row separating blocks.
    pub fn separator() -> Self {
        Self::new("", "")
    }
}

/// Builds context rows for actual vs. expected comparisons.
#[derive(Debug, Clone)]
pub struct ContextGenerator {
    config: Configuration,
    generator: DiffGenerator,
}

impl ContextGenerator {
    pub fn new(config: Configuration) -> Self {
        let generator = DiffGenerator::new(config.terminal_encoding());
        Self { config, generator }
    }

    /// Context rows describing how `actual` differs from `expected`.
    ///
    /// `expected_in_message` suppresses the flat expected row when the caller
    /// already printed the expected value in the headline.
    pub fn get_context(
        &self,
        actual_name: &str,
        actual: &Value,
        expected_name: &str,
        expected: &Value,
        expected_in_message: bool,
    ) -> ContextResult<Vec<ContextLine>> {
        if actual_name.trim().is_empty() {
            return Err(ContextError::EmptyName {
                parameter: "actual_name",
            });
        }
        if expected_name.trim().is_empty() {
            return Err(ContextError::EmptyName {
                parameter: "expected_name",
            });
        }
        Ok(self.context(
            actual_name,
            actual,
            expected_name,
            expected,
            expected_in_message,
        ))
    }

    fn context(
        &self,
        actual_name: &str,
        actual: &Value,
        expected_name: &str,
        expected: &Value,
        expected_in_message: bool,
    ) -> Vec<ContextLine> {
        if !self.config.diff_enabled() || !actual.is_diffable() || !expected.is_diffable() {
            trace!(actual_name, "flat context");
            return flat_context(
                actual_name,
                actual,
                expected_name,
                expected,
                expected_in_message,
            );
        }
        match (actual.as_array(), expected.as_array()) {
            (Some(actual_elements), Some(expected_elements))
                if !actual_elements.is_empty() || !expected_elements.is_empty() =>
            {
                self.array_context(actual_name, actual_elements, expected_name, expected_elements)
            }
            _ => {
                let result = self
                    .generator
                    .diff(&actual.to_string(), &expected.to_string());
                if result.len() == 1 {
                    single_line_context(actual_name, expected_name, &result)
                } else {
                    multi_line_context(actual_name, expected_name, &result)
                }
            }
        }
    }

    fn array_context(
        &self,
        actual_name: &str,
        actual: &[Value],
        expected_name: &str,
        expected: &[Value],
    ) -> Vec<ContextLine> {
        let blank = Value::Text(String::new());
        let size = actual.len().max(expected.len());
        let mut lines = Vec::new();
        let mut skipped = 0usize;

        for index in 0..size {
            let actual_element = actual.get(index);
            let expected_element = expected.get(index);
            let equal = matches!(
                (actual_element, expected_element),
                (Some(a), Some(e)) if a == e
            );
            let interior = index != 0 && index != size - 1;
            if equal && interior {
                skipped += 1;
                continue;
            }
            if skipped > 0 {
                push_elision(&mut lines);
                debug!(skipped, "elided identical array elements");
                skipped = 0;
            }

            let (element_actual_name, actual_value) = match actual_element {
                Some(value) => (format!("{actual_name}[{index}]"), value),
                None => (actual_name.to_owned(), &blank),
            };
            let (element_expected_name, expected_value) = match expected_element {
                Some(value) => (format!("{expected_name}[{index}]"), value),
                None => (expected_name.to_owned(), &blank),
            };
            lines.extend(self.context(
                &element_actual_name,
                actual_value,
                &element_expected_name,
                expected_value,
                false,
            ));
        }
        lines
    }
}

fn flat_context(
    actual_name: &str,
    actual: &Value,
    expected_name: &str,
    expected: &Value,
    expected_in_message: bool,
) -> Vec<ContextLine> {
    let mut lines = vec![ContextLine::new(actual_name, actual.to_string())];
    if !expected_in_message {
        lines.push(ContextLine::new(expected_name, expected.to_string()));
    }
    lines
}

/// Whether display line `index` is the same on both sides.
fn line_is_equal(result: &DiffResult, index: usize) -> bool {
    match result.diff_lines().get(index) {
        Some(diff) => diff.chars().all(|c| c == DIFF_EQUAL),
        None => result.actual_lines()[index] == result.expected_lines()[index],
    }
}

fn single_line_context(actual_name: &str, expected_name: &str, result: &DiffResult) -> Vec<ContextLine> {
    let mut lines = vec![
        ContextLine::separator(),
        ContextLine::new(actual_name, result.actual_lines()[0].clone()),
    ];
    if !line_is_equal(result, 0) {
        if let Some(diff) = result.diff_lines().first() {
            lines.push(ContextLine::new(DIFF_LABEL, diff.clone()));
        }
    }
    lines.push(ContextLine::new(
        expected_name,
        result.expected_lines()[0].clone(),
    ));
    lines
}

fn multi_line_context(actual_name: &str, expected_name: &str, result: &DiffResult) -> Vec<ContextLine> {
    let size = result.len();
    let mut lines = Vec::new();
    // Deleted and inserted lines shift one side only.
    let mut actual_line_number = 0usize;
    let mut expected_line_number = 0usize;
    let mut skipped = 0usize;

    for index in 0..size {
        let has_actual = result.actual_line_has_content(index);
        let has_expected = result.expected_line_has_content(index);
        let equal = line_is_equal(result, index);
        let interior = index != 0 && index != size - 1;

        if equal && interior {
            skipped += 1;
            actual_line_number += usize::from(has_actual);
            expected_line_number += usize::from(has_expected);
            continue;
        }
        if skipped > 0 {
            push_elision(&mut lines);
            debug!(skipped, "elided identical lines");
            skipped = 0;
        }

        let actual_label = line_label(actual_name, has_actual, &mut actual_line_number);
        let expected_label = line_label(expected_name, has_expected, &mut expected_line_number);

        lines.push(ContextLine::separator());
        lines.push(ContextLine::new(
            actual_label,
            result.actual_lines()[index].clone(),
        ));
        if !equal {
            if let Some(diff) = result.diff_lines().get(index) {
                lines.push(ContextLine::new(DIFF_LABEL, diff.clone()));
            }
        }
        lines.push(ContextLine::new(
            expected_label,
            result.expected_lines()[index].clone(),
        ));
    }
    lines
}

/// `name@n` for a line with content, advancing the counter; otherwise `name`.
fn line_label(name: &str, has_content: bool, line_number: &mut usize) -> String {
    if !has_content {
        return name.to_owned();
    }
    let label = format!("{name}@{line_number}");
    *line_number += 1;
    label
}

fn push_elision(lines: &mut Vec<ContextLine>) {
    lines.push(ContextLine::separator());
    lines.push(ContextLine::new("", ELISION_MARKER));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerminalEncoding;

    fn generator() -> ContextGenerator {
        ContextGenerator::new(Configuration::default())
    }

    fn pairs(lines: &[ContextLine]) -> Vec<(&str, &str)> {
        lines
            .iter()
            .map(|l| (l.label.as_str(), l.value.as_str()))
            .collect()
    }

    #[test]
    fn test_rejects_empty_names() {
        let err = generator()
            .get_context(" ", &Value::from(1), "Expected", &Value::from(2), false)
            .expect_err("empty name must be rejected");
        assert!(matches!(
            err,
            ContextError::EmptyName {
                parameter: "actual_name"
            }
        ));
        let err = generator()
            .get_context("Actual", &Value::from(1), "", &Value::from(2), false)
            .expect_err("empty name must be rejected");
        assert!(matches!(
            err,
            ContextError::EmptyName {
                parameter: "expected_name"
            }
        ));
    }

    #[test]
    fn test_booleans_are_flat() {
        let lines = generator()
            .get_context("Actual", &Value::from(true), "Expected", &Value::from(false), false)
            .expect("valid names");
        assert_eq!(
            pairs(&lines),
            [("Actual", "true"), ("Expected", "false")]
        );
    }

    #[test]
    fn test_flat_expected_suppressed_when_in_message() {
        let lines = generator()
            .get_context("Actual", &Value::from(true), "Expected", &Value::from(false), true)
            .expect("valid names");
        assert_eq!(pairs(&lines), [("Actual", "true")]);
    }

    #[test]
    fn test_diff_disabled_is_flat() {
        let generator = ContextGenerator::new(Configuration::default().with_diff_enabled(false));
        let lines = generator
            .get_context("Actual", &Value::from("a"), "Expected", &Value::from("b"), false)
            .expect("valid names");
        assert_eq!(pairs(&lines), [("Actual", "a"), ("Expected", "b")]);
    }

    #[test]
    fn test_single_line() {
        let lines = generator()
            .get_context(
                "Actual",
                &Value::from("actual"),
                "Expected",
                &Value::from("expected"),
                false,
            )
            .expect("valid names");
        assert_eq!(
            pairs(&lines),
            [
                ("", ""),
                ("Actual", "actual////////\\0"),
                ("Diff", "------++++++++  "),
                ("Expected", "//////expected\\0"),
            ]
        );
    }

    #[test]
    fn test_single_line_equal_has_no_diff_row() {
        let lines = generator()
            .get_context("Actual", &Value::from(5), "Expected", &Value::from(5), false)
            .expect("valid names");
        assert_eq!(
            pairs(&lines),
            [("", ""), ("Actual", "5\\0"), ("Expected", "5\\0")]
        );
    }

    #[test]
    fn test_colored_single_line_has_no_diff_row() {
        let generator = ContextGenerator::new(
            Configuration::default().with_terminal_encoding(TerminalEncoding::Ansi256),
        );
        let lines = generator
            .get_context("Actual", &Value::from("a"), "Expected", &Value::from("b"), false)
            .expect("valid names");
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.label != DIFF_LABEL));
    }

    #[test]
    fn test_independent_diff_line_numbers() {
        let lines = generator()
            .get_context(
                "Actual",
                &Value::from("1\nsame\n2"),
                "Expected",
                &Value::from("3\nsame\n4"),
                false,
            )
            .expect("valid names");
        let labels: Vec<&str> = lines
            .iter()
            .map(|l| l.label.as_str())
            .filter(|l| !l.is_empty() && *l != DIFF_LABEL)
            .collect();
        // The shared middle line is elided but still counted on both sides.
        assert_eq!(labels, ["Actual@0", "Expected@0", "Actual@2", "Expected@2"]);
        assert!(lines.iter().any(|l| l.value == ELISION_MARKER));
    }

    #[test]
    fn test_end_of_string_only_line_uses_bare_name() {
        let lines = generator()
            .get_context("Actual", &Value::from("a\n"), "Expected", &Value::from("a"), false)
            .expect("valid names");
        assert_eq!(
            pairs(&lines),
            [
                ("", ""),
                ("Actual@0", "a\\n"),
                ("Diff", " --"),
                ("Expected@0", "a//"),
                ("", ""),
                ("Actual@1", "\\0"),
                ("Expected", "\\0"),
            ]
        );
    }

    #[test]
    fn test_deleted_line_uses_bare_expected_name() {
        let lines = generator()
            .get_context(
                "Actual",
                &Value::from("1\n2\n3"),
                "Expected",
                &Value::from("1\n3"),
                false,
            )
            .expect("valid names");
        assert_eq!(
            pairs(&lines),
            [
                ("", ""),
                ("Actual@0", "1\\n"),
                ("Expected@0", "1\\n"),
                ("", ""),
                ("Actual@1", "2\\n"),
                ("Diff", "---"),
                ("Expected", "///"),
                ("", ""),
                ("Actual@2", "3\\0"),
                ("Expected@1", "3\\0"),
            ]
        );
    }
}
