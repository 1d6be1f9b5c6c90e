//! Aligned actual / diff / expected rows from an edit script.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::TerminalEncoding;
use crate::diff::colors::{ColorScheme, color_scheme};
use crate::diff::delta::{DeltaKind, compute_deltas};
use crate::diff::{EOS_MARKER, NEWLINE_MARKER};

/// `\r\n`, a lone `\r` or `\n`; each ends one display line.
static LINE_TERMINATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|\r|\n").expect("line terminator pattern is a valid regex")
});

/// Rendered rows of one comparison.
///
/// `actual_lines` and `expected_lines` always have the same, non-zero
/// length. `diff_lines` is either empty (colors carry the difference) or
/// just as long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    actual_lines: Vec<String>,
    expected_lines: Vec<String>,
    diff_lines: Vec<String>,
    actual_visible: Vec<bool>,
    expected_visible: Vec<bool>,
    padding_marker: char,
}

impl DiffResult {
    pub fn actual_lines(&self) -> &[String] {
        &self.actual_lines
    }

    pub fn expected_lines(&self) -> &[String] {
        &self.expected_lines
    }

    pub fn diff_lines(&self) -> &[String] {
        &self.diff_lines
    }

    pub const fn padding_marker(&self) -> char {
        self.padding_marker
    }

    /// Number of display lines.
    pub fn len(&self) -> usize {
        self.actual_lines.len()
    }

    /// Never true: every result has at least one line.
    pub fn is_empty(&self) -> bool {
        self.actual_lines.is_empty()
    }

    /// Whether actual line `index` holds any of the actual value's text.
    pub fn actual_line_has_content(&self, index: usize) -> bool {
        self.actual_visible.get(index).copied().unwrap_or(false)
    }

    /// Whether expected line `index` holds any of the expected value's text.
    pub fn expected_line_has_content(&self, index: usize) -> bool {
        self.expected_visible.get(index).copied().unwrap_or(false)
    }
}

/// Produces [`DiffResult`]s for one terminal encoding.
#[derive(Clone, Copy)]
pub struct DiffGenerator {
    scheme: &'static dyn ColorScheme,
}

impl std::fmt::Debug for DiffGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffGenerator")
            .field("encoding", &self.encoding())
            .finish()
    }
}

impl DiffGenerator {
    pub fn new(encoding: TerminalEncoding) -> Self {
        Self {
            scheme: color_scheme(encoding),
        }
    }

    pub fn encoding(&self) -> TerminalEncoding {
        self.scheme.encoding()
    }

    /// Diff `actual` against `expected`.
    ///
    /// Any two strings are diffable. Every line terminator (`\r\n`, `\r`
    /// or `\n`) is drawn as one [`NEWLINE_MARKER`] and ends the display line
    /// on all rows; the end of both strings is drawn as [`EOS_MARKER`].
    pub fn diff(&self, actual: &str, expected: &str) -> DiffResult {
        let deltas = compute_deltas(actual, expected);
        let mut writer = RowWriter::new(self.scheme);

        for delta in &deltas {
            let mut start = 0;
            for terminator in LINE_TERMINATOR.find_iter(&delta.text) {
                let line = &delta.text[start..terminator.start()];
                writer.write(delta.kind, &format!("{line}{NEWLINE_MARKER}"));
                writer.end_line(delta.kind);
                start = terminator.end();
            }
            writer.write(delta.kind, &delta.text[start..]);
        }
        writer.write_end_of_string();

        let result = writer.finish();
        debug!(
            encoding = %self.encoding(),
            deltas = deltas.len(),
            lines = result.len(),
            "diff generated"
        );
        result
    }
}

/// Accumulates the three parallel rows of the current display line.
struct RowWriter {
    scheme: &'static dyn ColorScheme,
    actual_lines: Vec<String>,
    expected_lines: Vec<String>,
    diff_lines: Vec<String>,
    actual_visible: Vec<bool>,
    expected_visible: Vec<bool>,
    actual: String,
    expected: String,
    diff: String,
    actual_has_content: bool,
    expected_has_content: bool,
    /// Whether the current display line was opened by this side's own line
    /// terminator (or is the first line).
    actual_line_opened: bool,
    expected_line_opened: bool,
}

impl RowWriter {
    fn new(scheme: &'static dyn ColorScheme) -> Self {
        Self {
            scheme,
            actual_lines: Vec::new(),
            expected_lines: Vec::new(),
            diff_lines: Vec::new(),
            actual_visible: Vec::new(),
            expected_visible: Vec::new(),
            actual: String::new(),
            expected: String::new(),
            diff: String::new(),
            actual_has_content: false,
            expected_has_content: false,
            actual_line_opened: true,
            expected_line_opened: true,
        }
    }

    fn padding(&self, text: &str) -> String {
        let run: String =
            std::iter::repeat_n(self.scheme.padding_marker(), text.chars().count()).collect();
        self.scheme.decorate_padding(&run)
    }

    fn write(&mut self, kind: DeltaKind, text: &str) {
        if text.is_empty() {
            return;
        }
        let colored = self.scheme.encoding().is_colored();
        match kind {
            DeltaKind::Equal => {
                if colored {
                    let decorated = self.scheme.decorate_equal_text(text);
                    self.actual.push_str(&decorated);
                    self.expected.push_str(&decorated);
                } else {
                    self.actual.push_str(text);
                    self.expected.push_str(text);
                    self.diff.push_str(&self.scheme.decorate_equal_text(text));
                }
                self.actual_has_content = true;
                self.expected_has_content = true;
            }
            DeltaKind::Delete => {
                let padding = self.padding(text);
                if colored {
                    self.actual.push_str(&self.scheme.decorate_deleted_text(text));
                } else {
                    self.actual.push_str(text);
                    self.diff.push_str(&self.scheme.decorate_deleted_text(text));
                }
                self.expected.push_str(&padding);
                self.actual_has_content = true;
            }
            DeltaKind::Insert => {
                let padding = self.padding(text);
                if colored {
                    self.expected
                        .push_str(&self.scheme.decorate_inserted_text(text));
                } else {
                    self.expected.push_str(text);
                    self.diff.push_str(&self.scheme.decorate_inserted_text(text));
                }
                self.actual.push_str(&padding);
                self.expected_has_content = true;
            }
        }
    }

    /// The end-of-string marker only counts as content for a side whose own
    /// text reaches this line.
    fn write_end_of_string(&mut self) {
        let (actual_has_content, expected_has_content) =
            (self.actual_has_content, self.expected_has_content);
        self.write(DeltaKind::Equal, EOS_MARKER);
        self.actual_has_content = actual_has_content || self.actual_line_opened;
        self.expected_has_content = expected_has_content || self.expected_line_opened;
    }

    /// Close the current display line at a terminator of category `kind`.
    fn end_line(&mut self, kind: DeltaKind) {
        self.actual_line_opened = matches!(kind, DeltaKind::Equal | DeltaKind::Delete);
        self.expected_line_opened = matches!(kind, DeltaKind::Equal | DeltaKind::Insert);
        self.push_line();
    }

    fn push_line(&mut self) {
        self.actual_lines.push(std::mem::take(&mut self.actual));
        self.expected_lines.push(std::mem::take(&mut self.expected));
        self.diff_lines.push(std::mem::take(&mut self.diff));
        self.actual_visible
            .push(std::mem::replace(&mut self.actual_has_content, false));
        self.expected_visible
            .push(std::mem::replace(&mut self.expected_has_content, false));
    }

    fn finish(mut self) -> DiffResult {
        self.push_line();
        assert_eq!(
            self.actual_lines.len(),
            self.expected_lines.len(),
            "actual and expected must split into the same number of lines"
        );
        let diff_lines = if self.scheme.encoding().is_colored() {
            Vec::new()
        } else {
            self.diff_lines
        };
        DiffResult {
            actual_lines: self.actual_lines,
            expected_lines: self.expected_lines,
            diff_lines,
            actual_visible: self.actual_visible,
            expected_visible: self.expected_visible,
            padding_marker: self.scheme.padding_marker(),
        }
    }
}
