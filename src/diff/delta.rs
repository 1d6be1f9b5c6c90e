//! Edit script between two strings, reduced to word granularity.
//!
//! The raw script comes from a character-level Myers diff. Character matches
//! inside a word that otherwise changed are noise (`actual` vs `expected`
//! share a `c` and a `t`), so every word mixing equal and changed characters
//! is rewritten as a whole-word delete plus a whole-word insert. Whitespace
//! and punctuation stay character-level.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use similar::{Algorithm, ChangeTag, TextDiff};
use tracing::trace;

/// Maximal runs of Unicode word characters.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is a valid regex"));

/// Category of a span in the edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaKind {
    /// Present in both strings.
    Equal,
    /// Present only in the expected string.
    Insert,
    /// Present only in the actual string.
    Delete,
}

/// A contiguous span of the edit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    pub kind: DeltaKind,
    pub text: String,
}

impl Delta {
    pub fn new(kind: DeltaKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CharOp {
    tag: ChangeTag,
    ch: char,
    /// An `Equal` match discarded by word reduction.
    broken: bool,
}

impl CharOp {
    fn is_equal(self) -> bool {
        self.tag == ChangeTag::Equal && !self.broken
    }
}

/// Compute the word-reduced edit script turning `actual` into `expected`.
///
/// Within every change region all deletions precede all insertions.
pub fn compute_deltas(actual: &str, expected: &str) -> Vec<Delta> {
    if actual == expected {
        return if actual.is_empty() {
            Vec::new()
        } else {
            vec![Delta::new(DeltaKind::Equal, actual)]
        };
    }

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_chars(actual, expected);

    let mut ops: Vec<CharOp> = Vec::with_capacity(actual.len().max(expected.len()));
    // Index of the op covering each character, per side.
    let mut actual_ops: Vec<usize> = Vec::new();
    let mut expected_ops: Vec<usize> = Vec::new();

    for change in diff.iter_all_changes() {
        let tag = change.tag();
        for ch in change.value().chars() {
            let index = ops.len();
            ops.push(CharOp {
                tag,
                ch,
                broken: false,
            });
            match tag {
                ChangeTag::Equal => {
                    actual_ops.push(index);
                    expected_ops.push(index);
                }
                ChangeTag::Delete => actual_ops.push(index),
                ChangeTag::Insert => expected_ops.push(index),
            }
        }
    }

    let actual_words = word_ranges(actual);
    let expected_words = word_ranges(expected);
    // Breaking a match on one side can turn a word on the other side mixed.
    loop {
        let actual_changed = reduce_per_word(&mut ops, &actual_words, &actual_ops);
        let expected_changed = reduce_per_word(&mut ops, &expected_words, &expected_ops);
        if !actual_changed && !expected_changed {
            break;
        }
    }

    let deltas = regroup(&ops);
    trace!(
        chars = ops.len(),
        deltas = deltas.len(),
        "computed word-reduced deltas"
    );
    deltas
}

/// Character ranges of every word in `text`.
fn word_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut byte_cursor = 0;
    let mut char_cursor = 0;
    for word in WORD.find_iter(text) {
        char_cursor += text[byte_cursor..word.start()].chars().count();
        let len = word.as_str().chars().count();
        ranges.push(char_cursor..char_cursor + len);
        char_cursor += len;
        byte_cursor = word.end();
    }
    ranges
}

/// Break the equal matches of every word that also contains changes.
///
/// Returns whether any match was broken.
fn reduce_per_word(ops: &mut [CharOp], words: &[Range<usize>], side_ops: &[usize]) -> bool {
    let mut changed = false;
    for word in words {
        let indices = &side_ops[word.clone()];
        let has_equal = indices.iter().any(|&i| ops[i].is_equal());
        let has_change = indices.iter().any(|&i| !ops[i].is_equal());
        if has_equal && has_change {
            for &i in indices {
                if ops[i].is_equal() {
                    ops[i].broken = true;
                    changed = true;
                }
            }
        }
    }
    changed
}

/// Merge character ops into spans, deletions first within each change region.
fn regroup(ops: &[CharOp]) -> Vec<Delta> {
    let mut deltas = Vec::new();
    let mut equal = String::new();
    let mut deleted = String::new();
    let mut inserted = String::new();

    for op in ops {
        if op.is_equal() {
            flush_region(&mut deltas, &mut deleted, &mut inserted);
            equal.push(op.ch);
            continue;
        }
        flush(&mut deltas, DeltaKind::Equal, &mut equal);
        match op.tag {
            ChangeTag::Delete => deleted.push(op.ch),
            ChangeTag::Insert => inserted.push(op.ch),
            ChangeTag::Equal => {
                deleted.push(op.ch);
                inserted.push(op.ch);
            }
        }
    }
    flush_region(&mut deltas, &mut deleted, &mut inserted);
    flush(&mut deltas, DeltaKind::Equal, &mut equal);
    deltas
}

fn flush_region(deltas: &mut Vec<Delta>, deleted: &mut String, inserted: &mut String) {
    flush(deltas, DeltaKind::Delete, deleted);
    flush(deltas, DeltaKind::Insert, inserted);
}

fn flush(deltas: &mut Vec<Delta>, kind: DeltaKind, buffer: &mut String) {
    if buffer.is_empty() {
        return;
    }
    let text = std::mem::take(buffer);
    match deltas.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(&text),
        _ => deltas.push(Delta::new(kind, text)),
    }
}
