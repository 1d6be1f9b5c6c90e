//! Color schemes: how each delta category is decorated per terminal encoding.
//!
//! The text-only scheme turns a span into a run of glyphs of the same
//! character count; those runs form the separate diff row. The ANSI schemes
//! wrap the span itself in a white-foreground / colored-background escape
//! sequence and need no diff row.

use crate::config::TerminalEncoding;

/// Diff-row glyph under text present in both values.
pub const DIFF_EQUAL: char = ' ';
/// Diff-row glyph under text only present in the actual value.
pub const DIFF_DELETE: char = '-';
/// Diff-row glyph under text only present in the expected value.
pub const DIFF_INSERT: char = '+';
/// Filler used by the text-only scheme.
pub const DIFF_PADDING: char = '/';

const RESET: &str = "\u{1b}[0m";

/// Decorates text spans for one terminal encoding.
pub trait ColorScheme: Send + Sync {
    fn encoding(&self) -> TerminalEncoding;

    /// Filler character used to align a row with its counterpart.
    fn padding_marker(&self) -> char;

    fn decorate_equal_text(&self, text: &str) -> String;

    fn decorate_inserted_text(&self, text: &str) -> String;

    fn decorate_deleted_text(&self, text: &str) -> String;

    fn decorate_padding(&self, text: &str) -> String;
}

/// Return the scheme for `encoding`.
pub fn color_scheme(encoding: TerminalEncoding) -> &'static dyn ColorScheme {
    match encoding {
        TerminalEncoding::None => &TextOnly,
        TerminalEncoding::Ansi16 => &ANSI_16,
        TerminalEncoding::Ansi256 => &ANSI_256,
        TerminalEncoding::Ansi16M => &ANSI_16M,
    }
}

// ---------------------------------------------------------------------------
// Text only
// ---------------------------------------------------------------------------

/// Glyph runs for terminals without color support.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOnly;

fn glyph_run(glyph: char, text: &str) -> String {
    std::iter::repeat_n(glyph, text.chars().count()).collect()
}

impl ColorScheme for TextOnly {
    fn encoding(&self) -> TerminalEncoding {
        TerminalEncoding::None
    }

    fn padding_marker(&self) -> char {
        DIFF_PADDING
    }

    fn decorate_equal_text(&self, text: &str) -> String {
        glyph_run(DIFF_EQUAL, text)
    }

    fn decorate_inserted_text(&self, text: &str) -> String {
        glyph_run(DIFF_INSERT, text)
    }

    fn decorate_deleted_text(&self, text: &str) -> String {
        glyph_run(DIFF_DELETE, text)
    }

    fn decorate_padding(&self, text: &str) -> String {
        glyph_run(DIFF_PADDING, text)
    }
}

// ---------------------------------------------------------------------------
// ANSI
// ---------------------------------------------------------------------------

/// Background-color decorations at one palette depth.
#[derive(Debug, Clone, Copy)]
pub struct AnsiScheme {
    encoding: TerminalEncoding,
    foreground: &'static str,
    inserted: &'static str,
    deleted: &'static str,
    padding: &'static str,
}

pub static ANSI_16: AnsiScheme = AnsiScheme {
    encoding: TerminalEncoding::Ansi16,
    foreground: "\u{1b}[97m",
    inserted: "\u{1b}[42m",
    deleted: "\u{1b}[41m",
    padding: "\u{1b}[100m",
};

pub static ANSI_256: AnsiScheme = AnsiScheme {
    encoding: TerminalEncoding::Ansi256,
    foreground: "\u{1b}[38;5;15m",
    inserted: "\u{1b}[48;5;28m",
    deleted: "\u{1b}[48;5;124m",
    padding: "\u{1b}[48;5;238m",
};

pub static ANSI_16M: AnsiScheme = AnsiScheme {
    encoding: TerminalEncoding::Ansi16M,
    foreground: "\u{1b}[38;2;255;255;255m",
    inserted: "\u{1b}[48;2;0;135;0m",
    deleted: "\u{1b}[48;2;175;0;0m",
    padding: "\u{1b}[48;2;68;68;68m",
};

impl AnsiScheme {
    fn wrap(&self, background: &str, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        format!("{}{background}{text}{RESET}", self.foreground)
    }
}

impl ColorScheme for AnsiScheme {
    fn encoding(&self) -> TerminalEncoding {
        self.encoding
    }

    fn padding_marker(&self) -> char {
        ' '
    }

    // Equal text keeps the terminal's own colors.
    fn decorate_equal_text(&self, text: &str) -> String {
        text.to_owned()
    }

    fn decorate_inserted_text(&self, text: &str) -> String {
        self.wrap(self.inserted, text)
    }

    fn decorate_deleted_text(&self, text: &str) -> String {
        self.wrap(self.deleted, text)
    }

    fn decorate_padding(&self, text: &str) -> String {
        self.wrap(self.padding, text)
    }
}
