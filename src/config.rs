//! Read-only configuration consulted for every comparison.
//!
//! A [`Configuration`] is supplied by the caller per call and never mutated
//! while a diff is being computed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ContextError;

/// Default terminal width when `COLUMNS` is unset or invalid.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Environment variable that turns diffing off (`1` or `true`).
const DIFF_DISABLED_VAR: &str = "OA_DIFF_DISABLED";

/// Color capability of the terminal the message is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerminalEncoding {
    /// Plain text; differences are drawn on a separate diff row.
    #[default]
    #[serde(rename = "none")]
    None,
    /// 16-color ANSI palette.
    #[serde(rename = "16-colors")]
    Ansi16,
    /// 256-color ANSI palette.
    #[serde(rename = "256-colors")]
    Ansi256,
    /// 24-bit ("true color") ANSI.
    #[serde(rename = "16m-colors")]
    Ansi16M,
}

impl TerminalEncoding {
    /// All encodings, from least to most capable.
    pub const ALL: [Self; 4] = [Self::None, Self::Ansi16, Self::Ansi256, Self::Ansi16M];

    /// The name used by `FromStr`, `Display` and serde.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ansi16 => "16-colors",
            Self::Ansi256 => "256-colors",
            Self::Ansi16M => "16m-colors",
        }
    }

    /// Whether decorations are drawn inline using ANSI escape sequences.
    pub const fn is_colored(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Detect the encoding from environment lookups.
    ///
    /// `NO_COLOR` wins over everything, then `COLORTERM`, then `TERM`.
    pub fn detect<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            return Self::None;
        }
        if let Some(colorterm) = lookup("COLORTERM") {
            let colorterm = colorterm.to_ascii_lowercase();
            if colorterm == "truecolor" || colorterm == "24bit" {
                return Self::Ansi16M;
            }
        }
        match lookup("TERM") {
            Some(term) if term.contains("256color") => Self::Ansi256,
            Some(term) if !term.is_empty() && term != "dumb" => Self::Ansi16,
            _ => Self::None,
        }
    }
}

impl fmt::Display for TerminalEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TerminalEncoding {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|encoding| encoding.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ContextError::UnknownEncoding(s.to_owned()))
    }
}

/// Settings that shape how actual/expected values are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    /// Whether a diff is rendered at all.
    pub diff_enabled: bool,
    /// Terminal color capability.
    pub terminal_encoding: TerminalEncoding,
    /// Maximum width of a message headline.
    pub terminal_width: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            diff_enabled: true,
            terminal_encoding: TerminalEncoding::None,
            terminal_width: DEFAULT_TERMINAL_WIDTH,
        }
    }
}

impl Configuration {
    /// Build a configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let terminal_encoding = TerminalEncoding::detect(&lookup);
        let terminal_width = lookup("COLUMNS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&width| width > 0)
            .unwrap_or(DEFAULT_TERMINAL_WIDTH);
        let diff_enabled = !lookup(DIFF_DISABLED_VAR)
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        let config = Self {
            diff_enabled,
            terminal_encoding,
            terminal_width,
        };
        debug!(
            encoding = %config.terminal_encoding,
            width = config.terminal_width,
            diff_enabled = config.diff_enabled,
            "configuration detected"
        );
        config
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ContextError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub const fn with_diff_enabled(mut self, diff_enabled: bool) -> Self {
        self.diff_enabled = diff_enabled;
        self
    }

    #[must_use]
    pub const fn with_terminal_encoding(mut self, encoding: TerminalEncoding) -> Self {
        self.terminal_encoding = encoding;
        self
    }

    #[must_use]
    pub const fn with_terminal_width(mut self, width: usize) -> Self {
        self.terminal_width = width;
        self
    }

    pub const fn diff_enabled(&self) -> bool {
        self.diff_enabled
    }

    pub const fn terminal_encoding(&self) -> TerminalEncoding {
        self.terminal_encoding
    }

    pub const fn terminal_width(&self) -> usize {
        self.terminal_width
    }
}
