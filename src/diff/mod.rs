//! Diff rendering engine.
//!
//! # Pipeline
//!
//! ```text
//! (actual, expected) → delta::compute_deltas → generator::DiffGenerator
//!                         (Myers + per-word)       (line split + padding)
//!                                                        ↓
//!                     context::ContextGenerator ← DiffResult
//!                     (elision, line labels, arrays)
//! ```
//!
//! Rows are decorated by the [`colors::ColorScheme`] of the active
//! terminal encoding.

pub mod colors;
pub mod context;
pub mod delta;
pub mod generator;

/// Drawn in place of a line break.
pub const NEWLINE_MARKER: &str = "\\n";

/// Drawn once at the end of each compared string.
pub const EOS_MARKER: &str = "\\0";

pub use colors::{ColorScheme, color_scheme};
pub use context::{ContextGenerator, ContextLine};
pub use delta::{Delta, DeltaKind, compute_deltas};
pub use generator::{DiffGenerator, DiffResult};
