//! `oa-diff`: diff rendering for assertion failure messages.
//!
//! Given an actual and an expected value, produces the labeled context rows
//! a validator appends to its failure message: aligned actual / diff /
//! expected rows with word-level deltas, collapsed duplicate lines, and
//! element-wise comparison of arrays. Rows are rendered for plain text or
//! for 16, 256 and 16M color ANSI terminals.
//!
//! # Architecture
//!
//! ```text
//! Value, Value → ContextGenerator → DiffGenerator → compute_deltas (similar)
//!                      ↓                  ↓
//!               Vec<ContextLine>     ColorScheme
//!                      ↓
//!             message::format_context
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod message;
pub mod value;

pub use config::{Configuration, TerminalEncoding};
pub use diff::{ContextGenerator, ContextLine, DiffGenerator, DiffResult};
pub use error::{ContextError, ContextResult};
pub use message::{equality_failure, format_context};
pub use value::Value;
