//! Error types for the oa-diff crate.

/// Errors raised when a caller misuses the context API.
///
/// Internal invariant violations (mismatched line counts after line
/// splitting) are not represented here; they panic.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// A value name was empty or whitespace-only.
    #[error("{parameter} may not be empty")]
    EmptyName { parameter: &'static str },

    /// The terminal encoding name is not recognized.
    #[error("unknown terminal encoding: {0} (expected none, 16-colors, 256-colors or 16m-colors)")]
    UnknownEncoding(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for oa-diff operations.
pub type ContextResult<T> = Result<T, ContextError>;
