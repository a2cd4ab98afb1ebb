//! Error types for branch selection.

use thiserror::Error;

/// Configuration errors detected before any branch is evaluated.
#[derive(Debug, Error)]
pub enum SelectError {
    /// No branch pattern was configured, so nothing could ever match.
    #[error("no branch patterns given")]
    NoPatterns,

    /// A branch pattern is not a valid glob.
    #[error("invalid branch pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },
}

/// Convenience type alias for selection operations.
pub type Result<T> = std::result::Result<T, SelectError>;
