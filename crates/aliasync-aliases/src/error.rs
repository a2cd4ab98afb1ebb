//! Error types for alias document operations.

use thiserror::Error;

/// Errors that can occur while reading or writing an alias document.
#[derive(Debug, Error)]
pub enum AliasError {
    /// The content is not a valid alias-name to member-list mapping.
    #[error("invalid aliases file: {0}")]
    Parse(String),

    /// The document could not be encoded.
    #[error("failed to encode aliases: {0}")]
    Serialize(String),

    /// I/O error while reading an alias file from disk.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for alias document operations.
pub type Result<T> = std::result::Result<T, AliasError>;
