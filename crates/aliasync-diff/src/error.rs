//! Error types for the diff crate.

use aliasync_aliases::AliasError;

/// Errors that can occur while comparing an alias file.
///
/// Both variants are local to a single branch: callers skip the branch and
/// carry on with the rest of the run.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The original alias file could not be parsed.
    #[error(transparent)]
    Parse(AliasError),

    /// The projected document could not be encoded.
    #[error(transparent)]
    Serialize(AliasError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
