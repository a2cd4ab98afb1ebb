use thiserror::Error;

/// Errors produced while building foundation types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Two teams in a roster share the same slug.
    #[error("duplicate team slug in roster: {0}")]
    DuplicateSlug(String),
}
