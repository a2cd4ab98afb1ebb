//! Comparison engine for aliasync.
//!
//! Decides whether an alias file is stale with respect to the roster and
//! produces its replacement text.
//!
//! # Key Types
//!
//! - [`compare`] / [`Comparison`] -- Strict or semantic equality plus the regenerated file
//! - [`AliasDiff`] / [`AliasChange`] -- Per-alias membership changes
//! - [`ContentDiff`] / [`DiffHunk`] / [`DiffLine`] -- Line-level text diff for review output

pub mod alias_diff;
pub mod compare;
pub mod content_diff;
pub mod error;

pub use alias_diff::{diff_aliases, AliasChange, AliasDiff};
pub use compare::{compare, compare_document, Comparison};
pub use content_diff::{diff_content, ContentDiff, DiffHunk, DiffLine};
pub use error::{DiffError, DiffResult};
