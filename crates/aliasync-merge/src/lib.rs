//! Merge engine for aliasync.
//!
//! Projects an existing alias document onto the current team roster. The
//! projection only synchronizes membership of aliases that already exist in
//! the document; it never authors new aliases for roster-only teams.

pub mod projection;

pub use projection::build_projection;
