//! Branch selection and task aggregation for aliasync.
//!
//! Walks a repository inventory, decides per branch whether its alias file
//! must be rewritten, and groups the result into a task list for the
//! write-back collaborator.
//!
//! # Pipeline
//!
//! Each branch goes through these checks in order and stops at the first
//! exclusion:
//!
//! 1. **Name** -- must match one of the configured glob patterns
//! 2. **Staleness** -- last relevant activity must be within the window
//! 3. **File** -- the branch must carry an alias file
//! 4. **Content** -- the file must differ from its regenerated form
//!
//! # Modules
//!
//! - [`activity`] -- Last-activity resolution that discounts bot commits
//! - [`pattern`] -- Glob matching on branch names
//! - [`reconcile`] -- Per-branch evaluation and per-run aggregation
//! - [`writeback`] -- Commit/PR metadata for the write-back collaborator

pub mod activity;
pub mod error;
pub mod pattern;
pub mod reconcile;
pub mod writeback;

pub use activity::resolve_activity;
pub use error::{Result, SelectError};
pub use pattern::BranchMatcher;
pub use reconcile::{BranchOutcome, Reconciler};
pub use writeback::{plan_writeback, PullRequestPlan, WriteMode, WritebackPlan};
