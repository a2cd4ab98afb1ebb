//! Foundation types for aliasync.
//!
//! These are the values exchanged between the reconciliation core and the
//! collaborators around it: the team roster and repository inventory flow
//! in, the task list flows out.
//!
//! # Key Types
//!
//! - [`Team`] / [`Roster`] -- Authoritative team membership, unique by slug
//! - [`Repository`] / [`Branch`] / [`CommitSummary`] -- Branch inventory per repository
//! - [`SyncPolicy`] -- Comparison and selection flags passed into every core call
//! - [`RepositoryTask`] / [`BranchUpdate`] -- Work list of branches needing new content

pub mod error;
pub mod inventory;
pub mod policy;
pub mod roster;
pub mod task;

pub use error::TypeError;
pub use inventory::{Branch, CommitSummary, Repository};
pub use policy::SyncPolicy;
pub use roster::{Roster, Team};
pub use task::{BranchUpdate, RepositoryTask};
