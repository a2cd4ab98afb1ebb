//! The work list handed to the write-back collaborator.

use serde::{Deserialize, Serialize};

/// A repository with at least one branch whose alias file must be rewritten.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryTask {
    pub id: String,
    pub name: String,
    pub branches: Vec<BranchUpdate>,
}

/// New alias file content for one branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchUpdate {
    pub name: String,
    pub new_content: String,
}

impl RepositoryTask {
    /// Number of branches to update in this repository.
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}
