//! Per-branch evaluation and per-run aggregation.
//!
//! Branch decisions depend only on the branch itself, the read-only roster
//! and the policy, so branches are evaluated in parallel. Output order is
//! fixed afterwards: repositories by name, then branches by name.

use std::collections::HashSet;

use aliasync_diff::compare;
use aliasync_types::inventory::sort_key;
use aliasync_types::{Branch, BranchUpdate, Repository, RepositoryTask, Roster, SyncPolicy};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::activity::resolve_activity;
use crate::error::Result;
use crate::pattern::BranchMatcher;

/// What happened to a single branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BranchOutcome {
    /// The branch name matched none of the patterns.
    NameMismatch,
    /// No relevant activity within the staleness window.
    Stale { last_activity: DateTime<Utc> },
    /// The branch has no alias file.
    MissingFile,
    /// The alias file could not be parsed or regenerated.
    Invalid { reason: String },
    /// The alias file already matches the roster.
    UpToDate,
    /// The alias file must be replaced with `new_content`.
    Changed { new_content: String },
}

impl BranchOutcome {
    /// Returns `true` if the branch needs a write-back.
    pub fn is_changed(&self) -> bool {
        matches!(self, BranchOutcome::Changed { .. })
    }

    /// The replacement content for a changed branch.
    pub fn new_content(&self) -> Option<&str> {
        match self {
            BranchOutcome::Changed { new_content } => Some(new_content),
            _ => None,
        }
    }
}

/// Runs branch selection and comparison over an inventory.
#[derive(Clone, Debug)]
pub struct Reconciler {
    policy: SyncPolicy,
    matcher: BranchMatcher,
    ignored_users: HashSet<String>,
}

impl Reconciler {
    /// Build a reconciler, compiling the policy's branch patterns.
    pub fn new(policy: SyncPolicy) -> Result<Self> {
        let matcher = BranchMatcher::new(&policy.branch_patterns)?;
        Ok(Self {
            policy,
            matcher,
            ignored_users: HashSet::new(),
        })
    }

    /// Discount commits by these users when judging branch activity.
    pub fn with_ignored_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_users = users.into_iter().map(Into::into).collect();
        self
    }

    /// Decide what to do with one branch, as of `now`.
    pub fn evaluate_branch(&self, branch: &Branch, roster: &Roster, now: DateTime<Utc>) -> BranchOutcome {
        if !self.matcher.is_match(&branch.name) {
            return BranchOutcome::NameMismatch;
        }

        let last_activity = resolve_activity(branch.last_activity, &branch.history, &self.ignored_users);
        if self.is_stale(last_activity, now) {
            return BranchOutcome::Stale { last_activity };
        }

        let Some(content) = branch.alias_content() else {
            return BranchOutcome::MissingFile;
        };

        match compare(content, roster, &self.policy) {
            Ok(result) if result.equal => BranchOutcome::UpToDate,
            Ok(result) => BranchOutcome::Changed {
                new_content: result.new_content,
            },
            Err(err) => BranchOutcome::Invalid {
                reason: err.to_string(),
            },
        }
    }

    /// Evaluate every branch of a repository and keep the changed ones.
    ///
    /// Returns `None` when no branch needs an update.
    pub fn reconcile_repository(
        &self,
        repo: &Repository,
        roster: &Roster,
        now: DateTime<Utc>,
    ) -> Option<RepositoryTask> {
        let mut updates: Vec<BranchUpdate> = repo
            .branches
            .par_iter()
            .filter_map(|branch| {
                let outcome = self.evaluate_branch(branch, roster, now);
                log_outcome(&repo.name, &branch.name, &outcome);
                match outcome {
                    BranchOutcome::Changed { new_content } => Some(BranchUpdate {
                        name: branch.name.clone(),
                        new_content,
                    }),
                    _ => None,
                }
            })
            .collect();

        if updates.is_empty() {
            return None;
        }

        updates.sort_by(|a, b| sort_key(&a.name).cmp(&sort_key(&b.name)));

        Some(RepositoryTask {
            id: repo.id.clone(),
            name: repo.name.clone(),
            branches: updates,
        })
    }

    /// Build the task list for a whole inventory.
    ///
    /// Repositories without changed branches are omitted. The result is
    /// sorted by repository name, then branch name.
    pub fn reconcile(&self, repos: &[Repository], roster: &Roster, now: DateTime<Utc>) -> Vec<RepositoryTask> {
        let mut tasks: Vec<RepositoryTask> = repos
            .par_iter()
            .filter_map(|repo| self.reconcile_repository(repo, roster, now))
            .collect();

        tasks.sort_by(|a, b| sort_key(&a.name).cmp(&sort_key(&b.name)));
        tasks
    }

    fn is_stale(&self, last_activity: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(self.policy.max_staleness) {
            Ok(window) => now.signed_duration_since(last_activity) > window,
            // A window too large to represent never expires.
            Err(_) => false,
        }
    }
}

fn log_outcome(repo: &str, branch: &str, outcome: &BranchOutcome) {
    match outcome {
        BranchOutcome::NameMismatch => debug!(repo, branch, "Ignored."),
        BranchOutcome::Stale { last_activity } => {
            debug!(repo, branch, %last_activity, "No recent activity, ignored.")
        }
        BranchOutcome::MissingFile => debug!(repo, branch, "Has no aliases file."),
        BranchOutcome::Invalid { reason } => warn!(repo, branch, error = %reason, "Invalid aliases file."),
        BranchOutcome::UpToDate => debug!(repo, branch, "No changes detected."),
        BranchOutcome::Changed { .. } => info!(repo, branch, "File is not identical."),
    }
}
