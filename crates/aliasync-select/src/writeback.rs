//! Commit and pull request metadata for the write-back collaborator.
//!
//! Nothing here touches git or the network; it only describes what the
//! collaborator should commit, where it should push, and what pull request
//! to open.

use aliasync_aliases::OWNERS_ALIASES_FILENAME;
use aliasync_types::RepositoryTask;
use serde::{Deserialize, Serialize};

/// How changes reach the target branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Push to a dedicated update branch and open a pull request.
    #[default]
    PullRequest,
    /// Push straight into the target branch.
    Direct,
}

/// Everything needed to write one branch's new alias file back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritebackPlan {
    pub repository: String,
    /// Branch whose alias file is being updated.
    pub base_branch: String,
    /// Branch the commit is pushed to.
    pub push_branch: String,
    /// Path of the alias file relative to the repository root.
    pub file: String,
    pub commit_message: String,
    pub new_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestPlan>,
}

/// The pull request to open once the update branch is pushed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestPlan {
    pub title: String,
    pub body: String,
}

impl WritebackPlan {
    pub fn for_branch(repository: &str, branch: &str, new_content: &str, mode: WriteMode) -> Self {
        let commit_message = commit_message(branch);

        let (push_branch, pull_request) = match mode {
            WriteMode::Direct => (branch.to_string(), None),
            WriteMode::PullRequest => (
                update_branch_name(branch),
                Some(PullRequestPlan {
                    title: commit_message.clone(),
                    body: pull_request_body(),
                }),
            ),
        };

        Self {
            repository: repository.to_string(),
            base_branch: branch.to_string(),
            push_branch,
            file: OWNERS_ALIASES_FILENAME.to_string(),
            commit_message,
            new_content: new_content.to_string(),
            pull_request,
        }
    }
}

/// One plan per branch of every task, in task order.
pub fn plan_writeback(tasks: &[RepositoryTask], mode: WriteMode) -> Vec<WritebackPlan> {
    tasks
        .iter()
        .flat_map(|task| {
            task.branches
                .iter()
                .map(move |b| WritebackPlan::for_branch(&task.name, &b.name, &b.new_content, mode))
        })
        .collect()
}

/// Name of the branch carrying the update for `branch` in pull request mode.
pub fn update_branch_name(branch: &str) -> String {
    format!("update-{branch}-owners").replace('/', "-")
}

/// Commit message, prefixed with the branch name unless it is the default branch.
pub fn commit_message(branch: &str) -> String {
    let message = format!("Synchronize {OWNERS_ALIASES_FILENAME} file with Github teams");
    if branch == "main" || branch == "master" {
        message
    } else {
        format!("[{branch}] {message}")
    }
}

fn pull_request_body() -> String {
    format!(
        "This pull request updates the {OWNERS_ALIASES_FILENAME} file based on the GitHub team associations.\n\
         \n\
         **Release Notes:**\n\
         ```release-note\n\
         NONE\n\
         ```"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aliasync_types::BranchUpdate;

    #[test]
    fn update_branch_replaces_slashes() {
        assert_eq!(update_branch_name("main"), "update-main-owners");
        assert_eq!(update_branch_name("release/1.0"), "update-release-1.0-owners");
    }

    #[test]
    fn default_branches_have_plain_message() {
        assert_eq!(commit_message("main"), "Synchronize OWNERS_ALIASES file with Github teams");
        assert_eq!(commit_message("master"), "Synchronize OWNERS_ALIASES file with Github teams");
        assert_eq!(
            commit_message("release-1.0"),
            "[release-1.0] Synchronize OWNERS_ALIASES file with Github teams"
        );
    }

    #[test]
    fn pull_request_mode() {
        let plan = WritebackPlan::for_branch("repo", "release/2", "aliases: {}\n", WriteMode::PullRequest);
        assert_eq!(plan.base_branch, "release/2");
        assert_eq!(plan.push_branch, "update-release-2-owners");
        assert_eq!(plan.file, "OWNERS_ALIASES");
        let pr = plan.pull_request.unwrap();
        assert_eq!(pr.title, plan.commit_message);
        assert!(pr.body.contains("```release-note\nNONE\n```"));
        assert!(pr.body.starts_with("This pull request updates the OWNERS_ALIASES file"));
    }

    #[test]
    fn direct_mode_pushes_to_branch() {
        let plan = WritebackPlan::for_branch("repo", "main", "aliases: {}\n", WriteMode::Direct);
        assert_eq!(plan.push_branch, "main");
        assert!(plan.pull_request.is_none());
    }

    #[test]
    fn plans_follow_task_order() {
        let tasks = vec![
            RepositoryTask {
                id: "R_1".into(),
                name: "a".into(),
                branches: vec![
                    BranchUpdate { name: "main".into(), new_content: "x".into() },
                    BranchUpdate { name: "release-1".into(), new_content: "y".into() },
                ],
            },
            RepositoryTask {
                id: "R_2".into(),
                name: "b".into(),
                branches: vec![BranchUpdate { name: "main".into(), new_content: "z".into() }],
            },
        ];
        let plans = plan_writeback(&tasks, WriteMode::Direct);
        let pairs: Vec<_> = plans
            .iter()
            .map(|p| (p.repository.as_str(), p.base_branch.as_str(), p.new_content.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "main", "x"), ("a", "release-1", "y"), ("b", "main", "z")]);
    }

    #[test]
    fn write_mode_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&WriteMode::PullRequest).unwrap(), "\"pull_request\"");
    }
}
