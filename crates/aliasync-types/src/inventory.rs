//! Repository and branch inventory as reported by the hosting service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository together with the branches that were inspected in it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Opaque identifier used by the hosting service (e.g. a GraphQL node ID).
    pub id: String,
    /// Repository name within the organization.
    pub name: String,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl Repository {
    pub fn new(id: impl Into<String>, name: impl Into<String>, branches: Vec<Branch>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            branches,
        }
    }

    /// Sort branches by lowercased name, byte order as tiebreak.
    pub fn sort_branches(&mut self) {
        self.branches.sort_by(|a, b| sort_key(&a.name).cmp(&sort_key(&b.name)));
    }
}

/// One branch of a repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    /// Time of the most recent relevant commit on the branch.
    pub last_activity: DateTime<Utc>,
    /// Raw text of the alias file at the branch tip, if the file exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<String>,
    /// Most recent commits, newest first. Used to discount bot activity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<CommitSummary>,
}

impl Branch {
    pub fn new(name: impl Into<String>, last_activity: DateTime<Utc>, aliases: Option<String>) -> Self {
        Self {
            name: name.into(),
            last_activity,
            aliases,
            history: Vec::new(),
        }
    }

    /// The alias file content, treating an empty file the same as a missing one.
    pub fn alias_content(&self) -> Option<&str> {
        self.aliases.as_deref().filter(|s| !s.is_empty())
    }
}

/// Minimal commit metadata from a branch's recent history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub committed_at: DateTime<Utc>,
    /// Login of the commit author, when the author maps to a known user.
    #[serde(default)]
    pub author: Option<String>,
}

/// Ordering key for repository and branch names: lowercased first, then raw bytes.
pub fn sort_key(name: &str) -> (String, &str) {
    (name.to_lowercase(), name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn empty_alias_file_counts_as_missing() {
        let b = Branch::new("main", at(1), Some(String::new()));
        assert!(b.alias_content().is_none());
        let b = Branch::new("main", at(1), None);
        assert!(b.alias_content().is_none());
        let b = Branch::new("main", at(1), Some("aliases: {}".into()));
        assert_eq!(b.alias_content(), Some("aliases: {}"));
    }

    #[test]
    fn branches_sort_case_insensitively() {
        let mut repo = Repository::new(
            "R_1",
            "repo",
            vec![
                Branch::new("release-1.0", at(1), None),
                Branch::new("Main", at(1), None),
                Branch::new("main", at(1), None),
                Branch::new("dev", at(1), None),
            ],
        );
        repo.sort_branches();
        let names: Vec<_> = repo.branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["dev", "Main", "main", "release-1.0"]);
    }

    #[test]
    fn deserialize_branch_without_optional_fields() {
        let json = r#"{"name":"main","last_activity":"2024-01-02T00:00:00Z"}"#;
        let b: Branch = serde_json::from_str(json).unwrap();
        assert_eq!(b.last_activity, at(2));
        assert!(b.aliases.is_none());
        assert!(b.history.is_empty());
    }
}
