//! Alias-level diff: which aliases were added, removed, or changed members.
//!
//! Member lists are compared as sets, so reordering alone is not a change.

use std::collections::BTreeSet;

use aliasync_aliases::AliasDocument;

/// The result of comparing two alias documents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasDiff {
    /// Changes in ascending alias order.
    pub changes: Vec<AliasChange>,
}

impl AliasDiff {
    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Number of aliases that only exist in the new document.
    pub fn additions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, AliasChange::Added { .. }))
            .count()
    }

    /// Number of aliases that were dropped.
    pub fn removals(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, AliasChange::Removed { .. }))
            .count()
    }

    /// Number of aliases whose members changed.
    pub fn modifications(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, AliasChange::Modified { .. }))
            .count()
    }
}

/// A single alias-level change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AliasChange {
    Added { alias: String, members: Vec<String> },
    Removed { alias: String, members: Vec<String> },
    Modified {
        alias: String,
        added: Vec<String>,
        removed: Vec<String>,
    },
}

impl AliasChange {
    pub fn alias(&self) -> &str {
        match self {
            AliasChange::Added { alias, .. }
            | AliasChange::Removed { alias, .. }
            | AliasChange::Modified { alias, .. } => alias,
        }
    }
}

/// Compute the alias-level changes that turn `old` into `new`.
pub fn diff_aliases(old: &AliasDocument, new: &AliasDocument) -> AliasDiff {
    let mut changes = Vec::new();

    for (alias, old_members) in old.iter() {
        match new.get(alias) {
            Some(new_members) => {
                let before: BTreeSet<&String> = old_members.iter().collect();
                let after: BTreeSet<&String> = new_members.iter().collect();
                if before != after {
                    changes.push(AliasChange::Modified {
                        alias: alias.to_string(),
                        added: after.difference(&before).map(|m| m.to_string()).collect(),
                        removed: before.difference(&after).map(|m| m.to_string()).collect(),
                    });
                }
            }
            None => changes.push(AliasChange::Removed {
                alias: alias.to_string(),
                members: sorted(old_members),
            }),
        }
    }

    for (alias, new_members) in new.iter() {
        if !old.contains(alias) {
            changes.push(AliasChange::Added {
                alias: alias.to_string(),
                members: sorted(new_members),
            });
        }
    }

    changes.sort_by(|a, b| a.alias().cmp(b.alias()));
    AliasDiff { changes }
}

fn sorted(members: &[String]) -> Vec<String> {
    let mut members = members.to_vec();
    members.sort();
    members
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(pairs: &[(&str, &[&str])]) -> AliasDocument {
        pairs.iter().map(|(k, v)| (*k, v.iter().copied())).collect()
    }

    #[test]
    fn identical_documents_no_diff() {
        let d = doc(&[("a", &["x", "y"])]);
        assert!(diff_aliases(&d, &d).is_empty());
    }

    #[test]
    fn reordering_is_not_a_change() {
        let old = doc(&[("a", &["y", "x"])]);
        let new = doc(&[("a", &["x", "y"])]);
        assert!(diff_aliases(&old, &new).is_empty());
    }

    #[test]
    fn membership_changes() {
        let old = doc(&[("a", &["x", "y"])]);
        let new = doc(&[("a", &["y", "z"])]);
        let diff = diff_aliases(&old, &new);
        assert_eq!(
            diff.changes,
            vec![AliasChange::Modified {
                alias: "a".into(),
                added: vec!["z".into()],
                removed: vec!["x".into()],
            }]
        );
    }

    #[test]
    fn mixed_changes_sorted_by_alias() {
        let old = doc(&[("drop", &["b", "a"]), ("keep", &["k"]), ("mod", &["m"])]);
        let new = doc(&[("add", &["n"]), ("keep", &["k"]), ("mod", &["m", "o"])]);
        let diff = diff_aliases(&old, &new);
        assert_eq!(diff.len(), 3);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.removals(), 1);
        assert_eq!(diff.modifications(), 1);

        let order: Vec<_> = diff.changes.iter().map(AliasChange::alias).collect();
        assert_eq!(order, vec!["add", "drop", "mod"]);

        match &diff.changes[1] {
            AliasChange::Removed { members, .. } => assert_eq!(members, &["a", "b"]),
            other => panic!("expected Removed, got {:?}", other),
        }
    }
}
