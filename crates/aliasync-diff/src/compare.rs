//! Strict and semantic equality between an alias file and its projection.

use aliasync_aliases::AliasDocument;
use aliasync_merge::build_projection;
use aliasync_types::{Roster, SyncPolicy};

use crate::error::{DiffError, DiffResult};

/// Outcome of comparing an alias file against the roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    /// `true` when the file already reflects the roster.
    pub equal: bool,
    /// The regenerated file, returned whether or not it differs.
    pub new_content: String,
}

impl Comparison {
    /// Returns `true` if the file needs to be rewritten.
    pub fn is_changed(&self) -> bool {
        !self.equal
    }
}

/// Compare the raw text of an alias file with what the roster says it should be.
///
/// In strict mode the trimmed original text must equal the trimmed
/// regenerated text exactly, so ordering, comments and whitespace all count.
/// Otherwise both documents are compared structurally with sorted member
/// lists.
pub fn compare(original: &str, roster: &Roster, policy: &SyncPolicy) -> DiffResult<Comparison> {
    let old = AliasDocument::parse(original).map_err(DiffError::Parse)?;
    compare_document(original, &old, roster, policy)
}

/// Like [`compare`], for a caller that already parsed `original` into `old`.
pub fn compare_document(
    original: &str,
    old: &AliasDocument,
    roster: &Roster,
    policy: &SyncPolicy,
) -> DiffResult<Comparison> {
    let new = build_projection(old, roster, policy.keep_unknown);

    let new_content = new.to_yaml(&policy.header).map_err(DiffError::Serialize)?;

    let equal = if policy.strict {
        original.trim() == new_content.trim()
    } else {
        let mut old = old.clone();
        let mut new = new;
        old.sort();
        new.sort();
        old == new
    };

    Ok(Comparison { equal, new_content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aliasync_types::Team;
    use proptest::prelude::*;

    fn roster(teams: &[(&str, &[&str])]) -> Roster {
        Roster::from_teams(
            teams
                .iter()
                .map(|(slug, members)| Team::new(*slug, members.iter().map(|m| m.to_string()).collect()))
                .collect(),
        )
        .unwrap()
    }

    fn semantic() -> SyncPolicy {
        SyncPolicy::default()
    }

    fn strict() -> SyncPolicy {
        SyncPolicy {
            strict: true,
            ..SyncPolicy::default()
        }
    }

    #[test]
    fn semantic_ignores_member_order() {
        let original = "aliases:\n  a: [c, a, b]\n";
        let r = roster(&[("a", &["a", "b", "c"])]);
        let result = compare(original, &r, &semantic()).unwrap();
        assert!(result.equal);
        assert!(!result.is_changed());
    }

    #[test]
    fn strict_detects_member_order() {
        let original = "aliases:\n  a: [c, a, b]\n";
        let r = roster(&[("a", &["a", "b", "c"])]);
        let result = compare(original, &r, &strict()).unwrap();
        assert!(!result.equal);
    }

    #[test]
    fn strict_detects_comments() {
        let r = roster(&[("a", &["x"])]);
        let canonical = compare("aliases:\n  a: [x]\n", &r, &strict()).unwrap().new_content;
        assert!(compare(&canonical, &r, &strict()).unwrap().equal);

        let commented = format!("# maintained by hand\n{canonical}");
        assert!(!compare(&commented, &r, &strict()).unwrap().equal);
        assert!(compare(&commented, &r, &semantic()).unwrap().equal);
    }

    #[test]
    fn strict_ignores_surrounding_whitespace() {
        let r = roster(&[("a", &["x"])]);
        let canonical = compare("aliases:\n  a: [x]\n", &r, &strict()).unwrap().new_content;
        let padded = format!("\n\n{canonical}\n\n");
        assert!(compare(&padded, &r, &strict()).unwrap().equal);
    }

    #[test]
    fn strict_respects_header() {
        let r = roster(&[("a", &["x"])]);
        let mut policy = strict();
        policy.header = "# Synced from teams.".into();
        let canonical = compare("aliases:\n  a: [x]\n", &r, &policy).unwrap();
        assert!(!canonical.equal);
        assert!(canonical.new_content.starts_with("# Synced from teams.\n\n"));
        assert!(compare(&canonical.new_content, &r, &policy).unwrap().equal);
    }

    #[test]
    fn membership_change_detected() {
        let r = roster(&[("a", &["x", "y"])]);
        let result = compare("aliases:\n  a: [x]\n", &r, &semantic()).unwrap();
        assert!(result.is_changed());
        let reparsed = AliasDocument::parse(&result.new_content).unwrap();
        assert_eq!(reparsed.get("a").unwrap(), &["x", "y"]);
    }

    #[test]
    fn uppercase_original_members_are_stale() {
        let r = roster(&[("a", &["Alice"])]);
        let result = compare("aliases:\n  a: [Alice]\n", &r, &semantic()).unwrap();
        assert!(result.is_changed());
        assert!(result.new_content.contains("alice"));
    }

    #[test]
    fn dropped_alias_detected() {
        let result = compare("aliases:\n  gone: [x]\n", &Roster::empty(), &semantic()).unwrap();
        assert!(result.is_changed());
        assert!(AliasDocument::parse(&result.new_content).unwrap().is_empty());
    }

    #[test]
    fn keep_unknown_keeps_unmatched_alias() {
        let mut policy = semantic();
        policy.keep_unknown = true;
        let result = compare("aliases:\n  legacy: [Someone]\n", &Roster::empty(), &policy).unwrap();
        assert!(result.equal);
        assert!(result.new_content.contains("Someone"));
    }

    #[test]
    fn new_content_returned_when_equal() {
        let r = roster(&[("a", &["x"])]);
        let result = compare("aliases:\n  a: [x]\n", &r, &semantic()).unwrap();
        assert!(result.equal);
        assert!(!result.new_content.is_empty());
    }

    #[test]
    fn parse_error_is_reported() {
        let err = compare("aliases: [broken", &Roster::empty(), &semantic()).unwrap_err();
        assert!(matches!(err, DiffError::Parse(_)));
        assert!(err.to_string().starts_with("invalid aliases file"));
    }

    #[test]
    fn duplicate_alias_is_never_up_to_date() {
        let r = roster(&[("a", &["x"])]);
        let content = "aliases:\n  a: [stale]\n  a: [x]\n";
        for policy in [semantic(), strict()] {
            let err = compare(content, &r, &policy).unwrap_err();
            assert!(matches!(err, DiffError::Parse(_)));
        }
    }

    #[test]
    fn extra_top_level_key_is_rewritten() {
        let r = roster(&[("a", &["x"])]);
        let content = "aliases:\n  a: [x]\nfoo: bar\n";
        assert!(compare(content, &r, &semantic()).unwrap().equal);
        assert!(compare(content, &r, &strict()).unwrap().is_changed());
    }

    fn arb_doc() -> impl Strategy<Value = AliasDocument> {
        prop::collection::btree_map(
            "[a-cA-C]{1,2}",
            prop::collection::vec("u[a-zA-Z0-9]{0,3}", 0..4),
            0..6,
        )
        .prop_map(|m| m.into_iter().collect::<AliasDocument>())
    }

    fn arb_roster() -> impl Strategy<Value = Roster> {
        prop::collection::btree_map(
            "[a-cA-C]{1,2}",
            prop::collection::vec("u[a-zA-Z0-9]{0,3}", 0..4),
            0..6,
        )
        .prop_map(|m| {
            Roster::from_teams(m.into_iter().map(|(slug, members)| Team::new(slug, members)).collect())
                .unwrap()
        })
    }

    proptest! {
        #[test]
        fn regenerated_file_is_a_fixed_point(old in arb_doc(), r in arb_roster(), keep in any::<bool>(), strict_mode in any::<bool>()) {
            let policy = SyncPolicy { keep_unknown: keep, strict: strict_mode, ..SyncPolicy::default() };
            let first = build_projection(&old, &r, keep).to_yaml(&policy.header).unwrap();
            let second = compare(&first, &r, &policy).unwrap();
            prop_assert!(second.equal);
            prop_assert_eq!(second.new_content, first);
        }
    }
}
