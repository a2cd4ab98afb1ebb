use aliasync_aliases::AliasDocument;
use aliasync_types::Roster;
use tracing::trace;

/// Build the alias document that `old` should become under `roster`.
///
/// For every alias in `old`:
///
/// - a team with the identical slug replaces the members with the team's
///   members, lowercased;
/// - otherwise the alias keeps its original members verbatim when
///   `keep_unknown` is set, and is dropped when it is not.
///
/// The roster is only read; lowercasing produces new strings.
pub fn build_projection(old: &AliasDocument, roster: &Roster, keep_unknown: bool) -> AliasDocument {
    let mut result = AliasDocument::new();

    for (name, members) in old.iter() {
        match roster.find(name) {
            Some(team) => {
                result.insert(name, team.lowercase_members());
            }
            None if keep_unknown => {
                trace!(alias = name, "no matching team, keeping members");
                result.insert(name, members.to_vec());
            }
            None => {
                trace!(alias = name, "no matching team, dropping alias");
            }
        }
    }

    result
}
