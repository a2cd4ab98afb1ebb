//! Last-activity resolution.
//!
//! The bot running the sync commits to the branches it updates. Counting
//! those commits as activity would keep abandoned branches alive forever,
//! so commits authored by ignored users are skipped when looking for the
//! most recent activity.

use std::collections::HashSet;

use aliasync_types::CommitSummary;
use chrono::{DateTime, Utc};

/// Most recent commit time in `history` not authored by an ignored user.
///
/// `history` is newest first. With no ignored users the head commit time is
/// used directly. If every peeked commit was authored by an ignored user the
/// head commit time is returned, so a branch is never considered stale just
/// because the history window was too short.
pub fn resolve_activity(
    head: DateTime<Utc>,
    history: &[CommitSummary],
    ignored_users: &HashSet<String>,
) -> DateTime<Utc> {
    if ignored_users.is_empty() {
        return head;
    }

    history
        .iter()
        .find(|c| match &c.author {
            Some(login) => !ignored_users.contains(login),
            None => true,
        })
        .map(|c| c.committed_at)
        .unwrap_or(head)
}
