use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default staleness window: branches without activity for 90 days are left alone.
pub const DEFAULT_MAX_STALENESS: Duration = Duration::from_secs(90 * 24 * 60 * 60);

/// Flags that steer comparison and branch selection.
///
/// Built once from configuration and passed by reference into every core
/// call; there is no global policy state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncPolicy {
    /// Compare alias files byte by byte (after trimming) instead of structurally.
    pub strict: bool,
    /// Keep aliases that have no matching team instead of dropping them.
    pub keep_unknown: bool,
    /// Glob patterns; a branch must match at least one to be considered.
    pub branch_patterns: Vec<String>,
    /// Branches whose last activity is older than this are skipped.
    pub max_staleness: Duration,
    /// Text placed above the serialized document. Empty means no header.
    pub header: String,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            strict: false,
            keep_unknown: false,
            branch_patterns: Vec::new(),
            max_staleness: DEFAULT_MAX_STALENESS,
            header: String::new(),
        }
    }
}

impl SyncPolicy {
    /// A policy selecting the given branch patterns with all other defaults.
    pub fn for_branches<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            branch_patterns: patterns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}
