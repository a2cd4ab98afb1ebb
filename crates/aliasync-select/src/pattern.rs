//! Glob matching on branch names.
//!
//! Patterns follow shell path-match rules: `*` and `?` never match `/`, so
//! `release-*` selects `release-1.0` but not `release-1.0/hotfix`.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::{Result, SelectError};

/// A compiled set of branch name patterns.
#[derive(Clone, Debug)]
pub struct BranchMatcher {
    set: GlobSet,
}

impl BranchMatcher {
    /// Compile the given patterns. At least one pattern is required.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        if patterns.is_empty() {
            return Err(SelectError::NoPatterns);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .backslash_escape(true)
                .build()
                .map_err(|e| SelectError::Pattern {
                    pattern: pattern.to_string(),
                    reason: e.kind().to_string(),
                })?;
            builder.add(glob);
        }

        let set = builder.build().map_err(|e| SelectError::Pattern {
            pattern: patterns
                .iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            reason: e.to_string(),
        })?;

        Ok(Self { set })
    }

    /// Returns `true` if `branch` matches at least one pattern.
    pub fn is_match(&self, branch: &str) -> bool {
        self.set.is_match(branch)
    }
}
