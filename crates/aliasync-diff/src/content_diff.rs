//! Line-level diff of alias file text, for showing reviewers what a rewrite
//! would change.
//!
//! Uses the `similar` crate (Myers diff algorithm) to produce structured
//! hunks with context lines.

use std::fmt::Write;

use similar::{ChangeTag, TextDiff};

/// The result of diffing two versions of a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentDiff {
    pub hunks: Vec<DiffHunk>,
}

impl ContentDiff {
    /// Returns `true` if the two texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }

    /// Render in unified diff format with `a/` and `b/` prefixed file labels.
    pub fn to_unified(&self, path: &str) -> String {
        let mut out = String::new();
        if self.is_empty() {
            return out;
        }

        let _ = writeln!(out, "--- a/{path}");
        let _ = writeln!(out, "+++ b/{path}");
        for hunk in &self.hunks {
            let _ = writeln!(
                out,
                "@@ -{},{} +{},{} @@",
                hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
            );
            for line in &hunk.lines {
                let _ = match line {
                    DiffLine::Context(text) => writeln!(out, " {text}"),
                    DiffLine::Added(text) => writeln!(out, "+{text}"),
                    DiffLine::Removed(text) => writeln!(out, "-{text}"),
                };
            }
        }
        out
    }
}

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// Line number in the old text where this hunk starts (1-based).
    pub old_start: usize,
    pub old_count: usize,
    /// Line number in the new text where this hunk starts (1-based).
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    fn starting_at(old_start: usize, new_start: usize) -> Self {
        Self {
            old_start,
            old_count: 0,
            new_start,
            new_count: 0,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: DiffLine) {
        match line {
            DiffLine::Context(_) => {
                self.old_count += 1;
                self.new_count += 1;
            }
            DiffLine::Removed(_) => self.old_count += 1,
            DiffLine::Added(_) => self.new_count += 1,
        }
        self.lines.push(line);
    }
}

/// A single line in a diff hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    Context(String),
    Added(String),
    Removed(String),
}

impl DiffLine {
    fn from_change(tag: ChangeTag, value: &str) -> Self {
        let text = value.trim_end_matches('\n').to_string();
        match tag {
            ChangeTag::Equal => DiffLine::Context(text),
            ChangeTag::Delete => DiffLine::Removed(text),
            ChangeTag::Insert => DiffLine::Added(text),
        }
    }
}

/// Compute a line-by-line diff with three lines of context.
pub fn diff_content(old: &str, new: &str) -> ContentDiff {
    if old == new {
        return ContentDiff { hunks: Vec::new() };
    }

    let text_diff = TextDiff::from_lines(old, new);
    let hunks = text_diff
        .grouped_ops(3)
        .iter()
        .filter_map(|group| {
            let first = group.first()?;
            let mut hunk = DiffHunk::starting_at(first.old_range().start + 1, first.new_range().start + 1);
            group
                .iter()
                .flat_map(|op| text_diff.iter_changes(op))
                .for_each(|change| hunk.push(DiffLine::from_change(change.tag(), change.value())));
            Some(hunk)
        })
        .collect();

    ContentDiff { hunks }
}
