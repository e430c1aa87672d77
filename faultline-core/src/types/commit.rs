//! Read-only commit snapshots produced by the repository adapter.

use chrono::NaiveDate;

/// Metadata of one commit, as seen by the attribution engine.
///
/// The engine never mutates commits; it only links their hashes to tickets
/// and diffs them against their first parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMeta {
    /// Full hex object id.
    pub hash: String,
    /// Author name as recorded in the commit.
    pub author: String,
    /// Author date, in UTC calendar days.
    pub date: NaiveDate,
    /// Number of parents. Zero marks a root commit, which is never diffed.
    pub parent_count: u32,
    /// Full commit message.
    pub message: String,
}

impl CommitMeta {
    /// Root commits contribute no diff and no touch.
    pub fn is_root(&self) -> bool {
        self.parent_count == 0
    }
}
