//! Collaborator seams: the engine talks to the repository, the tracker, and
//! the export layer only through these traits.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::config::SourceFileFilter;
use crate::errors::{ExportError, MiningError, SourceError};
use crate::types::commit::CommitMeta;
use crate::types::diff::DiffEdit;
use crate::types::method::MethodInventory;
use crate::types::release::Release;
use crate::types::report::LabelReport;
use crate::types::ticket::Ticket;

/// Synchronous, read-only view of a version-control repository.
///
/// All traversal is sequential; implementations are not required to be
/// thread-safe. `resolve` distinguishes a missing commit (recoverable,
/// `MiningError::CommitNotFound`) from structural access errors.
pub trait Repository {
    /// Commits whose message contains `needle` as a substring.
    fn commits_matching_message(&self, needle: &str) -> Result<Vec<CommitMeta>, MiningError>;

    /// Commits authored within `[from, to]` inclusive, by calendar day.
    fn commits_between(&self, from: NaiveDate, to: NaiveDate)
        -> Result<Vec<CommitMeta>, MiningError>;

    /// Commits touching `path`, authored strictly before `cutoff`.
    fn commits_touching_before(
        &self,
        path: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<CommitMeta>, MiningError>;

    /// Source files touched by the commit, after filtering. Empty for root
    /// commits.
    fn touched_source_files(
        &self,
        hash: &str,
        filter: &SourceFileFilter,
    ) -> Result<BTreeSet<String>, MiningError>;

    /// Author identity of the commit.
    fn author_of(&self, hash: &str) -> Result<String, MiningError>;

    /// Resolve a stored hash back to its metadata.
    fn resolve(&self, hash: &str) -> Result<CommitMeta, MiningError>;

    /// Line-range edits of `path` between the commit and its first parent,
    /// with rename detection. Empty for root commits.
    fn diff_with_parent(&self, hash: &str, path: &str) -> Result<Vec<DiffEdit>, MiningError>;

    /// Detach HEAD at the given commit.
    fn checkout(&self, hash: &str) -> Result<(), MiningError>;

    /// Most recent commit authored strictly before `date`, if any.
    fn last_commit_before(&self, date: NaiveDate) -> Result<Option<CommitMeta>, MiningError>;
}

/// Issue-tracker boundary: resolved bug tickets and release lists, already
/// filtered upstream to the `major.minor.patch` naming convention.
pub trait TicketSource {
    fn resolved_bug_tickets(&self, project: &str) -> Result<Vec<Ticket>, SourceError>;

    /// Released versions of the project, sorted ascending by date.
    fn releases(&self, project: &str) -> Result<Vec<Release>, SourceError>;
}

/// Metrics-export boundary: receives the final dataset and audit trail.
pub trait DatasetSink {
    fn write_methods(&mut self, inventory: &MethodInventory) -> Result<(), ExportError>;

    fn write_audit(&mut self, report: &LabelReport) -> Result<(), ExportError>;
}
