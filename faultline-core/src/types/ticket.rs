//! Tracker tickets and their incrementally accumulated linkage state.

use std::collections::BTreeSet;

use chrono::NaiveDate;

/// One declared fix version of a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixVersion {
    pub name: String,
    pub date: NaiveDate,
}

/// A resolved bug ticket from the issue tracker.
///
/// Tickets are created by the source layer and then enriched in place: the
/// linker accumulates commit hashes and fixed files, the estimator stores
/// the estimated injected version. Nothing is ever removed during a run.
///
/// Commit hashes and fixed files live in `BTreeSet`s so every later pass
/// iterates them in a stable order, independent of link discovery order.
#[derive(Debug, Clone, Default)]
pub struct Ticket {
    /// Tracker identifier, e.g. `"BOOKKEEPER-123"`.
    pub id: String,
    /// Creation date of the ticket.
    pub opened: Option<NaiveDate>,
    /// All declared fix versions that carry a release date.
    pub fix_versions: Vec<FixVersion>,
    /// Name of the earliest fix version by date; the canonical FV.
    pub fix_version_name: Option<String>,
    /// Date of the earliest fix version.
    pub fix_date: Option<NaiveDate>,
    /// Affected versions declared by the reporter, in tracker order.
    pub affected_versions: Vec<String>,
    /// Hashes of commits linked to this ticket.
    pub commits: BTreeSet<String>,
    /// Source files touched by linked commits.
    pub fixed_files: BTreeSet<String>,
    /// Injected version estimated by the proportion engine, if any.
    pub injected_version: Option<String>,
}

impl Ticket {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Record a declared fix version, keeping the earliest one canonical.
    pub fn add_fix_version(&mut self, name: impl Into<String>, date: NaiveDate) {
        let name = name.into();
        let earlier = match self.fix_date {
            Some(current) => date < current,
            None => true,
        };
        if earlier {
            self.fix_date = Some(date);
            self.fix_version_name = Some(name.clone());
        }
        self.fix_versions.push(FixVersion { name, date });
    }

    pub fn add_affected_version(&mut self, name: impl Into<String>) {
        self.affected_versions.push(name.into());
    }

    /// Returns true if the commit was not already linked.
    pub fn link_commit(&mut self, hash: impl Into<String>) -> bool {
        self.commits.insert(hash.into())
    }

    pub fn add_fixed_file(&mut self, path: impl Into<String>) {
        self.fixed_files.insert(path.into());
    }

    pub fn has_linked_commit(&self, hash: &str) -> bool {
        self.commits.contains(hash)
    }

    /// A ticket qualifies for labeling only with a fix version and at least
    /// one linked commit.
    pub fn is_label_eligible(&self) -> bool {
        self.fix_date.is_some() && !self.commits.is_empty()
    }
}
