//! git2 adapter implementing the `Repository` collaborator trait.
//!
//! All traversal is sequential over a revwalk from HEAD, newest first.
//! Diffs are always commit-vs-first-parent, restricted to one path, with
//! rename detection so a method's identity survives a simple rename.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use faultline_core::config::SourceFileFilter;
use faultline_core::errors::MiningError;
use faultline_core::traits::Repository;
use faultline_core::types::commit::CommitMeta;
use faultline_core::types::diff::DiffEdit;

/// A locally cloned repository opened for mining.
pub struct GitRepo {
    repo: git2::Repository,
}

impl GitRepo {
    /// Open an already-cloned repository.
    pub fn open(path: &Path) -> Result<Self, MiningError> {
        let repo = git2::Repository::open(path).map_err(repo_err)?;
        Ok(Self { repo })
    }

    /// Walk all commits reachable from HEAD, newest first.
    fn walk(&self) -> Result<Vec<CommitMeta>, MiningError> {
        let mut revwalk = self.repo.revwalk().map_err(repo_err)?;
        revwalk.push_head().map_err(repo_err)?;
        revwalk.set_sorting(git2::Sort::TIME).map_err(repo_err)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid.map_err(repo_err)?;
            let commit = self.repo.find_commit(oid).map_err(repo_err)?;
            commits.push(meta_of(&commit));
        }
        Ok(commits)
    }

    fn find_commit(&self, hash: &str) -> Result<git2::Commit<'_>, MiningError> {
        let oid = git2::Oid::from_str(hash).map_err(|_| MiningError::CommitNotFound {
            hash: hash.to_string(),
        })?;
        match self.repo.find_commit(oid) {
            Ok(commit) => Ok(commit),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Err(MiningError::CommitNotFound {
                hash: hash.to_string(),
            }),
            Err(e) => Err(repo_err(e)),
        }
    }

    /// Full diff of a commit against its first parent, renames resolved.
    /// `None` for root commits.
    fn diff_to_parent(&self, commit: &git2::Commit<'_>) -> Result<Option<git2::Diff<'_>>, MiningError> {
        if commit.parent_count() == 0 {
            return Ok(None);
        }
        let parent = commit.parent(0).map_err(repo_err)?;
        let parent_tree = parent.tree().map_err(repo_err)?;
        let tree = commit.tree().map_err(repo_err)?;

        let mut opts = git2::DiffOptions::new();
        opts.context_lines(0);
        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&parent_tree), Some(&tree), Some(&mut opts))
            .map_err(repo_err)?;

        let mut find_opts = git2::DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts)).map_err(repo_err)?;
        Ok(Some(diff))
    }
}

impl Repository for GitRepo {
    fn commits_matching_message(&self, needle: &str) -> Result<Vec<CommitMeta>, MiningError> {
        Ok(self
            .walk()?
            .into_iter()
            .filter(|c| c.message.contains(needle))
            .collect())
    }

    fn commits_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CommitMeta>, MiningError> {
        Ok(self
            .walk()?
            .into_iter()
            .filter(|c| c.date >= from && c.date <= to)
            .collect())
    }

    fn commits_touching_before(
        &self,
        path: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<CommitMeta>, MiningError> {
        let mut touching = Vec::new();
        for meta in self.walk()? {
            if meta.date >= cutoff {
                continue;
            }
            let commit = self.find_commit(&meta.hash)?;
            let tree = commit.tree().map_err(repo_err)?;

            let mut opts = git2::DiffOptions::new();
            opts.pathspec(path);

            let touched = if commit.parent_count() == 0 {
                // A root commit touches the path iff it introduced it.
                let diff = self
                    .repo
                    .diff_tree_to_tree(None, Some(&tree), Some(&mut opts))
                    .map_err(repo_err)?;
                diff.deltas().len() > 0
            } else {
                let parent_tree = commit
                    .parent(0)
                    .and_then(|p| p.tree())
                    .map_err(repo_err)?;
                let diff = self
                    .repo
                    .diff_tree_to_tree(Some(&parent_tree), Some(&tree), Some(&mut opts))
                    .map_err(repo_err)?;
                diff.deltas().len() > 0
            };

            if touched {
                touching.push(meta);
            }
        }
        Ok(touching)
    }

    fn touched_source_files(
        &self,
        hash: &str,
        filter: &SourceFileFilter,
    ) -> Result<BTreeSet<String>, MiningError> {
        let commit = self.find_commit(hash)?;
        let mut files = BTreeSet::new();
        let Some(diff) = self.diff_to_parent(&commit)? else {
            return Ok(files);
        };
        for delta in diff.deltas() {
            if let Some(path) = delta.new_file().path() {
                let path = path.to_string_lossy();
                if filter.matches(&path) {
                    files.insert(path.into_owned());
                }
            }
        }
        Ok(files)
    }

    fn author_of(&self, hash: &str) -> Result<String, MiningError> {
        let commit = self.find_commit(hash)?;
        Ok(author_name(&commit))
    }

    fn resolve(&self, hash: &str) -> Result<CommitMeta, MiningError> {
        Ok(meta_of(&self.find_commit(hash)?))
    }

    fn diff_with_parent(&self, hash: &str, path: &str) -> Result<Vec<DiffEdit>, MiningError> {
        let commit = self.find_commit(hash)?;
        let mut edits = Vec::new();
        let Some(diff) = self.diff_to_parent(&commit)? else {
            return Ok(edits);
        };

        for (idx, delta) in diff.deltas().enumerate() {
            let matches = delta
                .new_file()
                .path()
                .is_some_and(|p| p.to_string_lossy() == path);
            if !matches {
                continue;
            }
            let Some(mut patch) = git2::Patch::from_diff(&diff, idx).map_err(repo_err)? else {
                continue;
            };
            for h in 0..patch.num_hunks() {
                let (hunk, _) = patch.hunk(h).map_err(repo_err)?;
                edits.push(hunk_to_edit(&hunk));
            }
        }
        Ok(edits)
    }

    fn checkout(&self, hash: &str) -> Result<(), MiningError> {
        let commit = self.find_commit(hash)?;
        let oid = commit.id();
        tracing::info!("checking out commit {oid}");
        self.repo
            .checkout_tree(commit.as_object(), None)
            .map_err(repo_err)?;
        self.repo.set_head_detached(oid).map_err(repo_err)?;
        Ok(())
    }

    fn last_commit_before(&self, date: NaiveDate) -> Result<Option<CommitMeta>, MiningError> {
        // walk() is newest first, so the first hit is the latest match.
        Ok(self.walk()?.into_iter().find(|c| c.date < date))
    }
}

fn repo_err(e: git2::Error) -> MiningError {
    MiningError::repo(e.to_string())
}

fn meta_of(commit: &git2::Commit<'_>) -> CommitMeta {
    CommitMeta {
        hash: commit.id().to_string(),
        author: author_name(commit),
        date: epoch_date(commit.author().when().seconds()),
        parent_count: commit.parent_count() as u32,
        message: commit.message().unwrap_or("").to_string(),
    }
}

fn author_name(commit: &git2::Commit<'_>) -> String {
    commit.author().name().unwrap_or("unknown").to_string()
}

/// Author epoch seconds to a UTC calendar day.
fn epoch_date(seconds: i64) -> NaiveDate {
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

/// Convert a unified-diff hunk header to a 0-based half-open edit.
///
/// Hunk starts are 1-based, except that a zero-length side reports the line
/// *before* the change, which already equals the 0-based insertion point.
fn hunk_to_edit(hunk: &git2::DiffHunk<'_>) -> DiffEdit {
    let begin_old = if hunk.old_lines() == 0 {
        hunk.old_start()
    } else {
        hunk.old_start().saturating_sub(1)
    };
    let begin_new = if hunk.new_lines() == 0 {
        hunk.new_start()
    } else {
        hunk.new_start().saturating_sub(1)
    };
    DiffEdit::new(
        begin_old,
        begin_old + hunk.old_lines(),
        begin_new,
        begin_new + hunk.new_lines(),
    )
}
