//! In-memory repository fake shared by the integration tests.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use faultline_core::config::SourceFileFilter;
use faultline_core::errors::MiningError;
use faultline_core::traits::Repository;
use faultline_core::types::collections::FxHashMap;
use faultline_core::types::commit::CommitMeta;
use faultline_core::types::diff::DiffEdit;

pub struct FakeCommit {
    pub meta: CommitMeta,
    pub touched: Vec<String>,
    pub edits: FxHashMap<String, Vec<DiffEdit>>,
}

impl FakeCommit {
    pub fn new(hash: &str, author: &str, date: &str, message: &str) -> Self {
        Self {
            meta: CommitMeta {
                hash: hash.to_string(),
                author: author.to_string(),
                date: date.parse().unwrap(),
                parent_count: 1,
                message: message.to_string(),
            },
            touched: Vec::new(),
            edits: FxHashMap::default(),
        }
    }

    pub fn root(mut self) -> Self {
        self.meta.parent_count = 0;
        self
    }

    pub fn touches(mut self, path: &str, edits: Vec<DiffEdit>) -> Self {
        self.touched.push(path.to_string());
        self.edits.insert(path.to_string(), edits);
        self
    }
}

#[derive(Default)]
pub struct FakeRepo {
    pub commits: Vec<FakeCommit>,
}

impl FakeRepo {
    pub fn new(commits: Vec<FakeCommit>) -> Self {
        Self { commits }
    }

    fn find(&self, hash: &str) -> Result<&FakeCommit, MiningError> {
        self.commits
            .iter()
            .find(|c| c.meta.hash == hash)
            .ok_or_else(|| MiningError::CommitNotFound {
                hash: hash.to_string(),
            })
    }
}

impl Repository for FakeRepo {
    fn commits_matching_message(&self, needle: &str) -> Result<Vec<CommitMeta>, MiningError> {
        Ok(self
            .commits
            .iter()
            .filter(|c| c.meta.message.contains(needle))
            .map(|c| c.meta.clone())
            .collect())
    }

    fn commits_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CommitMeta>, MiningError> {
        Ok(self
            .commits
            .iter()
            .filter(|c| c.meta.date >= from && c.meta.date <= to)
            .map(|c| c.meta.clone())
            .collect())
    }

    fn commits_touching_before(
        &self,
        path: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<CommitMeta>, MiningError> {
        Ok(self
            .commits
            .iter()
            .filter(|c| c.meta.date < cutoff && c.touched.iter().any(|p| p == path))
            .map(|c| c.meta.clone())
            .collect())
    }

    fn touched_source_files(
        &self,
        hash: &str,
        filter: &SourceFileFilter,
    ) -> Result<BTreeSet<String>, MiningError> {
        let commit = self.find(hash)?;
        if commit.meta.is_root() {
            return Ok(BTreeSet::new());
        }
        Ok(commit
            .touched
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    fn author_of(&self, hash: &str) -> Result<String, MiningError> {
        Ok(self.find(hash)?.meta.author.clone())
    }

    fn resolve(&self, hash: &str) -> Result<CommitMeta, MiningError> {
        Ok(self.find(hash)?.meta.clone())
    }

    fn diff_with_parent(&self, hash: &str, path: &str) -> Result<Vec<DiffEdit>, MiningError> {
        let commit = self.find(hash)?;
        if commit.meta.is_root() {
            return Ok(Vec::new());
        }
        Ok(commit.edits.get(path).cloned().unwrap_or_default())
    }

    fn checkout(&self, _hash: &str) -> Result<(), MiningError> {
        Ok(())
    }

    fn last_commit_before(&self, date: NaiveDate) -> Result<Option<CommitMeta>, MiningError> {
        Ok(self
            .commits
            .iter()
            .filter(|c| c.meta.date < date)
            .max_by_key(|c| c.meta.date)
            .map(|c| c.meta.clone()))
    }
}
