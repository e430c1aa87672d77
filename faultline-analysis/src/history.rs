//! Historical churn mining: accumulate per-method added/deleted lines and
//! distinct authors across every commit touching a file before a release
//! cutoff.

use faultline_core::traits::Repository;
use faultline_core::types::collections::{FxHashMap, FxHashSet};
use faultline_core::types::method::{MethodId, MethodInventory};
use faultline_core::types::release::Release;

use crate::overlap;

/// Running churn totals for one method span.
#[derive(Debug, Default)]
struct ChurnAccumulator {
    revisions: u32,
    added: u32,
    deleted: u32,
    authors: FxHashSet<String>,
}

impl ChurnAccumulator {
    fn record(&mut self, added: u32, deleted: u32, author: &str) {
        self.revisions += 1;
        self.added += added;
        self.deleted += deleted;
        self.authors.insert(author.to_string());
    }
}

/// Mines the repository history for the quantitative overlap mode.
pub struct HistoryMiner<'r, R: Repository> {
    repo: &'r R,
}

impl<'r, R: Repository> HistoryMiner<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    /// Accumulate churn for every method of `release` across all commits
    /// touching its file before the release date, then apply the totals
    /// onto the inventory.
    ///
    /// A file whose history cannot be read is logged and skipped; churn for
    /// the remaining files still lands.
    pub fn mine_release_churn(&self, inventory: &mut MethodInventory, release: &Release) {
        // Group this release's methods by file.
        let mut by_file: FxHashMap<String, Vec<MethodId>> = FxHashMap::default();
        for (id, record) in inventory.iter() {
            if record.release == release.name {
                by_file.entry(record.file.clone()).or_default().push(id);
            }
        }

        let mut totals: FxHashMap<MethodId, ChurnAccumulator> = FxHashMap::default();

        for (file, method_ids) in &by_file {
            let commits = match self.repo.commits_touching_before(file, release.date) {
                Ok(commits) => commits,
                Err(e) => {
                    tracing::warn!("history of {file} unreadable, skipping: {e}");
                    continue;
                }
            };

            for commit in commits {
                if commit.is_root() {
                    continue;
                }
                let edits = match self.repo.diff_with_parent(&commit.hash, file) {
                    Ok(edits) => edits,
                    Err(e) => {
                        tracing::warn!(
                            "diff failed for commit {} on {file}: {e}",
                            commit.hash
                        );
                        continue;
                    }
                };
                if edits.is_empty() {
                    continue;
                }

                for &id in method_ids {
                    let span = inventory.get(id).span;
                    if let Some(churn) = overlap::span_churn(&edits, span) {
                        totals.entry(id).or_default().record(
                            churn.added,
                            churn.deleted,
                            &commit.author,
                        );
                    }
                }
            }
        }

        for (id, acc) in totals {
            inventory.set_churn(
                id,
                acc.revisions,
                acc.added,
                acc.deleted,
                acc.authors.len() as u32,
            );
        }
    }
}
