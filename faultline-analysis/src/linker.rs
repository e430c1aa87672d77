//! Commit–ticket linking: message matching plus a file/author heuristic.

use std::collections::BTreeMap;

use faultline_core::config::SourceFileFilter;
use faultline_core::errors::MiningError;
use faultline_core::traits::Repository;
use faultline_core::types::commit::CommitMeta;
use faultline_core::types::ticket::Ticket;

/// Associates commits with tracker tickets.
///
/// Tickets are keyed in a `BTreeMap` so both phases walk them in identifier
/// order, keeping linkage output reproducible across runs. Any repository
/// access failure in either phase is fatal to the linking operation.
pub struct CommitTicketLinker<'r, R: Repository> {
    repo: &'r R,
    filter: SourceFileFilter,
}

impl<'r, R: Repository> CommitTicketLinker<'r, R> {
    pub fn new(repo: &'r R, filter: SourceFileFilter) -> Self {
        Self { repo, filter }
    }

    /// Direct phase: link every commit whose message contains the ticket
    /// identifier, and record the source files it touched as fixed files.
    pub fn link_by_message(
        &self,
        tickets: &mut BTreeMap<String, Ticket>,
    ) -> Result<(), MiningError> {
        for (id, ticket) in tickets.iter_mut() {
            let commits = self
                .repo
                .commits_matching_message(id)
                .map_err(|e| fatal("direct", e))?;

            for commit in commits {
                ticket.link_commit(commit.hash.clone());
                let files = self
                    .repo
                    .touched_source_files(&commit.hash, &self.filter)
                    .map_err(|e| fatal("direct", e))?;
                for file in files {
                    ticket.add_fixed_file(file);
                }
            }
        }
        Ok(())
    }

    /// Heuristic phase: inside each ticket's open-to-fix window, link
    /// unlinked commits that touch an already-fixed file and share an
    /// author with an already-linked commit. Linking unions the candidate's
    /// touched files into the fixed-file set.
    pub fn link_by_heuristic(
        &self,
        tickets: &mut BTreeMap<String, Ticket>,
    ) -> Result<(), MiningError> {
        for ticket in tickets.values_mut() {
            let (Some(opened), Some(fixed)) = (ticket.opened, ticket.fix_date) else {
                continue;
            };

            let candidates = self
                .repo
                .commits_between(opened, fixed)
                .map_err(|e| fatal("heuristic", e))?;

            for candidate in candidates {
                if ticket.has_linked_commit(&candidate.hash) {
                    continue;
                }

                let touched = self
                    .repo
                    .touched_source_files(&candidate.hash, &self.filter)
                    .map_err(|e| fatal("heuristic", e))?;

                for file in &touched {
                    if !ticket.fixed_files.contains(file) {
                        continue;
                    }
                    if !self.author_matches(&candidate, ticket) {
                        continue;
                    }
                    tracing::debug!(
                        "heuristic link: commit {} joins ticket {} via {}",
                        candidate.hash,
                        ticket.id,
                        file
                    );
                    ticket.link_commit(candidate.hash.clone());
                    for f in &touched {
                        ticket.add_fixed_file(f.clone());
                    }
                    break;
                }
            }
        }
        Ok(())
    }

    /// True when the candidate's author authored any already-linked commit.
    /// A failed author lookup on one linked commit is a non-match for that
    /// commit only.
    fn author_matches(&self, candidate: &CommitMeta, ticket: &Ticket) -> bool {
        for hash in &ticket.commits {
            match self.repo.author_of(hash) {
                Ok(author) if author == candidate.author => return true,
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("author lookup failed for linked commit {hash}: {e}");
                }
            }
        }
        false
    }
}

fn fatal(phase: &'static str, cause: MiningError) -> MiningError {
    MiningError::Linkage {
        phase,
        message: cause.to_string(),
    }
}
