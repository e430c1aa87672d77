//! The bug-label attributor: flags methods touched by fixing commits in
//! the releases a defect was present.

use std::collections::{BTreeMap, BTreeSet};

use faultline_core::errors::MiningError;
use faultline_core::traits::Repository;
use faultline_core::types::method::MethodInventory;
use faultline_core::types::report::{AuditRow, LabelReport, TicketOutcome};
use faultline_core::types::ticket::Ticket;

use crate::catalog::ReleaseCatalog;
use crate::overlap;
use crate::proportion::ProportionEstimator;

/// Orchestrates catalog, estimator, and diff overlap into per-method labels.
pub struct BugLabeler<'a, R: Repository> {
    repo: &'a R,
    catalog: &'a ReleaseCatalog,
}

impl<'a, R: Repository> BugLabeler<'a, R> {
    pub fn new(repo: &'a R, catalog: &'a ReleaseCatalog) -> Self {
        Self { repo, catalog }
    }

    /// Label every method touched by a linked fixing commit in a buggy
    /// release.
    ///
    /// All tickets carrying affected versions are registered into the
    /// estimator before any estimation happens, then tickets are processed
    /// in identifier order. Unresolvable linked hashes are skipped per
    /// commit; only linking-phase failures abort a run, so this never
    /// fails.
    pub fn label(
        &self,
        inventory: &mut MethodInventory,
        tickets: &mut BTreeMap<String, Ticket>,
        estimator: &mut ProportionEstimator<'_>,
    ) -> LabelReport {
        let mut report = LabelReport::default();

        // Phase 1: registration. Every AV-carrying ticket becomes a local
        // proportion sample before the first estimation call.
        for ticket in tickets.values() {
            if !ticket.affected_versions.is_empty() {
                estimator.register(ticket);
            }
        }

        let dataset_releases: BTreeSet<String> = inventory
            .release_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        // Phase 2: attribution, ticket by ticket.
        for ticket in tickets.values_mut() {
            let outcome =
                self.label_ticket(ticket, inventory, estimator, &dataset_releases, &mut report);
            report.outcomes.push((ticket.id.clone(), outcome));
        }

        tracing::info!(
            "labeling done: {} methods via affected versions, {} via proportion",
            report.buggy_from_affected,
            report.buggy_from_estimate
        );
        report
    }

    fn label_ticket(
        &self,
        ticket: &mut Ticket,
        inventory: &mut MethodInventory,
        estimator: &ProportionEstimator<'_>,
        dataset_releases: &BTreeSet<String>,
        report: &mut LabelReport,
    ) -> TicketOutcome {
        if !ticket.is_label_eligible() {
            return TicketOutcome::SkippedNoPrerequisites;
        }

        let from_affected = !ticket.affected_versions.is_empty();
        let mut buggy_releases = self.buggy_release_set(ticket, estimator);
        if buggy_releases.is_empty() {
            return TicketOutcome::SkippedNoWindow;
        }

        buggy_releases.retain(|r| dataset_releases.contains(r));
        if buggy_releases.is_empty() {
            tracing::debug!(
                "ticket {}: all buggy releases outside the analyzed set",
                ticket.id
            );
            return TicketOutcome::SkippedOutOfDataset;
        }

        let mut newly_flagged = 0usize;

        for hash in &ticket.commits {
            let commit = match self.repo.resolve(hash) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!("skipping unresolvable commit {hash}: {e}");
                    continue;
                }
            };

            for file in &ticket.fixed_files {
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

                for release in &buggy_releases {
                    let candidates: Vec<_> =
                        inventory.methods_in(file, release).to_vec();
                    for id in candidates {
                        let span = inventory.get(id).span;
                        if !overlap::span_touched(&edits, span) {
                            continue;
                        }
                        if inventory.mark_buggy(id) {
                            newly_flagged += 1;
                            if from_affected {
                                report.buggy_from_affected += 1;
                            } else {
                                report.buggy_from_estimate += 1;
                            }
                            report.audit.push(AuditRow {
                                ticket: ticket.id.clone(),
                                commit: commit.hash.clone(),
                                method: inventory.get(id).name.clone(),
                                release: release.clone(),
                            });
                        }
                    }
                }
            }
        }

        TicketOutcome::Labeled(newly_flagged)
    }

    /// Releases in which the ticket's defect is considered present.
    ///
    /// With declared affected versions the earliest one is the injected
    /// version; otherwise the estimator supplies it. Either way the window
    /// runs from the injected version inclusive to the fix version
    /// exclusive. Declared versions that the catalog cannot place fall back
    /// to their normalized names.
    fn buggy_release_set(
        &self,
        ticket: &mut Ticket,
        estimator: &ProportionEstimator<'_>,
    ) -> BTreeSet<String> {
        let fv_idx = ticket
            .fix_version_name
            .as_deref()
            .and_then(|fv| self.catalog.index_of(fv));

        let iv_idx = if !ticket.affected_versions.is_empty() {
            let iv = ticket
                .affected_versions
                .iter()
                .filter_map(|av| self.catalog.index_of(av))
                .min();
            if iv.is_none() || fv_idx.is_none() {
                // No resolvable window; use the declared names as-is.
                return ticket
                    .affected_versions
                    .iter()
                    .map(|av| self.catalog.normalize_version_name(av))
                    .collect();
            }
            iv
        } else {
            let estimated = estimator.estimate(ticket);
            if estimated.is_none() {
                tracing::debug!("ticket {}: injected-version estimation failed", ticket.id);
            }
            estimated.and_then(|iv| self.catalog.index_of(&iv))
        };

        let mut releases = BTreeSet::new();
        let (Some(iv_idx), Some(fv_idx)) = (iv_idx, fv_idx) else {
            return releases;
        };
        for i in iv_idx..fv_idx {
            if let Some(name) = self.catalog.name_at(i) {
                releases.insert(name.to_string());
            }
        }
        releases
    }
}
