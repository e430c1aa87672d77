//! Incremental proportion estimation over the target project's own tickets.

use faultline_core::types::ticket::Ticket;
use statrs::statistics::Statistics;

use crate::catalog::ReleaseCatalog;

use super::cold_start::proportion_sample;

/// One registered local sample: a ticket whose defect-introducing release
/// is known from its affected versions.
#[derive(Debug, Clone, Copy)]
struct LocalSample {
    av_idx: usize,
    fv_idx: usize,
    ov_idx: usize,
}

/// Estimates the injected version of tickets lacking affected versions.
///
/// Registration and estimation are two phases: every ticket carrying
/// affected versions is registered first, then estimation runs for the
/// rest. While fewer than `min_local_samples` tickets are registered the
/// cold-start constant is used; afterwards the working proportion is
/// recomputed fresh over the full sample set on every call.
pub struct ProportionEstimator<'c> {
    catalog: &'c ReleaseCatalog,
    cold_start_p: f64,
    min_local_samples: usize,
    samples: Vec<LocalSample>,
}

impl<'c> ProportionEstimator<'c> {
    pub fn new(catalog: &'c ReleaseCatalog, cold_start_p: f64, min_local_samples: usize) -> Self {
        Self {
            catalog,
            cold_start_p,
            min_local_samples,
            samples: Vec::new(),
        }
    }

    /// Register a ticket as a local proportion sample.
    ///
    /// Eligibility: non-empty affected versions, a fix-version name, at
    /// least one affected version normalizing to a known release (the first
    /// such becomes the sample's injected index), and a resolvable
    /// opening-version index. Returns true when the ticket was registered.
    pub fn register(&mut self, ticket: &Ticket) -> bool {
        if ticket.affected_versions.is_empty() {
            tracing::debug!("register: ticket {} has no affected versions", ticket.id);
            return false;
        }
        let Some(fv_name) = ticket.fix_version_name.as_deref() else {
            tracing::debug!("register: ticket {} has no fix version", ticket.id);
            return false;
        };
        let Some(opened) = ticket.opened else {
            tracing::debug!("register: ticket {} has no opening date", ticket.id);
            return false;
        };

        let Some(av_idx) = ticket
            .affected_versions
            .iter()
            .find_map(|av| self.catalog.index_of(av))
        else {
            tracing::debug!(
                "register: ticket {} has no affected version known to the catalog",
                ticket.id
            );
            return false;
        };

        let (Some(fv_idx), Some(ov_idx)) = (
            self.catalog.index_of(fv_name),
            self.catalog.closest_at_or_before(opened),
        ) else {
            tracing::debug!("register: ticket {} indices unresolvable", ticket.id);
            return false;
        };

        self.samples.push(LocalSample {
            av_idx,
            fv_idx,
            ov_idx,
        });
        true
    }

    /// The proportion used by the next estimation: the cold-start constant
    /// until enough local samples exist, then the fresh mean over all of
    /// them.
    pub fn working_proportion(&self) -> f64 {
        if self.samples.len() < self.min_local_samples {
            return self.cold_start_p;
        }
        let values: Vec<f64> = self
            .samples
            .iter()
            .filter_map(|s| proportion_sample(s.av_idx, s.fv_idx, s.ov_idx))
            .collect();
        if values.is_empty() {
            return self.cold_start_p;
        }
        values.iter().mean()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Estimate the ticket's injected version and store the name on the
    /// ticket. `None` when the fix-version or opening-version index cannot
    /// be resolved, or when the estimated ordinal maps past the catalog.
    pub fn estimate(&self, ticket: &mut Ticket) -> Option<String> {
        let fv_name = ticket.fix_version_name.clone()?;
        let fv_idx = self.catalog.index_of(&fv_name)?;
        let ov_idx = self.catalog.closest_at_or_before(ticket.opened?)?;

        let p = self.working_proportion();
        let fv = fv_idx as f64;
        let ov = ov_idx as f64;
        let raw = if fv_idx == ov_idx {
            fv - p
        } else {
            fv - (fv - ov) * p
        };
        let iv_idx = (raw.round() as i64).max(0) as usize;

        let name = self.catalog.name_at(iv_idx).map(str::to_string);
        ticket.injected_version = name.clone();
        name
    }
}
