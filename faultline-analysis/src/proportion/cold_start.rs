//! Cold-start proportion bootstrapped from donor projects.
//!
//! Before the target project has accumulated enough local samples, the
//! working proportion comes from an average over several donor open-source
//! histories.

use faultline_core::traits::TicketSource;
use statrs::statistics::Statistics;

use crate::catalog::ReleaseCatalog;

/// Compute the cold-start constant `P₀` over the given donor projects.
///
/// For every donor ticket with at least one affected version, a proportion
/// sample is derived from its first affected version, earliest fix version,
/// and opening-version index; samples outside `(0, max_retained]` are
/// rejected. The constant is the mean of all retained samples across all
/// donors, or `1.0` when none are retained. A donor whose data cannot be
/// fetched is logged and skipped.
pub fn compute_cold_start_p(
    source: &dyn TicketSource,
    donors: &[String],
    max_retained: f64,
) -> f64 {
    let mut proportions: Vec<f64> = Vec::new();

    for project in donors {
        let (tickets, releases) = match (
            source.resolved_bug_tickets(project),
            source.releases(project),
        ) {
            (Ok(t), Ok(r)) => (t, r),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("cold start: skipping donor {project}: {e}");
                continue;
            }
        };

        let catalog = ReleaseCatalog::new(releases);

        for ticket in &tickets {
            let Some(av) = ticket.affected_versions.first() else {
                continue;
            };
            let Some(fv) = ticket.fix_version_name.as_deref() else {
                continue;
            };
            let Some(opened) = ticket.opened else {
                continue;
            };

            let (Some(av_idx), Some(fv_idx), Some(ov_idx)) = (
                catalog.index_of(av),
                catalog.index_of(fv),
                catalog.closest_at_or_before(opened),
            ) else {
                continue;
            };

            if let Some(p) = proportion_sample(av_idx, fv_idx, ov_idx) {
                if p > 0.0 && p <= max_retained {
                    proportions.push(p);
                }
            }
        }
    }

    if proportions.is_empty() {
        return 1.0;
    }
    proportions.iter().mean()
}

/// The raw proportion formula. When fix and opening coincide the raw index
/// difference stands in for the ratio, avoiding division by zero.
pub(crate) fn proportion_sample(av_idx: usize, fv_idx: usize, ov_idx: usize) -> Option<f64> {
    let av = av_idx as f64;
    let fv = fv_idx as f64;
    let ov = ov_idx as f64;
    let p = if fv_idx == ov_idx {
        fv - av
    } else {
        (fv - av) / (fv - ov)
    };
    p.is_finite().then_some(p)
}
