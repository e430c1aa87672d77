//! Outcome of a labeling run, consumed by the export layer.

use serde::Serialize;

/// What happened to one ticket during attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TicketOutcome {
    /// Missing fix version or no linked commits.
    SkippedNoPrerequisites,
    /// No buggy-release set could be resolved.
    SkippedNoWindow,
    /// Resolved buggy releases do not intersect the analyzed release set.
    SkippedOutOfDataset,
    /// Processed; carries the number of methods newly flagged.
    Labeled(usize),
}

/// One attribution event, for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRow {
    pub ticket: String,
    pub commit: String,
    pub method: String,
    pub release: String,
}

/// Run-wide attribution statistics.
#[derive(Debug, Default)]
pub struct LabelReport {
    /// Methods flagged through explicitly declared affected versions.
    pub buggy_from_affected: u32,
    /// Methods flagged through an estimated injected version.
    pub buggy_from_estimate: u32,
    /// Per-ticket outcomes, in processing order.
    pub outcomes: Vec<(String, TicketOutcome)>,
    /// One row per newly flagged method.
    pub audit: Vec<AuditRow>,
}

impl LabelReport {
    pub fn total_flagged(&self) -> u32 {
        self.buggy_from_affected + self.buggy_from_estimate
    }
}
