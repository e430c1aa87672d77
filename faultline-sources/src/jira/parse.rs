//! Conversion from Jira payloads to domain tickets and releases.

use chrono::NaiveDate;
use regex::Regex;

use faultline_core::errors::SourceError;
use faultline_core::types::release::Release;
use faultline_core::types::ticket::Ticket;

use super::types::{Issue, ProjectInfo, VersionRef};

/// Turns raw Jira payloads into domain values.
///
/// Only versions named `major.minor.patch` survive conversion; everything
/// else (milestones, betas, two-part names) is dropped here so downstream
/// passes never see them.
pub struct PayloadParser {
    three_part: Regex,
}

impl Default for PayloadParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadParser {
    pub fn new() -> Self {
        Self {
            three_part: Regex::new(r"^\d+\.\d+\.\d+$").unwrap(),
        }
    }

    /// Build a ticket from one search issue.
    ///
    /// Declared fix versions without a release date are ignored; affected
    /// versions are kept by name only, in tracker order. An unparseable
    /// creation timestamp is a payload fault, not a skip.
    pub fn ticket(&self, issue: &Issue) -> Result<Ticket, SourceError> {
        let mut ticket = Ticket::new(issue.key.clone());
        ticket.opened = Some(parse_day(&issue.fields.created)?);

        for fv in &issue.fields.fix_versions {
            let Some(name) = self.accepted_name(fv) else {
                continue;
            };
            let Some(raw_date) = fv.release_date.as_deref() else {
                continue;
            };
            ticket.add_fix_version(name, parse_day(raw_date)?);
        }

        for av in &issue.fields.versions {
            if let Some(name) = self.accepted_name(av) {
                ticket.add_affected_version(name);
            }
        }

        Ok(ticket)
    }

    /// Released versions of a project, sorted ascending by release date.
    ///
    /// Unreleased versions and versions without a release date are dropped.
    pub fn releases(&self, info: &ProjectInfo) -> Result<Vec<Release>, SourceError> {
        let mut out = Vec::new();
        for v in &info.versions {
            if v.released != Some(true) {
                continue;
            }
            let Some(name) = self.accepted_name(v) else {
                continue;
            };
            let Some(raw_date) = v.release_date.as_deref() else {
                tracing::debug!(version = %name, "released version without a date, dropped");
                continue;
            };
            out.push(Release::new(name, parse_day(raw_date)?));
        }
        out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
        Ok(out)
    }

    fn accepted_name(&self, v: &VersionRef) -> Option<String> {
        let name = v.name.as_deref()?;
        self.three_part.is_match(name).then(|| name.to_owned())
    }
}

/// Parse the leading `YYYY-MM-DD` of a Jira timestamp or date string.
fn parse_day(raw: &str) -> Result<NaiveDate, SourceError> {
    let day = raw.get(..10).unwrap_or(raw);
    day.parse().map_err(|_| SourceError::Date {
        value: raw.to_owned(),
    })
}
