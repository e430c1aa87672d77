//! Blocking Jira REST client.

use serde::de::DeserializeOwned;

use faultline_core::errors::SourceError;
use faultline_core::traits::TicketSource;
use faultline_core::types::release::Release;
use faultline_core::types::ticket::Ticket;

use super::parse::PayloadParser;
use super::types::{ProjectInfo, SearchPage};

/// Page size for JQL searches. Jira caps result pages at 1000 issues.
const PAGE_SIZE: u64 = 1000;

/// Talks to a Jira instance over its v2 REST API.
///
/// All requests are synchronous; the engine drives the tracker once up
/// front and never again during mining.
pub struct JiraClient {
    base_url: String,
    http: reqwest::blocking::Client,
    parser: PayloadParser,
}

impl JiraClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http: reqwest::blocking::Client::new(),
            parser: PayloadParser::new(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| http_err(url, e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(http_err(url, format!("status {status}")));
        }
        response.json().map_err(|e| SourceError::Payload {
            message: e.to_string(),
        })
    }

    fn search_url(&self, project: &str, start: u64) -> String {
        let jql = format!(
            "project={project} AND issuetype=Bug AND status in (Resolved, Closed) \
             AND resolution=Fixed"
        )
        .replace(' ', "%20");
        format!(
            "{}/rest/api/2/search?jql={jql}&fields=key,created,versions,fixVersions\
             &startAt={start}&maxResults={PAGE_SIZE}",
            self.base_url
        )
    }
}

fn http_err(url: &str, message: String) -> SourceError {
    SourceError::Http {
        url: url.to_owned(),
        message,
    }
}

impl TicketSource for JiraClient {
    fn resolved_bug_tickets(&self, project: &str) -> Result<Vec<Ticket>, SourceError> {
        let mut tickets = Vec::new();
        let mut start = 0u64;
        loop {
            let url = self.search_url(project, start);
            let page: SearchPage = self.get_json(&url)?;
            let fetched = page.issues.len() as u64;
            for issue in &page.issues {
                tickets.push(self.parser.ticket(issue)?);
            }
            start += fetched;
            if start >= page.total || fetched == 0 {
                break;
            }
        }
        tracing::info!(project, count = tickets.len(), "fetched resolved bug tickets");
        Ok(tickets)
    }

    fn releases(&self, project: &str) -> Result<Vec<Release>, SourceError> {
        let url = format!("{}/rest/api/2/project/{project}", self.base_url);
        let info: ProjectInfo = self.get_json(&url)?;
        let releases = self.parser.releases(&info)?;
        tracing::info!(project, count = releases.len(), "fetched released versions");
        Ok(releases)
    }
}
