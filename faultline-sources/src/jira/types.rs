//! Wire shapes of the Jira REST API v2, limited to the fields we read.

use serde::Deserialize;

/// One page of a JQL search response.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
pub struct Issue {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub struct IssueFields {
    /// Creation timestamp, e.g. `"2020-01-15T10:12:13.000+0000"`.
    pub created: String,
    #[serde(rename = "fixVersions", default)]
    pub fix_versions: Vec<VersionRef>,
    /// Affected versions.
    #[serde(default)]
    pub versions: Vec<VersionRef>,
}

/// A version object as embedded in issues and project metadata.
#[derive(Debug, Deserialize)]
pub struct VersionRef {
    pub name: Option<String>,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub released: Option<bool>,
}

/// Project metadata response; we only read the version list.
#[derive(Debug, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub versions: Vec<VersionRef>,
}
