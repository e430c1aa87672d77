//! # faultline-sources
//!
//! Boundary collaborators for the issue tracker: a blocking Jira REST
//! client and the payload-to-domain conversion, filtered upstream to the
//! `major.minor.patch` naming convention.

pub mod jira;

pub use jira::client::JiraClient;
pub use jira::parse::PayloadParser;
