//! Jira REST integration.

pub mod client;
pub mod parse;
pub mod types;
