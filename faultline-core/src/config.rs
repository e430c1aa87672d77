//! Run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

const DEFAULT_DONORS: [&str; 5] = ["AVRO", "OPENJPA", "ZOOKEEPER", "SYNCOPE", "TAJO"];

/// Configuration for a Faultline mining run, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FaultlineConfig {
    /// Tracker project key of the analyzed project, e.g. "BOOKKEEPER".
    pub project: Option<String>,
    /// Path to the locally cloned repository.
    pub repo_path: Option<String>,
    /// Base URL of the tracker REST API.
    pub jira_base_url: Option<String>,
    /// Donor projects for the cold-start proportion.
    #[serde(default)]
    pub donor_projects: Vec<String>,
    /// Suffix of files counted as source. Default: ".java".
    pub source_suffix: Option<String>,
    /// Path segments excluding a file from the source set.
    #[serde(default)]
    pub excluded_path_segments: Vec<String>,
    /// Local samples required before the working proportion replaces the
    /// cold-start constant. Default: 5.
    pub min_local_samples: Option<usize>,
    /// Upper retention bound for proportion samples. Default: 1.5.
    pub max_retained_proportion: Option<f64>,
}

impl FaultlineConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Load from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Returns the effective donor list, defaulting to the built-in five
    /// Apache projects.
    pub fn effective_donor_projects(&self) -> Vec<String> {
        if self.donor_projects.is_empty() {
            DEFAULT_DONORS.iter().map(|s| s.to_string()).collect()
        } else {
            self.donor_projects.clone()
        }
    }

    /// Returns the effective minimum local sample count, defaulting to 5.
    pub fn effective_min_local_samples(&self) -> usize {
        self.min_local_samples.unwrap_or(5)
    }

    /// Returns the effective retention bound, defaulting to 1.5.
    pub fn effective_max_retained_proportion(&self) -> f64 {
        self.max_retained_proportion.unwrap_or(1.5)
    }

    /// Returns the effective tracker base URL.
    pub fn effective_jira_base_url(&self) -> String {
        self.jira_base_url
            .clone()
            .unwrap_or_else(|| "https://issues.apache.org/jira".to_string())
    }

    /// Builds the source-file filter used by the linker.
    pub fn source_filter(&self) -> SourceFileFilter {
        SourceFileFilter {
            suffix: self
                .source_suffix
                .clone()
                .unwrap_or_else(|| ".java".to_string()),
            excluded_segments: if self.excluded_path_segments.is_empty() {
                vec!["/test/".to_string(), "/target/".to_string()]
            } else {
                self.excluded_path_segments.clone()
            },
        }
    }
}

/// Decides which touched paths count as fixable source files.
#[derive(Debug, Clone)]
pub struct SourceFileFilter {
    pub suffix: String,
    pub excluded_segments: Vec<String>,
}

impl SourceFileFilter {
    /// True for non-test, non-generated, non-build source paths.
    pub fn matches(&self, path: &str) -> bool {
        path.ends_with(&self.suffix)
            && !self
                .excluded_segments
                .iter()
                .any(|seg| path.contains(seg.as_str()))
    }
}

impl Default for SourceFileFilter {
    fn default() -> Self {
        FaultlineConfig::default().source_filter()
    }
}
