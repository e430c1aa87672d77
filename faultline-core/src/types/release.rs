//! Project releases under the `major.minor.patch` naming convention.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single released version of the analyzed project.
///
/// Ordinals are not stored here: a release's chronological index is its
/// position inside the `ReleaseCatalog` built from a date-sorted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Version name, e.g. `"4.2.0"`.
    pub name: String,
    /// Date the release shipped.
    pub date: NaiveDate,
}

impl Release {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }
}
