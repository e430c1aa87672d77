//! Method records and the arena that owns them.

use serde::Serialize;

use super::collections::FxHashMap;
use super::diff::LineSpan;

/// Index of a method record inside its `MethodInventory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub u32);

/// One statically extracted method in one release checkout.
#[derive(Debug, Clone, Serialize)]
pub struct MethodRecord {
    /// Repository-relative path of the owning file.
    pub file: String,
    /// Method name (signature-qualified by the extractor).
    pub name: String,
    /// Name of the release whose checkout this span belongs to.
    pub release: String,
    /// Line span of the body, as of that release's checkout.
    #[serde(skip)]
    pub span: LineSpan,
    /// Start line, exported flat.
    pub start_line: u32,
    /// End line, exported flat.
    pub end_line: u32,
    /// Number of historical commits that touched the span before the
    /// release cutoff.
    pub revisions: u32,
    /// Lines added inside the span across those commits.
    pub added_lines: u32,
    /// Lines deleted inside the span across those commits.
    pub deleted_lines: u32,
    /// Distinct authors among those commits.
    pub author_count: u32,
    /// Defect label. Monotonic: set false→true once, never cleared.
    pub buggy: bool,
}

impl MethodRecord {
    pub fn new(
        file: impl Into<String>,
        name: impl Into<String>,
        release: impl Into<String>,
        span: LineSpan,
    ) -> Self {
        Self {
            file: file.into(),
            name: name.into(),
            release: release.into(),
            span,
            start_line: span.start,
            end_line: span.end,
            revisions: 0,
            added_lines: 0,
            deleted_lines: 0,
            author_count: 0,
            buggy: false,
        }
    }
}

/// Owns every method record of a run and indexes them by (file, release).
///
/// Grouping structures hold `MethodId`s into this arena rather than owning
/// copies, so the monotonic buggy flag has exactly one home.
#[derive(Debug, Default)]
pub struct MethodInventory {
    records: Vec<MethodRecord>,
    by_file_release: FxHashMap<(String, String), Vec<MethodId>>,
}

impl MethodInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MethodRecord) -> MethodId {
        let id = MethodId(self.records.len() as u32);
        self.by_file_release
            .entry((record.file.clone(), record.release.clone()))
            .or_default()
            .push(id);
        self.records.push(record);
        id
    }

    pub fn get(&self, id: MethodId) -> &MethodRecord {
        &self.records[id.0 as usize]
    }

    /// Candidate methods of one file in one release checkout.
    pub fn methods_in(&self, file: &str, release: &str) -> &[MethodId] {
        self.by_file_release
            .get(&(file.to_string(), release.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Flag a method buggy. Returns true only on the first flip, so callers
    /// can count each attribution exactly once.
    pub fn mark_buggy(&mut self, id: MethodId) -> bool {
        let record = &mut self.records[id.0 as usize];
        if record.buggy {
            false
        } else {
            record.buggy = true;
            true
        }
    }

    /// Apply accumulated churn onto a record.
    pub fn set_churn(
        &mut self,
        id: MethodId,
        revisions: u32,
        added: u32,
        deleted: u32,
        authors: u32,
    ) {
        let record = &mut self.records[id.0 as usize];
        record.revisions = revisions;
        record.added_lines = added;
        record.deleted_lines = deleted;
        record.author_count = authors;
    }

    /// Release names that actually have extracted methods.
    pub fn release_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.iter().map(|r| r.release.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MethodId, &MethodRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (MethodId(i as u32), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_buggy_is_monotonic_and_counted_once() {
        let mut inv = MethodInventory::new();
        let id = inv.push(MethodRecord::new(
            "src/A.java",
            "A.run()",
            "1.0.0",
            LineSpan::new(10, 20),
        ));
        assert!(inv.mark_buggy(id));
        assert!(!inv.mark_buggy(id));
        assert!(inv.get(id).buggy);
    }

    #[test]
    fn lookup_by_file_and_release() {
        let mut inv = MethodInventory::new();
        let a = inv.push(MethodRecord::new(
            "src/A.java",
            "A.run()",
            "1.0.0",
            LineSpan::new(1, 5),
        ));
        inv.push(MethodRecord::new(
            "src/A.java",
            "A.run()",
            "1.1.0",
            LineSpan::new(1, 5),
        ));
        assert_eq!(inv.methods_in("src/A.java", "1.0.0"), &[a]);
        assert!(inv.methods_in("src/B.java", "1.0.0").is_empty());
        assert_eq!(inv.release_names(), vec!["1.0.0", "1.1.0"]);
    }
}
