//! Immutable release catalog: name ↔ chronological ordinal.

use chrono::NaiveDate;
use faultline_core::types::collections::FxHashMap;
use faultline_core::types::release::Release;
use regex::Regex;

/// Maps release names to dense chronological ordinals `0..len`.
///
/// Built once per run from a release list already sorted ascending by date
/// (a precondition; the catalog does not re-sort) and passed by reference to
/// every component that needs it. Names are stored normalized.
pub struct ReleaseCatalog {
    releases: Vec<Release>,
    index_by_name: FxHashMap<String, usize>,
    two_part: Regex,
}

impl ReleaseCatalog {
    /// Build from date-ordered releases.
    pub fn new(ordered: Vec<Release>) -> Self {
        let two_part = Regex::new(r"^\d+\.\d+$").unwrap();
        let mut releases = Vec::with_capacity(ordered.len());
        let mut index_by_name =
            FxHashMap::with_capacity_and_hasher(ordered.len(), Default::default());
        for (i, r) in ordered.into_iter().enumerate() {
            let name = normalize_with(&two_part, &r.name);
            index_by_name.insert(name.clone(), i);
            releases.push(Release::new(name, r.date));
        }
        Self {
            releases,
            index_by_name,
            two_part,
        }
    }

    /// Canonicalize a two-component numeric name: `"1.2"` → `"1.2.0"`.
    /// Already-canonical and non-numeric names pass through unchanged.
    pub fn normalize_version_name(&self, name: &str) -> String {
        normalize_with(&self.two_part, name)
    }

    /// Chronological ordinal of a release name, after normalization.
    /// `None` is the not-found sentinel.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index_by_name
            .get(&self.normalize_version_name(name))
            .copied()
    }

    /// Normalized release name at the given ordinal, or `None` when out of
    /// range.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.releases.get(index).map(|r| r.name.as_str())
    }

    /// Release date at the given ordinal.
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.releases.get(index).map(|r| r.date)
    }

    /// Ordinal of the release with the latest date not after `date` — the
    /// opening-version rule. On equal dates the earliest such ordinal wins.
    pub fn closest_at_or_before(&self, date: NaiveDate) -> Option<usize> {
        let mut best: Option<(usize, NaiveDate)> = None;
        for (i, r) in self.releases.iter().enumerate() {
            if r.date > date {
                continue;
            }
            match best {
                Some((_, best_date)) if r.date <= best_date => {}
                _ => best = Some((i, r.date)),
            }
        }
        best.map(|(i, _)| i)
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

fn normalize_with(two_part: &Regex, name: &str) -> String {
    if two_part.is_match(name) {
        format!("{name}.0")
    } else {
        name.to_string()
    }
}
