//! Churn mining over the in-memory repository fake.

mod common;

use faultline_analysis::history::HistoryMiner;
use faultline_core::types::diff::{DiffEdit, LineSpan};
use faultline_core::types::method::{MethodInventory, MethodRecord};
use faultline_core::types::release::Release;

use common::{FakeCommit, FakeRepo};

fn d(s: &str) -> chrono::NaiveDate {
    s.parse().unwrap()
}

#[test]
fn churn_accumulates_across_commits_before_cutoff() {
    let file = "src/main/java/A.java";
    let repo = FakeRepo::new(vec![
        // Root commits are never diffed.
        FakeCommit::new("c0", "alice", "2019-12-01", "import").root().touches(file, vec![]),
        // +3/-1 inside the span.
        FakeCommit::new("c1", "alice", "2020-01-15", "grow")
            .touches(file, vec![DiffEdit::new(12, 13, 12, 15)]),
        // +1/-2 inside the span, different author.
        FakeCommit::new("c2", "bob", "2020-02-15", "shrink")
            .touches(file, vec![DiffEdit::new(14, 16, 14, 15)]),
        // After the release cutoff: ignored.
        FakeCommit::new("c3", "carol", "2020-09-01", "later")
            .touches(file, vec![DiffEdit::new(12, 13, 12, 13)]),
        // Before cutoff but outside the span: touches the file, not the method.
        FakeCommit::new("c4", "dave", "2020-03-01", "elsewhere")
            .touches(file, vec![DiffEdit::new(80, 81, 80, 82)]),
    ]);

    let release = Release::new("1.1.0", d("2020-06-01"));
    let mut inventory = MethodInventory::new();
    let id = inventory.push(MethodRecord::new(file, "A.run()", "1.1.0", LineSpan::new(10, 20)));
    let other_release = inventory.push(MethodRecord::new(
        file,
        "A.run()",
        "2.0.0",
        LineSpan::new(10, 20),
    ));

    HistoryMiner::new(&repo).mine_release_churn(&mut inventory, &release);

    let record = inventory.get(id);
    assert_eq!(record.revisions, 2);
    assert_eq!(record.added_lines, 4);
    assert_eq!(record.deleted_lines, 3);
    assert_eq!(record.author_count, 2);

    // Methods of other releases are untouched by this pass.
    assert_eq!(inventory.get(other_release).revisions, 0);
}
