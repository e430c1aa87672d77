//! Commit–ticket linking over the in-memory repository fake.

mod common;

use std::collections::BTreeMap;

use faultline_analysis::linker::CommitTicketLinker;
use faultline_core::config::SourceFileFilter;
use faultline_core::types::diff::DiffEdit;
use faultline_core::types::ticket::Ticket;

use common::{FakeCommit, FakeRepo};

fn d(s: &str) -> chrono::NaiveDate {
    s.parse().unwrap()
}

fn ticket_map(tickets: Vec<Ticket>) -> BTreeMap<String, Ticket> {
    tickets.into_iter().map(|t| (t.id.clone(), t)).collect()
}

fn filter() -> SourceFileFilter {
    SourceFileFilter::default()
}

#[test]
fn direct_phase_links_by_message_and_collects_source_files() {
    let repo = FakeRepo::new(vec![
        FakeCommit::new("c1", "alice", "2020-03-01", "FL-10: fix race in reader")
            .touches("src/main/java/Reader.java", vec![DiffEdit::new(1, 2, 1, 3)])
            .touches("src/test/java/ReaderTest.java", vec![])
            .touches("docs/notes.md", vec![]),
        FakeCommit::new("c2", "bob", "2020-04-01", "unrelated cleanup")
            .touches("src/main/java/Writer.java", vec![]),
    ]);

    let mut t = Ticket::new("FL-10");
    t.opened = Some(d("2020-02-01"));
    t.add_fix_version("1.1.0", d("2020-06-01"));
    let mut tickets = ticket_map(vec![t]);

    let linker = CommitTicketLinker::new(&repo, filter());
    linker.link_by_message(&mut tickets).unwrap();

    let t = &tickets["FL-10"];
    assert!(t.has_linked_commit("c1"));
    assert!(!t.has_linked_commit("c2"));
    // Test files and non-source files are filtered out.
    assert_eq!(
        t.fixed_files.iter().cloned().collect::<Vec<_>>(),
        vec!["src/main/java/Reader.java"]
    );
}

#[test]
fn heuristic_phase_links_by_file_and_author_within_window() {
    let repo = FakeRepo::new(vec![
        FakeCommit::new("c1", "alice", "2020-03-01", "FL-11: fix reader")
            .touches("src/main/java/Reader.java", vec![DiffEdit::new(1, 2, 1, 3)]),
        // Same author, overlapping file, inside the window, message silent.
        FakeCommit::new("c2", "alice", "2020-04-01", "polish")
            .touches("src/main/java/Reader.java", vec![])
            .touches("src/main/java/Buffer.java", vec![]),
        // Same file but different author: not linked.
        FakeCommit::new("c3", "mallory", "2020-04-02", "tweak")
            .touches("src/main/java/Reader.java", vec![]),
        // Same author but outside the window: not linked.
        FakeCommit::new("c4", "alice", "2020-08-01", "later work")
            .touches("src/main/java/Reader.java", vec![]),
    ]);

    let mut t = Ticket::new("FL-11");
    t.opened = Some(d("2020-02-01"));
    t.add_fix_version("1.1.0", d("2020-06-01"));
    let mut tickets = ticket_map(vec![t]);

    let linker = CommitTicketLinker::new(&repo, filter());
    linker.link_by_message(&mut tickets).unwrap();
    linker.link_by_heuristic(&mut tickets).unwrap();

    let t = &tickets["FL-11"];
    assert!(t.has_linked_commit("c1"));
    assert!(t.has_linked_commit("c2"));
    assert!(!t.has_linked_commit("c3"));
    assert!(!t.has_linked_commit("c4"));
    // Linking c2 unioned its other touched file into the fixed set.
    assert!(t.fixed_files.contains("src/main/java/Buffer.java"));
}

#[test]
fn heuristic_phase_needs_open_and_fix_dates() {
    let repo = FakeRepo::new(vec![
        FakeCommit::new("c1", "alice", "2020-03-01", "FL-12: fix")
            .touches("src/main/java/A.java", vec![]),
        FakeCommit::new("c2", "alice", "2020-04-01", "quiet follow-up")
            .touches("src/main/java/A.java", vec![]),
    ]);

    // Fix version missing: heuristic must leave the ticket alone.
    let mut t = Ticket::new("FL-12");
    t.opened = Some(d("2020-02-01"));
    let mut tickets = ticket_map(vec![t]);

    let linker = CommitTicketLinker::new(&repo, filter());
    linker.link_by_message(&mut tickets).unwrap();
    linker.link_by_heuristic(&mut tickets).unwrap();

    let t = &tickets["FL-12"];
    assert!(t.has_linked_commit("c1"));
    assert!(!t.has_linked_commit("c2"));
}

#[test]
fn root_commits_contribute_no_fixed_files() {
    let repo = FakeRepo::new(vec![FakeCommit::new(
        "c0", "alice", "2020-01-01", "FL-13: initial import",
    )
    .root()
    .touches("src/main/java/A.java", vec![])]);

    let mut t = Ticket::new("FL-13");
    t.opened = Some(d("2019-12-01"));
    t.add_fix_version("1.0.0", d("2020-01-01"));
    let mut tickets = ticket_map(vec![t]);

    let linker = CommitTicketLinker::new(&repo, filter());
    linker.link_by_message(&mut tickets).unwrap();

    let t = &tickets["FL-13"];
    assert!(t.has_linked_commit("c0"));
    assert!(t.fixed_files.is_empty());
}
