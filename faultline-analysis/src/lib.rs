//! # faultline-analysis
//!
//! The bug-label attribution engine. Links tracker tickets to fixing
//! commits, estimates defect-introducing releases with the Proportion
//! heuristic, and flags every method whose lines a fixing commit touched.

pub mod catalog;
pub mod git;
pub mod history;
pub mod labeler;
pub mod linker;
pub mod overlap;
pub mod proportion;

pub use catalog::ReleaseCatalog;
pub use git::GitRepo;
pub use labeler::BugLabeler;
pub use linker::CommitTicketLinker;
pub use proportion::{compute_cold_start_p, ProportionEstimator};
