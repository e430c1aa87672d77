//! # faultline-export
//!
//! CSV emission for the per-method dataset and the attribution audit
//! trail. Plain `std::io::Write` with RFC-4180 quoting.

pub mod csv;
pub mod sink;

pub use sink::CsvSink;
