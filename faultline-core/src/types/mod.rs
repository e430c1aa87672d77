//! Domain model for the mining pipeline.

pub mod collections;
pub mod commit;
pub mod diff;
pub mod method;
pub mod release;
pub mod report;
pub mod ticket;
