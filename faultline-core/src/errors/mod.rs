//! Layered error types for the mining pipeline.

pub mod config_error;
pub mod error_code;
pub mod export_error;
pub mod mining_error;
pub mod source_error;

pub use config_error::ConfigError;
pub use export_error::ExportError;
pub use mining_error::MiningError;
pub use source_error::SourceError;
