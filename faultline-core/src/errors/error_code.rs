//! Stable string codes attached to every error variant.

pub const LINKAGE_FAILED: &str = "MINING_LINKAGE_FAILED";
pub const COMMIT_NOT_FOUND: &str = "MINING_COMMIT_NOT_FOUND";
pub const REPO_ERROR: &str = "MINING_REPO_ERROR";
pub const SOURCE_HTTP: &str = "SOURCE_HTTP_ERROR";
pub const SOURCE_PAYLOAD: &str = "SOURCE_PAYLOAD_ERROR";
pub const SOURCE_DATE: &str = "SOURCE_DATE_ERROR";
pub const EXPORT_IO: &str = "EXPORT_IO_ERROR";
pub const CONFIG_IO: &str = "CONFIG_IO_ERROR";
pub const CONFIG_PARSE: &str = "CONFIG_PARSE_ERROR";

/// Maps an error to a stable machine-readable code.
pub trait FaultlineErrorCode {
    fn error_code(&self) -> &'static str;
}
