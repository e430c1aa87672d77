//! Errors from the dataset export boundary.

use super::error_code::{self, FaultlineErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl FaultlineErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        error_code::EXPORT_IO
    }
}
