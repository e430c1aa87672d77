//! Errors from the ticket/release source boundary.

use super::error_code::{self, FaultlineErrorCode};

/// Errors that can occur while fetching or decoding tracker data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed for {url}: {message}")]
    Http { url: String, message: String },

    #[error("unexpected payload: {message}")]
    Payload { message: String },

    #[error("unparseable date {value:?}")]
    Date { value: String },
}

impl FaultlineErrorCode for SourceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Http { .. } => error_code::SOURCE_HTTP,
            Self::Payload { .. } => error_code::SOURCE_PAYLOAD,
            Self::Date { .. } => error_code::SOURCE_DATE,
        }
    }
}
