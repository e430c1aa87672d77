//! Errors raised by the attribution engine and the repository adapter.

use super::error_code::{self, FaultlineErrorCode};

/// Errors from repository access and attribution.
///
/// `CommitNotFound` is deliberately a separate variant from `Repo`: a stored
/// hash that no longer resolves is recoverable (the labeler skips that one
/// commit), while structural repository errors propagate.
#[derive(Debug, thiserror::Error)]
pub enum MiningError {
    #[error("repository access failed during {phase}: {message}")]
    Linkage {
        phase: &'static str,
        message: String,
    },

    #[error("commit {hash} not found in repository")]
    CommitNotFound { hash: String },

    #[error("git error: {message}")]
    Repo { message: String },
}

impl MiningError {
    pub fn repo(message: impl Into<String>) -> Self {
        Self::Repo {
            message: message.into(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::CommitNotFound { .. })
    }
}

impl FaultlineErrorCode for MiningError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Linkage { .. } => error_code::LINKAGE_FAILED,
            Self::CommitNotFound { .. } => error_code::COMMIT_NOT_FOUND,
            Self::Repo { .. } => error_code::REPO_ERROR,
        }
    }
}
