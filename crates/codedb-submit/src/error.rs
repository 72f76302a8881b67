use codedb_client::ClientError;
use codedb_config::ConfigError;
use codedb_core::responses::UploadOutcome;
use thiserror::Error;

use crate::retrieval::RetrievalError;

/// Errors that abort the submission of a sample.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("status check for {hash} failed: {source}")]
    Status {
        hash: String,
        #[source]
        source: ClientError,
    },

    #[error("upload of {hash} failed: {source}")]
    Upload {
        hash: String,
        #[source]
        source: ClientError,
    },

    /// The store answered the upload without acknowledging `hash`.
    #[error("upload of {hash} not acknowledged (submitted: {submitted:?}, status: {status:?})",
        submitted = .outcome.submitted,
        status = .outcome.status)]
    Rejected { hash: String, outcome: UploadOutcome },

    #[error("artifact retrieval for {hash} failed: {source}")]
    Retrieval {
        hash: String,
        #[source]
        source: RetrievalError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SubmitError {
    /// Hash of the variant the error belongs to, if any.
    #[must_use]
    pub fn hash(&self) -> Option<&str> {
        match self {
            Self::Status { hash, .. }
            | Self::Upload { hash, .. }
            | Self::Rejected { hash, .. }
            | Self::Retrieval { hash, .. } => Some(hash),
            Self::Config(_) => None,
        }
    }
}
