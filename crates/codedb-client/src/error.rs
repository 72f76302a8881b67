//! Client error types.

use std::fmt;

use codedb_config::ConfigError;
use thiserror::Error;

/// Which remote call an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Status,
    Upload,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Status => "status check",
            Self::Upload => "upload",
        })
    }
}

/// Errors that can occur when talking to the remote sample store.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Host or port missing from the configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Credentials cannot be carried in an HTTP header.
    #[error("invalid authorization header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Connection refused, timeout, DNS or TLS failure. Never retried.
    #[error("remote store unavailable during {stage}: {source}")]
    Unavailable {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    /// The store answered with a non-success HTTP status.
    #[error("API error during {stage} ({status}): {message}")]
    Api {
        stage: Stage,
        /// HTTP status code returned by the store.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The response body could not be parsed.
    #[error("unparsable {stage} response: {message}")]
    Protocol { stage: Stage, message: String },

    /// The store reports its own error state for a hash.
    #[error("remote store reports error state for {hash}: {status}")]
    RemoteState { hash: String, status: String },
}

impl ClientError {
    pub(crate) fn unavailable(stage: Stage) -> impl Fn(reqwest::Error) -> Self {
        move |source| Self::Unavailable { stage, source }
    }
}
