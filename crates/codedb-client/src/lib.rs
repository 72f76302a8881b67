//! # codedb-client
//!
//! Blocking HTTP client for the CodeDB sample store.
//!
//! - `GET  /sample/status/json/{hash}`: processing status of a hash
//! - `POST /sample/add`: multipart upload of a sample and its metadata
//!
//! Every call blocks until the store answers or the configured timeout
//! elapses. Basic-auth headers are computed once at construction.

pub mod auth;
pub mod form;
pub mod http;
mod error;
mod status;
mod upload;

pub use error::{ClientError, Stage};
pub use form::{EncodedForm, PayloadEncoding};
pub use upload::MAX_UPLOAD_ATTEMPTS;

use codedb_config::RemoteConfig;
use codedb_core::responses::{RemoteStatus, UploadOutcome};

/// Operations the submission workflow needs from the remote store.
pub trait SampleStore {
    /// See [`CodeDbClient::check_status`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol or remote-state failure.
    fn status(&self, hash: &str) -> Result<RemoteStatus, ClientError>;

    /// See [`CodeDbClient::upload_form`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or protocol failure.
    fn upload(&self, form: &EncodedForm) -> Result<UploadOutcome, ClientError>;
}

impl<T: SampleStore + ?Sized> SampleStore for &T {
    fn status(&self, hash: &str) -> Result<RemoteStatus, ClientError> {
        (**self).status(hash)
    }

    fn upload(&self, form: &EncodedForm) -> Result<UploadOutcome, ClientError> {
        (**self).upload(form)
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client bound to one remote store.
#[derive(Debug, Clone)]
pub struct CodeDbClient {
    http: reqwest::blocking::Client,
    base_url: String,
    malformed_hash_sentinel: String,
}

impl CodeDbClient {
    /// Build a client from the remote section of the configuration.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Config`] if host or port is missing
    /// - [`ClientError::InvalidHeader`] if the credentials cannot form a header
    /// - [`ClientError::Build`] if the TLS backend fails to initialize
    pub fn new(config: &RemoteConfig) -> Result<Self, ClientError> {
        config.require()?;
        let headers = auth::default_headers(config.credentials())?;

        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("codedb/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .default_headers(headers)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            malformed_hash_sentinel: config.malformed_hash_sentinel.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl SampleStore for CodeDbClient {
    fn status(&self, hash: &str) -> Result<RemoteStatus, ClientError> {
        self.check_status(hash)
    }

    fn upload(&self, form: &EncodedForm) -> Result<UploadOutcome, ClientError> {
        self.upload_form(form)
    }
}
