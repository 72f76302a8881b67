//! Remote status lookup.

use codedb_core::enums::RemoteStatusValue;
use codedb_core::responses::RemoteStatus;

use crate::{
    CodeDbClient,
    error::{ClientError, Stage},
    http::{check_response, read_json},
};

impl CodeDbClient {
    /// Current processing status of `hash` in the remote store.
    ///
    /// Transport failures are not retried here.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unavailable`] on connection, timeout, DNS or TLS failure
    /// - [`ClientError::Api`] on a non-success HTTP status
    /// - [`ClientError::Protocol`] if the body is not a status document
    /// - [`ClientError::RemoteState`] if the store reports `value == -1`
    pub fn check_status(&self, hash: &str) -> Result<RemoteStatus, ClientError> {
        let url = self.url(&format!("/sample/status/json/{hash}"));
        tracing::debug!(%url, "requesting remote status");

        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(ClientError::unavailable(Stage::Status))?;
        let resp = check_response(resp, Stage::Status)?;
        let status: RemoteStatus = read_json(resp, Stage::Status)?;

        if status.value == RemoteStatusValue::Error {
            let detail = status.status.clone().unwrap_or_default();
            tracing::error!(
                hash,
                status = %detail,
                value = %status.value,
                "remote store returned error state"
            );
            return Err(ClientError::RemoteState {
                hash: hash.to_string(),
                status: detail,
            });
        }

        tracing::info!(
            hash,
            value = %status.value,
            processing_state = %status.processing_state,
            "remote file status"
        );
        Ok(status)
    }
}
