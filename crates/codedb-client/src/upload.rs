//! Sample upload with a bounded retry on malformed-hash rejections.

use codedb_core::responses::UploadOutcome;

use crate::{
    CodeDbClient,
    error::{ClientError, Stage},
    form::EncodedForm,
    http::read_json,
};

/// Upper bound on POSTs per upload, including the first.
pub const MAX_UPLOAD_ATTEMPTS: u32 = 3;

impl CodeDbClient {
    /// POST `form` to `/sample/add`.
    ///
    /// An outcome whose `Status` contains the malformed-hash sentinel is
    /// retried immediately, up to [`MAX_UPLOAD_ATTEMPTS`] requests in total;
    /// if every attempt is rejected that way the last outcome is returned.
    /// Any other parsed outcome, accepted or not, is returned as-is and the
    /// caller decides whether it acknowledges the hash.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unavailable`] on any transport failure (not retried)
    /// - [`ClientError::Protocol`] / [`ClientError::Api`] if a response body
    ///   is not an upload outcome
    pub fn upload_form(&self, form: &EncodedForm) -> Result<UploadOutcome, ClientError> {
        let url = self.url("/sample/add");
        tracing::info!(%url, hash = form.hash(), encoding = ?form.encoding(), "uploading sample");

        let mut last = UploadOutcome::default();
        for attempt in 1..=MAX_UPLOAD_ATTEMPTS {
            let outcome = self.post_form(&url, form)?;
            if !self.is_malformed_hash(&outcome) {
                tracing::info!(
                    hash = form.hash(),
                    attempt,
                    submitted = ?outcome.submitted,
                    status = ?outcome.status,
                    "upload answered"
                );
                return Ok(outcome);
            }
            tracing::warn!(
                hash = form.hash(),
                attempt,
                status = ?outcome.status,
                "remote store rejected the hash as malformed"
            );
            last = outcome;
        }
        Ok(last)
    }

    fn post_form(&self, url: &str, form: &EncodedForm) -> Result<UploadOutcome, ClientError> {
        let resp = self
            .http
            .post(url)
            .multipart(form.to_multipart())
            .send()
            .map_err(ClientError::unavailable(Stage::Upload))?;
        read_json(resp, Stage::Upload)
    }

    fn is_malformed_hash(&self, outcome: &UploadOutcome) -> bool {
        !self.malformed_hash_sentinel.is_empty()
            && outcome.has_status_containing(&self.malformed_hash_sentinel)
    }
}
