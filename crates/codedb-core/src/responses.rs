//! Response bodies returned by the remote store.

use serde::{Deserialize, Serialize};

use crate::enums::RemoteStatusValue;

/// `processingState` label that, together with [`RemoteStatusValue::Finished`],
/// means report and image are retrievable.
pub const PROCESSING_STATE_FINISHED: &str = "finished";

/// Body of `GET /sample/status/json/{hash}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteStatus {
    pub value: RemoteStatusValue,
    #[serde(rename = "processingState")]
    pub processing_state: String,
    /// Free-text status, mostly populated alongside errors.
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RemoteStatus {
    /// Whether the store has finished processing and artifacts can be fetched.
    #[must_use]
    pub fn is_retrievable(&self) -> bool {
        self.value == RemoteStatusValue::Finished
            && self.processing_state == PROCESSING_STATE_FINISHED
    }
}

/// Body of `POST /sample/add`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Hash the store acknowledges as received.
    #[serde(rename = "Submitted", default, skip_serializing_if = "Option::is_none")]
    pub submitted: Option<String>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UploadOutcome {
    /// True only when the store echoed exactly `hash`.
    #[must_use]
    pub fn acknowledges(&self, hash: &str) -> bool {
        self.submitted.as_deref() == Some(hash)
    }

    #[must_use]
    pub fn has_status_containing(&self, needle: &str) -> bool {
        self.status.as_deref().is_some_and(|s| s.contains(needle))
    }
}
