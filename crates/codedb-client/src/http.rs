//! Response helpers shared by the status and upload calls: non-success
//! statuses become [`ClientError::Api`], bodies decode as JSON.

use serde::de::DeserializeOwned;

use crate::error::{ClientError, Stage};

/// Return the response unchanged on success, otherwise
/// [`ClientError::Api`] with the status code and response body.
pub fn check_response(
    resp: reqwest::blocking::Response,
    stage: Stage,
) -> Result<reqwest::blocking::Response, ClientError> {
    if !resp.status().is_success() {
        return Err(ClientError::Api {
            stage,
            status: resp.status().as_u16(),
            message: resp.text().unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Read the whole body and decode it as JSON.
///
/// A body that fails to decode is reported as [`ClientError::Api`] when the
/// HTTP status was also a failure, and as [`ClientError::Protocol`] otherwise.
pub fn read_json<T: DeserializeOwned>(
    resp: reqwest::blocking::Response,
    stage: Stage,
) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.text().map_err(ClientError::unavailable(stage))?;
    serde_json::from_str(&body).map_err(|e| {
        if status.is_success() {
            ClientError::Protocol {
                stage,
                message: format!("{e}: {}", truncate(&body, 200)),
            }
        } else {
            ClientError::Api {
                stage,
                status: status.as_u16(),
                message: body.clone(),
            }
        }
    })
}

fn truncate(body: &str, max_chars: usize) -> &str {
    body.char_indices()
        .nth(max_chars)
        .map_or(body, |(idx, _)| &body[..idx])
}
