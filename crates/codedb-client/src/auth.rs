//! Basic-auth header construction.
//!
//! Headers are computed once when the client is built and attached to every
//! request as defaults.

use base64::Engine as _;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::ClientError;

/// `Basic <base64(user:password)>`, marked sensitive so it never shows up in
/// debug output.
pub fn basic_auth_value(user: &str, password: &str) -> Result<HeaderValue, ClientError> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Default headers for every request: `Authorization` when credentials are
/// configured, nothing otherwise.
pub fn default_headers(credentials: Option<(&str, &str)>) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    if let Some((user, password)) = credentials {
        headers.insert(AUTHORIZATION, basic_auth_value(user, password)?);
    }
    Ok(headers)
}
