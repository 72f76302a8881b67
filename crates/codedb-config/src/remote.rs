//! Remote sample store (CodeDB REST API) configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Network timeout applied to status checks and uploads.
pub const DEFAULT_TIMEOUT_SECS: u64 = 240;

/// Substring of an upload `Status` that marks a malformed-hash rejection.
pub const DEFAULT_MALFORMED_HASH_SENTINEL: &str = "BAD_SHA256";

fn default_scheme() -> String {
    String::from("https")
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_sentinel() -> String {
    String::from(DEFAULT_MALFORMED_HASH_SENTINEL)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Store hostname.
    #[serde(default)]
    pub host: String,

    /// Store port.
    #[serde(default)]
    pub port: Option<u16>,

    /// Basic-auth user. Auth is only sent when both user and password are set.
    #[serde(default)]
    pub user: String,

    /// Basic-auth password.
    #[serde(default)]
    pub password: String,

    /// URL scheme, `https` in production.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Timeout in seconds for each status or upload request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification (self-signed store deployments).
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Status substring that triggers an upload retry.
    #[serde(default = "default_sentinel")]
    pub malformed_hash_sentinel: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            user: String::new(),
            password: String::new(),
            scheme: default_scheme(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
            malformed_hash_sentinel: default_sentinel(),
        }
    }
}

impl RemoteConfig {
    /// Check if host and port are both set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && self.port.is_some()
    }

    /// Fail unless the store address is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming the missing fields.
    pub fn require(&self) -> Result<(), ConfigError> {
        let missing: Vec<&str> = [
            self.host.is_empty().then_some("host"),
            self.port.is_none().then_some("port"),
        ]
        .into_iter()
        .flatten()
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: "remote".to_string(),
                missing: missing.join(", "),
            })
        }
    }

    /// `scheme://host:port`, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{port}", self.scheme, self.host),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }

    /// Basic-auth credentials, if both halves are configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.user.is_empty() || self.password.is_empty() {
            None
        } else {
            Some((self.user.as_str(), self.password.as_str()))
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
