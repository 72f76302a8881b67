//! Cross-cutting error types for codedb.
//!
//! Transport and remote-store errors live in `codedb-client`, configuration
//! errors in `codedb-config`; everything converges in `codedb-submit`.

use thiserror::Error;

/// Errors raised while building or decoding core types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The remote store reported a status code outside the known range.
    #[error("unknown remote status value: {0}")]
    UnknownStatusValue(i64),

    /// A timestamp in the analysis results could not be parsed.
    #[error("invalid timestamp '{value}': expected RFC 3339 or 'YYYY-MM-DD HH:MM:SS'")]
    InvalidTimestamp { value: String },
}
