//! Report and image retrieval collaborators.
//!
//! Fetching and persisting artifacts lives outside this crate. The
//! [`Submitter`](crate::Submitter) only decides when to call them.

use std::path::Path;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by a retrieval collaborator.
#[derive(Debug, Error)]
#[error("{action} failed: {source}")]
pub struct RetrievalError {
    action: &'static str,
    #[source]
    source: BoxError,
}

impl RetrievalError {
    pub fn new(action: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            action,
            source: source.into(),
        }
    }

    /// What was being attempted (`image download`, `report save`, ...).
    #[must_use]
    pub const fn action(&self) -> &'static str {
        self.action
    }
}

/// Fetches artifacts the remote store produced for a hash.
pub trait ArtifactRetriever {
    /// Whether the store has artifacts for `hash` ready. Consulted only
    /// after a fresh upload.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] if readiness cannot be determined.
    fn is_loadable(&self, hash: &str) -> Result<bool, RetrievalError> {
        let _ = hash;
        Ok(true)
    }

    /// Fetch the report image for `hash` into `dump_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] if the image cannot be fetched or stored.
    fn fetch_image(&self, hash: &str, dump_dir: &Path) -> Result<(), RetrievalError>;

    /// Fetch and persist the report for `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] if the report cannot be fetched or stored.
    fn fetch_report(&self, hash: &str) -> Result<(), RetrievalError>;
}

/// Retriever that does nothing and always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRetriever;

impl ArtifactRetriever for NoopRetriever {
    fn fetch_image(&self, _hash: &str, _dump_dir: &Path) -> Result<(), RetrievalError> {
        Ok(())
    }

    fn fetch_report(&self, _hash: &str) -> Result<(), RetrievalError> {
        Ok(())
    }
}

impl<T: ArtifactRetriever + ?Sized> ArtifactRetriever for &T {
    fn is_loadable(&self, hash: &str) -> Result<bool, RetrievalError> {
        (**self).is_loadable(hash)
    }

    fn fetch_image(&self, hash: &str, dump_dir: &Path) -> Result<(), RetrievalError> {
        (**self).fetch_image(hash, dump_dir)
    }

    fn fetch_report(&self, hash: &str) -> Result<(), RetrievalError> {
        (**self).fetch_report(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_is_loadable_and_succeeds() {
        let retriever = NoopRetriever;
        assert!(retriever.is_loadable("h").unwrap());
        assert!(retriever.fetch_image("h", Path::new("/tmp")).is_ok());
        assert!(retriever.fetch_report("h").is_ok());
    }

    #[test]
    fn error_names_the_action() {
        let err = RetrievalError::new("report save", "mongo unreachable");
        assert_eq!(err.action(), "report save");
        assert_eq!(err.to_string(), "report save failed: mongo unreachable");
    }
}
