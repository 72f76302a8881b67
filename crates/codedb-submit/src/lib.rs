//! # codedb-submit
//!
//! Submission of one analyzed sample and its derived variants to the CodeDB
//! sample store.
//!
//! For each variant (original, unpacked, extracted) the [`Submitter`] checks
//! the remote status, uploads what the store is missing, and hands hashes the
//! store has processed to an [`ArtifactRetriever`]. The original is only
//! uploaded when [`is_uploadable`] approves its analysis flags.

pub mod coordinator;
pub mod eligibility;
pub mod metadata;
pub mod retrieval;
pub mod tags;
mod error;

pub use coordinator::{SkipReason, SubmissionReport, SubmitOptions, Submitter, VariantOutcome};
pub use eligibility::is_uploadable;
pub use error::SubmitError;
pub use retrieval::{ArtifactRetriever, NoopRetriever, RetrievalError};
pub use tags::{build_tags, sanitize_ascii};
