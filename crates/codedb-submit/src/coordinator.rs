//! Per-variant submission state machine.
//!
//! ```text
//! status ─┬─ finished/"finished" ──────────────→ Present  (retrieve)
//!         ├─ not_exists ─┬─ eligible/derived ──→ upload ─┬─ acknowledged → Uploaded (retrieve)
//!         │              │                               └─ otherwise     → Rejected (error)
//!         │              └─ ineligible ────────→ Skipped
//!         ├─ pending/processing/clone/family ──→ Skipped
//!         └─ error ───────────────────────────→ Status (error)
//! ```
//!
//! Variants run in order: original, unpacked, extracted. The first error
//! stops the sample; variants already uploaded stay uploaded.

use std::path::PathBuf;

use codedb_client::{ClientError, EncodedForm, PayloadEncoding, SampleStore};
use codedb_config::RetrievalConfig;
use codedb_core::enums::{RemoteStatusValue, VariantKind};
use codedb_core::results::AnalysisResults;
use codedb_core::sample::{Sample, SampleVariant};
use serde::Serialize;

use crate::eligibility::is_uploadable;
use crate::error::SubmitError;
use crate::metadata::build_metadata;
use crate::retrieval::{ArtifactRetriever, RetrievalError};

/// Which retrieval collaborators fire, and where images go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOptions {
    pub download_images: bool,
    pub save_reports: bool,
    pub dump_dir: PathBuf,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self::from(&RetrievalConfig::default())
    }
}

impl From<&RetrievalConfig> for SubmitOptions {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            download_images: config.download_images,
            save_reports: config.save_reports,
            dump_dir: config.dump_dir.clone(),
        }
    }
}

/// Why a variant was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not in the store and the primary sample failed the eligibility check.
    Ineligible,
    /// The store is still working on the hash.
    InProgress,
    /// The store knows the hash but has nothing to retrieve for it.
    NotRetrievable,
}

/// What happened to one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VariantOutcome {
    /// Already in the store. `image`/`report` record which collaborators ran.
    Present {
        kind: VariantKind,
        hash: String,
        image: bool,
        report: bool,
    },
    Skipped {
        kind: VariantKind,
        hash: String,
        reason: SkipReason,
    },
    /// Uploaded and acknowledged.
    Uploaded {
        kind: VariantKind,
        hash: String,
        encoding: PayloadEncoding,
        image: bool,
        report: bool,
    },
}

impl VariantOutcome {
    #[must_use]
    pub fn hash(&self) -> &str {
        match self {
            Self::Present { hash, .. } | Self::Skipped { hash, .. } | Self::Uploaded { hash, .. } => {
                hash
            }
        }
    }

    #[must_use]
    pub const fn kind(&self) -> VariantKind {
        match self {
            Self::Present { kind, .. } | Self::Skipped { kind, .. } | Self::Uploaded { kind, .. } => {
                *kind
            }
        }
    }
}

/// Outcomes of every variant of a sample, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    pub variants: Vec<VariantOutcome>,
}

impl SubmissionReport {
    /// Number of variants uploaded during this submission.
    #[must_use]
    pub fn uploaded(&self) -> usize {
        self.variants
            .iter()
            .filter(|v| matches!(v, VariantOutcome::Uploaded { .. }))
            .count()
    }
}

/// Drives the submission of analyzed samples to a [`SampleStore`].
#[derive(Debug)]
pub struct Submitter<S, R> {
    store: S,
    retriever: R,
    options: SubmitOptions,
}

impl<S: SampleStore, R: ArtifactRetriever> Submitter<S, R> {
    pub const fn new(store: S, retriever: R, options: SubmitOptions) -> Self {
        Self {
            store,
            retriever,
            options,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &SubmitOptions {
        &self.options
    }

    /// Submit every variant of `sample`, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`SubmitError`] raised by any variant.
    pub fn submit(
        &self,
        results: &AnalysisResults,
        sample: &Sample,
    ) -> Result<SubmissionReport, SubmitError> {
        let variants = sample.variants();
        tracing::info!(
            hash = sample.file.sha256(),
            variants = variants.len(),
            "submitting sample"
        );

        let mut report = SubmissionReport::default();
        for variant in &variants {
            let outcome = self.process_variant(results, sample, variant)?;
            report.variants.push(outcome);
        }
        Ok(report)
    }

    /// Run the state machine for one variant.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Status`] if the status check fails or the store
    ///   reports an error state
    /// - [`SubmitError::Upload`] if the upload call fails
    /// - [`SubmitError::Rejected`] if the store does not acknowledge the hash
    /// - [`SubmitError::Retrieval`] if a collaborator fails
    #[tracing::instrument(skip_all, fields(kind = %variant.kind, hash = variant.hash()))]
    pub fn process_variant(
        &self,
        results: &AnalysisResults,
        sample: &Sample,
        variant: &SampleVariant<'_>,
    ) -> Result<VariantOutcome, SubmitError> {
        let hash = variant.hash();
        let status = self.store.status(hash).map_err(|source| SubmitError::Status {
            hash: hash.to_string(),
            source,
        })?;

        let skipped = |reason: SkipReason| -> Result<VariantOutcome, SubmitError> {
            tracing::info!(?reason, value = %status.value, "skipping variant");
            Ok(VariantOutcome::Skipped {
                kind: variant.kind,
                hash: hash.to_string(),
                reason,
            })
        };

        match status.value {
            RemoteStatusValue::Finished if status.is_retrievable() => {
                tracing::info!("sample already present in remote store");
                let (image, report) = self.retrieve(hash, false)?;
                Ok(VariantOutcome::Present {
                    kind: variant.kind,
                    hash: hash.to_string(),
                    image,
                    report,
                })
            }
            RemoteStatusValue::NotExists => {
                if variant.kind.is_derived() || is_uploadable(&results.info.file) {
                    self.upload(results, sample, variant)
                } else {
                    skipped(SkipReason::Ineligible)
                }
            }
            RemoteStatusValue::Pending | RemoteStatusValue::Processing => {
                skipped(SkipReason::InProgress)
            }
            RemoteStatusValue::Finished | RemoteStatusValue::Clone | RemoteStatusValue::Family => {
                skipped(SkipReason::NotRetrievable)
            }
            RemoteStatusValue::Error => Err(SubmitError::Status {
                hash: hash.to_string(),
                source: ClientError::RemoteState {
                    hash: hash.to_string(),
                    status: status.status.clone().unwrap_or_default(),
                },
            }),
        }
    }

    fn upload(
        &self,
        results: &AnalysisResults,
        sample: &Sample,
        variant: &SampleVariant<'_>,
    ) -> Result<VariantOutcome, SubmitError> {
        let hash = variant.hash();
        let metadata = build_metadata(results, sample, variant);
        let file_name = metadata.file_name.clone();
        let form = EncodedForm::build(metadata, file_name, variant.data());

        let outcome = self.store.upload(&form).map_err(|source| SubmitError::Upload {
            hash: hash.to_string(),
            source,
        })?;
        if !outcome.acknowledges(hash) {
            tracing::error!(
                submitted = ?outcome.submitted,
                status = ?outcome.status,
                "upload not acknowledged"
            );
            return Err(SubmitError::Rejected {
                hash: hash.to_string(),
                outcome,
            });
        }

        tracing::info!(encoding = ?form.encoding(), "sample uploaded");
        let (image, report) = self.retrieve(hash, true)?;
        Ok(VariantOutcome::Uploaded {
            kind: variant.kind,
            hash: hash.to_string(),
            encoding: form.encoding(),
            image,
            report,
        })
    }

    /// Fire the enabled collaborators for `hash`. After a fresh upload they
    /// also need the retriever to report the artifacts loadable.
    fn retrieve(&self, hash: &str, check_loadable: bool) -> Result<(bool, bool), SubmitError> {
        let opts = &self.options;
        if !opts.download_images && !opts.save_reports {
            return Ok((false, false));
        }

        let retrieval_err = |source: RetrievalError| SubmitError::Retrieval {
            hash: hash.to_string(),
            source,
        };
        if check_loadable && !self.retriever.is_loadable(hash).map_err(retrieval_err)? {
            tracing::info!("artifacts not loadable yet, skipping retrieval");
            return Ok((false, false));
        }

        if opts.download_images {
            self.retriever
                .fetch_image(hash, &opts.dump_dir)
                .map_err(retrieval_err)?;
            tracing::debug!(dump_dir = %opts.dump_dir.display(), "image fetched");
        }
        if opts.save_reports {
            self.retriever.fetch_report(hash).map_err(retrieval_err)?;
            tracing::debug!("report saved");
        }
        Ok((opts.download_images, opts.save_reports))
    }
}
