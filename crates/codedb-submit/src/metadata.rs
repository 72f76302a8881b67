//! Assembly of [`UploadMetadata`] for one variant.

use codedb_core::metadata::{CONFIDENTIALITY_RELEASED, UploadMetadata};
use codedb_core::results::AnalysisResults;
use codedb_core::sample::{Sample, SampleVariant};

use crate::tags::{build_tags, sanitize_ascii};

/// Metadata for uploading `variant`.
///
/// The binary kind comes from the analysis flags of the primary sample for
/// every variant. Filename and download hostname are sanitized to ASCII;
/// geolocation and IP are passed through as reported.
#[must_use]
pub fn build_metadata(
    results: &AnalysisResults,
    sample: &Sample,
    variant: &SampleVariant<'_>,
) -> UploadMetadata {
    let metadata = UploadMetadata {
        sha256: variant.hash().to_string(),
        orig_hash: variant.origin_hash.map(str::to_string),
        confidentiality: CONFIDENTIALITY_RELEASED.to_string(),
        file_name: sanitize_ascii(variant.file_name),
        bin_type: results.info.file.bin_type(),
        download_datestamp: results.download_datestamp(),
        download_hostname: sanitize_ascii(&results.info.url.hostname),
        geolocation_self: results.geolocation_self().map(str::to_string),
        geolocation_host: results.geolocation_host().map(str::to_string),
        download_ip: results.download_ip().map(str::to_string),
        base64: false,
        tags: build_tags(results, sample, variant),
    };
    tracing::debug!(?metadata, "built upload metadata");
    metadata
}
