//! Reading the analysis results document and sample files from disk.

use std::path::Path;

use anyhow::Context;
use codedb_core::results::AnalysisResults;
use codedb_core::sample::{Sample, SampleFile};

use crate::cli::root_commands::SubmitArgs;

/// Type label given to unpacked and extracted files.
const DERIVED_FILE_TYPE: &str = "data";

pub fn load_results(path: &Path) -> anyhow::Result<AnalysisResults> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read results document {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid results document {}", path.display()))
}

/// Build the sample and its derived files from the `submit` arguments.
pub fn load_sample(args: &SubmitArgs) -> anyhow::Result<Sample> {
    let file = SampleFile::new(read_file(&args.file)?, args.file_type.clone());
    let filename = match &args.filename {
        Some(name) => name.clone(),
        None => file_name_of(&args.file)?,
    };

    let mut sample = Sample::new(file, filename);
    if let Some(path) = &args.unpacked {
        sample = sample.with_unpacked(SampleFile::new(read_file(path)?, DERIVED_FILE_TYPE));
    }
    for path in &args.extracted {
        sample = sample.with_extracted(SampleFile::new(read_file(path)?, DERIVED_FILE_TYPE));
    }

    tracing::debug!(
        hash = sample.file.sha256(),
        filename = %sample.url_filename,
        unpacked = sample.unpacked.is_some(),
        extracted = sample.extracted.len(),
        "loaded sample"
    );
    Ok(sample)
}

fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn file_name_of(path: &Path) -> anyhow::Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("cannot derive a filename from {}", path.display()))
}
