use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Submit an analyzed sample and its derived files.
    Submit(SubmitArgs),
    /// Show the remote processing status of a hash.
    Status(StatusArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SubmitArgs {
    /// Analysis results document (JSON) for the sample.
    #[arg(long)]
    pub results: PathBuf,

    /// The sample as downloaded.
    #[arg(long)]
    pub file: PathBuf,

    /// Type label of the sample, as reported by the analysis pipeline.
    #[arg(long, default_value = "data")]
    pub file_type: String,

    /// Unpacked form of the sample.
    #[arg(long)]
    pub unpacked: Option<PathBuf>,

    /// File extracted from the sample. Repeat for several, in pipeline order.
    #[arg(long)]
    pub extracted: Vec<PathBuf>,

    /// Name the sample was downloaded under (defaults to the file's name).
    #[arg(long)]
    pub filename: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct StatusArgs {
    /// SHA-256 of the sample (hex).
    pub hash: String,
}
