use codedb_client::CodeDbClient;
use codedb_config::CodeDbConfig;
use codedb_submit::{SubmitOptions, Submitter};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SubmitArgs;
use crate::input::{load_results, load_sample};
use crate::output::output;
use crate::retriever::LoggingRetriever;

/// Handle `codedb submit`.
pub fn handle(args: &SubmitArgs, config: &CodeDbConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let results = load_results(&args.results)?;
    let sample = load_sample(args)?;

    let client = CodeDbClient::new(&config.remote)?;
    let submitter = Submitter::new(
        client,
        LoggingRetriever,
        SubmitOptions::from(&config.retrieval),
    );

    let report = submitter.submit(&results, &sample)?;
    tracing::info!(
        hash = sample.file.sha256(),
        uploaded = report.uploaded(),
        "submission finished"
    );
    output(&report, flags.format)
}
