use anyhow::Context;
use codedb_client::{CodeDbClient, SampleStore};
use codedb_config::CodeDbConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::StatusArgs;
use crate::output::output;

/// Handle `codedb status`.
pub fn handle(args: &StatusArgs, config: &CodeDbConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = CodeDbClient::new(&config.remote)?;
    let status = client
        .status(&args.hash)
        .with_context(|| format!("status check for {} failed", args.hash))?;
    output(&status, flags.format)
}
