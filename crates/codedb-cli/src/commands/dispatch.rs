use codedb_config::CodeDbConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: &Commands,
    config: &CodeDbConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Submit(args) => commands::submit::handle(args, config, flags),
        Commands::Status(args) => commands::status::handle(args, config, flags),
    }
}
