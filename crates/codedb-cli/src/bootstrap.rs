use anyhow::Context;
use codedb_config::CodeDbConfig;

use crate::cli::GlobalFlags;

/// Load `.env` and the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<CodeDbConfig> {
    let config = CodeDbConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load codedb configuration")?;

    if !config.remote.is_configured() {
        tracing::warn!("remote store is not configured; set [remote] host and port");
    }
    Ok(config)
}
