//! # codedb-config
//!
//! Layered configuration loading for CodeDB sample submission using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CODEDB_*` prefix, `__` as separator)
//! 2. An explicit config file (`--config` on the CLI)
//! 3. Project-level `.codedb/config.toml`
//! 4. User-level `~/.config/codedb/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CODEDB_REMOTE__HOST` -> `remote.host`,
//! `CODEDB_RETRIEVAL__DUMP_DIR` -> `retrieval.dump_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use codedb_config::CodeDbConfig;
//!
//! let config = CodeDbConfig::load_with_dotenv(None).expect("config");
//! config.remote.require().expect("remote store configured");
//! println!("submitting to {}", config.remote.base_url());
//! ```

mod error;
mod remote;
mod retrieval;

pub use error::ConfigError;
pub use remote::{DEFAULT_MALFORMED_HASH_SENTINEL, DEFAULT_TIMEOUT_SECS, RemoteConfig};
pub use retrieval::RetrievalConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CodeDbConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl CodeDbConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `explicit` does not exist, or
    /// [`ConfigError::Figment`] if a source is malformed or a value has the
    /// wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit
            && !path.is_file()
        {
            return Err(ConfigError::InvalidValue {
                field: "config".to_string(),
                reason: format!("no such file: {}", path.display()),
            });
        }
        Self::figment(explicit).extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".codedb/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("CODEDB_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codedb").join("config.toml"))
    }
}
