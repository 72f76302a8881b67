//! Report and image retrieval settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dump_dir() -> PathBuf {
    PathBuf::from("./dumpdir")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// Fetch the report image for present or freshly uploaded samples.
    #[serde(default)]
    pub download_images: bool,

    /// Persist the remote report for present or freshly uploaded samples.
    #[serde(default)]
    pub save_reports: bool,

    /// Directory fetched images are written to.
    #[serde(default = "default_dump_dir")]
    pub dump_dir: PathBuf,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            download_images: false,
            save_reports: false,
            dump_dir: default_dump_dir(),
        }
    }
}

impl RetrievalConfig {
    /// Whether any retrieval collaborator can fire.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.download_images || self.save_reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_retrieval() {
        let config = RetrievalConfig::default();
        assert!(!config.is_enabled());
        assert_eq!(config.dump_dir, PathBuf::from("./dumpdir"));
    }

    #[test]
    fn either_flag_enables_retrieval() {
        let config = RetrievalConfig {
            save_reports: true,
            ..Default::default()
        };
        assert!(config.is_enabled());
    }
}
