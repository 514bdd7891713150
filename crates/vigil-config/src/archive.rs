//! Artifact layout and snapshot rotation settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_artifact_root() -> PathBuf {
    PathBuf::from(".vigil/artifacts")
}

const fn default_max_active_snapshots() -> usize {
    10
}

const fn default_retention_months() -> u32 {
    6
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArchiveConfig {
    /// Holds `latest/`, `snapshots/` and `archive/`.
    #[serde(default = "default_artifact_root")]
    pub artifact_root: PathBuf,

    #[serde(default = "default_max_active_snapshots")]
    pub max_active_snapshots: usize,

    /// Archive buckets older than this many months are removed.
    #[serde(default = "default_retention_months")]
    pub retention_months: u32,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            artifact_root: default_artifact_root(),
            max_active_snapshots: default_max_active_snapshots(),
            retention_months: default_retention_months(),
        }
    }
}

impl ArchiveConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_active_snapshots == 0 {
            return Err(ConfigError::invalid(
                "archive.max_active_snapshots",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
