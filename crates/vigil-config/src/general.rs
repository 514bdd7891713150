//! General settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Backend for the per-run workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceBackend {
    #[default]
    Disk,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub workspace_backend: WorkspaceBackend,

    /// Parent of disk workspaces. OS temp root when unset.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.workspace_backend, WorkspaceBackend::Disk);
        assert!(config.scratch_dir.is_none());
    }
}
