//! Reclaimer configuration: include/exclude globs and the storage threshold.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_storage_threshold() -> f64 {
    80.0
}

const fn default_max_retention_days() -> u32 {
    7
}

const fn default_enabled() -> bool {
    true
}

/// One include glob, matched against entry names directly under the base dir.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CleanupPattern {
    pub pattern: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl CleanupPattern {
    #[must_use]
    pub fn new(pattern: &str, description: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            description: description.to_string(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Usage percentage above which housekeeping runs the reclaimer.
    #[serde(default = "default_storage_threshold")]
    pub storage_threshold: f64,

    /// Informational only.
    #[serde(default = "default_max_retention_days")]
    pub max_retention_days: u32,

    /// Added to the built-in patterns, never replacing them.
    #[serde(default)]
    pub custom_patterns: Vec<CleanupPattern>,

    /// Added to the built-in excludes. An exclude match always wins.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Directory scanned for stale entries. OS temp root when unset.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    /// Compute everything, remove nothing.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            storage_threshold: default_storage_threshold(),
            max_retention_days: default_max_retention_days(),
            custom_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            base_dir: None,
            dry_run: false,
        }
    }
}

impl CleanupConfig {
    /// Built-in include patterns.
    #[must_use]
    pub fn default_patterns() -> Vec<CleanupPattern> {
        vec![
            CleanupPattern::new("vigil-ws-*", "disk workspaces left by earlier runs"),
            CleanupPattern::new("vigil-scratch-*", "engine scratch directories"),
            CleanupPattern::new("vigil-*.tmp", "temporary report files"),
        ]
    }

    /// Built-in exclude patterns.
    #[must_use]
    pub fn default_excludes() -> Vec<String> {
        vec!["*.lock".to_string()]
    }

    /// Built-in patterns followed by custom ones, deduplicated by glob.
    #[must_use]
    pub fn effective_patterns(&self) -> Vec<CleanupPattern> {
        let mut out = Self::default_patterns();
        for custom in &self.custom_patterns {
            match out.iter_mut().find(|p| p.pattern == custom.pattern) {
                Some(existing) => *existing = custom.clone(),
                None => out.push(custom.clone()),
            }
        }
        out
    }

    /// Built-in excludes followed by configured ones, deduplicated.
    #[must_use]
    pub fn effective_excludes(&self) -> Vec<String> {
        let mut out = Self::default_excludes();
        for exclude in &self.exclude_patterns {
            if !out.contains(exclude) {
                out.push(exclude.clone());
            }
        }
        out
    }

    #[must_use]
    pub fn resolved_base_dir(&self) -> PathBuf {
        self.base_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Merge a standalone TOML file onto the defaults.
    ///
    /// The file may hold the cleanup keys at top level or inside a
    /// `[cleanup]` table.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingFile`] if `path` does not exist, or a figment
    /// error for malformed content.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let file = Figment::from(Toml::file(path));
        let file = if file.contains("cleanup") {
            file.focus("cleanup")
        } else {
            file
        };
        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(file)
            .extract()?)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.storage_threshold.is_finite() || !(0.0..=100.0).contains(&self.storage_threshold)
        {
            return Err(ConfigError::invalid(
                "cleanup.storage_threshold",
                format!("{} is not a percentage", self.storage_threshold),
            ));
        }
        if let Some(p) = self.custom_patterns.iter().find(|p| p.pattern.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "cleanup.custom_patterns",
                format!("empty pattern (description {:?})", p.description),
            ));
        }
        if self.exclude_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "cleanup.exclude_patterns",
                "empty pattern",
            ));
        }
        Ok(())
    }
}
