//! Flag reconciliation inputs: where the flags are declared, where they are
//! documented, and how a flag name maps onto a configuration field.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Generic transform from a flag name to a configuration field name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNaming {
    /// `dry-run` -> `DryRun`
    #[default]
    Pascal,
    /// `dry-run` -> `dry_run`
    Snake,
}

fn default_config_source() -> PathBuf {
    PathBuf::from("internal/config")
}

fn default_main_source() -> PathBuf {
    PathBuf::from("main.go")
}

fn default_user_docs() -> Vec<PathBuf> {
    vec![PathBuf::from("README.md"), PathBuf::from("docs/USAGE.md")]
}

fn default_planning_docs() -> Vec<PathBuf> {
    vec![PathBuf::from("docs/ROADMAP.md"), PathBuf::from("docs/PLAN.md")]
}

fn default_receiver() -> String {
    "cfg".to_string()
}

fn default_flag_marker() -> String {
    "--".to_string()
}

fn default_registration_suffix() -> String {
    "Var".to_string()
}

fn default_short_marker() -> String {
    "P".to_string()
}

fn default_field_overrides() -> BTreeMap<String, String> {
    [("json", "JSON"), ("url", "URL"), ("id", "ID")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlagsConfig {
    /// Directory of the configuration package, relative to the audited root.
    #[serde(default = "default_config_source")]
    pub config_source: PathBuf,

    /// Main entry source file, relative to the audited root.
    #[serde(default = "default_main_source")]
    pub main_source: PathBuf,

    /// Fixed list of user-facing docs. Missing files are skipped.
    #[serde(default = "default_user_docs")]
    pub user_docs: Vec<PathBuf>,

    /// Fixed list of planning docs. Missing files are skipped.
    #[serde(default = "default_planning_docs")]
    pub planning_docs: Vec<PathBuf>,

    /// Identifier the program reads parsed flag values through.
    #[serde(default = "default_receiver")]
    pub receiver: String,

    #[serde(default = "default_flag_marker")]
    pub flag_marker: String,

    /// Registration calls are those whose member ends with this suffix.
    #[serde(default = "default_registration_suffix")]
    pub registration_suffix: String,

    /// Appended to the suffix for long+short registrations (`StringVarP`).
    #[serde(default = "default_short_marker")]
    pub short_marker: String,

    #[serde(default)]
    pub field_naming: FieldNaming,

    /// Exact-match flag -> field table, consulted before the transform.
    #[serde(default = "default_field_overrides")]
    pub field_overrides: BTreeMap<String, String>,

    /// Program and arguments that print the audited program's help text.
    /// Empty means no help text is available.
    #[serde(default)]
    pub help_command: Vec<String>,
}

impl Default for FlagsConfig {
    fn default() -> Self {
        Self {
            config_source: default_config_source(),
            main_source: default_main_source(),
            user_docs: default_user_docs(),
            planning_docs: default_planning_docs(),
            receiver: default_receiver(),
            flag_marker: default_flag_marker(),
            registration_suffix: default_registration_suffix(),
            short_marker: default_short_marker(),
            field_naming: FieldNaming::default(),
            field_overrides: default_field_overrides(),
            help_command: Vec::new(),
        }
    }
}

impl FlagsConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("flags.receiver", &self.receiver),
            ("flags.flag_marker", &self.flag_marker),
            ("flags.registration_suffix", &self.registration_suffix),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }
        Ok(())
    }
}
