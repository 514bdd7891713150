//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for sandboxed working directories and env vars.

use std::path::PathBuf;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use vigil_config::{CleanupConfig, ConfigError, FieldNaming, VigilConfig, WorkspaceBackend};

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[cleanup]
storage_threshold = 92.5
exclude_patterns = ["keep-*"]
dry_run = true

[[cleanup.custom_patterns]]
pattern = "build-cache-*"
description = "stale caches"

[archive]
max_active_snapshots = 3
retention_months = 2

[flags]
config_source = "pkg/cfg"
field_naming = "snake"

[general]
workspace_backend = "memory"
"#,
        )?;

        let config: VigilConfig = Figment::from(Serialized::defaults(VigilConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!((config.cleanup.storage_threshold - 92.5).abs() < f64::EPSILON);
        assert!(config.cleanup.dry_run);
        assert_eq!(config.cleanup.custom_patterns.len(), 1);
        assert!(config.cleanup.custom_patterns[0].enabled);
        assert_eq!(config.archive.max_active_snapshots, 3);
        assert_eq!(config.archive.retention_months, 2);
        assert_eq!(config.flags.config_source, PathBuf::from("pkg/cfg"));
        assert_eq!(config.flags.field_naming, FieldNaming::Snake);
        assert_eq!(config.flags.receiver, "cfg");
        assert_eq!(config.general.workspace_backend, WorkspaceBackend::Memory);
        Ok(())
    });
}

#[test]
fn project_file_and_env_layer_in_order() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(".vigil").expect("create .vigil");
        jail.create_file(
            ".vigil/config.toml",
            r"
[cleanup]
storage_threshold = 70.0

[archive]
retention_months = 12
",
        )?;
        jail.set_env("VIGIL_CLEANUP__STORAGE_THRESHOLD", "95");

        let config = VigilConfig::load().expect("config loads");
        assert!((config.cleanup.storage_threshold - 95.0).abs() < f64::EPSILON);
        assert_eq!(config.archive.retention_months, 12);
        assert_eq!(config.archive.max_active_snapshots, 10);
        Ok(())
    });
}

#[test]
fn cleanup_from_file_accepts_section_or_bare_table() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "sectioned.toml",
            r#"
[cleanup]
storage_threshold = 60.0
exclude_patterns = ["*.pid"]
"#,
        )?;
        jail.create_file(
            "bare.toml",
            r#"
storage_threshold = 65.0
custom_patterns = [{ pattern = "old-*", description = "old", enabled = false }]
"#,
        )?;

        let sectioned = CleanupConfig::from_file(&jail.directory().join("sectioned.toml"))
            .expect("sectioned loads");
        assert!((sectioned.storage_threshold - 60.0).abs() < f64::EPSILON);
        assert_eq!(sectioned.effective_excludes(), vec!["*.lock", "*.pid"]);

        let bare =
            CleanupConfig::from_file(&jail.directory().join("bare.toml")).expect("bare loads");
        assert!((bare.storage_threshold - 65.0).abs() < f64::EPSILON);
        assert!(!bare.custom_patterns[0].enabled);
        assert_eq!(bare.max_retention_days, 7);
        Ok(())
    });
}

#[test]
fn cleanup_from_missing_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = CleanupConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::MissingFile(_)));
}
