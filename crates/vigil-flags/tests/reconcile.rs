//! End-to-end reconciliation over a small Go program on disk.

use std::path::Path;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use vigil_config::FlagsConfig;
use vigil_core::{ConflictType, FlagImplStatus, FlagStatus};
use vigil_engine::{Engine, RunContext};
use vigil_flags::{
    FlagEngine, FlagReconciler, Phase, ReconcileSettings, STATUS_ARTIFACT, StaticHelpText,
};
use vigil_parser::AstGrepProvider;
use vigil_workspace::{MemoryWorkspace, Workspace};

const CONFIG_GO: &str = r#"package config

import "github.com/spf13/pflag"

// Config holds parsed options.
type Config struct {
	Verbose bool
	DryRun  bool
	Output  string
	JSON    bool
	Hidden  bool
}

// Register wires flags onto the set.
func Register(flags *pflag.FlagSet, cfg *Config) {
	flags.BoolVarP(&cfg.Verbose, "verbose", "v", false, "more output")
	flags.BoolVar(&cfg.DryRun, "dry-run", false, "preview only")
	flags.StringVarP(&cfg.Output, "output", "o", "", "output path")
	flags.BoolVar(&cfg.JSON, "json", false, "emit JSON")
	flags.BoolVar(&cfg.Hidden, "hidden", false, "secret")
}

// Validate checks option combinations.
func Validate(cfg *Config) error {
	if cfg.DryRun && cfg.Output != "" {
		return nil
	}
	return nil
}
"#;

const MAIN_GO: &str = r#"package main

import "fmt"

func main() {
	cfg := load()
	if cfg.Verbose {
		fmt.Println("verbose")
	}
	fmt.Println(cfg.Output, cfg.JSON)
}
"#;

const HELP: &str = "Usage:\n  -v, --verbose   more output\n      --dry-run   preview only\n  -o, --output    output path\n      --json        emit JSON\n";

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "internal/config/config.go", CONFIG_GO);
    write(dir.path(), "internal/config/notes.txt", "flags.BoolVar(&cfg.Ignored, \"ignored\", false, \"x\")");
    write(dir.path(), "main.go", MAIN_GO);
    write(dir.path(), "README.md", "Use --verbose or --output. Add --json for machines.\n");
    write(dir.path(), "docs/ROADMAP.md", "Next: --watch mode and --json schemas.\n");
    dir
}

fn reconciler(root: &Path) -> FlagReconciler {
    FlagReconciler::new(
        ReconcileSettings::from_config(root, &FlagsConfig::default()),
        Arc::new(AstGrepProvider::new()),
        Arc::new(StaticHelpText::new(HELP)),
    )
}

fn find<'a>(flags: &'a [FlagStatus], long: &str) -> &'a FlagStatus {
    flags
        .iter()
        .find(|f| f.long_form == long)
        .unwrap_or_else(|| panic!("flag {long} missing"))
}

fn kinds(flag: &FlagStatus) -> Vec<ConflictType> {
    flag.conflicts.iter().map(|c| c.conflict_type).collect()
}

#[test]
fn catalog_reads_registrations_in_order() {
    let dir = project();
    let flags = reconciler(dir.path()).catalog().unwrap();
    let names: Vec<_> = flags.iter().map(|f| f.long_form.as_str()).collect();
    assert_eq!(names, vec!["verbose", "dry-run", "output", "json", "hidden"]);
    assert_eq!(flags[0].short_form, "v");
    assert_eq!(flags[0].description, "more output");
    assert_eq!(flags[0].location, "internal/config/config.go:16");
    assert_eq!(flags[1].short_form, "");
    assert_eq!(flags[1].description, "preview only");
}

#[test]
fn full_reconciliation() {
    let dir = project();
    let out = reconciler(dir.path()).run().unwrap();
    assert!(out.skipped.is_empty(), "{:?}", out.skipped);
    assert_eq!(out.flags.len(), 6);

    let verbose = find(&out.flags, "verbose");
    assert_eq!(verbose.status, FlagImplStatus::PartiallyImplemented);
    assert!(verbose.defined_in_help && verbose.defined_in_docs);
    assert!(verbose.conflicts.is_empty());
    assert!(verbose.test_coverage);

    let dry_run = find(&out.flags, "dry-run");
    assert_eq!(dry_run.status, FlagImplStatus::PartiallyImplemented);
    assert_eq!(kinds(dry_run), vec![ConflictType::DescriptionConflict]);

    let output = find(&out.flags, "output");
    assert_eq!(output.status, FlagImplStatus::FullyImplemented);
    assert!(output.conflicts.is_empty());

    let json = find(&out.flags, "json");
    assert_eq!(json.status, FlagImplStatus::PartiallyImplemented);
    assert!(json.defined_in_planning);

    let hidden = find(&out.flags, "hidden");
    assert_eq!(hidden.status, FlagImplStatus::PlannedNotImplemented);
    assert_eq!(kinds(hidden), vec![ConflictType::OrphanedFlag]);
    assert_eq!(hidden.actual_behavior, "");

    let watch = find(&out.flags, "watch");
    assert!(!watch.defined_in_code);
    assert_eq!(kinds(watch), vec![ConflictType::PlanningMismatch]);
}

#[test]
fn missing_config_source_is_fatal_with_phase_context() {
    let dir = tempfile::tempdir().unwrap();
    let err = reconciler(dir.path()).run().unwrap_err();
    assert_eq!(err.phase(), Some(Phase::Catalog));
    assert!(
        err.to_string()
            .starts_with("cataloging flags: configuration source not found"),
        "{err}"
    );
}

#[test]
fn later_phase_failure_is_skipped() {
    let dir = project();
    std::fs::remove_file(dir.path().join("main.go")).unwrap();
    let out = reconciler(dir.path()).run().unwrap();

    assert_eq!(out.skipped.len(), 1);
    assert_eq!(out.skipped[0].phase(), Some(Phase::Classify));
    // Cross-referencing still ran.
    assert!(find(&out.flags, "verbose").defined_in_docs);
    assert!(out.flags.iter().any(|f| f.long_form == "watch"));
}

#[test]
fn cancelled_context_stops_before_cataloging() {
    let dir = project();
    let ctx = RunContext::new();
    ctx.cancel();
    let err = reconciler(dir.path()).run_with(&ctx).unwrap_err();
    assert_eq!(err.phase(), Some(Phase::Catalog));
}

#[test]
fn engine_reports_issues_and_writes_statuses() {
    let dir = project();
    let engine = FlagEngine::new(
        FlagsConfig::default(),
        Arc::new(AstGrepProvider::new()),
        Arc::new(StaticHelpText::new(HELP)),
    );
    let workspace = MemoryWorkspace::new();
    let issues = engine
        .analyze(&RunContext::new(), dir.path(), &workspace)
        .unwrap();

    let mut ids: Vec<_> = issues.iter().map(|i| i.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(
        ids,
        vec![
            "FLAG-ORPHANED:hidden",
            "FLAG-PARTIAL:dry-run",
            "FLAG-PARTIAL:json",
            "FLAG-PARTIAL:verbose",
            "FLAG-PLANNING-MISMATCH:watch",
            "FLAG-UNDOCUMENTED:dry-run",
        ]
    );

    let stored: Vec<FlagStatus> =
        serde_json::from_slice(&workspace.read_file(STATUS_ARTIFACT).unwrap()).unwrap();
    assert_eq!(stored, engine.statuses());
    assert_eq!(stored.len(), 6);
}

#[test]
fn engine_fails_without_config_source() {
    let dir = tempfile::tempdir().unwrap();
    let engine = FlagEngine::new(
        FlagsConfig::default(),
        Arc::new(AstGrepProvider::new()),
        Arc::new(StaticHelpText::default()),
    );
    let err = engine
        .analyze(&RunContext::new(), dir.path(), &MemoryWorkspace::new())
        .unwrap_err();
    assert!(err.to_string().contains("cataloging flags"), "{err}");
    assert!(engine.statuses().is_empty());
}

#[test]
fn engine_forgets_statuses_after_failed_run() {
    let good = project();
    let bare = tempfile::tempdir().unwrap();
    let engine = FlagEngine::new(
        FlagsConfig::default(),
        Arc::new(AstGrepProvider::new()),
        Arc::new(StaticHelpText::new(HELP)),
    );

    engine
        .analyze(&RunContext::new(), good.path(), &MemoryWorkspace::new())
        .unwrap();
    assert!(!engine.statuses().is_empty());

    let err = engine
        .analyze(&RunContext::new(), bare.path(), &MemoryWorkspace::new())
        .unwrap_err();
    assert!(err.to_string().contains("cataloging flags"), "{err}");
    assert!(engine.statuses().is_empty());
}
