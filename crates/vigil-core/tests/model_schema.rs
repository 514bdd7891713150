//! Serde roundtrip and JsonSchema validation tests for the report model.

use chrono::Utc;
use schemars::schema_for;
use vigil_core::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn orphaned_flag() -> FlagStatus {
    let mut flag = FlagStatus::declared("legacy-mode", "", "old behaviour");
    flag.location = "internal/config/flags.go:42".into();
    flag.conflicts.push(FlagConflict {
        conflict_type: ConflictType::OrphanedFlag,
        source1: ProvenanceSource::Code,
        source2: ProvenanceSource::HelpText,
        description: "flag --legacy-mode is declared but not documented".into(),
        severity: ConflictSeverity::High,
    });
    flag
}

roundtrip_and_validate!(
    issue_roundtrip,
    Issue,
    Issue::new(
        "FLAG-ORPHANED",
        Category::Usability,
        Severity::High,
        Priority::P1,
        "Orphaned flag --legacy-mode",
    )
    .with_location("internal/config/flags.go:42")
    .with_suggestion("document the flag or remove it")
    .with_effort(Effort::Medium)
);

roundtrip_and_validate!(flag_status_roundtrip, FlagStatus, orphaned_flag());

roundtrip_and_validate!(
    snapshot_roundtrip,
    SnapshotInfo,
    SnapshotInfo {
        name: "snapshot_20260101_120000".into(),
        path: "/tmp/artifacts/snapshots/snapshot_20260101_120000".into(),
        modified_at: Utc::now(),
        status: SnapshotStatus::Active,
    }
);

roundtrip_and_validate!(
    source_model_roundtrip,
    SourceModel,
    SourceModel {
        path: "main.go".into(),
        language: "go".into(),
        symbols: vec![SourceSymbol {
            name: "Run".into(),
            kind: SymbolKind::Function,
            exported: true,
            documented: false,
            line: 3,
        }],
        imports: vec!["fmt".into()],
        calls: vec![CallShape {
            receiver: "fmt".into(),
            member: "Println".into(),
            args: vec!["cfg.Verbose".into()],
            line: 4,
        }],
        field_refs: vec![FieldRef {
            receiver: "cfg".into(),
            field: "Verbose".into(),
            enclosing_call: Some("Println".into()),
            line: 4,
        }],
    }
);

#[test]
fn report_validates_against_schema() {
    let report = AuditReport::new(
        vec![Issue::new(
            "ENGINE-TASK-FAILED",
            Category::CodeQuality,
            Severity::Medium,
            Priority::P2,
            "task failed",
        )],
        vec![orphaned_flag()],
    );
    let schema = serde_json::to_value(schema_for!(AuditReport)).unwrap();
    let instance = serde_json::to_value(&report).unwrap();
    assert!(validate_against_schema(&schema, &instance).is_empty());
    assert_eq!(report.summary.flag_conflicts, 1);
}

#[test]
fn schema_rejects_unknown_priority() {
    let schema = serde_json::to_value(schema_for!(Issue)).unwrap();
    let mut instance = serde_json::to_value(Issue::new(
        "X",
        Category::Testing,
        Severity::Low,
        Priority::P3,
        "t",
    ))
    .unwrap();
    instance["priority"] = serde_json::json!("P9");
    assert!(!validate_against_schema(&schema, &instance).is_empty());
}
