//! Snapshot creation, rotation and archive expiry.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use vigil_core::SnapshotStatus;
use vigil_retention::{Archivist, ArtifactLayout, RetentionError};

fn archivist(root: &Path) -> Archivist {
    Archivist::new(ArtifactLayout::under(root))
}

fn seed_latest(archivist: &Archivist) {
    let latest = &archivist.layout().latest;
    fs::create_dir_all(latest).unwrap();
    fs::write(latest.join("report.md"), "# report").unwrap();
    fs::write(latest.join("issues.json"), "[]").unwrap();
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(9, 30, 5)
        .unwrap()
}

#[test]
fn empty_name_creates_timestamped_copy() {
    let root = tempfile::tempdir().unwrap();
    let a = archivist(root.path());
    seed_latest(&a);

    let info = a.create_snapshot_at("", fixed_time()).unwrap();
    assert_eq!(info.name, "snapshot_20261016_093005");
    assert_eq!(info.status, SnapshotStatus::Active);
    assert_eq!(names_in(&info.path), vec!["issues.json", "report.md"]);
    assert_eq!(fs::read_to_string(info.path.join("report.md")).unwrap(), "# report");
    assert_eq!(names_in(&a.layout().latest).len(), 2);
}

#[test]
fn empty_name_with_wall_clock() {
    let root = tempfile::tempdir().unwrap();
    let a = archivist(root.path());
    seed_latest(&a);

    let info = a.create_snapshot("").unwrap();
    let stamp = info.name.strip_prefix("snapshot_").unwrap();
    assert_eq!(stamp.len(), 15);
    assert!(NaiveDateTime::parse_from_str(stamp, "%Y%m%d_%H%M%S").is_ok());
    assert_eq!(names_in(&info.path).len(), 2);
}

#[test]
fn missing_or_empty_latest_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let a = archivist(root.path());
    assert!(matches!(
        a.create_snapshot("x"),
        Err(RetentionError::LatestMissing(_))
    ));
    fs::create_dir_all(&a.layout().latest).unwrap();
    assert!(matches!(
        a.create_snapshot("x"),
        Err(RetentionError::LatestEmpty(_))
    ));
}

#[test]
fn injected_name_stays_inside_snapshots_root() {
    let root = tempfile::tempdir().unwrap();
    let a = archivist(root.path());
    seed_latest(&a);

    let info = a.create_snapshot("../../escaped").unwrap();
    assert_eq!(info.name, "escaped");
    assert!(info.path.starts_with(a.layout().snapshots.canonicalize().unwrap()));
    assert!(!root.path().join("escaped").exists());

    assert!(matches!(
        a.create_snapshot(".."),
        Err(RetentionError::InvalidSnapshotName(_))
    ));
    assert!(matches!(
        a.create_snapshot("escaped"),
        Err(RetentionError::SnapshotExists(_))
    ));
}

#[rstest]
#[case(0, 3)]
#[case(2, 3)]
#[case(3, 3)]
#[case(5, 3)]
#[case(7, 1)]
#[case(4, 10)]
fn rotation_keeps_newest_by_name(#[case] n: usize, #[case] max_active: usize) {
    let root = tempfile::tempdir().unwrap();
    let a = archivist(root.path());
    let mut all: Vec<String> = (0..n)
        .map(|i| format!("snapshot_202601{:02}_000000", i + 1))
        .collect();
    // Create out of order so directory order does not help.
    for name in all.iter().rev() {
        fs::create_dir_all(a.layout().snapshots.join(name)).unwrap();
    }
    if n == 0 {
        fs::create_dir_all(&a.layout().snapshots).unwrap();
    }

    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let outcome = a.archive_old_snapshots_at(max_active, today).unwrap();

    all.sort();
    let keep = n.min(max_active);
    let expected_active = all[n - keep..].to_vec();
    let expected_archived = all[..n - keep].to_vec();
    assert_eq!(names_in(&a.layout().snapshots), expected_active);
    assert_eq!(outcome.archived, expected_archived);
    assert!(outcome.errors.is_empty());
    if expected_archived.is_empty() {
        assert!(outcome.bucket.is_none());
    } else {
        let bucket = a.layout().archive.join("2026-10");
        assert_eq!(outcome.bucket.as_deref(), Some(bucket.as_path()));
        assert_eq!(names_in(&bucket), expected_archived);
    }
}

#[test]
fn rotation_reports_archived_snapshot_records() {
    let root = tempfile::tempdir().unwrap();
    let a = archivist(root.path());
    for name in ["snapshot_20260101_000000", "snapshot_20260102_000000"] {
        fs::create_dir_all(a.layout().snapshots.join(name)).unwrap();
    }

    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let outcome = a.archive_old_snapshots_at(1, today).unwrap();

    assert_eq!(outcome.snapshots.len(), 1);
    let moved = &outcome.snapshots[0];
    assert_eq!(moved.name, "snapshot_20260101_000000");
    assert_eq!(moved.status, SnapshotStatus::Archived);
    assert_eq!(
        moved.path,
        a.layout().archive.join("2026-10").join("snapshot_20260101_000000")
    );
    assert!(moved.path.is_dir());
    let active = a.get_active_snapshots().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].status, SnapshotStatus::Active);
}

#[test]
fn rotation_without_snapshots_root_is_noop() {
    let root = tempfile::tempdir().unwrap();
    let outcome = archivist(root.path()).archive_old_snapshots(3).unwrap();
    assert!(outcome.archived.is_empty());
}

#[test]
fn expiry_removes_only_old_parseable_buckets() {
    let root = tempfile::tempdir().unwrap();
    let a = archivist(root.path());
    for bucket in [
        "2025-01", "2026-03", "2026-04", "2026-05", "2026-10", "misc", "2026-4",
    ] {
        fs::create_dir_all(a.layout().archive.join(bucket).join("snap")).unwrap();
    }

    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let outcome = a.cleanup_archives_at(6, today).unwrap();

    assert_eq!(outcome.removed, vec!["2025-01", "2026-03", "2026-04"]);
    assert_eq!(outcome.skipped, vec!["2026-4", "misc"]);
    assert_eq!(
        names_in(&a.layout().archive),
        vec!["2026-05", "2026-10", "2026-4", "misc"]
    );
}

#[test]
fn expiry_with_missing_archive_root_is_empty() {
    let root = tempfile::tempdir().unwrap();
    let outcome = archivist(root.path()).cleanup_archives(6).unwrap();
    assert!(outcome.removed.is_empty());
}

#[test]
fn active_snapshots_sorted_by_mtime_desc() {
    let root = tempfile::tempdir().unwrap();
    let a = archivist(root.path());
    assert!(a.get_active_snapshots().unwrap().is_empty());

    let base = SystemTime::now() - Duration::from_secs(3600);
    for (name, offset) in [("b-old", 0u64), ("a-new", 600), ("c-mid", 300)] {
        let dir = a.layout().snapshots.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::File::open(&dir)
            .unwrap()
            .set_modified(base + Duration::from_secs(offset))
            .unwrap();
    }

    let names: Vec<_> = a
        .get_active_snapshots()
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["a-new", "c-mid", "b-old"]);
}
