use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local, Months, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use vigil_core::{SnapshotInfo, SnapshotStatus};

use crate::RetentionError;
use crate::fsutil::{copy_dir, move_dir, subdirectories};

const SNAPSHOT_NAME_FORMAT: &str = "snapshot_%Y%m%d_%H%M%S";
const BUCKET_FORMAT: &str = "%Y-%m";

/// The three-tier artifact layout.
///
/// ```text
/// <root>/latest/      most recent run's raw artifacts
/// <root>/snapshots/   timestamped copies of latest
/// <root>/archive/     YYYY-MM buckets of rotated snapshots
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    pub latest: PathBuf,
    pub snapshots: PathBuf,
    pub archive: PathBuf,
}

impl ArtifactLayout {
    #[must_use]
    pub fn under(root: &Path) -> Self {
        Self {
            latest: root.join("latest"),
            snapshots: root.join("snapshots"),
            archive: root.join("archive"),
        }
    }
}

/// Result of [`Archivist::archive_old_snapshots`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveOutcome {
    /// Snapshot names moved, oldest first.
    pub archived: Vec<String>,
    /// The moved snapshots at their archive location, in `archived` order.
    pub snapshots: Vec<SnapshotInfo>,
    /// Bucket they were moved into, if any move was attempted.
    pub bucket: Option<PathBuf>,
    pub errors: Vec<String>,
}

/// Result of [`Archivist::cleanup_archives`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveCleanup {
    pub removed: Vec<String>,
    /// Entries whose names are not `YYYY-MM` buckets. Never touched.
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
}

/// Owner of the snapshot lifecycle: copy `latest` into a named snapshot,
/// rotate surplus snapshots into monthly buckets, expire old buckets.
#[derive(Debug, Clone)]
pub struct Archivist {
    layout: ArtifactLayout,
}

impl Archivist {
    #[must_use]
    pub const fn new(layout: ArtifactLayout) -> Self {
        Self { layout }
    }

    #[must_use]
    pub const fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    /// Copy every entry of `latest` into a new snapshot directory.
    ///
    /// An empty `name` becomes `snapshot_<YYYYmmdd_HHMMSS>`. `latest` is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`RetentionError::LatestMissing`] / [`RetentionError::LatestEmpty`]
    /// when there is nothing to snapshot,
    /// [`RetentionError::InvalidSnapshotName`] when the name does not reduce
    /// to a plain directory name inside the snapshots root,
    /// [`RetentionError::SnapshotExists`] when that directory already exists.
    pub fn create_snapshot(&self, name: &str) -> Result<SnapshotInfo, RetentionError> {
        self.create_snapshot_at(name, Local::now().naive_local())
    }

    /// [`create_snapshot`](Self::create_snapshot) with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`create_snapshot`](Self::create_snapshot).
    pub fn create_snapshot_at(
        &self,
        name: &str,
        now: NaiveDateTime,
    ) -> Result<SnapshotInfo, RetentionError> {
        let latest = &self.layout.latest;
        let mut entries = match fs::read_dir(latest) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RetentionError::LatestMissing(latest.clone()));
            }
            Err(e) => return Err(RetentionError::read_dir(latest, e)),
        };
        if entries.next().is_none() {
            return Err(RetentionError::LatestEmpty(latest.clone()));
        }

        let name = if name.trim().is_empty() {
            now.format(SNAPSHOT_NAME_FORMAT).to_string()
        } else {
            sanitize_snapshot_name(name)?
        };

        let root = &self.layout.snapshots;
        fs::create_dir_all(root).map_err(|e| RetentionError::io("creating snapshots root", root, e))?;
        let target = contained_child(root, &name)?;
        if target.exists() {
            return Err(RetentionError::SnapshotExists(target));
        }

        copy_dir(latest, &target).map_err(|e| RetentionError::io("copying latest", &target, e))?;
        info!(snapshot = %name, "created snapshot");
        Ok(SnapshotInfo {
            modified_at: modified_at(&target),
            name,
            path: target,
            status: SnapshotStatus::Active,
        })
    }

    /// Keep the newest `max_active` snapshots (by name) and move the rest
    /// into the current month's archive bucket.
    ///
    /// # Errors
    ///
    /// Fails if the snapshots root cannot be listed or the bucket cannot be
    /// created. Individual move failures are recorded in the outcome.
    pub fn archive_old_snapshots(&self, max_active: usize) -> Result<ArchiveOutcome, RetentionError> {
        self.archive_old_snapshots_at(max_active, Local::now().date_naive())
    }

    /// [`archive_old_snapshots`](Self::archive_old_snapshots) with an
    /// explicit date for the bucket name.
    ///
    /// # Errors
    ///
    /// See [`archive_old_snapshots`](Self::archive_old_snapshots).
    pub fn archive_old_snapshots_at(
        &self,
        max_active: usize,
        today: NaiveDate,
    ) -> Result<ArchiveOutcome, RetentionError> {
        let root = &self.layout.snapshots;
        let Some(mut names) =
            subdirectories(root).map_err(|e| RetentionError::read_dir(root, e))?
        else {
            return Ok(ArchiveOutcome::default());
        };
        if names.len() <= max_active {
            debug!(active = names.len(), max_active, "no snapshots to archive");
            return Ok(ArchiveOutcome::default());
        }

        names.sort();
        let surplus = names.len() - max_active;
        let bucket = self.layout.archive.join(today.format(BUCKET_FORMAT).to_string());
        fs::create_dir_all(&bucket)
            .map_err(|e| RetentionError::io("creating archive bucket", &bucket, e))?;

        let mut outcome = ArchiveOutcome {
            bucket: Some(bucket.clone()),
            ..ArchiveOutcome::default()
        };
        for name in names.into_iter().take(surplus) {
            let src = root.join(&name);
            let dst = bucket.join(&name);
            if dst.exists() {
                outcome
                    .errors
                    .push(format!("{}: already archived", dst.display()));
                continue;
            }
            let snapshot = SnapshotInfo {
                modified_at: modified_at(&src),
                name: name.clone(),
                path: src.clone(),
                status: SnapshotStatus::Active,
            };
            match move_dir(&src, &dst) {
                Ok(()) => {
                    debug!(snapshot = %name, bucket = %bucket.display(), "archived snapshot");
                    match snapshot.archived(dst) {
                        Ok(info) => outcome.snapshots.push(info),
                        Err(e) => outcome.errors.push(e.to_string()),
                    }
                    outcome.archived.push(name);
                }
                Err(e) => {
                    warn!(snapshot = %name, error = %e, "failed to archive snapshot");
                    outcome.errors.push(format!("{}: {e}", src.display()));
                }
            }
        }
        info!(archived = outcome.archived.len(), "snapshot rotation finished");
        Ok(outcome)
    }

    /// Remove archive buckets older than `retention_months`.
    ///
    /// # Errors
    ///
    /// Fails only if the archive root exists but cannot be listed.
    pub fn cleanup_archives(&self, retention_months: u32) -> Result<ArchiveCleanup, RetentionError> {
        self.cleanup_archives_at(retention_months, Local::now().date_naive())
    }

    /// [`cleanup_archives`](Self::cleanup_archives) with an explicit date.
    ///
    /// A bucket is removed when its first day is strictly before
    /// `today - retention_months`.
    ///
    /// # Errors
    ///
    /// See [`cleanup_archives`](Self::cleanup_archives).
    pub fn cleanup_archives_at(
        &self,
        retention_months: u32,
        today: NaiveDate,
    ) -> Result<ArchiveCleanup, RetentionError> {
        let root = &self.layout.archive;
        let Some(mut names) =
            subdirectories(root).map_err(|e| RetentionError::read_dir(root, e))?
        else {
            return Ok(ArchiveCleanup::default());
        };
        names.sort();

        let cutoff = today
            .checked_sub_months(Months::new(retention_months))
            .unwrap_or(NaiveDate::MIN);
        let mut outcome = ArchiveCleanup::default();
        for name in names {
            let Some(bucket_start) = parse_bucket(&name) else {
                debug!(entry = %name, "not an archive bucket, leaving it");
                outcome.skipped.push(name);
                continue;
            };
            if bucket_start >= cutoff {
                continue;
            }
            let path = root.join(&name);
            match fs::remove_dir_all(&path) {
                Ok(()) => {
                    debug!(bucket = %name, "removed expired archive bucket");
                    outcome.removed.push(name);
                }
                Err(e) => {
                    warn!(bucket = %name, error = %e, "failed to remove archive bucket");
                    outcome.errors.push(format!("{}: {e}", path.display()));
                }
            }
        }
        info!(removed = outcome.removed.len(), "archive expiry finished");
        Ok(outcome)
    }

    /// Active snapshots, most recently modified first. A missing snapshots
    /// root yields an empty list.
    ///
    /// # Errors
    ///
    /// Fails if the snapshots root exists but cannot be listed.
    pub fn get_active_snapshots(&self) -> Result<Vec<SnapshotInfo>, RetentionError> {
        let root = &self.layout.snapshots;
        let Some(names) = subdirectories(root).map_err(|e| RetentionError::read_dir(root, e))?
        else {
            return Ok(Vec::new());
        };
        let mut snapshots: Vec<SnapshotInfo> = names
            .into_iter()
            .map(|name| {
                let path = root.join(&name);
                SnapshotInfo {
                    modified_at: modified_at(&path),
                    name,
                    path,
                    status: SnapshotStatus::Active,
                }
            })
            .collect();
        snapshots.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(snapshots)
    }
}

/// Reduce a caller-supplied name to its final path component.
fn sanitize_snapshot_name(name: &str) -> Result<String, RetentionError> {
    let trimmed = name.trim();
    match Path::new(trimmed).components().next_back() {
        Some(Component::Normal(part)) => Ok(part.to_string_lossy().into_owned()),
        _ => Err(RetentionError::InvalidSnapshotName(name.to_string())),
    }
}

/// `root/name`, verified to sit directly inside `root`.
fn contained_child(root: &Path, name: &str) -> Result<PathBuf, RetentionError> {
    let canonical_root = root
        .canonicalize()
        .map_err(|e| RetentionError::io("resolving snapshots root", root, e))?;
    let candidate = canonical_root.join(name);
    if candidate.parent() != Some(canonical_root.as_path()) || candidate == canonical_root {
        return Err(RetentionError::InvalidSnapshotName(name.to_string()));
    }
    Ok(candidate)
}

fn parse_bucket(name: &str) -> Option<NaiveDate> {
    let bytes = name.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{name}-01"), "%Y-%m-%d").ok()
}

fn modified_at(path: &Path) -> DateTime<Utc> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map_or_else(|_| Utc::now(), DateTime::<Utc>::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("weekly", "weekly")]
    #[case("../../etc/cron.d", "cron.d")]
    #[case("nested/run-1", "run-1")]
    #[case("  padded  ", "padded")]
    fn sanitized_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_snapshot_name(input).unwrap(), expected);
    }

    #[rstest]
    #[case("..")]
    #[case("/")]
    #[case("a/..")]
    fn rejected_names(#[case] input: &str) {
        assert!(matches!(
            sanitize_snapshot_name(input),
            Err(RetentionError::InvalidSnapshotName(_))
        ));
    }

    #[rstest]
    #[case("2026-03", Some((2026, 3)))]
    #[case("1999-12", Some((1999, 12)))]
    #[case("2026-13", None)]
    #[case("2026-3", None)]
    #[case("latest", None)]
    #[case("2026-03-01", None)]
    fn bucket_names(#[case] name: &str, #[case] expected: Option<(i32, u32)>) {
        let expected = expected.and_then(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1));
        assert_eq!(parse_bucket(name), expected);
    }
}
