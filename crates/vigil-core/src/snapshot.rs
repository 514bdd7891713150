use std::path::PathBuf;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SnapshotStatus;
use crate::errors::CoreError;

/// A named, timestamped directory of produced report artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub name: String,
    pub path: PathBuf,
    /// Directory modification time.
    pub modified_at: DateTime<Utc>,
    pub status: SnapshotStatus,
}

impl SnapshotInfo {
    /// This snapshot after its directory moved to `path` in the archive.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the status does not allow the
    /// move, i.e. the snapshot is already archived.
    pub fn archived(self, path: PathBuf) -> Result<Self, CoreError> {
        if !self.status.can_transition_to(SnapshotStatus::Archived) {
            return Err(CoreError::Validation(format!(
                "snapshot {} cannot move from {} to {}",
                self.name,
                self.status,
                SnapshotStatus::Archived
            )));
        }
        Ok(Self {
            path,
            status: SnapshotStatus::Archived,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn active() -> SnapshotInfo {
        SnapshotInfo {
            name: "snapshot_20260101_000000".to_string(),
            path: PathBuf::from("reports/snapshots/snapshot_20260101_000000"),
            modified_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            status: SnapshotStatus::Active,
        }
    }

    #[test]
    fn archiving_moves_path_and_status() {
        let dst = PathBuf::from("reports/archive/2026-01/snapshot_20260101_000000");
        let archived = active().archived(dst.clone()).unwrap();
        assert_eq!(archived.status, SnapshotStatus::Archived);
        assert_eq!(archived.path, dst);
        assert_eq!(archived.modified_at, active().modified_at);
    }

    #[test]
    fn archived_snapshot_cannot_be_archived_again() {
        let once = active().archived(PathBuf::from("a")).unwrap();
        let err = once.archived(PathBuf::from("b")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m.contains("archived to archived")));
    }
}
