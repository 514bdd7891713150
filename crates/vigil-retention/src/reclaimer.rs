use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use tracing::{debug, info, warn};
use vigil_config::{CleanupConfig, CleanupPattern};
use vigil_workspace::{Workspace, WorkspaceKind};

use crate::fsutil::{entry_size, remove_entry};
use crate::{RetentionError, StorageProbe, SystemStorageProbe, WorkspaceTracker};

/// Outcome of one reclamation pass. In dry-run mode the counters describe
/// what would have been removed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupResult {
    pub files_removed: usize,
    pub directories_removed: usize,
    pub bytes_freed: u64,
    pub usage_before: f64,
    pub usage_after: f64,
    pub duration: Duration,
    /// One entry per item that could not be removed.
    pub errors: Vec<String>,
    pub dry_run: bool,
}

/// Answer of [`Reclaimer::check_storage_usage`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StorageCheck {
    pub usage_percent: f64,
    pub threshold: f64,
    /// `usage_percent > threshold`.
    pub needs_cleanup: bool,
}

/// Garbage collector for scratch storage.
///
/// Reclaims tracked disk workspaces and any entry directly under the base
/// directory whose name matches an enabled include glob and no exclude glob.
pub struct Reclaimer {
    includes: GlobSet,
    excludes: GlobSet,
    base_dir: PathBuf,
    dry_run: bool,
    tracker: Arc<WorkspaceTracker>,
    probe: Arc<dyn StorageProbe>,
}

impl Reclaimer {
    /// Build a reclaimer from the effective (default + configured) patterns.
    ///
    /// # Errors
    ///
    /// Returns [`RetentionError::Glob`] for the first pattern that does not
    /// compile.
    pub fn new(config: &CleanupConfig) -> Result<Self, RetentionError> {
        let enabled: Vec<CleanupPattern> = config
            .effective_patterns()
            .into_iter()
            .filter(|p| p.enabled)
            .collect();
        let includes = build_set(enabled.iter().map(|p| p.pattern.as_str()))?;
        let excludes_list = config.effective_excludes();
        let excludes = build_set(excludes_list.iter().map(String::as_str))?;
        debug!(
            includes = enabled.len(),
            excludes = excludes_list.len(),
            "compiled cleanup patterns"
        );

        Ok(Self {
            includes,
            excludes,
            base_dir: config.resolved_base_dir(),
            dry_run: config.dry_run,
            tracker: Arc::new(WorkspaceTracker::new()),
            probe: Arc::new(SystemStorageProbe),
        })
    }

    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn StorageProbe>) -> Self {
        self.probe = probe;
        self
    }

    #[must_use]
    pub fn with_tracker(mut self, tracker: Arc<WorkspaceTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub const fn tracker(&self) -> &Arc<WorkspaceTracker> {
        &self.tracker
    }

    /// Hand a workspace to the reclaimer for later disposal.
    pub fn register_workspace(&self, workspace: Arc<dyn Workspace>) {
        self.tracker.register_workspace(workspace);
    }

    /// Whether an entry with this file name is eligible for removal.
    #[must_use]
    pub fn is_candidate(&self, name: &str) -> bool {
        self.includes.is_match(name) && !self.excludes.is_match(name)
    }

    /// Current usage of the base directory's filesystem against `threshold`.
    ///
    /// # Errors
    ///
    /// Returns the probe's error.
    pub fn check_storage_usage(&self, threshold: f64) -> Result<StorageCheck, RetentionError> {
        let usage_percent = self.probe.usage_percent(&self.base_dir)?;
        Ok(StorageCheck {
            usage_percent,
            threshold,
            needs_cleanup: usage_percent > threshold,
        })
    }

    /// Dispose of tracked disk workspaces, then remove matching entries under
    /// the base directory.
    ///
    /// # Errors
    ///
    /// Returns [`RetentionError::ReadDir`] if the base directory cannot be
    /// listed. Failures on individual items are recorded in
    /// [`CleanupResult::errors`] instead.
    pub fn cleanup_temporary_files(&self) -> Result<CleanupResult, RetentionError> {
        let started = Instant::now();
        let mut result = CleanupResult {
            dry_run: self.dry_run,
            ..CleanupResult::default()
        };
        result.usage_before = self.usage_or_record(&mut result.errors);

        let handled = self.reclaim_workspaces(&mut result);
        self.reclaim_base_dir(&handled, &mut result)?;

        result.usage_after = self.usage_or_record(&mut result.errors);
        result.duration = started.elapsed();
        info!(
            files = result.files_removed,
            directories = result.directories_removed,
            bytes = result.bytes_freed,
            errors = result.errors.len(),
            dry_run = self.dry_run,
            "temporary file cleanup finished"
        );
        Ok(result)
    }

    fn reclaim_workspaces(&self, result: &mut CleanupResult) -> HashSet<PathBuf> {
        let mut handled = HashSet::new();
        for ws in self.tracker.snapshot() {
            if ws.kind() != WorkspaceKind::Disk || ws.is_disposed() {
                continue;
            }
            let Some(root) = ws.disk_root().map(Path::to_path_buf) else {
                continue;
            };
            let size = entry_size(&root);
            if self.dry_run {
                debug!(root = %root.display(), size, "would dispose workspace");
            } else if let Err(e) = ws.cleanup() {
                warn!(root = %root.display(), error = %e, "failed to dispose workspace");
                result.errors.push(format!("{}: {e}", root.display()));
                handled.insert(root);
                continue;
            }
            result.directories_removed += 1;
            result.bytes_freed += size;
            handled.insert(root);
        }
        if !self.dry_run {
            self.tracker.prune();
        }
        handled
    }

    fn reclaim_base_dir(
        &self,
        handled: &HashSet<PathBuf>,
        result: &mut CleanupResult,
    ) -> Result<(), RetentionError> {
        let entries = fs::read_dir(&self.base_dir)
            .map_err(|e| RetentionError::read_dir(&self.base_dir, e))?;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    result.errors.push(format!("{}: {e}", self.base_dir.display()));
                    continue;
                }
            };
            let path = entry.path();
            if handled.contains(&path) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.is_candidate(&name) {
                continue;
            }

            let is_dir = entry.file_type().is_ok_and(|ft| ft.is_dir());
            let size = entry_size(&path);
            if self.dry_run {
                debug!(path = %path.display(), size, "would remove");
            } else if let Err(e) = remove_entry(&path) {
                warn!(path = %path.display(), error = %e, "failed to remove");
                result.errors.push(format!("{}: {e}", path.display()));
                continue;
            }

            if is_dir {
                result.directories_removed += 1;
            } else {
                result.files_removed += 1;
            }
            result.bytes_freed += size;
        }
        Ok(())
    }

    fn usage_or_record(&self, errors: &mut Vec<String>) -> f64 {
        match self.probe.usage_percent(&self.base_dir) {
            Ok(usage) => usage,
            Err(e) => {
                warn!(error = %e, "storage probe failed");
                errors.push(e.to_string());
                0.0
            }
        }
    }
}

fn build_set<'a>(patterns: impl Iterator<Item = &'a str>) -> Result<GlobSet, RetentionError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| RetentionError::Glob {
            pattern: pattern.to_string(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| RetentionError::Glob {
        pattern: String::new(),
        source,
    })
}
