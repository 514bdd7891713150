use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{info, warn};
use vigil_config::{VigilConfig, WorkspaceBackend};
use vigil_core::AuditReport;
use vigil_engine::{Engine, RunContext, RunError, Runner};
use vigil_flags::{CommandHelpRenderer, FlagEngine, HelpTextRenderer, StaticHelpText};
use vigil_parser::AstGrepProvider;
use vigil_retention::{
    ArchiveCleanup, ArchiveOutcome, Archivist, ArtifactLayout, CleanupResult, Reclaimer,
    StorageCheck, StorageProbe, SystemStorageProbe, WorkspaceTracker,
};
use vigil_workspace::{
    DiskWorkspaceFactory, MemoryWorkspaceFactory, Workspace, WorkspaceError, WorkspaceFactory,
};

use crate::AuditError;

/// Report plus the combined engine failure, if any. The report still
/// carries every finding the healthy engines produced.
#[derive(Debug)]
pub struct AuditOutcome {
    pub report: AuditReport,
    pub error: Option<RunError>,
}

impl AuditOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// What one housekeeping pass did.
#[derive(Debug, Clone, Serialize)]
pub struct HousekeepingReport {
    pub storage: StorageCheck,
    /// `None` when usage was at or below the threshold.
    pub cleanup: Option<CleanupResult>,
    pub archived: ArchiveOutcome,
    pub expired: ArchiveCleanup,
}

/// Reference orchestration: engines over a project root, a sorted report,
/// and retention housekeeping around it.
pub struct AuditPipeline {
    config: VigilConfig,
    factory: Arc<dyn WorkspaceFactory>,
    engines: Vec<Arc<dyn Engine>>,
    flags: Option<Arc<FlagEngine>>,
    tracker: Arc<WorkspaceTracker>,
    probe: Arc<dyn StorageProbe>,
}

impl AuditPipeline {
    /// Pipeline with no engines and the configured workspace backend.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation error.
    pub fn new(config: VigilConfig) -> Result<Self, AuditError> {
        config.validate()?;
        let factory = default_factory(&config);
        Ok(Self {
            config,
            factory,
            engines: Vec::new(),
            flags: None,
            tracker: Arc::new(WorkspaceTracker::new()),
            probe: Arc::new(SystemStorageProbe),
        })
    }

    /// [`new`](Self::new) plus the flag engine.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation error.
    pub fn from_config(config: VigilConfig) -> Result<Self, AuditError> {
        Ok(Self::new(config)?.with_flag_engine())
    }

    /// Register the flag engine backed by the ast-grep provider. Help text
    /// comes from `flags.help_command` when configured.
    #[must_use]
    pub fn with_flag_engine(mut self) -> Self {
        let help: Arc<dyn HelpTextRenderer> =
            match CommandHelpRenderer::from_argv(&self.config.flags.help_command) {
                Some(cmd) => Arc::new(cmd),
                None => Arc::new(StaticHelpText::default()),
            };
        let engine = Arc::new(FlagEngine::new(
            self.config.flags.clone(),
            Arc::new(AstGrepProvider::new()),
            help,
        ));
        self.engines.push(Arc::clone(&engine) as Arc<dyn Engine>);
        self.flags = Some(engine);
        self
    }

    #[must_use]
    pub fn with_engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engines.push(engine);
        self
    }

    /// Replace the workspace factory.
    #[must_use]
    pub fn with_factory(mut self, factory: Arc<dyn WorkspaceFactory>) -> Self {
        self.factory = factory;
        self
    }

    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn StorageProbe>) -> Self {
        self.probe = probe;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &VigilConfig {
        &self.config
    }

    /// Run workspaces that were not disposed, awaiting the reclaimer.
    #[must_use]
    pub const fn tracker(&self) -> &Arc<WorkspaceTracker> {
        &self.tracker
    }

    /// Run every engine over `root`.
    pub async fn run(&self, root: &Path) -> AuditOutcome {
        self.run_with(&RunContext::new(), root).await
    }

    pub async fn run_with(&self, ctx: &RunContext, root: &Path) -> AuditOutcome {
        let inner = Arc::clone(&self.factory);
        let created: Arc<Mutex<Vec<Arc<dyn Workspace>>>> = Arc::default();
        let recorder = Arc::clone(&created);
        let recording = move || -> Result<Arc<dyn Workspace>, WorkspaceError> {
            let ws = inner.create()?;
            recorder
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(Arc::clone(&ws));
            Ok(ws)
        };

        let mut runner = Runner::new(Arc::new(recording));
        for engine in &self.engines {
            runner.register(Arc::clone(engine));
        }

        let error = runner.run(ctx, root).await.err();
        if let Some(e) = &error {
            warn!(error = %e, "audit finished with engine failures");
        }

        // The runner disposes its workspace; anything it left behind goes to
        // the reclaimer.
        for ws in created.lock().unwrap_or_else(PoisonError::into_inner).drain(..) {
            if !ws.is_disposed() {
                warn!(kind = ?ws.kind(), "run workspace left behind, handing to reclaimer");
                self.tracker.register_workspace(ws);
            }
        }

        let flags = self
            .flags
            .as_ref()
            .map(|engine| engine.statuses())
            .unwrap_or_default();
        let report = AuditReport::new(runner.issues(), flags);
        info!(
            issues = report.summary.total_issues,
            flags = report.summary.total_flags,
            "audit complete"
        );
        AuditOutcome { report, error }
    }

    /// Artifact layout under `root` (or the configured root if absolute).
    #[must_use]
    pub fn layout(&self, root: &Path) -> ArtifactLayout {
        ArtifactLayout::under(&root.join(&self.config.archive.artifact_root))
    }

    /// Reclaim scratch storage when over the threshold, then rotate
    /// snapshots and expire archive buckets under `root`.
    ///
    /// # Errors
    ///
    /// The first fatal retention error. Per-item failures are in the
    /// returned results.
    pub fn housekeeping(&self, root: &Path) -> Result<HousekeepingReport, AuditError> {
        let reclaimer = Reclaimer::new(&self.config.cleanup)?
            .with_probe(Arc::clone(&self.probe))
            .with_tracker(Arc::clone(&self.tracker));

        let storage = reclaimer.check_storage_usage(self.config.cleanup.storage_threshold)?;
        let cleanup = if storage.needs_cleanup {
            info!(
                usage = storage.usage_percent,
                threshold = storage.threshold,
                "storage over threshold, reclaiming"
            );
            Some(reclaimer.cleanup_temporary_files()?)
        } else {
            None
        };

        let archivist = Archivist::new(self.layout(root));
        let archived = archivist.archive_old_snapshots(self.config.archive.max_active_snapshots)?;
        let expired = archivist.cleanup_archives(self.config.archive.retention_months)?;

        Ok(HousekeepingReport {
            storage,
            cleanup,
            archived,
            expired,
        })
    }
}

fn default_factory(config: &VigilConfig) -> Arc<dyn WorkspaceFactory> {
    match config.general.workspace_backend {
        WorkspaceBackend::Memory => Arc::new(MemoryWorkspaceFactory),
        WorkspaceBackend::Disk => {
            let base: PathBuf = config
                .general
                .scratch_dir
                .clone()
                .unwrap_or_else(|| config.cleanup.resolved_base_dir());
            Arc::new(DiskWorkspaceFactory::new(Some(base)))
        }
    }
}
