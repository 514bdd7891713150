use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use vigil_core::Issue;
use vigil_workspace::{Workspace, WorkspaceFactory};

use crate::{Engine, EngineFailure, IssueCollector, RunContext, RunError};

/// Runs engines concurrently against one shared workspace.
///
/// Each run creates a fresh workspace from the injected factory and disposes
/// of it when every engine has returned, whatever the outcome. Findings are
/// gathered through an [`IssueCollector`] in no particular order.
pub struct Runner {
    engines: Vec<Arc<dyn Engine>>,
    factory: Arc<dyn WorkspaceFactory>,
    collector: Arc<IssueCollector>,
}

impl Runner {
    pub fn new(factory: Arc<dyn WorkspaceFactory>) -> Self {
        Self {
            engines: Vec::new(),
            factory,
            collector: Arc::new(IssueCollector::new()),
        }
    }

    #[must_use]
    pub fn with_engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.register(engine);
        self
    }

    pub fn register(&mut self, engine: Arc<dyn Engine>) {
        self.engines.push(engine);
    }

    #[must_use]
    pub fn engine_names(&self) -> Vec<&str> {
        self.engines.iter().map(|e| e.name()).collect()
    }

    /// Run every registered engine against `root`.
    ///
    /// Findings from the previous run are discarded first. On failure the
    /// findings of engines that succeeded remain available from
    /// [`issues`](Self::issues).
    ///
    /// # Errors
    ///
    /// [`RunError::Workspace`] if the run workspace cannot be created, or
    /// [`RunError::EnginesFailed`] listing every engine whose `analyze`
    /// returned an error or panicked.
    pub async fn run(&self, ctx: &RunContext, root: &Path) -> Result<(), RunError> {
        self.collector.clear();
        let started = Instant::now();
        let workspace = self.factory.create()?;
        debug!(
            kind = %workspace.kind(),
            engines = self.engines.len(),
            "starting run"
        );

        let mut set = JoinSet::new();
        for (index, engine) in self.engines.iter().enumerate() {
            let engine = Arc::clone(engine);
            let workspace = Arc::clone(&workspace);
            let collector = Arc::clone(&self.collector);
            let ctx = ctx.clone();
            let root: PathBuf = root.to_path_buf();
            set.spawn_blocking(move || {
                let name = engine.name().to_string();
                let outcome = run_engine(engine.as_ref(), &ctx, &root, workspace.as_ref());
                let outcome = outcome.map(|issues| {
                    debug!(engine = %name, found = issues.len(), "engine finished");
                    collector.collect(issues);
                });
                (index, name, outcome)
            });
        }

        let mut failures: Vec<(usize, EngineFailure)> = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((_, _, Ok(()))) => {}
                Ok((index, engine, Err(message))) => {
                    warn!(engine = %engine, error = %message, "engine failed");
                    failures.push((index, EngineFailure { engine, message }));
                }
                Err(e) => {
                    warn!(error = %e, "engine task aborted");
                    failures.push((
                        usize::MAX,
                        EngineFailure {
                            engine: "<unknown>".to_string(),
                            message: e.to_string(),
                        },
                    ));
                }
            }
        }

        if let Err(e) = workspace.cleanup() {
            warn!(error = %e, "failed to dispose run workspace");
        }

        info!(
            engines = self.engines.len(),
            failed = failures.len(),
            issues = self.collector.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "run finished"
        );

        if failures.is_empty() {
            Ok(())
        } else {
            failures.sort_by_key(|(index, _)| *index);
            Err(RunError::EnginesFailed(
                failures.into_iter().map(|(_, f)| f).collect(),
            ))
        }
    }

    /// Copy of the findings collected by the latest run.
    #[must_use]
    pub fn issues(&self) -> Vec<Issue> {
        self.collector.issues()
    }
}

/// Run one engine, turning both errors and panics into a message.
fn run_engine(
    engine: &dyn Engine,
    ctx: &RunContext,
    root: &Path,
    workspace: &dyn Workspace,
) -> Result<Vec<Issue>, String> {
    match catch_unwind(AssertUnwindSafe(|| engine.analyze(ctx, root, workspace))) {
        Ok(Ok(issues)) => Ok(issues),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .map_or_else(|| "panicked".to_string(), |m| format!("panicked: {m}"))
}
