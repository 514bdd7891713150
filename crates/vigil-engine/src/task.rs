use std::path::Path;

use tracing::{debug, warn};
use vigil_core::{Category, Issue, Priority, Severity};
use vigil_workspace::Workspace;

use crate::{Engine, EngineError, RunContext};

/// Id of the finding recorded when an engine task fails.
pub const TASK_FAILED_ID: &str = "ENGINE-TASK-FAILED";

/// One independent step of a [`TaskEngine`].
pub trait EngineTask: Send + Sync {
    fn name(&self) -> &str;

    /// # Errors
    ///
    /// Any error. The owning engine turns it into a finding.
    fn run(
        &self,
        ctx: &RunContext,
        root: &Path,
        workspace: &dyn Workspace,
    ) -> Result<Vec<Issue>, EngineError>;
}

/// An [`EngineTask`] backed by a closure.
pub struct FnTask<F> {
    name: String,
    f: F,
}

impl<F> FnTask<F>
where
    F: Fn(&RunContext, &Path, &dyn Workspace) -> Result<Vec<Issue>, EngineError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> EngineTask for FnTask<F>
where
    F: Fn(&RunContext, &Path, &dyn Workspace) -> Result<Vec<Issue>, EngineError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(
        &self,
        ctx: &RunContext,
        root: &Path,
        workspace: &dyn Workspace,
    ) -> Result<Vec<Issue>, EngineError> {
        (self.f)(ctx, root, workspace)
    }
}

/// Engine composed of ordered tasks with at-least-partial success.
///
/// The root must be a readable directory; anything else is a hard error.
/// After that, a failing task yields one [`TASK_FAILED_ID`] finding and the
/// remaining tasks still run. Cancellation stops before the next task and
/// returns what was gathered.
pub struct TaskEngine {
    name: String,
    tasks: Vec<Box<dyn EngineTask>>,
}

impl TaskEngine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_task(mut self, task: impl EngineTask + 'static) -> Self {
        self.tasks.push(Box::new(task));
        self
    }

    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    fn task_failure(&self, task: &str, err: &EngineError) -> Issue {
        Issue::new(
            TASK_FAILED_ID,
            Category::CodeQuality,
            Severity::Medium,
            Priority::P2,
            format!("{} task {task} failed", self.name),
        )
        .with_description(err.to_string())
        .with_suggestion("Check the task's input files and rerun the audit")
    }
}

impl Engine for TaskEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze(
        &self,
        ctx: &RunContext,
        root: &Path,
        workspace: &dyn Workspace,
    ) -> Result<Vec<Issue>, EngineError> {
        let meta = std::fs::metadata(root).map_err(|source| EngineError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(EngineError::RootNotDirectory(root.to_path_buf()));
        }

        let mut issues = Vec::new();
        for task in &self.tasks {
            if ctx.is_cancelled() {
                debug!(engine = %self.name, task = task.name(), "cancelled, keeping partial results");
                break;
            }
            match task.run(ctx, root, workspace) {
                Ok(found) => issues.extend(found),
                Err(e) => {
                    warn!(engine = %self.name, task = task.name(), error = %e, "task failed");
                    issues.push(self.task_failure(task.name(), &e));
                }
            }
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vigil_workspace::MemoryWorkspace;

    fn ok_task(name: &'static str, id: &'static str) -> impl EngineTask {
        FnTask::new(name, move |_: &RunContext, _: &Path, _: &dyn Workspace| {
            Ok(vec![Issue::new(
                id,
                Category::Documentation,
                Severity::Low,
                Priority::P3,
                id,
            )])
        })
    }

    fn failing_task(name: &'static str) -> impl EngineTask {
        FnTask::new(name, |_: &RunContext, _: &Path, _: &dyn Workspace| {
            Err(EngineError::Failed("parse error".into()))
        })
    }

    #[test]
    fn task_failure_becomes_issue_and_others_still_run() {
        let root = tempfile::tempdir().unwrap();
        let engine = TaskEngine::new("docs")
            .with_task(ok_task("first", "DOC-1"))
            .with_task(failing_task("broken"))
            .with_task(ok_task("last", "DOC-2"));
        let ws = MemoryWorkspace::new();

        let issues = engine
            .analyze(&RunContext::new(), root.path(), &ws)
            .unwrap();
        let ids: Vec<_> = issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["DOC-1", TASK_FAILED_ID, "DOC-2"]);

        let failed = &issues[1];
        assert_eq!(failed.category, Category::CodeQuality);
        assert_eq!(failed.severity, Severity::Medium);
        assert_eq!(failed.priority, Priority::P2);
        assert!(failed.title.contains("broken"));
        assert_eq!(failed.description, "parse error");
    }

    #[test]
    fn missing_root_is_a_hard_error() {
        let root = tempfile::tempdir().unwrap();
        let engine = TaskEngine::new("docs").with_task(ok_task("first", "DOC-1"));
        let err = engine
            .analyze(
                &RunContext::new(),
                &root.path().join("absent"),
                &MemoryWorkspace::new(),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::RootUnreadable { .. }));
    }

    #[test]
    fn cancellation_keeps_partial_results() {
        let root = tempfile::tempdir().unwrap();
        let ctx = RunContext::new();
        let trigger = ctx.clone();
        let engine = TaskEngine::new("docs")
            .with_task(FnTask::new(
                "cancel-after",
                move |_: &RunContext, _: &Path, _: &dyn Workspace| {
                    trigger.cancel();
                    Ok(vec![Issue::new(
                        "DOC-1",
                        Category::Documentation,
                        Severity::Low,
                        Priority::P3,
                        "t",
                    )])
                },
            ))
            .with_task(ok_task("never", "DOC-2"));

        let issues = engine
            .analyze(&ctx, root.path(), &MemoryWorkspace::new())
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "DOC-1");
    }
}
