use std::fmt::Write as _;
use std::path::PathBuf;

use vigil_workspace::WorkspaceError;

/// Hard failure of a whole engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("cannot read root {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("cancelled")]
    Cancelled,

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("{0}")]
    Failed(String),

    /// Catch-all for engine authors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// One engine's hard failure, as recorded by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFailure {
    pub engine: String,
    pub message: String,
}

/// Errors from [`Runner::run`](crate::Runner::run).
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The shared run workspace could not be created. No engine ran.
    #[error("creating run workspace: {0}")]
    Workspace(#[from] WorkspaceError),

    /// One or more engines failed. Findings from the others are still
    /// available from the runner.
    #[error("{}", render_failures(.0))]
    EnginesFailed(Vec<EngineFailure>),
}

impl RunError {
    /// Failing engines, empty for workspace errors.
    #[must_use]
    pub fn failures(&self) -> &[EngineFailure] {
        match self {
            Self::EnginesFailed(failures) => failures,
            Self::Workspace(_) => &[],
        }
    }
}

fn render_failures(failures: &[EngineFailure]) -> String {
    let mut out = format!("{} engine(s) failed:", failures.len());
    for f in failures {
        let _ = write!(out, "\n{}: {}", f.engine, f.message);
    }
    out
}
