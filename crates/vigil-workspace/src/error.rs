use std::path::PathBuf;

/// Errors from workspace operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("path escapes workspace root: {0}")]
    Traversal(String),

    #[error("invalid workspace path: {0:?}")]
    InvalidPath(String),

    #[error("path conflicts with an existing file or directory: {0}")]
    Conflict(String),

    #[error("file not found in workspace: {0}")]
    NotFound(String),

    #[error("workspace already disposed")]
    Disposed,

    #[error("workspace I/O at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WorkspaceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
