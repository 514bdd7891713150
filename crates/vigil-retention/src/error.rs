use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RetentionError {
    #[error("invalid glob {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("reading directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} at {}: {source}", op, path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage probe: {0}")]
    Probe(String),

    #[error("latest artifact directory does not exist: {}", .0.display())]
    LatestMissing(PathBuf),

    #[error("latest artifact directory is empty, nothing to snapshot: {}", .0.display())]
    LatestEmpty(PathBuf),

    #[error("invalid snapshot name {0:?}")]
    InvalidSnapshotName(String),

    #[error("snapshot already exists: {}", .0.display())]
    SnapshotExists(PathBuf),
}

impl RetentionError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }
}
