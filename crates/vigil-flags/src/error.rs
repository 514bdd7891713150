use std::fmt;
use std::path::PathBuf;

use vigil_core::SourceError;
use vigil_workspace::WorkspaceError;

/// The five reconciliation phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Catalog,
    Classify,
    CrossReference,
    DetectConflicts,
    Validate,
}

impl Phase {
    pub const ALL: [Self; 5] = [
        Self::Catalog,
        Self::Classify,
        Self::CrossReference,
        Self::DetectConflicts,
        Self::Validate,
    ];

    /// Prefix used in error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Catalog => "cataloging flags",
            Self::Classify => "classifying flags",
            Self::CrossReference => "cross-referencing documentation",
            Self::DetectConflicts => "detecting conflicts",
            Self::Validate => "validating help output",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlagError {
    #[error("configuration source not found: {}", .0.display())]
    ConfigSourceMissing(PathBuf),

    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("rendering help text: {0}")]
    Help(String),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("encoding flag statuses: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid flag token pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("cancelled")]
    Cancelled,

    #[error("{phase}: {source}")]
    Phase {
        phase: Phase,
        #[source]
        source: Box<FlagError>,
    },
}

impl FlagError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Attach phase context. Already-phased errors are left as they are.
    #[must_use]
    pub fn in_phase(self, phase: Phase) -> Self {
        match self {
            Self::Phase { .. } => self,
            other => Self::Phase {
                phase,
                source: Box::new(other),
            },
        }
    }

    /// Phase the error was raised in, if known.
    #[must_use]
    pub const fn phase(&self) -> Option<Phase> {
        match self {
            Self::Phase { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
