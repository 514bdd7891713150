use std::path::PathBuf;
use std::sync::Arc;

use crate::{DiskWorkspace, MemoryWorkspace, Workspace, WorkspaceError};

/// Constructs workspaces on demand.
///
/// Passed into the runner and the audit pipeline instead of a fixed
/// constructor. Any `Fn() -> Result<Arc<dyn Workspace>, WorkspaceError>`
/// closure is a factory.
pub trait WorkspaceFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns the backend's creation error.
    fn create(&self) -> Result<Arc<dyn Workspace>, WorkspaceError>;
}

impl<F> WorkspaceFactory for F
where
    F: Fn() -> Result<Arc<dyn Workspace>, WorkspaceError> + Send + Sync,
{
    fn create(&self) -> Result<Arc<dyn Workspace>, WorkspaceError> {
        self()
    }
}

/// Creates [`DiskWorkspace`]s under `base` (the OS temp root when `None`).
#[derive(Debug, Clone, Default)]
pub struct DiskWorkspaceFactory {
    pub base: Option<PathBuf>,
}

impl DiskWorkspaceFactory {
    #[must_use]
    pub const fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }
}

impl WorkspaceFactory for DiskWorkspaceFactory {
    fn create(&self) -> Result<Arc<dyn Workspace>, WorkspaceError> {
        let ws = match &self.base {
            Some(base) => DiskWorkspace::create_in(base)?,
            None => DiskWorkspace::create()?,
        };
        Ok(Arc::new(ws))
    }
}

/// Creates empty [`MemoryWorkspace`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryWorkspaceFactory;

impl WorkspaceFactory for MemoryWorkspaceFactory {
    fn create(&self) -> Result<Arc<dyn Workspace>, WorkspaceError> {
        Ok(Arc::new(MemoryWorkspace::new()))
    }
}
