use std::sync::{Arc, Mutex, PoisonError};

use vigil_workspace::Workspace;

/// Workspaces handed over for disposal by the [`Reclaimer`](crate::Reclaimer).
///
/// Once registered, a workspace must not be cleaned up by its creator.
#[derive(Debug, Default)]
pub struct WorkspaceTracker {
    workspaces: Mutex<Vec<Arc<dyn Workspace>>>,
}

impl WorkspaceTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_workspace(&self, workspace: Arc<dyn Workspace>) {
        self.lock().push(workspace);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the tracked handles.
    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn Workspace>> {
        self.lock().clone()
    }

    /// Stop tracking workspaces that have been disposed.
    pub(crate) fn prune(&self) {
        self.lock().retain(|ws| !ws.is_disposed());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn Workspace>>> {
        self.workspaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
