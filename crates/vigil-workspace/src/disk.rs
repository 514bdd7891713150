use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::path::{join, normalize};
use crate::{DISK_WORKSPACE_PREFIX, Workspace, WorkspaceError, WorkspaceKind};

/// Workspace rooted at a freshly created, uniquely named directory.
///
/// The directory outlives the value; only [`Workspace::cleanup`] removes it.
#[derive(Debug)]
pub struct DiskWorkspace {
    root: PathBuf,
    disposed: AtomicBool,
}

impl DiskWorkspace {
    /// Create a workspace directory under the OS temp root.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Io`] if the directory cannot be created.
    pub fn create() -> Result<Self, WorkspaceError> {
        Self::create_in(&std::env::temp_dir())
    }

    /// Create a workspace directory under `base`, creating `base` if needed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Io`] if either directory cannot be created.
    pub fn create_in(base: &Path) -> Result<Self, WorkspaceError> {
        fs::create_dir_all(base).map_err(|e| WorkspaceError::io(base, e))?;
        let root = tempfile::Builder::new()
            .prefix(DISK_WORKSPACE_PREFIX)
            .tempdir_in(base)
            .map_err(|e| WorkspaceError::io(base, e))?
            .keep();
        debug!(root = %root.display(), "created disk workspace");
        Ok(Self {
            root,
            disposed: AtomicBool::new(false),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn live(&self) -> Result<(), WorkspaceError> {
        if self.disposed.load(Ordering::Acquire) {
            Err(WorkspaceError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl Workspace for DiskWorkspace {
    fn kind(&self) -> WorkspaceKind {
        WorkspaceKind::Disk
    }

    fn path(&self, segments: &[&str]) -> PathBuf {
        join(&self.root, segments)
    }

    fn write_file(&self, rel: &str, data: &[u8]) -> Result<(), WorkspaceError> {
        let rel_path = normalize(rel)?;
        self.live()?;
        let full = self.root.join(rel_path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| WorkspaceError::io(parent, e))?;
        }
        fs::write(&full, data).map_err(|e| WorkspaceError::io(&full, e))
    }

    fn read_file(&self, rel: &str) -> Result<Vec<u8>, WorkspaceError> {
        let rel_path = normalize(rel)?;
        self.live()?;
        let full = self.root.join(rel_path);
        fs::read(&full).map_err(|e| match e.kind() {
            ErrorKind::NotFound => WorkspaceError::NotFound(rel.to_string()),
            _ => WorkspaceError::io(&full, e),
        })
    }

    fn cleanup(&self) -> Result<(), WorkspaceError> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => debug!(root = %self.root.display(), "removed disk workspace"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(WorkspaceError::io(&self.root, e)),
        }
        self.disposed.store(true, Ordering::Release);
        Ok(())
    }

    fn disk_root(&self) -> Option<&Path> {
        Some(&self.root)
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}
