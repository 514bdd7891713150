use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::path::{join, normalize};
use crate::{Workspace, WorkspaceError, WorkspaceKind};

const VIRTUAL_ROOT: &str = "/";

/// Workspace that keeps files in a map. Disposal drops the map.
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    files: RwLock<Option<HashMap<PathBuf, Vec<u8>>>>,
}

impl MemoryWorkspace {
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: RwLock::new(Some(HashMap::new())),
        }
    }

    /// Number of stored files. Zero once disposed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, HashMap::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Workspace for MemoryWorkspace {
    fn kind(&self) -> WorkspaceKind {
        WorkspaceKind::Memory
    }

    fn path(&self, segments: &[&str]) -> PathBuf {
        join(Path::new(VIRTUAL_ROOT), segments)
    }

    fn write_file(&self, rel: &str, data: &[u8]) -> Result<(), WorkspaceError> {
        let key = normalize(rel)?;
        let mut guard = self.files.write().unwrap_or_else(PoisonError::into_inner);
        let files = guard.as_mut().ok_or(WorkspaceError::Disposed)?;
        let under_file = key.ancestors().skip(1).any(|a| files.contains_key(a));
        let is_dir = files.keys().any(|k| k != &key && k.starts_with(&key));
        if under_file || is_dir {
            return Err(WorkspaceError::Conflict(rel.to_string()));
        }
        files.insert(key, data.to_vec());
        Ok(())
    }

    fn read_file(&self, rel: &str) -> Result<Vec<u8>, WorkspaceError> {
        let key = normalize(rel)?;
        let guard = self.files.read().unwrap_or_else(PoisonError::into_inner);
        let files = guard.as_ref().ok_or(WorkspaceError::Disposed)?;
        files
            .get(&key)
            .cloned()
            .ok_or_else(|| WorkspaceError::NotFound(rel.to_string()))
    }

    fn cleanup(&self) -> Result<(), WorkspaceError> {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }

    fn disk_root(&self) -> Option<&Path> {
        None
    }

    fn is_disposed(&self) -> bool {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
