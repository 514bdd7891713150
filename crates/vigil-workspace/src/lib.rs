//! # vigil-workspace
//!
//! Sandboxed, disposable scratch storage for analysis engines.
//!
//! Two interchangeable backends implement [`Workspace`]:
//! - [`MemoryWorkspace`]: a map of relative paths to bytes under a virtual `/` root
//! - [`DiskWorkspace`]: a uniquely named directory created under a base directory
//!
//! Every relative path is checked before use. A path with a `..` segment (or
//! an absolute path) fails with [`WorkspaceError::Traversal`] on both write and
//! read.
//!
//! Orchestration code never constructs a backend directly; it receives a
//! [`WorkspaceFactory`] so tests can substitute their own.

mod disk;
pub mod error;
mod factory;
mod memory;
mod path;

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use disk::DiskWorkspace;
pub use error::WorkspaceError;
pub use factory::{DiskWorkspaceFactory, MemoryWorkspaceFactory, WorkspaceFactory};
pub use memory::MemoryWorkspace;

/// Prefix of every disk workspace directory name.
pub const DISK_WORKSPACE_PREFIX: &str = "vigil-ws-";

/// Which backend holds a workspace's files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceKind {
    Memory,
    Disk,
}

impl WorkspaceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Disk => "disk",
        }
    }
}

impl std::fmt::Display for WorkspaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A disposable scratch area.
///
/// Implementations are safe to share across threads. Engines that need
/// isolation from each other should write under their own subdirectory.
pub trait Workspace: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> WorkspaceKind;

    /// Join `segments` onto the workspace root (`/` for memory workspaces).
    fn path(&self, segments: &[&str]) -> PathBuf;

    /// Write `data` at `rel`, creating intermediate directories.
    ///
    /// # Errors
    ///
    /// [`WorkspaceError::Traversal`] for paths leaving the root,
    /// [`WorkspaceError::Disposed`] after cleanup, or an I/O error. Writing
    /// below an existing file, or onto an existing directory, fails on every
    /// backend.
    fn write_file(&self, rel: &str, data: &[u8]) -> Result<(), WorkspaceError>;

    /// Read the bytes stored at `rel`.
    ///
    /// # Errors
    ///
    /// [`WorkspaceError::Traversal`] for paths leaving the root,
    /// [`WorkspaceError::NotFound`] for missing files,
    /// [`WorkspaceError::Disposed`] after cleanup, or an I/O error.
    fn read_file(&self, rel: &str) -> Result<Vec<u8>, WorkspaceError>;

    /// Dispose of the workspace. Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the disk root exists but cannot be removed.
    fn cleanup(&self) -> Result<(), WorkspaceError>;

    /// Root directory on disk, `None` for memory workspaces.
    fn disk_root(&self) -> Option<&Path>;

    fn is_disposed(&self) -> bool;
}
