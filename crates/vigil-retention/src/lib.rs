//! # vigil-retention
//!
//! Storage lifecycle outside the per-run workspace.
//!
//! - [`Reclaimer`]: threshold-triggered garbage collection of tracked disk
//!   workspaces and pattern-matched leftovers under a scratch base directory
//! - [`Archivist`]: bounded rotation of report snapshots into monthly archive
//!   buckets, with expiry of old buckets
//!
//! Both assume a single process. Nothing here locks the scratch base or the
//! snapshot directories against a concurrent reclaimer or archivist.

mod archivist;
pub mod error;
mod fsutil;
mod probe;
mod reclaimer;
mod tracker;

pub use archivist::{ArchiveCleanup, ArchiveOutcome, Archivist, ArtifactLayout};
pub use error::RetentionError;
pub use probe::{FixedStorageProbe, StorageProbe, SystemStorageProbe};
pub use reclaimer::{CleanupResult, Reclaimer, StorageCheck};
pub use tracker::WorkspaceTracker;
