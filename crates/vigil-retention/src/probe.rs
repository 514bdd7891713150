use std::path::Path;

use sysinfo::Disks;

use crate::RetentionError;

/// Reports how full the filesystem holding a path is.
pub trait StorageProbe: Send + Sync {
    /// Used space as a percentage in `0.0..=100.0`.
    ///
    /// # Errors
    ///
    /// Returns [`RetentionError::Probe`] when no filesystem can be found.
    fn usage_percent(&self, path: &Path) -> Result<f64, RetentionError>;
}

/// Probe backed by the operating system's disk list.
///
/// The disk whose mount point is the longest prefix of the (canonical) path
/// is the one measured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemStorageProbe;

impl StorageProbe for SystemStorageProbe {
    #[allow(clippy::cast_precision_loss)]
    fn usage_percent(&self, path: &Path) -> Result<f64, RetentionError> {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .list()
            .iter()
            .filter(|d| path.starts_with(d.mount_point()))
            .max_by_key(|d| d.mount_point().as_os_str().len())
            .ok_or_else(|| {
                RetentionError::Probe(format!("no mounted disk contains {}", path.display()))
            })?;

        let total = disk.total_space();
        if total == 0 {
            return Ok(0.0);
        }
        let used = total.saturating_sub(disk.available_space());
        Ok(used as f64 / total as f64 * 100.0)
    }
}

/// Probe that always reports the same usage.
#[derive(Debug, Clone, Copy)]
pub struct FixedStorageProbe(pub f64);

impl StorageProbe for FixedStorageProbe {
    fn usage_percent(&self, _path: &Path) -> Result<f64, RetentionError> {
        Ok(self.0)
    }
}
