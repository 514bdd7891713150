use std::fs;
use std::io;
use std::path::Path;

use ignore::WalkBuilder;

/// Total size in bytes of a file, or of every file under a directory.
///
/// Symlinks are measured, not followed. Unreadable entries count as zero.
pub(crate) fn entry_size(path: &Path) -> u64 {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return 0;
    };
    if !meta.is_dir() {
        return meta.len();
    }
    let mut builder = WalkBuilder::new(path);
    builder.standard_filters(false);
    builder.hidden(false);
    builder
        .build()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_some_and(|ft| !ft.is_dir()))
        .filter_map(|e| fs::symlink_metadata(e.path()).ok())
        .map(|m| m.len())
        .sum()
}

/// Remove a file, symlink or directory tree.
pub(crate) fn remove_entry(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Recursively copy the contents of `src` into `dst`, creating `dst`.
pub(crate) fn copy_dir(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Move a directory, falling back to copy-and-remove across filesystems.
pub(crate) fn move_dir(src: &Path, dst: &Path) -> io::Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    copy_dir(src, dst)?;
    fs::remove_dir_all(src)
}

/// Names of the subdirectories of `dir`. `Ok(None)` if `dir` does not exist.
pub(crate) fn subdirectories(dir: &Path) -> io::Result<Option<Vec<String>>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(Some(names))
}
