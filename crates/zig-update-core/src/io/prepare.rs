//! Destination preparation.
//!
//! The destination is removed wholesale before anything is extracted, so a
//! run never leaves old and new toolchain files side by side.

use std::fs;
use std::io;
use std::path::Path;

/// Remove `path` and everything below it. Missing paths are fine.
///
/// A symlink at `path` is removed itself; its target is left alone.
pub fn prepare_destination(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            tracing::debug!("Removing existing directory {}", path.display());
            fs::remove_dir_all(path)
        }
        Ok(_) => {
            tracing::debug!("Removing existing file {}", path.display());
            fs::remove_file(path)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_destination_is_noop() {
        let dir = tempdir().unwrap();
        prepare_destination(&dir.path().join("absent")).unwrap();
        assert!(dir.path().exists());
    }

    #[test]
    fn removes_tree() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("zig");
        fs::create_dir_all(dest.join("lib/std")).unwrap();
        fs::write(dest.join("stale.txt"), "old").unwrap();
        fs::write(dest.join("lib/std/std.zig"), "old").unwrap();

        prepare_destination(&dest).unwrap();
        assert!(!dest.exists());
        assert!(dir.path().exists());
    }

    #[test]
    fn removes_plain_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("zig");
        fs::write(&dest, "not a directory").unwrap();

        prepare_destination(&dest).unwrap();
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn removes_symlink_not_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("real");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "keep").unwrap();
        let link = dir.path().join("zig");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        prepare_destination(&link).unwrap();
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.join("keep.txt").exists());
    }
}
