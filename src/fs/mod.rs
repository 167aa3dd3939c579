// src/fs/mod.rs

//! Filesystem capability used by the watcher and the copier.
//!
//! Both components only need directory listings, a handful of metadata
//! queries and simple file mutation, so they are written once against this
//! trait and exercised in tests through [`mock::MockFileSystem`].

use std::fmt::Debug;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether any of the owner/group/other execute bits is set.
    fn is_executable(&self, path: &Path) -> bool;

    /// Return a list of entries in a directory.
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Mark a file executable (0o755).
    fn set_executable(&self, path: &Path) -> Result<()>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_executable(&self, path: &Path) -> bool {
        fs::metadata(path)
            .map(|meta| meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry?;
            entries.push(entry.path());
        }
        Ok(entries)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
        }
        fs::write(path, contents).with_context(|| format!("writing file {:?}", path))?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("removing file {:?}", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))
    }

    fn set_executable(&self, path: &Path) -> Result<()> {
        let meta = fs::metadata(path).with_context(|| format!("reading metadata of {:?}", path))?;
        let mut perms = meta.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)
            .with_context(|| format!("setting permissions on {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_fs_reports_exec_bits() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let fs = RealFileSystem;

        let path = dir.path().join("tool.sh");
        fs.write(&path, b"#!/bin/sh\n")?;
        assert!(!fs.is_executable(&path));

        fs.set_executable(&path)?;
        assert!(fs.is_executable(&path));
        Ok(())
    }

    #[test]
    fn real_fs_lists_and_removes_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let fs = RealFileSystem;

        let nested = dir.path().join("a/b");
        fs.create_dir_all(&nested)?;
        fs.write(&nested.join("one.txt"), b"one")?;
        fs.write(&nested.join("two.txt"), b"two")?;

        let mut entries = fs.read_dir(&nested)?;
        entries.sort();
        assert_eq!(entries.len(), 2);
        assert!(fs.is_file(&entries[0]));

        fs.remove_file(&nested.join("one.txt"))?;
        assert!(!fs.exists(&nested.join("one.txt")));
        assert_eq!(fs.read_dir(&nested)?.len(), 1);
        Ok(())
    }
}
