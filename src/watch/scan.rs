// src/watch/scan.rs

//! Script eligibility rules and the per-cycle directory scan.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::error;

use crate::fs::FileSystem;

/// Filename extension a script must carry to be considered.
pub const SCRIPT_EXTENSION: &str = "sh";

/// Whether `path` is a regular file named `*.sh` with at least one execute
/// bit set.
pub fn is_eligible_script<F: FileSystem>(fs: &F, path: &Path) -> bool {
    path.extension() == Some(OsStr::new(SCRIPT_EXTENSION))
        && fs.is_file(path)
        && fs.is_executable(path)
}

/// List the eligible scripts currently in `dir`, sorted by path.
///
/// The result is recomputed from scratch on every call; nothing is cached
/// across cycles. A listing failure is logged and yields an empty set, so a
/// transiently unreadable directory stalls the watcher instead of killing
/// it.
pub fn eligible_scripts<F: FileSystem>(fs: &F, dir: &Path) -> Vec<PathBuf> {
    let mut entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            error!(dir = ?dir, error = %err, "failed to list watch directory");
            return Vec::new();
        }
    };

    entries.retain(|path| is_eligible_script(fs, path));
    entries.sort();
    entries
}
