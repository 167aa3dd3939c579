// src/copy/mod.rs

//! Parallel per-file copy: one child process per source file.
//!
//! The copier enumerates the regular files directly under a source
//! directory, fire-and-forgets one worker process per file, and then drains
//! the whole set through [`ProcessSet::reap_any`] until no children remain.
//! Workers genuinely run concurrently; the drain loop accepts them in
//! whatever order they finish.

pub mod worker;

use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::{ProcyardError, Result};
use crate::fs::FileSystem;
use crate::proc::{self, ProcessSet};

/// Hidden subcommand the copier re-invokes itself with, one child per file.
pub const WORKER_SUBCOMMAND: &str = "copy-one";

/// Default delay between successive worker spawns. Purely spreads
/// system-call load so the fan-out is observable; not needed for
/// correctness.
pub const DEFAULT_SPAWN_PACING: Duration = Duration::from_millis(100);

/// Accounting for one copy pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyReport {
    /// Workers actually spawned (one per file, minus spawn failures).
    pub spawned: usize,
    /// Workers reaped; equals `spawned` after a completed pass.
    pub reaped: usize,
    /// Workers that reported a copy failure via a nonzero status.
    pub failed: usize,
}

#[derive(Debug)]
pub struct ParallelCopier<F: FileSystem> {
    fs: F,
    source: PathBuf,
    dest: PathBuf,
    pacing: Option<Duration>,
    worker_program: PathBuf,
}

impl<F: FileSystem> ParallelCopier<F> {
    /// Create a copier from `source` into `dest`.
    ///
    /// The source must already be a directory; that is checked here, before
    /// any process is spawned. The destination (with missing parents) is
    /// created if absent.
    pub fn new(fs: F, source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let dest = dest.into();

        if !fs.is_dir(&source) {
            return Err(ProcyardError::NotADirectory(source));
        }
        fs.create_dir_all(&dest)?;

        let worker_program = std::env::current_exe()?;
        Ok(Self {
            fs,
            source,
            dest,
            pacing: Some(DEFAULT_SPAWN_PACING),
            worker_program,
        })
    }

    /// Override the inter-spawn pacing delay; `None` disables it.
    pub fn with_pacing(mut self, pacing: Option<Duration>) -> Self {
        self.pacing = pacing;
        self
    }

    /// Point the per-file worker at a different executable.
    ///
    /// The default is the current executable; tests point this at the built
    /// `procyard` binary since their own test harness has no `copy-one`
    /// subcommand.
    pub fn with_worker_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.worker_program = program.into();
        self
    }

    /// Copy every regular file under the source directory.
    ///
    /// Spawns are fire-and-forget; once all files have been issued, every
    /// outstanding worker is reaped, so no child remains when this returns.
    /// A worker's copy failure is isolated: it is logged and counted, never
    /// retried, and never aborts its siblings.
    pub async fn copy_all(&self) -> Result<CopyReport> {
        let files = self.regular_files()?;
        let mut report = CopyReport::default();
        let mut outstanding = ProcessSet::new();

        info!(
            source = ?self.source,
            dest = ?self.dest,
            files = files.len(),
            "starting copy pass"
        );

        for file in &files {
            let Some(name) = file.file_name() else {
                continue;
            };
            let dest_file = self.dest.join(name);

            let args = [
                OsStr::new(WORKER_SUBCOMMAND),
                file.as_os_str(),
                dest_file.as_os_str(),
            ];
            match proc::spawn(&self.worker_program, args) {
                Ok(child) => {
                    debug!(file = ?file, pid = child.pid(), "spawned copy worker");
                    outstanding.track(child);
                    report.spawned += 1;
                }
                Err(err) => {
                    warn!(file = ?file, error = %err, "could not spawn copy worker; skipping file");
                }
            }

            if let Some(pacing) = self.pacing {
                tokio::time::sleep(pacing).await;
            }
        }

        // Drain every outstanding worker, in whatever order they finish.
        while let Some(reaped) = outstanding.reap_any().await {
            report.reaped += 1;
            if reaped.status.success() {
                debug!(pid = reaped.pid, "copy worker finished");
            } else {
                report.failed += 1;
                warn!(pid = reaped.pid, status = %reaped.status, "copy worker failed");
            }
        }

        info!(
            spawned = report.spawned,
            reaped = report.reaped,
            failed = report.failed,
            "copy pass complete"
        );
        Ok(report)
    }

    fn regular_files(&self) -> Result<Vec<PathBuf>> {
        let mut entries = self.fs.read_dir(&self.source)?;
        entries.retain(|path| self.fs.is_file(path));
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::fs::RealFileSystem;
    use std::path::Path;

    #[test]
    fn constructor_rejects_missing_source_before_touching_dest() {
        let fs = MockFileSystem::new();
        let err =
            ParallelCopier::new(fs.clone(), "missing-src", "new-dest").unwrap_err();
        assert!(matches!(err, ProcyardError::NotADirectory(_)));
        assert!(!fs.exists(Path::new("new-dest")));
    }

    #[test]
    fn constructor_creates_the_destination() -> Result<()> {
        let fs = MockFileSystem::new();
        fs.add_file("src/a.txt", "a");

        ParallelCopier::new(fs.clone(), "src", "out/nested")?;
        assert!(fs.is_dir(Path::new("out/nested")));
        Ok(())
    }

    #[test]
    fn enumeration_skips_directories_and_sorts() -> Result<()> {
        let fs = MockFileSystem::new();
        fs.add_file("src/b.txt", "b");
        fs.add_file("src/a.txt", "a");
        fs.add_file("src/sub/nested.txt", "n");

        let copier = ParallelCopier::new(fs, "src", "dest")?;
        let files = copier.regular_files()?;
        assert_eq!(
            files,
            vec![PathBuf::from("src/a.txt"), PathBuf::from("src/b.txt")]
        );
        Ok(())
    }

    #[tokio::test]
    async fn empty_source_spawns_nothing() -> Result<()> {
        let dir = tempfile::tempdir().map_err(ProcyardError::from)?;
        let source = dir.path().join("src");
        let dest = dir.path().join("dest");
        std::fs::create_dir(&source).map_err(ProcyardError::from)?;

        let copier = ParallelCopier::new(RealFileSystem, source, dest.clone())?
            .with_pacing(None);
        let report = copier.copy_all().await?;

        assert_eq!(report, CopyReport::default());
        assert!(dest.is_dir());
        Ok(())
    }
}
