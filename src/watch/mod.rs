// src/watch/mod.rs

//! Directory watcher: poll for executable scripts, run each to completion,
//! delete it.
//!
//! The watcher is a small state machine: SCAN the directory; if nothing is
//! eligible, SLEEP for the poll interval and scan again; otherwise DISPATCH
//! every eligible script sequentially (spawn the interpreter, wait, log the
//! outcome, delete the script) and return to SCAN. Child processes are used
//! for isolation here, not parallelism: a misbehaving script cannot corrupt
//! the watcher itself.

pub mod scan;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::errors::{ProcyardError, Result};
use crate::fs::FileSystem;
use crate::proc::{self, ExitKind};

/// Interpreter used to run eligible scripts.
const SHELL: &str = "sh";

/// Sleep interval while the watched directory has no eligible scripts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// How long a watch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Loop until stopped externally.
    Unbounded,
    /// Stop starting new scan cycles once this much wall-clock time has
    /// elapsed. The check happens only between full dispatch cycles, so a
    /// run may overshoot by the time the final cycle's scripts take.
    Bounded(Duration),
}

/// Outcome of one script dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    pub path: PathBuf,
    pub status: ExitKind,
    pub deleted: bool,
}

/// Accounting for one dispatch cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Scripts that were spawned, waited on, and then deleted (or at least
    /// had deletion attempted).
    pub runs: Vec<ScriptRun>,
    /// Scripts skipped because the interpreter could not be spawned; they
    /// stay in place and remain eligible for the next scan.
    pub spawn_failures: usize,
}

#[derive(Debug)]
pub struct DirectoryWatcher<F: FileSystem> {
    fs: F,
    dir: PathBuf,
    interval: Duration,
}

impl<F: FileSystem> DirectoryWatcher<F> {
    /// Create a watcher for `dir`.
    ///
    /// The directory must exist at construction time; it is validated once
    /// here and not re-checked per poll.
    pub fn new(fs: F, dir: impl Into<PathBuf>, interval: Duration) -> Result<Self> {
        let dir = dir.into();
        if !fs.is_dir(&dir) {
            return Err(ProcyardError::NotADirectory(dir));
        }
        Ok(Self { fs, dir, interval })
    }

    /// Scan the watched directory for currently eligible scripts.
    pub fn scan(&self) -> Vec<PathBuf> {
        scan::eligible_scripts(&self.fs, &self.dir)
    }

    /// Watch loop.
    ///
    /// Scans, dispatches whatever is eligible, and sleeps while idle. In
    /// [`RunMode::Bounded`] the elapsed time is checked at the top of each
    /// scan iteration; scripts already dispatched are never interrupted.
    pub async fn run(&self, mode: RunMode) -> Result<()> {
        let started = Instant::now();
        info!(dir = ?self.dir, ?mode, "watching directory for executable scripts");

        loop {
            if let RunMode::Bounded(limit) = mode {
                if started.elapsed() >= limit {
                    info!(elapsed = ?started.elapsed(), "watch duration elapsed; stopping");
                    return Ok(());
                }
            }

            let scripts = self.scan();
            if scripts.is_empty() {
                tokio::time::sleep(self.interval).await;
                continue;
            }

            self.dispatch_cycle(&scripts).await;
        }
    }

    /// Run one dispatch cycle over `scripts`, sequentially.
    ///
    /// Each script is spawned through the shell, waited on to completion,
    /// logged, and then deleted regardless of its exit status. A nonzero
    /// exit is logged but never halts the cycle.
    pub async fn dispatch_cycle(&self, scripts: &[PathBuf]) -> CycleReport {
        let mut report = CycleReport::default();

        for script in scripts {
            match self.run_script(script).await {
                Ok(run) => report.runs.push(run),
                Err(err) => {
                    warn!(
                        script = ?script,
                        error = %err,
                        "could not spawn interpreter; leaving script for the next scan"
                    );
                    report.spawn_failures += 1;
                }
            }
        }

        report
    }

    async fn run_script(&self, script: &Path) -> Result<ScriptRun> {
        let child = proc::spawn(SHELL, [script.as_os_str()])?;
        let pid = child.pid();
        info!(script = ?script, pid, "running script");

        let status = child.wait().await;
        match status {
            ExitKind::Exited(code) => {
                info!(script = ?script, pid, code, "script finished")
            }
            ExitKind::Signaled(signal) => {
                warn!(script = ?script, pid, signal, "script terminated by signal")
            }
            ExitKind::Unknown => {
                error!(script = ?script, pid, "script status could not be retrieved")
            }
        }

        // The script is consumed regardless of how it ended.
        let deleted = match self.fs.remove_file(script) {
            Ok(()) => {
                info!(script = ?script, "deleted script");
                true
            }
            Err(err) => {
                error!(
                    script = ?script,
                    error = %err,
                    "failed to delete script; it stays eligible for the next scan"
                );
                false
            }
        };

        Ok(ScriptRun {
            path: script.to_path_buf(),
            status,
            deleted,
        })
    }
}
